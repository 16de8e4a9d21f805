use nom::{bytes::complete::tag, IResult};

const PLY: &'static [u8] = b"ply";

pub fn ply(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(PLY)(input)
}
