use either::{Either, Left, Right};
use nom::{
branch::alt,
bytes::complete::{tag, take_till1, take_while1},
character::{
    complete::{alpha1, alphanumeric1},
    is_newline, is_space,
},
combinator::recognize,
error::ParseError,
multi::many0_count,
sequence::pair,
IResult,
};

pub fn split_vecs_of_either<L, R>(mut input: Vec<Either<L, R>>) -> (Vec<L>, Vec<R>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for left_right in input.drain(..) {
        match left_right {
            Left(l) => left.push(l),
            Right(r) => right.push(r),
        }
    }

    (left, right)
}

pub fn is_whitespace(b: u8) -> bool {
    (b >= 0x09 && b <= 0x0d) || (b == 0x20)
}

pub fn whitespace<'a, E: ParseError<&'a [u8]>>(input: &'a [u8]) -> IResult<&'a [u8], &'a [u8], E> {
    take_while1(is_whitespace)(input)
}

pub fn space<'a, E: ParseError<&'a [u8]>>(input: &'a [u8]) -> IResult<&'a [u8], &'a [u8], E> {
    take_while1(is_space)(input)
}

pub fn newline<'a, E: ParseError<&'a [u8]>>(input: &'a [u8]) -> IResult<&'a [u8], &'a [u8], E> {
    take_while1(is_newline)(input)
}

pub fn single_line_text<'a, E: ParseError<&'a [u8]>>(input: &'a [u8]) -> IResult<&'a [u8], &'a [u8], E> {
    take_till1(is_newline)(input)
}

pub fn identifier<'a, E: ParseError<&'a [u8]>>(input: &'a [u8]) -> IResult<&'a [u8], &'a [u8], E> {
    recognize(pair(
        alt((alpha1, tag(b"_"))),
        many0_count(alt((alphanumeric1, tag(b"_")))),
    ))(input)
}
