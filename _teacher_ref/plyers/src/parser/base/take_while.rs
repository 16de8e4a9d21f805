use std::io::{Read, Seek};

use crate::{
    parser::{error::{StreamError, AddressWrapper}, read_byte::ReadByte},
    Parser,
};

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct TakeWhileError(#[from] AddressWrapper<StreamError>);

#[derive(Debug, Clone)]
pub struct TakeWhile<F> {
    func: F,
}

pub fn take_while<F>(predicate: F) -> TakeWhile<F>
where
    F: FnMut(u8) -> bool,
{
    TakeWhile { func: predicate }
}

impl<F> Parser for TakeWhile<F>
where
    F: FnMut(u8) -> bool,
{
    type Error = TakeWhileError;
    type Item = Vec<u8>;

    fn parse<R>(mut self, r: &mut R) -> Result<Self::Item, Self::Error>
    where
        Self: Sized,
        R: Read + Seek,
    {
        let mut buffer = vec![];
        loop {
            let (byte, _) = r.read_byte()?;

            if !(self.func)(byte) {
                return Ok(buffer);
            } else {
                buffer.push(byte);
            }
        }
    }
}
