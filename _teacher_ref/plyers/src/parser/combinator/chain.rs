use std::io::{Read, Seek};

use crate::Parser;

#[derive(Debug, Clone)]
pub struct Chain<P, Q> {
    a: P,
    b: Q,
}

impl<P, Q> Chain<P, Q> {
    pub(crate) fn new(a: P, b: Q) -> Self {
        Chain { a, b }
    }
}

impl<P, Q> Parser for Chain<P, Q>
where
    P: Parser,
    P::Error: std::error::Error + 'static,
    Q: Parser,
    Q::Error: std::error::Error + 'static,
{
    type Error = Box<dyn std::error::Error + 'static>;
    type Item = (P::Item, Q::Item);

    fn parse<R>(self, r: &mut R) -> Result<Self::Item, Self::Error>
    where
        Self: Sized,
        R: Read + Seek,
    {
        let ap = self.a.parse(r)?;

        let bp = self.b.parse(r)?;

        Ok((ap, bp))
    }
}
