use log::debug;
use std::num::{ParseFloatError, ParseIntError};

use nom::{
    combinator::{all_consuming, flat_map, map},
    error::{context, ContextError, FromExternalError, ParseError},
    IResult,
};

use self::{body::body_fct, header::header_fct};
use super::types::{ElementId, Ply, PropertyId};
use crate::urn::Urn;

mod body;
mod common;
pub mod error;
mod header;

#[derive(Debug, thiserror::Error)]
pub enum ParseNumError {
    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
    #[error(transparent)]
    ParseIntError(#[from] ParseIntError),
    #[error(transparent)]
    ParseFloatError(#[from] ParseFloatError),
    #[error("Unable to cast from source to output numeric type")]
    NumCastError,
}

pub fn parse_ply<
    'a,
    E: ParseError<&'a [u8]> + FromExternalError<&'a [u8], ParseNumError> + ContextError<&'a [u8]> + 'a,
>(
    input: &'a [u8],
) -> IResult<&'a [u8], Ply, E> {
    let mut e_urn = Urn::<ElementId>::default();
    let mut p_urn = Urn::<PropertyId>::default();
    let e_urn_ref = &mut e_urn;
    let p_urn_ref = &mut p_urn;

    let r = context(
        "plyers::de::parse_ply#0",
        all_consuming(flat_map(header_fct(e_urn_ref, p_urn_ref), |descriptor| {
            debug!("Completed PLY header parsing, continuing to the body");
            context(
                "plyers::de::parse_ply#1",
                map(body_fct(descriptor.clone()), move |data| {
                    debug!("Completed PLY body parsing, assembling output data");
                    Ply {
                        descriptor: descriptor.clone(),
                        data,
                    }
                }),
            )
        })),
    )(input);

    r
}
