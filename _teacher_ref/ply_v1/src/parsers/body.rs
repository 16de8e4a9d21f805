use super::base::{ascii_floating_point, ascii_signed_integral, ascii_unsigned_integral, lex};
use combine::{
    byteorder::{ByteOrder, BE, LE},
    error::ParseError,
    parser::{
        byte::num,
        combinator::{factory, no_partial, opaque},
        item::any,
        repeat::count_min_max,
        Parser,
    },
    stream::Stream,
};
use crate::types::{Body, CountType, DataType, Element, ElementData, FormatType, Header, PropertyData};
use crate::{impl_ascii_scalar_property, impl_ascii_vector_property};

impl_ascii_scalar_property!(pai8, ascii_signed_integral, i8);
impl_ascii_scalar_property!(pau8, ascii_unsigned_integral, u8);
impl_ascii_scalar_property!(pai16, ascii_signed_integral, i16);
impl_ascii_scalar_property!(pau16, ascii_unsigned_integral, u16);
impl_ascii_scalar_property!(pai32, ascii_signed_integral, i32);
impl_ascii_scalar_property!(pau32, ascii_unsigned_integral, u32);
impl_ascii_scalar_property!(paf32, ascii_floating_point, f32);
impl_ascii_scalar_property!(paf64, ascii_floating_point, f64);
impl_ascii_vector_property!(pavi8, ascii_signed_integral, i8);
impl_ascii_vector_property!(pavu8, ascii_unsigned_integral, u8);
impl_ascii_vector_property!(pavi16, ascii_signed_integral, i16);
impl_ascii_vector_property!(pavu16, ascii_unsigned_integral, u16);
impl_ascii_vector_property!(pavi32, ascii_signed_integral, i32);
impl_ascii_vector_property!(pavu32, ascii_unsigned_integral, u32);
impl_ascii_vector_property!(pavf32, ascii_floating_point, f32);
impl_ascii_vector_property!(pavf64, ascii_floating_point, f64);

fn ascii_count<'a, I>() -> impl Parser<Input = I, Output = usize> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    lex(ascii_unsigned_integral::<I, usize>()).expected("an ascii unsigned integral interpreted as vector length")
}

fn ascii_scalar<'a, I>(data_type: DataType) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    opaque(
        move |f: &mut dyn FnMut(&mut dyn Parser<Input = _, Output = _, PartialState = _>)| match data_type {
            DataType::Int8 => f(&mut no_partial(pai8().expected("an ascii i8 scalar"))),
            DataType::Uint8 => f(&mut no_partial(pau8().expected("an ascii u8 scalar"))),
            DataType::Int16 => f(&mut no_partial(pai16().expected("an ascii i16 scalar"))),
            DataType::Uint16 => f(&mut no_partial(pau16().expected("an ascii u16 scalar"))),
            DataType::Int32 => f(&mut no_partial(pai32().expected("an ascii i32 scalar"))),
            DataType::Uint32 => f(&mut no_partial(pau32().expected("an ascii u32 scalar"))),
            DataType::Float32 => f(&mut no_partial(paf32().expected("an ascii f32 scalar"))),
            DataType::Float64 => f(&mut no_partial(paf64().expected("an ascii f64 scalar"))),
        },
    )
}

fn ascii_vector<'a, I>(data_type: DataType) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    ascii_count().then(move |c| {
        opaque(
            move |f: &mut dyn FnMut(&mut dyn Parser<Input = _, Output = _, PartialState = _>)| match data_type {
                DataType::Int8 => f(&mut no_partial(pavi8(c).expected("an ascii vector of i8"))),
                DataType::Uint8 => f(&mut no_partial(pavu8(c).expected("an ascii vector of u8"))),
                DataType::Int16 => f(&mut no_partial(pavi16(c).expected("an ascii vector of i16"))),
                DataType::Uint16 => f(&mut no_partial(pavu16(c).expected("an ascii vector of u16"))),
                DataType::Int32 => f(&mut no_partial(pavi32(c).expected("an ascii vector of i32"))),
                DataType::Uint32 => f(&mut no_partial(pavu32(c).expected("an ascii vector of u32"))),
                DataType::Float32 => f(&mut no_partial(pavf32(c).expected("an ascii vector of f32"))),
                DataType::Float64 => f(&mut no_partial(pavf64(c).expected("an ascii vector of f64"))),
            },
        )
    })
}

fn pbvi8<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, any().map(|b: u8| b as i8)).map(|b| b.into())
}

fn pbvu8<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, any().map(|b: u8| b)).map(|b| b.into())
}

fn pbvi16<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, num::i16::<T, _>()).map(|b| b.into())
}

fn pbvu16<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, num::u16::<T, _>()).map(|b| b.into())
}

fn pbvi32<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, num::i32::<T, _>()).map(|b| b.into())
}

fn pbvu32<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, num::u32::<T, _>()).map(|b| b.into())
}

fn pbvf32<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, num::f32::<T, _>()).map(|b| b.into())
}

fn pbvf64<'a, I, T>(count: usize) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    count_min_max::<Vec<_>, _>(count, count, num::f64::<T, _>()).map(|b| b.into())
}

fn binary_count<'a, I, T>(count_type: CountType) -> impl Parser<Input = I, Output = usize> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder,
{
    opaque(
        move |f: &mut dyn FnMut(&mut dyn Parser<Input = _, Output = _, PartialState = _>)| match count_type {
            CountType::Uint8 => f(&mut no_partial(
                any().map(|b: u8| b as usize).expected("a vector length of u8"),
            )),
            CountType::Uint16 => f(&mut no_partial(
                num::u16::<T, _>()
                    .map(|n| n as usize)
                    .expected("a vector length of u16"),
            )),
            CountType::Uint32 => f(&mut no_partial(
                num::u32::<T, _>()
                    .map(|n| n as usize)
                    .expected("a vector length of u32"),
            )),
        },
    )
}

fn binary_scalar<'a, I, T>(data_type: DataType) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    opaque(
        move |f: &mut dyn FnMut(&mut dyn Parser<Input = _, Output = _, PartialState = _>)| match data_type {
            DataType::Int8 => f(&mut no_partial(
                any()
                    .map(|b: u8| PropertyData::Int8(b as i8))
                    .expected("a binary i8 scalar"),
            )),
            DataType::Uint8 => f(&mut no_partial(
                any().map(|b: u8| PropertyData::Uint8(b)).expected("a binary u8 scalar"),
            )),
            DataType::Int16 => f(&mut no_partial(
                num::i16::<T, _>()
                    .map(PropertyData::Int16)
                    .expected("a binary i16 scalar"),
            )),
            DataType::Uint16 => f(&mut no_partial(
                num::u16::<T, _>()
                    .map(|n| PropertyData::Uint16(n))
                    .expected("a binary u16 scalar"),
            )),
            DataType::Int32 => f(&mut no_partial(
                num::i32::<T, _>()
                    .map(|n| PropertyData::Int32(n))
                    .expected("a binary i32 scalar"),
            )),
            DataType::Uint32 => f(&mut no_partial(
                num::u32::<T, _>()
                    .map(|n| PropertyData::Uint32(n))
                    .expected("a binary u32 scalar"),
            )),
            DataType::Float32 => f(&mut no_partial(
                num::f32::<T, _>()
                    .map(|n| PropertyData::Float32(n))
                    .expected("a binary f32 scalar"),
            )),
            DataType::Float64 => f(&mut no_partial(
                num::f64::<T, _>()
                    .map(|n| PropertyData::Float64(n))
                    .expected("a binary f64 scalar"),
            )),
        },
    )
}

fn binary_vector<'a, I, T>(
    count_type: CountType,
    data_type: DataType,
) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
    T: ByteOrder + 'a,
{
    binary_count::<I, T>(count_type).then(move |c| {
        opaque(
            move |f: &mut dyn FnMut(&mut dyn Parser<Input = _, Output = _, PartialState = _>)| match data_type {
                DataType::Int8 => f(&mut no_partial(pbvi8::<I, T>(c).expected("a binary vector of i8"))),
                DataType::Uint8 => f(&mut no_partial(pbvu8::<I, T>(c).expected("a binary vector of u8"))),
                DataType::Int16 => f(&mut no_partial(pbvi16::<I, T>(c).expected("a binary vector of i16"))),
                DataType::Uint16 => f(&mut no_partial(pbvu16::<I, T>(c).expected("a binary vector of u16"))),
                DataType::Int32 => f(&mut no_partial(pbvi32::<I, T>(c).expected("a binary vector of i32"))),
                DataType::Uint32 => f(&mut no_partial(pbvu32::<I, T>(c).expected("a binary vector of u32"))),
                DataType::Float32 => f(&mut no_partial(pbvf32::<I, T>(c).expected("a binary vector of f32"))),
                DataType::Float64 => f(&mut no_partial(pbvf64::<I, T>(c).expected("a binary vector of f64"))),
            },
        )
    })
}

fn property_data<'a, I>(
    format: FormatType,
    data_type: DataType,
    count_data_type: Option<CountType>,
) -> impl Parser<Input = I, Output = PropertyData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    opaque(
        move |f: &mut dyn FnMut(&mut dyn Parser<Input = _, Output = _, PartialState = _>)| match format {
            FormatType::Ascii => if count_data_type.is_some() {
                f(&mut no_partial(ascii_vector(data_type)))
            } else {
                f(&mut no_partial(ascii_scalar(data_type)))
            },
            FormatType::BinaryBigEndian => if let Some(ct) = count_data_type {
                f(&mut no_partial(binary_vector::<_, BE>(ct, data_type)))
            } else {
                f(&mut no_partial(binary_scalar::<_, BE>(data_type)))
            },
            FormatType::BinaryLittleEndian => if let Some(ct) = count_data_type {
                f(&mut no_partial(binary_vector::<_, LE>(ct, data_type)))
            } else {
                f(&mut no_partial(binary_scalar::<_, LE>(data_type)))
            },
        },
    )
}

fn inner_element_data<'a, I>(format: FormatType, element: Element) -> impl Parser<Input = I, Output = ElementData> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    let property_count = element.properties.len();
    let mut parsers = element
        .properties
        .into_iter()
        .map(move |p| property_data(format, p.data_type, p.count_data_type));

    let dynamic_parser = factory(move || parsers.next().expect("Premature end of the property parsers iterator"));

    count_min_max(property_count, property_count, dynamic_parser)
        .map(|properties| ElementData { properties })
        .expected("data for a single occurrence of an element")
}

fn element_data<'a, I>(format: FormatType, element: Element) -> impl Parser<Input = I, Output = Vec<ElementData>> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    let element_count = element.count;
    let dynamic_parser = factory(move || inner_element_data(format, element.clone()));

    count_min_max(element_count, element_count, dynamic_parser).expected("data for all occurrences of an element")
}

pub fn body<'a, I>(header: Header) -> impl Parser<Input = I, Output = Body> + 'a
where
    I: Stream<Item = u8, Range = u8> + 'a,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    let count = header.elements.len();
    let format = header.format.format;
    let mut parsers = header.elements.into_iter().map(move |e| element_data(format, e));

    count_min_max(count, count, factory(move || parsers.next().unwrap()))
        .map(|elements| Body { elements })
        .expected("data for the entire ply file")
}
