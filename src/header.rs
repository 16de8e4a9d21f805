//! Header grammar and parser.
//!
//! Keyword recognition reuses `nom`'s `alt`/`tag`/`value` idiom the way the
//! upstream header parser's `data_type`/`count_type`/`format_type` functions
//! do; the line-level lexing (terminator detection, leading/trailing/extra
//! space rejection) is hand-rolled here because the stricter whitespace
//! policy this format adopts (see the design notes on the two divergent
//! reference whitespace policies) does not compose cleanly with `nom`'s
//! whitespace-skipping combinators.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::value;
use nom::IResult;
use tracing::{debug, trace};

use crate::error::HeaderError;
use crate::types::{CountType, DataType, ElementDecl, FormatType, Header, LineEnding, PropertyDecl, PropertyKind};

const MAGIC: &[u8] = b"ply";
const END_HEADER: &str = "end_header";

fn format_type_kw(input: &[u8]) -> IResult<&[u8], FormatType> {
    alt((
        value(FormatType::Ascii, tag("ascii")),
        value(FormatType::BinaryLittleEndian, tag("binary_little_endian")),
        value(FormatType::BinaryBigEndian, tag("binary_big_endian")),
    ))(input)
}

fn data_type_kw(input: &[u8]) -> IResult<&[u8], DataType> {
    alt((
        value(DataType::I8, alt((tag("char"), tag("int8")))),
        value(DataType::U8, alt((tag("uchar"), tag("uint8")))),
        value(DataType::I16, alt((tag("short"), tag("int16")))),
        value(DataType::U16, alt((tag("ushort"), tag("uint16")))),
        value(DataType::I32, alt((tag("int32"), tag("int")))),
        value(DataType::U32, alt((tag("uint32"), tag("uint")))),
        value(DataType::F32, alt((tag("float32"), tag("float")))),
        value(DataType::F64, alt((tag("float64"), tag("double")))),
    ))(input)
}

fn parse_data_type_token(token: &str) -> Option<DataType> {
    data_type_kw(token.as_bytes()).ok().and_then(|(rest, dt)| rest.is_empty().then_some(dt))
}

fn parse_format_type_token(token: &str) -> Option<FormatType> {
    format_type_kw(token.as_bytes()).ok().and_then(|(rest, ft)| rest.is_empty().then_some(ft))
}

/// Validates the version token against `0*1(\.0*)?`.
fn is_valid_version_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b'0' {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'1' {
        return false;
    }
    i += 1;
    if i == bytes.len() {
        return true;
    }
    if bytes[i] != b'.' {
        return false;
    }
    i += 1;
    while i < bytes.len() && bytes[i] == b'0' {
        i += 1;
    }
    i == bytes.len()
}

/// Splits `input` into `(line, rest)` at the first occurrence of `ending`,
/// failing if the first terminator byte sequence encountered does not match
/// `ending` exactly.
fn split_line<'a>(input: &'a [u8], ending: LineEnding) -> Result<(&'a [u8], &'a [u8]), HeaderError> {
    let pos = input.iter().position(|&b| b == b'\r' || b == b'\n');
    let pos = match pos {
        Some(p) => p,
        None => return Err(HeaderError::BadStream),
    };
    let term = ending.as_bytes();
    if input.len() >= pos + term.len() && &input[pos..pos + term.len()] == term {
        let after = pos + term.len();
        if ending == LineEnding::Cr && input.get(after) == Some(&b'\n') {
            return Err(HeaderError::MismatchedLineEndings);
        }
        Ok((&input[..pos], &input[after..]))
    } else {
        Err(HeaderError::MismatchedLineEndings)
    }
}

fn check_chars(line: &[u8]) -> Result<(), HeaderError> {
    if line.iter().all(|&b| b == b' ' || (0x21..=0x7e).contains(&b)) {
        Ok(())
    } else {
        Err(HeaderError::InvalidCharacter)
    }
}

/// Splits a non-comment, non-obj_info line into strict single-space-separated
/// tokens, rejecting leading, trailing, or doubled separators.
fn tokenize_strict(line: &str) -> Result<Vec<&str>, HeaderError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    if line.starts_with(' ') {
        return Err(HeaderError::LineLeadsWithSpace);
    }
    if line.ends_with(' ') {
        return Err(HeaderError::LineTrailingSpaces);
    }
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(HeaderError::LineExtraSpaces);
    }
    Ok(tokens)
}

struct Lines<'a> {
    rest: &'a [u8],
    ending: LineEnding,
}

impl<'a> Lines<'a> {
    fn next_line(&mut self) -> Result<&'a str, HeaderError> {
        let (line, rest) = split_line(self.rest, self.ending)?;
        check_chars(line)?;
        self.rest = rest;
        std::str::from_utf8(line).map_err(|_| HeaderError::InvalidCharacter)
    }
}

/// Parses the header starting at offset 0 of `input`, returning the parsed
/// [`Header`] and the byte offset at which the payload begins.
pub fn parse_header(input: &[u8]) -> Result<(Header, usize), HeaderError> {
    if !input.starts_with(MAGIC) {
        return Err(HeaderError::MissingMagic);
    }
    let after_magic = &input[MAGIC.len()..];
    let line_ending = if after_magic.starts_with(b"\r\n") {
        LineEnding::CrLf
    } else if after_magic.starts_with(b"\n") {
        LineEnding::Lf
    } else if after_magic.starts_with(b"\r") {
        LineEnding::Cr
    } else {
        return Err(HeaderError::MissingMagic);
    };
    trace!(?line_ending, "detected header line ending");

    let mut lines = Lines {
        rest: &after_magic[line_ending.as_bytes().len()..],
        ending: line_ending,
    };

    let format_line = lines.next_line()?;
    let format_tokens = tokenize_strict(format_line)?;
    if format_tokens.is_empty() || format_tokens[0] != "format" {
        return Err(HeaderError::MissingFormat);
    }
    if format_tokens.len() < 3 {
        return Err(HeaderError::MissingFormat);
    }
    if format_tokens.len() > 3 {
        return Err(HeaderError::FormatSpecifierTooLong);
    }
    let format = parse_format_type_token(format_tokens[1]).ok_or(HeaderError::InvalidFormat)?;
    if !is_valid_version_token(format_tokens[2]) {
        return Err(HeaderError::UnsupportedVersion);
    }

    let mut comments = Vec::new();
    let mut obj_info = Vec::new();
    let mut elements: Vec<ElementDecl> = Vec::new();

    loop {
        let line = lines.next_line()?;
        if line == END_HEADER {
            break;
        }
        if first_token(line) == END_HEADER {
            return Err(HeaderError::EndHeaderExtra);
        }
        if let Some(rest) = strip_keyword(line, "comment") {
            comments.push(rest.to_string());
            continue;
        }
        if let Some(rest) = strip_keyword(line, "obj_info") {
            obj_info.push(rest.to_string());
            continue;
        }
        if first_token(line) == "element" {
            let tokens = tokenize_strict(line)?;
            if tokens.len() < 3 {
                return Err(HeaderError::ElementTooShort);
            }
            if tokens.len() > 3 {
                return Err(HeaderError::ElementTooLong);
            }
            let name = tokens[1];
            if name.is_empty() {
                return Err(HeaderError::ElementTooShort);
            }
            if elements.iter().any(|e| e.name == name) {
                return Err(HeaderError::DuplicateElementName);
            }
            if tokens[2].is_empty() || !tokens[2].bytes().all(|b| b.is_ascii_digit()) {
                return Err(HeaderError::CountParseFailed);
            }
            let count = tokens[2].parse::<u64>().map_err(|e| match e.kind() {
                std::num::IntErrorKind::PosOverflow => HeaderError::CountOutOfRange,
                _ => HeaderError::CountParseFailed,
            })?;
            elements.push(ElementDecl {
                name: name.to_string(),
                count,
                properties: Vec::new(),
            });
            continue;
        }
        if first_token(line) == "property" {
            let tokens = tokenize_strict(line)?;
            let element = elements.last_mut().ok_or(HeaderError::NakedProperty)?;
            if tokens.len() >= 2 && tokens[1] == "list" {
                if tokens.len() < 5 {
                    return Err(HeaderError::PropertyTooShort);
                }
                if tokens.len() > 5 {
                    return Err(HeaderError::PropertyTooLong);
                }
                let size_dt = parse_data_type_token(tokens[2]).ok_or(HeaderError::InvalidType)?;
                match size_dt {
                    DataType::F32 => return Err(HeaderError::ListTypeFloat),
                    DataType::F64 => return Err(HeaderError::ListTypeDouble),
                    _ => {}
                }
                let size_kind = CountType::from_data_type(size_dt).ok_or(HeaderError::InvalidType)?;
                let element_kind = parse_data_type_token(tokens[3]).ok_or(HeaderError::InvalidType)?;
                let name = tokens[4];
                if element.properties.iter().any(|p| p.name == name) {
                    return Err(HeaderError::DuplicatePropertyName);
                }
                element
                    .properties
                    .push(PropertyDecl::new(name, PropertyKind::List { size_kind, element_kind }));
            } else {
                if tokens.len() < 3 {
                    return Err(HeaderError::PropertyTooShort);
                }
                if tokens.len() > 3 {
                    return Err(HeaderError::PropertyTooLong);
                }
                let data_type = parse_data_type_token(tokens[1]).ok_or(HeaderError::InvalidType)?;
                let name = tokens[2];
                if element.properties.iter().any(|p| p.name == name) {
                    return Err(HeaderError::DuplicatePropertyName);
                }
                element.properties.push(PropertyDecl::new(name, PropertyKind::Scalar(data_type)));
            }
            continue;
        }
        return Err(HeaderError::UnknownKeyword);
    }

    debug!(elements = elements.len(), "parsed PLY header");

    let header = Header {
        format,
        line_ending,
        major: 1,
        minor: 0,
        comments,
        obj_info,
        elements,
    };
    let offset = input.len() - lines.rest.len();
    Ok((header, offset))
}

/// The line's first whitespace-delimited token, used to recognize a keyword
/// before the line is known to tokenize strictly (so `elementx a 0` is
/// `UnknownKeyword`, not a malformed `element` line).
fn first_token(line: &str) -> &str {
    line.split(' ').next().unwrap_or("")
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    if line == keyword {
        Some("")
    } else if let Some(rest) = line.strip_prefix(keyword) {
        rest.strip_prefix(' ')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", true)]
    #[case("1.", true)]
    #[case("1.0", true)]
    #[case("01", true)]
    #[case("0001.", true)]
    #[case("1.0000", true)]
    #[case("2", false)]
    #[case("0.0", false)]
    #[case("1..0", false)]
    #[case("-1", false)]
    fn version_tokens(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_valid_version_token(token), expected);
    }

    #[test]
    fn s2_single_vertex_header() {
        let bytes = b"ply\rformat ascii 1.0\relement vertex 1\rproperty float x\rproperty float y\rproperty float z\rend_header\r";
        let (header, offset) = parse_header(bytes).expect("parses");
        assert_eq!(header.elements.len(), 1);
        assert_eq!(header.elements[0].name, "vertex");
        assert_eq!(header.elements[0].count, 1);
        assert_eq!(header.elements[0].properties.len(), 3);
        assert_eq!(offset, bytes.len());
    }

    #[test]
    fn duplicate_element_name_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement a 0\relement a 0\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::DuplicateElementName);
    }

    #[test]
    fn duplicate_property_name_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement a 1\rproperty float x\rproperty int x\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::DuplicatePropertyName);
    }

    #[test]
    fn naked_property_rejected() {
        let bytes = b"ply\rformat ascii 1.0\rproperty float x\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::NakedProperty);
    }

    #[test]
    fn leading_space_rejected() {
        let bytes = b"ply\rformat ascii 1.0\r element a 0\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::LineLeadsWithSpace);
    }

    #[test]
    fn double_space_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement  a 0\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::LineExtraSpaces);
    }

    #[test]
    fn list_float_size_kind_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement a 1\rproperty list float int l\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::ListTypeFloat);
    }

    #[test]
    fn bare_comment_captures_empty_string() {
        let bytes = b"ply\rformat ascii 1.0\rcomment\rend_header\r";
        let (header, _) = parse_header(bytes).expect("parses");
        assert_eq!(header.comments, vec!["".to_string()]);
    }

    #[test]
    fn element_count_overflow_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement a 18446744073709551616\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::CountOutOfRange);
    }

    #[test]
    fn element_count_malformed_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement a 12x\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::CountParseFailed);
    }

    #[test]
    fn keyword_prefix_without_boundary_is_unknown() {
        let bytes = b"ply\rformat ascii 1.0\relementx a 0\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::UnknownKeyword);

        let bytes = b"ply\rformat ascii 1.0\relement a 1\rpropertyz float x\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::UnknownKeyword);
    }

    #[test]
    fn missing_magic_rejected() {
        let bytes = b"nope\rformat ascii 1.0\rend_header\r";
        assert_eq!(parse_header(bytes).unwrap_err(), HeaderError::MissingMagic);
    }
}
