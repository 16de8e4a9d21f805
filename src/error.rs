//! Error taxonomy: one enumerant per diagnostic named in the header, reader,
//! writer and mesh-adapter components, folded into a single [`Error`] via
//! `#[from]`, the same layering the header/body parsers and the top-level
//! crate error use upstream.

use thiserror::Error;

/// Failures raised while tokenizing and validating the textual header.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HeaderError {
    #[error("unexpected end of stream while reading the header")]
    BadStream,
    #[error("missing the 'ply' magic line")]
    MissingMagic,
    #[error("header lines use inconsistent line terminators")]
    MismatchedLineEndings,
    #[error("header contains a byte that is neither printable ASCII nor space")]
    InvalidCharacter,
    #[error("line begins with a space")]
    LineLeadsWithSpace,
    #[error("line ends with a trailing space")]
    LineTrailingSpaces,
    #[error("line contains more than one consecutive space between tokens")]
    LineExtraSpaces,
    #[error("missing the 'format' line")]
    MissingFormat,
    #[error("format line names an encoding other than ascii, binary_big_endian or binary_little_endian")]
    InvalidFormat,
    #[error("format line names a version other than 1.0")]
    UnsupportedVersion,
    #[error("format line has more tokens than encoding and version")]
    FormatSpecifierTooLong,
    #[error("property line appears before any element has been opened")]
    NakedProperty,
    #[error("property line is missing its name or type token")]
    PropertyTooShort,
    #[error("property line names a type that is not one of the eight numeric kinds")]
    InvalidType,
    #[error("list size-kind must not be float")]
    ListTypeFloat,
    #[error("list size-kind must not be double")]
    ListTypeDouble,
    #[error("property name is already used within this element")]
    DuplicatePropertyName,
    #[error("property line has extra trailing tokens")]
    PropertyTooLong,
    #[error("element line is missing its name or count token")]
    ElementTooShort,
    #[error("element name is already used within this header")]
    DuplicateElementName,
    #[error("element count is out of range for a 64-bit unsigned integer")]
    CountOutOfRange,
    #[error("element count does not parse as an unsigned decimal integer")]
    CountParseFailed,
    #[error("element line has extra trailing tokens")]
    ElementTooLong,
    #[error("'end_header' line has extra trailing tokens")]
    EndHeaderExtra,
    #[error("line begins with a keyword that is none of comment, obj_info, element, property, end_header")]
    UnknownKeyword,
}

/// Failures raised while decoding the row payload after a successful header parse.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReaderError {
    #[error("stream ended before the declared content was fully read")]
    UnexpectedEof,
    #[error("row lines use inconsistent line terminators")]
    MismatchedLineEndings,
    #[error("row contains a byte that is neither printable ASCII nor space")]
    InvalidCharacter,
    #[error("list length token parses as a negative integer")]
    NegativeListSize,
    #[error("row line has fewer tokens than the declared properties require")]
    TooFewTokens,
    #[error("row line has whitespace that is not a single separating space")]
    ExtraWhitespace,
    #[error("row line has tokens left over after all declared properties were consumed")]
    ExtraTokens,
    #[error("list length exceeds the range of its declared size-kind")]
    ListSizeOutOfRange,
    #[error("scalar value is out of range for its declared kind")]
    PropertyOutOfRange,
    #[error("list length token does not parse as an unsigned decimal integer")]
    ListSizeParseFailed,
    #[error("scalar token does not parse as a value of its declared kind")]
    PropertyParseFailed,
}

/// Failures raised while emitting a header and payload.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WriterError {
    #[error("a comment contains a line terminator")]
    CommentHasNewline,
    #[error("an obj_info contains a line terminator")]
    ObjInfoHasNewline,
    #[error("an element or property name is empty")]
    EmptyName,
    #[error("an element or property name contains a non-graphic ASCII character")]
    NameInvalidChars,
    #[error("list length exceeds the maximum representable by a U8 size-kind")]
    OverflowU8List,
    #[error("list length exceeds the maximum representable by a U16 size-kind")]
    OverflowU16List,
    #[error("list length exceeds the maximum representable by a U32 size-kind")]
    OverflowU32List,
    #[error("source produced fewer rows than the element's declared count")]
    MissingData,
    #[error("ASCII encoding cannot represent a non-finite scalar float")]
    AsciiFloatNotFinite,
    #[error("ASCII encoding cannot represent a non-finite float inside a list")]
    AsciiFloatListNotFinite,
    #[error("element declares zero properties")]
    ElementHasNoProperties,
}

/// Failures raised while recognizing and translating the triangle-mesh schema.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MeshError {
    #[error("the 'vertex' element is missing one of the x, y, z properties")]
    MissingXYZ,
    #[error("one of the vertex x, y, z properties is not a float-or-double scalar")]
    XYZWrongType,
    #[error("one of the vertex normal properties is present but not a float-or-double scalar")]
    NormalWrongType,
    #[error("one of the vertex UV properties is present but not a float-or-double scalar")]
    UVWrongType,
    #[error("the 'face' element is missing the vertex_indices property")]
    MissingFaceIndices,
    #[error("the face vertex_indices property is not an integral list")]
    FaceIndicesWrongType,
    #[error("a face references a vertex index outside [0, vertex_count) or outside the target index type's range")]
    VertexIndexOutOfRange,
}

/// The crate-wide error type. Stream failures are kept distinct from every
/// format-level diagnostic, per the stream/format split of the taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Stream(#[from] std::io::Error),
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error(transparent)]
    Reader(#[from] ReaderError),
    #[error(transparent)]
    Writer(#[from] WriterError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("{0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, Error>;
