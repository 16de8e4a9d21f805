//! The declarative data model: [`DataType`], [`CountType`], [`FormatType`],
//! [`PropertyKind`], [`PropertyDecl`], [`ElementDecl`], [`Header`] and the
//! [`Value`] tagged union carried across the `Sink`/`Source` boundary.

use std::fmt;

/// One of the eight numeric kinds a scalar or list element may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl DataType {
    /// Width of one value of this kind, in bytes.
    pub fn width(self) -> usize {
        match self {
            DataType::I8 | DataType::U8 => 1,
            DataType::I16 | DataType::U16 => 2,
            DataType::I32 | DataType::U32 | DataType::F32 => 4,
            DataType::F64 => 8,
        }
    }

    /// Whether this kind is `F32` or `F64`.
    pub fn is_float(self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }

    /// Whether this kind is one of the six integer kinds.
    pub fn is_integral(self) -> bool {
        !self.is_float()
    }

    /// The canonical header keyword the writer emits for this kind.
    pub fn canonical_keyword(self) -> &'static str {
        match self {
            DataType::I8 => "char",
            DataType::U8 => "uchar",
            DataType::I16 => "short",
            DataType::U16 => "ushort",
            DataType::I32 => "int",
            DataType::U32 => "uint",
            DataType::F32 => "float",
            DataType::F64 => "double",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_keyword())
    }
}

/// The integral width used to encode a list property's row-local length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountType {
    U8,
    U16,
    U32,
}

impl CountType {
    pub fn width(self) -> usize {
        match self {
            CountType::U8 => 1,
            CountType::U16 => 2,
            CountType::U32 => 4,
        }
    }

    pub fn max_value(self) -> u64 {
        match self {
            CountType::U8 => u8::MAX as u64,
            CountType::U16 => u16::MAX as u64,
            CountType::U32 => u32::MAX as u64,
        }
    }

    pub fn canonical_keyword(self) -> &'static str {
        match self {
            CountType::U8 => "uchar",
            CountType::U16 => "ushort",
            CountType::U32 => "uint",
        }
    }

    /// A `CountType` is only ever built from the three unsigned integer
    /// `DataType`s; `None` otherwise (notably for the two floating kinds,
    /// which are rejected by the header parser with `ListTypeFloat`/`ListTypeDouble`).
    pub fn from_data_type(data_type: DataType) -> Option<CountType> {
        match data_type {
            DataType::U8 => Some(CountType::U8),
            DataType::U16 => Some(CountType::U16),
            DataType::U32 => Some(CountType::U32),
            _ => None,
        }
    }
}

impl fmt::Display for CountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_keyword())
    }
}

/// The payload encoding declared on the `format` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

impl FormatType {
    pub fn canonical_keyword(self) -> &'static str {
        match self {
            FormatType::Ascii => "ascii",
            FormatType::BinaryLittleEndian => "binary_little_endian",
            FormatType::BinaryBigEndian => "binary_big_endian",
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_keyword())
    }
}

/// The line terminator detected immediately after the `ply` magic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    Lf,
    Cr,
    CrLf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Cr => b"\r",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

/// Either a scalar of one `DataType`, or a list with an integral size-kind
/// and an element `DataType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Scalar(DataType),
    List {
        size_kind: CountType,
        element_kind: DataType,
    },
}

impl PropertyKind {
    pub fn is_list(&self) -> bool {
        matches!(self, PropertyKind::List { .. })
    }
}

/// A single declared property: its name and its scalar-or-list kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
    pub kind: PropertyKind,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        PropertyDecl { name: name.into(), kind }
    }
}

/// A single declared element: its name, row count, and ordered properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    pub name: String,
    pub count: u64,
    pub properties: Vec<PropertyDecl>,
}

impl ElementDecl {
    /// Look up a property by name, returning its ordinal and declaration.
    pub fn property(&self, name: &str) -> Option<(usize, &PropertyDecl)> {
        self.properties.iter().enumerate().find(|(_, p)| p.name == name)
    }
}

/// The fully parsed PLY header: format, detected line ending, version,
/// comments, obj_infos and the ordered element declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub format: FormatType,
    pub line_ending: LineEnding,
    pub major: u32,
    pub minor: u32,
    pub comments: Vec<String>,
    pub obj_info: Vec<String>,
    pub elements: Vec<ElementDecl>,
}

impl Header {
    /// Look up an element by name, returning its ordinal and declaration.
    pub fn element(&self, name: &str) -> Option<(usize, &ElementDecl)> {
        self.elements.iter().enumerate().find(|(_, e)| e.name == name)
    }
}

/// A single decoded or to-be-encoded value: one of the eight scalar kinds,
/// or the owned contents of a list property's row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    ListI8(Vec<i8>),
    ListU8(Vec<u8>),
    ListI16(Vec<i16>),
    ListU16(Vec<u16>),
    ListI32(Vec<i32>),
    ListU32(Vec<u32>),
    ListF32(Vec<f32>),
    ListF64(Vec<f64>),
}

impl Value {
    /// The list length, if this value is a list variant.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Value::ListI8(v) => Some(v.len()),
            Value::ListU8(v) => Some(v.len()),
            Value::ListI16(v) => Some(v.len()),
            Value::ListU16(v) => Some(v.len()),
            Value::ListI32(v) => Some(v.len()),
            Value::ListU32(v) => Some(v.len()),
            Value::ListF32(v) => Some(v.len()),
            Value::ListF64(v) => Some(v.len()),
            _ => None,
        }
    }

    /// Interpret this value (scalar or each element of a list) as an `f64`,
    /// used by the triangle-mesh adapter's float-or-double property slots.
    pub fn as_f64_scalar(&self) -> Option<f64> {
        match *self {
            Value::I8(v) => Some(v as f64),
            Value::U8(v) => Some(v as f64),
            Value::I16(v) => Some(v as f64),
            Value::U16(v) => Some(v as f64),
            Value::I32(v) => Some(v as f64),
            Value::U32(v) => Some(v as f64),
            Value::F32(v) => Some(v as f64),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Interpret a list value's elements as `i64`s, used by the face-index
    /// triangulation path. Returns `None` for non-list or non-integral lists.
    pub fn as_i64_list(&self) -> Option<Vec<i64>> {
        match self {
            Value::ListI8(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Value::ListU8(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Value::ListI16(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Value::ListU16(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Value::ListI32(v) => Some(v.iter().map(|&x| x as i64).collect()),
            Value::ListU32(v) => Some(v.iter().map(|&x| x as i64).collect()),
            _ => None,
        }
    }
}
