//! # PLY
//!
//! A streaming reader and writer for the Stanford PLY polygon file format.
//!
//! ## Grammar
//!
//! ```text
//! header     -> "ply" line_ending format_decl body* "end_header" line_ending
//! format_decl -> "format" encoding "1.0" line_ending
//! body       -> comment_decl | obj_info_decl | element_decl property_decl*
//! comment_decl -> "comment" (" " rest-of-line)? line_ending
//! obj_info_decl -> "obj_info" (" " rest-of-line)? line_ending
//! element_decl -> "element" name count line_ending
//! property_decl -> "property" data_type name line_ending
//!               |  "property" "list" count_type data_type name line_ending
//! ```
//!
//! The payload that follows the header encodes each declared element's rows
//! in the declared encoding (ASCII, or binary in either byte order). See
//! [`header`], [`codec`], [`reader`] and [`writer`] for the grammar, the
//! scalar codec, and the two streaming drivers, respectively. [`mesh`]
//! specializes the reader's [`reader::Sink`] for the common triangle-mesh
//! subset of the format.

pub mod codec;
pub mod error;
pub mod header;
pub mod mem;
pub mod mesh;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::{Error, HeaderError, MeshError, ReaderError, Result, WriterError};
pub use header::parse_header;
pub use reader::{NullSink, RecordReader, Sink};
pub use types::{CountType, DataType, ElementDecl, FormatType, Header, LineEnding, PropertyDecl, PropertyKind, Value};
pub use writer::{RecordWriter, Source, SourceElement, SourceProperty, SourceSchema};
