use ply::mem::{InMemorySink, InMemorySource};
use ply::{CountType, DataType, PropertyKind, RecordReader, RecordWriter};

fn parse_and_collect(bytes: &[u8]) -> (ply::Header, InMemorySink) {
    let mut sink = InMemorySink::default();
    RecordReader::read_all_from_slice(bytes, &mut sink).expect("parses");
    let header = sink.header.clone().unwrap();
    (header, sink)
}

/// Invariant 1 (header round-trip): re-emitting the parsed schema and values
/// re-parses to the same value sequence, independent of byte order.
#[test]
fn header_and_values_round_trip_across_encodings() {
    let ascii = b"ply\rformat ascii 1.0\r\
element vertex 2\rproperty float x\rproperty float y\rproperty float z\r\
end_header\r\
1.5 2.5 3.5\r-1 0 1\r";

    let (header, sink) = parse_and_collect(ascii);

    type WriteFn = fn(&mut Vec<u8>, &mut InMemorySource) -> ply::Result<()>;
    let encodings: [(&str, WriteFn); 3] = [
        ("ascii", RecordWriter::write_ascii),
        ("le", RecordWriter::write_binary_le),
        ("be", RecordWriter::write_binary_be),
    ];

    for (format, writer) in encodings {
        let mut source = InMemorySource::new(header.clone(), sink.rows.clone());
        let mut out = Vec::new();
        writer(&mut out, &mut source).unwrap_or_else(|e| panic!("{format} write failed: {e}"));
        let (_, re_sink) = parse_and_collect(&out);
        assert_eq!(re_sink.rows, sink.rows, "encoding {format} lost values");
    }
}

/// Invariant 3 / S4: mixed line endings are rejected without producing a header.
#[test]
fn s4_mismatched_line_endings_rejected() {
    let bytes = b"ply\nformat ascii 1.0\relement vertex 0\rend_header\r";
    let err = ply::parse_header(bytes).unwrap_err();
    assert_eq!(err, ply::HeaderError::MismatchedLineEndings);
}

/// S5: a list longer than its declared size-kind's maximum is rejected by
/// the writer, with no successful emission.
#[test]
fn s5_list_overflow_on_writer() {
    struct OverflowSource {
        emitted: bool,
    }
    impl ply::Source for OverflowSource {
        fn start(&mut self) -> ply::Result<ply::SourceSchema> {
            Ok(ply::SourceSchema {
                elements: vec![ply::SourceElement {
                    name: "e".into(),
                    count: 1,
                    properties: vec![ply::SourceProperty {
                        name: "l".into(),
                        kind: PropertyKind::List {
                            size_kind: CountType::U8,
                            element_kind: DataType::I32,
                        },
                    }],
                }],
                comments: Vec::new(),
                obj_info: Vec::new(),
            })
        }
        fn list_size_kind(&self, _element: &str, _property: &str) -> CountType {
            CountType::U8
        }
        fn next_value(&mut self, _element: &str, _property: &str) -> ply::Result<Option<ply::Value>> {
            if self.emitted {
                return Ok(None);
            }
            self.emitted = true;
            Ok(Some(ply::Value::ListI32((0..256).collect())))
        }
    }

    let mut out = Vec::new();
    let err = RecordWriter::write_ascii(&mut out, &mut OverflowSource { emitted: false }).unwrap_err();
    assert!(matches!(err, ply::Error::Writer(ply::WriterError::OverflowU8List)));
}

#[test]
fn element_count_zero_and_one_row_boundaries() {
    let zero = b"ply\rformat ascii 1.0\relement e 0\rproperty int x\rend_header\r";
    let (header, _) = parse_and_collect(zero);
    assert_eq!(header.elements[0].count, 0);

    let one = b"ply\rformat ascii 1.0\relement e 1\rproperty int x\rend_header\r42\r";
    let (_, sink) = parse_and_collect(one);
    assert_eq!(sink.rows[&("e".to_string(), "x".to_string())], vec![ply::Value::I32(42)]);
}
