//! Convenience in-memory [`Sink`]/[`Source`] implementations for callers who
//! already hold (or want to build) the whole file's values in memory.
//! These sit above the streaming core; they are not a substitute for it.

use std::collections::HashMap;

use crate::error::Error;
use crate::reader::Sink;
use crate::types::{CountType, Header, PropertyKind, Value};
use crate::writer::{Source, SourceElement, SourceProperty, SourceSchema};

/// An in-memory [`Sink`] that accumulates every row into
/// `element -> property -> Vec<Value>` tables, in declared order.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub header: Option<Header>,
    pub rows: HashMap<(String, String), Vec<Value>>,
}

impl Sink for InMemorySink {
    fn start(&mut self, header: &Header) -> Result<(), Error> {
        self.header = Some(header.clone());
        for element in &header.elements {
            for property in &element.properties {
                self.rows.insert((element.name.clone(), property.name.clone()), Vec::new());
            }
        }
        Ok(())
    }

    fn handle(&mut self, element_name: &str, property_name: &str, _property_ordinal: usize, value: &Value) -> Result<(), Error> {
        if let Some(values) = self.rows.get_mut(&(element_name.to_string(), property_name.to_string())) {
            values.push(value.clone());
        }
        Ok(())
    }
}

/// An in-memory [`Source`] built from a [`Header`]'s schema and an
/// [`InMemorySink`]-shaped value table. Picks the smallest list size-kind
/// that fits the longest observed list per property, since the reference
/// writer's size-kind selection is left implementation-defined.
pub struct InMemorySource {
    header: Header,
    rows: HashMap<(String, String), Vec<Value>>,
    cursors: HashMap<(String, String), usize>,
    size_kinds: HashMap<(String, String), CountType>,
}

impl InMemorySource {
    pub fn new(header: Header, rows: HashMap<(String, String), Vec<Value>>) -> Self {
        let mut size_kinds = HashMap::new();
        for element in &header.elements {
            for property in &element.properties {
                if let PropertyKind::List { size_kind, .. } = property.kind {
                    let key = (element.name.clone(), property.name.clone());
                    let longest = rows.get(&key).map(Self::longest_list).unwrap_or(0);
                    let chosen = smallest_size_kind_for(longest).unwrap_or(size_kind);
                    size_kinds.insert(key, chosen);
                }
            }
        }
        InMemorySource {
            header,
            rows,
            cursors: HashMap::new(),
            size_kinds,
        }
    }

    fn longest_list(values: &[Value]) -> u64 {
        values.iter().filter_map(Value::list_len).map(|len| len as u64).max().unwrap_or(0)
    }
}

fn smallest_size_kind_for(longest: u64) -> Option<CountType> {
    if longest <= CountType::U8.max_value() {
        Some(CountType::U8)
    } else if longest <= CountType::U16.max_value() {
        Some(CountType::U16)
    } else if longest <= CountType::U32.max_value() {
        Some(CountType::U32)
    } else {
        None
    }
}

impl Source for InMemorySource {
    fn start(&mut self) -> Result<SourceSchema, Error> {
        let elements = self
            .header
            .elements
            .iter()
            .map(|element| SourceElement {
                name: element.name.clone(),
                count: element.count,
                properties: element
                    .properties
                    .iter()
                    .map(|p| SourceProperty {
                        name: p.name.clone(),
                        kind: p.kind,
                    })
                    .collect(),
            })
            .collect();
        Ok(SourceSchema {
            elements,
            comments: self.header.comments.clone(),
            obj_info: self.header.obj_info.clone(),
        })
    }

    fn list_size_kind(&self, element: &str, property: &str) -> CountType {
        self.size_kinds
            .get(&(element.to_string(), property.to_string()))
            .copied()
            .unwrap_or(CountType::U32)
    }

    fn next_value(&mut self, element: &str, property: &str) -> Result<Option<Value>, Error> {
        let key = (element.to_string(), property.to_string());
        let cursor = self.cursors.entry(key.clone()).or_insert(0);
        let value = self.rows.get(&key).and_then(|values| values.get(*cursor)).cloned();
        if value.is_some() {
            *cursor += 1;
        }
        Ok(value)
    }
}
