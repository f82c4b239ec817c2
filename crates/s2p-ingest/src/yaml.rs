//! YAML loading with per-mapping source line annotation.
//!
//! [`load_yaml_with_lines`] walks the marked event stream of the YAML parser
//! and injects the reserved `__line__` key (1-based start line) into every
//! mapping it builds. Downstream diagnostics read that key to point at the
//! exact source location; everything else skips it.

use serde_yaml::{Mapping, Value};
use tracing::trace;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use s2p_model::LINE_KEY;

use crate::error::{LoadError, Result};

/// Parse YAML text, annotating every mapping with its 1-based source line.
pub fn load_yaml_with_lines(text: &str) -> Result<Value> {
    let mut builder = LineAnnotatingBuilder::default();
    let mut parser = Parser::new(text.chars());
    parser.load(&mut builder, false)?;
    if let Some(error) = builder.error {
        return Err(error);
    }
    trace!(has_document = builder.root.is_some(), "yaml parsed");
    builder.root.ok_or(LoadError::EmptyDocument)
}

/// Parse YAML text without line annotation.
///
/// Used for documents where diagnostics never need source positions, such as
/// the mandatory-columns metadata file.
pub fn load_yaml(text: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(text)?)
}

/// One partially built container on the event stack.
enum Container {
    Mapping {
        map: Mapping,
        pending_key: Option<Value>,
    },
    Sequence(Vec<Value>),
}

/// Builds a value tree from marked parser events.
#[derive(Default)]
struct LineAnnotatingBuilder {
    stack: Vec<Container>,
    root: Option<Value>,
    error: Option<LoadError>,
}

impl LineAnnotatingBuilder {
    fn push_value(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some(Container::Mapping { map, pending_key }) => match pending_key.take() {
                Some(key) => {
                    map.insert(key, value);
                }
                None => *pending_key = Some(value),
            },
            Some(Container::Sequence(items)) => items.push(value),
            // Completed top-level value; keep the first document only.
            None => {
                if self.root.is_none() {
                    self.root = Some(value);
                }
            }
        }
    }
}

impl MarkedEventReceiver for LineAnnotatingBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        match event {
            Event::MappingStart(..) => {
                let mut map = Mapping::new();
                map.insert(
                    Value::String(LINE_KEY.to_string()),
                    Value::Number(i64::try_from(mark.line()).unwrap_or(0).into()),
                );
                self.stack.push(Container::Mapping {
                    map,
                    pending_key: None,
                });
            }
            Event::MappingEnd => {
                if let Some(Container::Mapping { map, .. }) = self.stack.pop() {
                    self.push_value(Value::Mapping(map));
                }
            }
            Event::SequenceStart(..) => self.stack.push(Container::Sequence(Vec::new())),
            Event::SequenceEnd => {
                if let Some(Container::Sequence(items)) = self.stack.pop() {
                    self.push_value(Value::Sequence(items));
                }
            }
            Event::Scalar(value, style, _, _) => {
                let value = if style == TScalarStyle::Plain {
                    plain_scalar(value)
                } else {
                    Value::String(value)
                };
                self.push_value(value);
            }
            Event::Alias(_) => self.error = Some(LoadError::UnsupportedAlias),
            _ => {}
        }
    }
}

/// Interpret an untagged plain scalar per the YAML core schema.
fn plain_scalar(value: String) -> Value {
    match value.as_str() {
        "" | "~" | "null" | "Null" | "NULL" => Value::Null,
        "true" | "True" | "TRUE" => Value::Bool(true),
        "false" | "False" | "FALSE" => Value::Bool(false),
        _ => {
            if let Ok(int) = value.parse::<i64>() {
                Value::Number(int.into())
            } else if let Ok(float) = value.parse::<f64>() {
                Value::Number(float.into())
            } else {
                Value::String(value)
            }
        }
    }
}
