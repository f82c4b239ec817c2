//! The columnar type system.
//!
//! A converted document becomes a [`ColumnSchema`]: an ordered list of
//! uniquely named [`ColumnField`]s whose types come from the closed
//! [`ColumnType`] set. Field order always matches the declaration order of
//! the source properties, which is semantically significant for columnar
//! destinations.

use std::fmt;

/// Resolution of a timestamp or time-of-day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Short suffix used in type renderings, e.g. `timestamp[ms]`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "us",
            Self::Nanoseconds => "ns",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Type of a single column, primitive or nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Utf8,
    /// Instant in time with an explicit resolution.
    Timestamp(TimeUnit),
    /// Wall-clock time of day.
    Time(TimeUnit),
    /// Declared type was null (or absent with no format).
    Null,
    /// Homogeneous list of the element type.
    List(Box<ColumnType>),
    /// Nested record with its own ordered, uniquely named fields.
    Struct(Vec<ColumnField>),
}

impl ColumnType {
    /// Convenience constructor for a list column.
    pub fn list(element: ColumnType) -> Self {
        Self::List(Box::new(element))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32 => f.write_str("int32"),
            Self::Int64 => f.write_str("int64"),
            Self::Float32 => f.write_str("float32"),
            Self::Float64 => f.write_str("float64"),
            Self::Boolean => f.write_str("bool"),
            Self::Utf8 => f.write_str("string"),
            Self::Timestamp(unit) => write!(f, "timestamp[{unit}]"),
            Self::Time(unit) => match unit {
                TimeUnit::Seconds | TimeUnit::Milliseconds => write!(f, "time32[{unit}]"),
                TimeUnit::Microseconds | TimeUnit::Nanoseconds => write!(f, "time64[{unit}]"),
            },
            Self::Null => f.write_str("null"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Struct(fields) => {
                f.write_str("struct<")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnField {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnField {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

impl fmt::Display for ColumnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.column_type)
    }
}

/// Ordered list of uniquely named columns describing one table.
///
/// Pure output of the schema builder; never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    fields: Vec<ColumnField>,
}

impl ColumnSchema {
    pub fn new(fields: Vec<ColumnField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ColumnField] {
        &self.fields
    }

    /// Look up a column by name.
    pub fn field(&self, name: &str) -> Option<&ColumnField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnField> {
        self.fields.iter()
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl FromIterator<ColumnField> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = ColumnField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
