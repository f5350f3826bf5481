use crate::Record;
use std::{
    any::{self, Any},
    fmt::{self, Debug, Display},
};

/// Dynamically typed scalar produced by a [`Cursor`](crate::Cursor) for one column of one row.
///
/// The variant set is closed: a data source converts whatever it receives from the wire
/// into one of these before handing the row to the materializer.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Varchar(String),
    Blob(Box<[u8]>),
    /// Opaque nested record, moved as a whole into the destination field.
    Record(Box<dyn NestedRecord>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True when the value equals the zero value of its kind (`0`, `0.0`, `false`, empty text,
    /// a record equal to its `Default`).
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => !v,
            Value::Int8(v) => *v == 0,
            Value::Int16(v) => *v == 0,
            Value::Int32(v) => *v == 0,
            Value::Int64(v) => *v == 0,
            Value::UInt8(v) => *v == 0,
            Value::UInt16(v) => *v == 0,
            Value::UInt32(v) => *v == 0,
            Value::UInt64(v) => *v == 0,
            Value::Float32(v) => *v == 0.0,
            Value::Float64(v) => *v == 0.0,
            Value::Varchar(v) => v.is_empty(),
            Value::Blob(v) => v.is_empty(),
            Value::Record(v) => v.is_default(),
        }
    }

    /// Name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(..) => "Boolean",
            Value::Int8(..) => "Int8",
            Value::Int16(..) => "Int16",
            Value::Int32(..) => "Int32",
            Value::Int64(..) => "Int64",
            Value::UInt8(..) => "UInt8",
            Value::UInt16(..) => "UInt16",
            Value::UInt32(..) => "UInt32",
            Value::UInt64(..) => "UInt64",
            Value::Float32(..) => "Float32",
            Value::Float64(..) => "Float64",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Record(..) => "Record",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Varchar(v) => f.write_str(v),
            Value::Blob(v) => f.write_str(&String::from_utf8_lossy(v)),
            Value::Record(v) => write!(f, "{v:?}"),
        }
    }
}

/// Declared kind of a record field, the target of value coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Integer,
    Float,
    Boolean,
    Nested,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Text => "text",
            Kind::Integer => "integer",
            Kind::Float => "floating-point",
            Kind::Boolean => "boolean",
            Kind::Nested => "nested record",
        })
    }
}

/// Type erased record carried by [`Value::Record`].
///
/// Implemented for every [`Record`] that can be cloned, compared and sent across threads,
/// which makes it usable as the type of a field in another record.
pub trait NestedRecord: Any + Debug + Send + Sync {
    fn clone_boxed(&self) -> Box<dyn NestedRecord>;
    fn eq_dyn(&self, other: &dyn NestedRecord) -> bool;
    fn is_default(&self) -> bool;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> NestedRecord for T
where
    T: Record + Clone + PartialEq + Debug + Send + Sync,
{
    fn clone_boxed(&self) -> Box<dyn NestedRecord> {
        Box::new(self.clone())
    }
    fn eq_dyn(&self, other: &dyn NestedRecord) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
    fn is_default(&self) -> bool {
        *self == T::default()
    }
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Clone for Box<dyn NestedRecord> {
    fn clone(&self) -> Self {
        (**self).clone_boxed()
    }
}

impl PartialEq for dyn NestedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}
