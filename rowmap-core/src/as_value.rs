use crate::{Error, Kind, NestedRecord, Result, Value};
use std::any;

/// Conversion between a native field type and the dynamically typed [`Value`].
///
/// Every field that takes part in mapping must have a type implementing this trait. The
/// materializer first normalizes a cursor value through [`coerce`](crate::coerce) into the
/// canonical variant of [`AsValue::kind`] (`Varchar`, `Int64`, `Float64`, `Boolean`, `Record`)
/// and then hands it to [`AsValue::try_from_value`], which narrows it into `Self`.
///
/// # Contract
/// - `try_from_value` accepts the canonical variant of its kind and the variant produced by
///   its own `as_value`, so values read out of a record can be written back unchanged.
/// - Narrowing conversions are range checked, an out of range value is an error and never
///   truncated.
///
/// # Examples
/// ```rust
/// use rowmap_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(42)));
/// let n: i32 = AsValue::try_from_value(Value::Int64(42)).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Kind targeted by coercion for fields of this type.
    fn kind() -> Kind;
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(value.into())
    }
}

fn cannot_convert<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>(),
    ))
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn kind() -> Kind {
                Kind::Integer
            }
            fn as_value(self) -> Value {
                $destination(self)
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(v) => Ok(v),
                    #[allow(unreachable_patterns)]
                    Value::Int64(v) => <$source>::try_from(v).map_err(|_| {
                        Error::msg(format!(
                            "Value {v}: i64 is out of range for {}",
                            any::type_name::<Self>(),
                        ))
                    }),
                    _ => Err(cannot_convert::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

impl AsValue for f64 {
    fn kind() -> Kind {
        Kind::Float
    }
    fn as_value(self) -> Value {
        Value::Float64(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(v) => Ok(v),
            Value::Float32(v) => Ok(v as _),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for f32 {
    fn kind() -> Kind {
        Kind::Float
    }
    fn as_value(self) -> Value {
        Value::Float32(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(v) => Ok(v),
            Value::Float64(v) => {
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    return Err(Error::msg(format!("Value {v}: f64 is out of range for f32")));
                }
                Ok(v as _)
            }
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for bool {
    fn kind() -> Kind {
        Kind::Boolean
    }
    fn as_value(self) -> Value {
        Value::Boolean(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn kind() -> Kind {
        Kind::Text
    }
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(v) => Ok(v),
            _ => Err(cannot_convert::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn kind() -> Kind {
        T::kind()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => Ok(Some(T::try_from_value(v)?)),
        }
    }
}

impl<T: NestedRecord> AsValue for T {
    fn kind() -> Kind {
        Kind::Nested
    }
    fn as_value(self) -> Value {
        Value::Record(Box::new(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let Value::Record(record) = value else {
            return Err(cannot_convert::<Self>(&value));
        };
        let found = record.type_name();
        record.into_any().downcast::<T>().map(|v| *v).map_err(|_| {
            Error::msg(format!(
                "Cannot convert a nested record of type {found} to {}",
                any::type_name::<Self>(),
            ))
        })
    }
}
