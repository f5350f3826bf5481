use crate::{Error, Kind, Result, Value, util::truncate_long};

/// Normalizes a cursor value into the canonical variant of `kind`.
///
/// | kind      | accepted                                   | produces  |
/// |-----------|--------------------------------------------|-----------|
/// | `Text`    | anything, formatted as text                | `Varchar` |
/// | `Integer` | any native integer that fits in `i64`      | `Int64`   |
/// | `Float`   | `Float32`, `Float64`, textual `Varchar`/`Blob` | `Float64` |
/// | `Boolean` | `Boolean`                                  | `Boolean` |
/// | `Nested`  | `Record`, unchanged                        | `Record`  |
///
/// `Null` is returned as is for every kind, the caller decides what absence means.
pub fn coerce(value: Value, kind: Kind) -> Result<Value> {
    Ok(match (kind, value) {
        (_, Value::Null) => Value::Null,
        (Kind::Text, v @ Value::Varchar(..)) => v,
        (Kind::Text, v) => Value::Varchar(v.to_string()),
        (Kind::Integer, Value::Int8(v)) => Value::Int64(v as _),
        (Kind::Integer, Value::Int16(v)) => Value::Int64(v as _),
        (Kind::Integer, Value::Int32(v)) => Value::Int64(v as _),
        (Kind::Integer, Value::Int64(v)) => Value::Int64(v),
        (Kind::Integer, Value::UInt8(v)) => Value::Int64(v as _),
        (Kind::Integer, Value::UInt16(v)) => Value::Int64(v as _),
        (Kind::Integer, Value::UInt32(v)) => Value::Int64(v as _),
        (Kind::Integer, Value::UInt64(v)) => Value::Int64(i64::try_from(v).map_err(|_| {
            Error::msg(format!("Value {v}: u64 is out of range for i64"))
        })?),
        (Kind::Float, Value::Float32(v)) => Value::Float64(v as _),
        (Kind::Float, Value::Float64(v)) => Value::Float64(v),
        (Kind::Float, Value::Varchar(v)) => Value::Float64(parse_float(v.as_bytes())?),
        (Kind::Float, Value::Blob(v)) => Value::Float64(parse_float(&v)?),
        (Kind::Boolean, v @ Value::Boolean(..)) => v,
        (Kind::Nested, v @ Value::Record(..)) => v,
        (kind, value) => {
            return Err(Error::msg(format!(
                "Cannot coerce a {} value to {kind}",
                value.variant_name()
            )));
        }
    })
}

fn parse_float(input: &[u8]) -> Result<f64> {
    fast_float::parse::<f64, _>(input).map_err(|_| {
        Error::msg(format!(
            "Cannot parse `{}` as a floating point number",
            truncate_long(&String::from_utf8_lossy(input)),
        ))
    })
}
