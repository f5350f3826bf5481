use crate::{Kind, Result, Value};
use std::{rc::Rc, sync::Arc};

/// Shape of a type as seen by descriptor discovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Fixed-field aggregate, fields listed in declaration order.
    Struct(&'static [FieldDef]),
    Scalar,
    Sequence,
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Struct(..) => "struct",
            Shape::Scalar => "scalar",
            Shape::Sequence => "sequence",
        }
    }
}

/// Static description of one declared field of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Field identifier.
    pub name: &'static str,
    /// Coercion target, `None` for fields that carry no annotation at all.
    pub kind: Option<Kind>,
    /// Annotation pairs `(label, column)`, for example `("db", "user_id")`.
    pub tags: &'static [(&'static str, &'static str)],
    /// False when the field is declared read-only and must not be written by the mapper.
    pub settable: bool,
}

impl FieldDef {
    /// Column named by the annotation `label`. Empty annotations count as absent.
    pub fn tag(&self, label: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| *v)
            .filter(|v| !v.is_empty())
    }
}

/// Any type that can be handed to descriptor discovery.
///
/// References and smart pointers resolve to their pointee, so `&User`, `Box<User>` and `User`
/// share one descriptor.
pub trait Reflect {
    /// Type whose identity keys the descriptor cache.
    type Underlying: ?Sized + 'static;
    fn shape() -> Shape;
}

/// A record type: a struct whose annotated fields map to external columns.
///
/// Normally implemented through `#[derive(Record)]`.
pub trait Record: Reflect<Underlying = Self> + Default + 'static {
    /// Current value of the field, `None` if the field does not exist or is not annotated.
    fn field_value(&self, field: &str) -> Option<Value>;
    /// Write a value into the field, converting it with [`AsValue`](crate::AsValue).
    fn set_field_value(&mut self, field: &str, value: Value) -> Result<()>;
}

macro_rules! impl_reflect {
    ($shape:expr, $($source:ty),+ $(,)?) => {
        $(impl Reflect for $source {
            type Underlying = Self;
            fn shape() -> Shape {
                $shape
            }
        })+
    };
}
impl_reflect!(
    Shape::Scalar,
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    char,
    String,
    str,
    ()
);

impl<T: 'static> Reflect for Vec<T> {
    type Underlying = Self;
    fn shape() -> Shape {
        Shape::Sequence
    }
}

impl<T: 'static> Reflect for [T] {
    type Underlying = Self;
    fn shape() -> Shape {
        Shape::Sequence
    }
}

impl<T: 'static, const N: usize> Reflect for [T; N] {
    type Underlying = Self;
    fn shape() -> Shape {
        Shape::Sequence
    }
}

macro_rules! impl_reflect_pointer {
    ($($pointer:ty),+ $(,)?) => {
        $(impl<T: Reflect + ?Sized> Reflect for $pointer {
            type Underlying = T::Underlying;
            fn shape() -> Shape {
                T::shape()
            }
        })+
    };
}
impl_reflect_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);
