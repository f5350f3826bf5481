use crate::{FieldDef, MappingError, Reflect, Result, Shape};
use std::{any, collections::HashMap};

/// Field/column correspondence of one record type under one annotation label.
///
/// `field_to_column` and `column_to_field` are exact inverses. Fields without an annotation
/// for the label are in neither map.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    type_name: &'static str,
    fields: Vec<&'static FieldDef>,
    field_to_column: HashMap<&'static str, &'static str>,
    column_to_field: HashMap<&'static str, &'static FieldDef>,
}

impl TypeDescriptor {
    /// Reads the annotations of `R` under `label`, in declaration order.
    pub fn build<R: Reflect + ?Sized>(label: &str) -> Result<Self> {
        let type_name = any::type_name::<R::Underlying>();
        let shape = R::shape();
        let Shape::Struct(defs) = shape else {
            return Err(MappingError::NotAStructure {
                type_name,
                shape: shape.name(),
            }
            .into());
        };
        let mut result = Self {
            type_name,
            fields: Vec::with_capacity(defs.len()),
            field_to_column: HashMap::with_capacity(defs.len()),
            column_to_field: HashMap::with_capacity(defs.len()),
        };
        for def in defs {
            let Some(column) = def.tag(label) else {
                continue;
            };
            if let Some(other) = result.column_to_field.insert(column, def) {
                return Err(MappingError::DuplicateColumn {
                    type_name,
                    column,
                    first: other.name,
                    second: def.name,
                }
                .into());
            }
            result.field_to_column.insert(def.name, column);
            result.fields.push(def);
        }
        Ok(result)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Mapped fields, in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &'static FieldDef> + '_ {
        self.fields.iter().copied()
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.field_to_column.keys().copied()
    }

    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.column_to_field.keys().copied()
    }

    pub fn column_for(&self, field: &str) -> Option<&'static str> {
        self.field_to_column.get(field).copied()
    }

    pub fn field_for(&self, column: &str) -> Option<&'static FieldDef> {
        self.column_to_field.get(column).copied()
    }

    /// Definition of a mapped field.
    pub fn field_def(&self, field: &str) -> Option<&'static FieldDef> {
        self.column_for(field).and_then(|c| self.field_for(c))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
