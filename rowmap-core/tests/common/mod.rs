use rowmap_core::{
    AsValue, FieldDef, Kind, MappingError, Record, Reflect, Result, Shape, Value,
};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Reflect for Point {
    type Underlying = Self;
    fn shape() -> Shape {
        static FIELDS: [FieldDef; 2] = [
            FieldDef {
                name: "x",
                kind: Some(Kind::Integer),
                tags: &[("db", "pos_x")],
                settable: true,
            },
            FieldDef {
                name: "y",
                kind: Some(Kind::Integer),
                tags: &[("db", "pos_y")],
                settable: true,
            },
        ];
        Shape::Struct(&FIELDS)
    }
}

impl Record for Point {
    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "x" => Some(self.x.as_value()),
            "y" => Some(self.y.as_value()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "x" => self.x = i32::try_from_value(value)?,
            "y" => self.y = i32::try_from_value(value)?,
            _ => return Err(MappingError::FieldNotFound { name: field.into() }.into()),
        }
        Ok(())
    }
}
