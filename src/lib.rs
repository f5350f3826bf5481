//! Map tabular query results onto typed records.
//!
//! A record is a struct deriving [`Record`](macro@Record) whose fields carry a column
//! annotation. A [`Mapper`] discovers and caches the field/column correspondence of each record
//! type, materializes cursor rows into records with type coercion, and computes which columns
//! changed between two states of a record.
//!
//! ```rust
//! use rowmap::{Mapper, Record, Row, RowsCursor, Value};
//!
//! #[derive(Record, Default, Debug)]
//! struct User {
//!     #[tag(db = "id")]
//!     id: i64,
//!     #[tag(db = "name")]
//!     name: String,
//! }
//!
//! let mapper = Mapper::default();
//! let rows: Vec<Row> = vec![[Value::Int32(1), Value::Varchar("Ada".into())].into()];
//! let cursor = RowsCursor::new(["id".to_string(), "name".to_string()], rows);
//! let users = mapper.map::<User, _>(cursor, &[]).unwrap();
//! assert_eq!(users[0].id, 1);
//! assert_eq!(users[0].name, "Ada");
//! ```
pub use rowmap_core::*;
pub use rowmap_macros::*;
