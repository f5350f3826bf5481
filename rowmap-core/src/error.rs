use crate::Kind;
use std::fmt::{self, Display};

/// Failure kinds of the mapping core.
///
/// Always delivered inside an [`Error`](crate::Error). Kinds caused by a foreign error
/// (cursor and hook failures) are attached as context over that error, so
/// `error.downcast_ref::<MappingError>()` returns the kind and `error.root_cause()` the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The type handed to discovery is not a fixed-field aggregate.
    NotAStructure {
        type_name: &'static str,
        shape: &'static str,
    },
    /// Two fields of the same record claim the same column under the active label.
    DuplicateColumn {
        type_name: &'static str,
        column: &'static str,
        first: &'static str,
        second: &'static str,
    },
    ColumnEnumerationFailed,
    RowScanFailed {
        row: usize,
    },
    CoercionFailed {
        field: &'static str,
        kind: Kind,
        reason: String,
    },
    FieldNotSettable {
        field: &'static str,
    },
    HookFailed {
        row: usize,
        hook: usize,
    },
    UnexpectedRowCount {
        count: usize,
    },
    ColumnNotFound {
        name: String,
    },
    FieldNotFound {
        name: String,
    },
}

impl Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingError::NotAStructure { type_name, shape } => {
                write!(f, "Expected a struct, received {type_name} ({shape})")
            }
            MappingError::DuplicateColumn {
                type_name,
                column,
                first,
                second,
            } => write!(
                f,
                "Column `{column}` of {type_name} is claimed by both `{first}` and `{second}`"
            ),
            MappingError::ColumnEnumerationFailed => {
                f.write_str("Could not read the column names from the cursor")
            }
            MappingError::RowScanFailed { row } => write!(f, "Could not scan row {row}"),
            MappingError::CoercionFailed {
                field,
                kind,
                reason,
            } => write!(f, "Cannot set the {kind} field `{field}`: {reason}"),
            MappingError::FieldNotSettable { field } => {
                write!(f, "Field `{field}` is not settable")
            }
            MappingError::HookFailed { row, hook } => {
                write!(f, "Hook {hook} failed on row {row}")
            }
            MappingError::UnexpectedRowCount { count } => write!(
                f,
                "Expected one and only one row to sync from, received {count}"
            ),
            MappingError::ColumnNotFound { name } => write!(f, "Column `{name}` is not mapped"),
            MappingError::FieldNotFound { name } => write!(f, "Field `{name}` is not mapped"),
        }
    }
}

impl std::error::Error for MappingError {}
