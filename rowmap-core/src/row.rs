use crate::Value;
use std::sync::Arc;

/// Column names shared by every row of a result set.
pub type RowNames = Arc<[String]>;
/// Values of one row, aligned by index with its `RowNames`.
pub type Row = Box<[Value]>;

/// One row carrying its own column labels, the item of an async row stream.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
}
