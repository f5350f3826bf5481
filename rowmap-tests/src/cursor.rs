use anyhow::Error;
use rowmap::{Cursor, Result, Row, RowNames, Value};
use std::{iter::zip, mem};

/// Cursor over fixed rows that can be told to fail, and records how it was driven.
#[derive(Debug, Default)]
pub struct ScriptedCursor {
    labels: Vec<String>,
    rows: Vec<Row>,
    position: Option<usize>,
    fail_columns: bool,
    fail_populate_at: Option<usize>,
    pub advance_calls: usize,
    pub populate_calls: usize,
}

impl ScriptedCursor {
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn row(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.rows.push(values.into_iter().collect());
        self
    }

    /// `columns()` returns an error.
    pub fn failing_columns(mut self) -> Self {
        self.fail_columns = true;
        self
    }

    /// `populate()` returns an error on the row with this index.
    pub fn failing_populate_at(mut self, row: usize) -> Self {
        self.fail_populate_at = Some(row);
        self
    }
}

impl Cursor for ScriptedCursor {
    fn advance(&mut self) -> bool {
        self.advance_calls += 1;
        let next = self.position.map_or(0, |v| v + 1);
        self.position = Some(next.min(self.rows.len()));
        next < self.rows.len()
    }

    fn columns(&self) -> Result<RowNames> {
        if self.fail_columns {
            return Err(Error::msg("connection reset while reading the columns"));
        }
        Ok(self.labels.clone().into())
    }

    fn populate(&mut self, buffer: &mut [Value]) -> Result<()> {
        self.populate_calls += 1;
        let Some(position) = self.position.filter(|v| *v < self.rows.len()) else {
            return Err(Error::msg("populate called outside of a row"));
        };
        if self.fail_populate_at == Some(position) {
            return Err(Error::msg(format!("malformed packet in row {position}")));
        }
        for (slot, value) in zip(buffer, self.rows[position].iter_mut()) {
            *slot = mem::take(value);
        }
        Ok(())
    }
}
