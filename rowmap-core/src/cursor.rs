use crate::{Error, Result, Row, RowNames, Value};
use std::{iter::zip, mem, vec};

/// Forward-only, single pass source of rows consumed by the mapper.
///
/// The mapper reads [`Cursor::columns`] once, then for every successful [`Cursor::advance`]
/// hands a buffer with one slot per column to [`Cursor::populate`].
pub trait Cursor {
    /// Moves to the next row, false once the rows are exhausted.
    fn advance(&mut self) -> bool;
    /// Column names of the result set, stable for the lifetime of the cursor.
    fn columns(&self) -> Result<RowNames>;
    /// Fills `buffer` with the values of the current row, in column order.
    fn populate(&mut self, buffer: &mut [Value]) -> Result<()>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }
    fn columns(&self) -> Result<RowNames> {
        (**self).columns()
    }
    fn populate(&mut self, buffer: &mut [Value]) -> Result<()> {
        (**self).populate(buffer)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }
    fn columns(&self) -> Result<RowNames> {
        (**self).columns()
    }
    fn populate(&mut self, buffer: &mut [Value]) -> Result<()> {
        (**self).populate(buffer)
    }
}

/// In-memory cursor over rows that share one set of labels.
#[derive(Debug)]
pub struct RowsCursor {
    labels: RowNames,
    rows: vec::IntoIter<Row>,
    current: Option<Row>,
}

impl RowsCursor {
    pub fn new(labels: impl Into<RowNames>, rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            labels: labels.into(),
            rows: rows.into_iter().collect::<Vec<_>>().into_iter(),
            current: None,
        }
    }

    /// Rows not yet reached by [`Cursor::advance`].
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl Cursor for RowsCursor {
    fn advance(&mut self) -> bool {
        self.current = self.rows.next();
        self.current.is_some()
    }

    fn columns(&self) -> Result<RowNames> {
        Ok(self.labels.clone())
    }

    fn populate(&mut self, buffer: &mut [Value]) -> Result<()> {
        let Some(row) = self.current.as_mut() else {
            return Err(Error::msg("The cursor is not positioned on a row"));
        };
        if row.len() != buffer.len() {
            return Err(Error::msg(format!(
                "The row has {} values but the buffer has {} slots",
                row.len(),
                buffer.len()
            )));
        }
        for (slot, value) in zip(buffer, row.iter_mut()) {
            *slot = mem::take(value);
        }
        Ok(())
    }
}
