use crate::{Cursor, Error, Hook, Mapper, MappingError, Record, Result, Value};
use std::collections::BTreeMap;

/// Point in time capture of the mapped fields of a record, keyed by field name.
pub type Snapshot = BTreeMap<&'static str, Value>;

/// Changed values keyed by column name.
pub type ColumnValues = BTreeMap<&'static str, Value>;

impl Mapper {
    /// Reads the current value of every mapped field of `record`.
    pub fn field_value_snapshot<R: Record>(&self, record: &R) -> Result<Snapshot> {
        let descriptor = self.discover::<R>()?;
        descriptor
            .fields()
            .map(|field| {
                record
                    .field_value(field.name)
                    .map(|value| (field.name, value))
                    .ok_or_else(|| {
                        Error::new(MappingError::FieldNotFound {
                            name: field.name.into(),
                        })
                    })
            })
            .collect()
    }

    /// Columns whose field differs from `snapshot`, with the current value.
    ///
    /// A field missing from `snapshot` counts as changed. Floats compare by bit pattern, so a
    /// field that stays `NaN` is unchanged.
    pub fn modified_columns<R: Record>(
        &self,
        snapshot: &Snapshot,
        record: &R,
    ) -> Result<ColumnValues> {
        let descriptor = self.discover::<R>()?;
        let current = self.field_value_snapshot(record)?;
        Ok(current
            .into_iter()
            .filter(|(field, value)| !unchanged(snapshot.get(field), value))
            .filter_map(|(field, value)| descriptor.column_for(field).map(|c| (c, value)))
            .collect())
    }

    /// Refreshes `record` from the single row of `cursor`, typically the row returned by an
    /// insert.
    ///
    /// Only fields that the row changed to a non zero value are written back, so values
    /// computed by the data source (generated keys, defaults) land in `record` without
    /// clobbering what the caller set. The row count and the settability of every field to
    /// write are checked before `record` is touched. Values are read out of the typed fields of
    /// the replica, so they are written back without coercion.
    pub fn sync<R, C>(&self, cursor: C, record: &mut R, hooks: &[&dyn Hook<R>]) -> Result<()>
    where
        R: Record,
        C: Cursor,
    {
        let descriptor = self.discover::<R>()?;
        let original = self.field_value_snapshot(record)?;
        let mut replicas = self.map(cursor, hooks)?;
        if replicas.len() != 1 {
            return Err(MappingError::UnexpectedRowCount {
                count: replicas.len(),
            }
            .into());
        }
        let replica = replicas.remove(0);
        let changes = self
            .field_value_snapshot(&replica)?
            .into_iter()
            .filter(|(field, value)| !unchanged(original.get(field), value) && !value.is_zero())
            .filter_map(|(field, value)| descriptor.field_def(field).map(|f| (f, value)))
            .collect::<Vec<_>>();
        if let Some((field, _)) = changes.iter().find(|(f, _)| !f.settable) {
            return Err(MappingError::FieldNotSettable { field: field.name }.into());
        }
        for (field, value) in changes {
            log::debug!(
                "Sync writes `{}` of {} back",
                field.name,
                descriptor.type_name()
            );
            record.set_field_value(field.name, value)?;
        }
        Ok(())
    }
}

fn unchanged(before: Option<&Value>, after: &Value) -> bool {
    match (before, after) {
        (Some(Value::Float32(a)), Value::Float32(b)) => a.to_bits() == b.to_bits(),
        (Some(Value::Float64(a)), Value::Float64(b)) => a.to_bits() == b.to_bits(),
        (before, after) => before == Some(after),
    }
}
