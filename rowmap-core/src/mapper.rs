use crate::{
    Context, Cursor, DescriptorCache, Error, FieldDef, Hook, MappingError, Record, Reflect,
    Result, RowLabeled, TypeDescriptor, Value, coerce,
    stream::{Stream, StreamExt},
};
use std::{any::TypeId, iter::zip, pin::pin, sync::Arc};

/// Annotation label read when none is configured.
pub const DEFAULT_TAG: &str = "db";

/// Maps cursor rows onto records, and records back onto column deltas.
///
/// Owns the [`DescriptorCache`]: create one per process (or per annotation label) and share
/// it, every operation except [`Mapper::set_tag`] takes `&self`.
#[derive(Debug)]
pub struct Mapper {
    tag: String,
    cache: DescriptorCache,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl Mapper {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            cache: DescriptorCache::new(),
        }
    }

    /// Annotation label naming the column of a field.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Changes the annotation label. Descriptors built under the previous label no longer
    /// apply, a different label starts from an empty cache.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if tag != self.tag {
            log::debug!("Annotation label changed from `{}` to `{}`", self.tag, tag);
            self.tag = tag;
            self.cache = DescriptorCache::new();
        }
    }

    pub fn cache(&self) -> &DescriptorCache {
        &self.cache
    }

    /// Descriptor of `R`, built and cached on first use.
    pub fn discover<R: Reflect + ?Sized>(&self) -> Result<Arc<TypeDescriptor>> {
        self.cache
            .get_or_try_insert_with(TypeId::of::<R::Underlying>(), || {
                TypeDescriptor::build::<R>(&self.tag)
            })
    }

    /// Builds the descriptor of `R` and stores it, replacing the cached one if any.
    ///
    /// The rebuilt descriptor has the same content (the shape of a type never changes), but
    /// `Arc`s handed out earlier keep pointing at the replaced instance.
    pub fn register<R: Reflect + ?Sized>(&self) -> Result<Arc<TypeDescriptor>> {
        let descriptor = TypeDescriptor::build::<R>(&self.tag)?;
        Ok(self
            .cache
            .insert(TypeId::of::<R::Underlying>(), descriptor))
    }

    /// Mapped column names of `R`, in no particular order.
    pub fn columns_for<R: Reflect + ?Sized>(&self) -> Result<Vec<&'static str>> {
        Ok(self.discover::<R>()?.column_names().collect())
    }

    /// Mapped field names of `R`, in no particular order.
    pub fn fields_for<R: Reflect + ?Sized>(&self) -> Result<Vec<&'static str>> {
        Ok(self.discover::<R>()?.field_names().collect())
    }

    /// Field mapped to the column `name`. A mapped field name resolves to itself.
    pub fn field_for_column<R: Reflect + ?Sized>(&self, name: &str) -> Result<&'static str> {
        let descriptor = self.discover::<R>()?;
        descriptor
            .field_for(name)
            .or_else(|| descriptor.field_def(name))
            .map(|f| f.name)
            .ok_or_else(|| MappingError::ColumnNotFound { name: name.into() }.into())
    }

    /// Column mapped to the field `name`. A mapped column name resolves to itself.
    pub fn column_for_field<R: Reflect + ?Sized>(&self, name: &str) -> Result<&'static str> {
        let descriptor = self.discover::<R>()?;
        descriptor
            .column_for(name)
            .or_else(|| {
                descriptor
                    .field_for(name)
                    .and_then(|f| descriptor.column_for(f.name))
            })
            .ok_or_else(|| MappingError::FieldNotFound { name: name.into() }.into())
    }

    /// Materializes every row of `cursor` into a new `R`, in cursor order.
    ///
    /// Columns that no field maps are read and dropped. After a record is populated the
    /// `hooks` run on it in order. Any failure (columns, scan, coercion, hook) aborts the
    /// call and nothing is returned.
    pub fn map<R, C>(&self, mut cursor: C, hooks: &[&dyn Hook<R>]) -> Result<Vec<R>>
    where
        R: Record,
        C: Cursor,
    {
        let descriptor = self.discover::<R>()?;
        let columns = cursor
            .columns()
            .context(MappingError::ColumnEnumerationFailed)?;
        let mut result = Vec::new();
        while cursor.advance() {
            let row = result.len();
            let mut buffer = vec![Value::Null; columns.len()];
            cursor
                .populate(&mut buffer)
                .context(MappingError::RowScanFailed { row })?;
            result.push(materialize(&descriptor, &columns, buffer, hooks, row)?);
        }
        log::trace!(
            "Mapped {} rows into {}",
            result.len(),
            descriptor.type_name()
        );
        Ok(result)
    }

    /// Same as [`Mapper::map`] over a stream of labeled rows, as produced by async sources.
    pub async fn map_stream<R, S>(&self, stream: S, hooks: &[&dyn Hook<R>]) -> Result<Vec<R>>
    where
        R: Record,
        S: Stream<Item = Result<RowLabeled>>,
    {
        let descriptor = self.discover::<R>()?;
        let mut stream = pin!(stream);
        let mut result = Vec::new();
        while let Some(labeled) = stream.next().await {
            let row = result.len();
            let labeled = labeled.context(MappingError::RowScanFailed { row })?;
            result.push(materialize(
                &descriptor,
                &labeled.labels,
                labeled.values.into_vec(),
                hooks,
                row,
            )?);
        }
        Ok(result)
    }
}

fn materialize<R: Record>(
    descriptor: &TypeDescriptor,
    columns: &[String],
    values: Vec<Value>,
    hooks: &[&dyn Hook<R>],
    row: usize,
) -> Result<R> {
    let mut record = R::default();
    for (column, value) in zip(columns, values) {
        let Some(field) = descriptor.field_for(column) else {
            continue;
        };
        assign(&mut record, field, value)?;
    }
    for (i, hook) in hooks.iter().enumerate() {
        hook.call(&mut record)
            .context(MappingError::HookFailed { row, hook: i })?;
    }
    Ok(record)
}

/// Coerces `value` to the kind of `field` and writes it into `record`. `Null` leaves the
/// field untouched.
fn assign<R: Record>(record: &mut R, field: &FieldDef, value: Value) -> Result<()> {
    if !field.settable {
        return Err(MappingError::FieldNotSettable { field: field.name }.into());
    }
    if value.is_null() {
        return Ok(());
    }
    let Some(kind) = field.kind else {
        return record.set_field_value(field.name, value);
    };
    let failed = |error: Error| {
        Error::new(MappingError::CoercionFailed {
            field: field.name,
            kind,
            reason: format!("{error:#}"),
        })
    };
    let value = coerce(value, kind).map_err(failed)?;
    record.set_field_value(field.name, value).map_err(failed)
}
