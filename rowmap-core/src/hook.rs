use crate::Result;

/// Callback run on every record right after all its fields are populated.
///
/// Any closure `Fn(&mut R) -> Result<()>` is a hook. Hooks run in the order given, the first
/// failure aborts the whole materialization.
pub trait Hook<R> {
    fn call(&self, record: &mut R) -> Result<()>;
}

impl<R, F> Hook<R> for F
where
    F: Fn(&mut R) -> Result<()>,
{
    fn call(&self, record: &mut R) -> Result<()> {
        self(record)
    }
}
