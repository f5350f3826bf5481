use std::borrow::Cow;

const TRUNCATE_AT: usize = 97;

/// Shortens long values quoted inside error messages.
pub(crate) fn truncate_long(value: &str) -> Cow<'_, str> {
    match value.char_indices().nth(TRUNCATE_AT) {
        Some((i, _)) => Cow::Owned(format!("{}...", value[..i].trim_end())),
        None => Cow::Borrowed(value),
    }
}
