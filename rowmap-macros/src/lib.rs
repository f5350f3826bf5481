mod decode_field;
mod decode_record;
mod encode_field_def;
mod record_trait;

use decode_record::decode_record;
use proc_macro::TokenStream;
use record_trait::record_trait;
use syn::{ItemStruct, parse_macro_input};

/// Implements `Reflect` and `Record` for a struct with named fields.
///
/// ```ignore
/// #[derive(Record, Default)]
/// struct User {
///     #[tag(db = "user_id", json = "id")]
///     id: i64,
///     #[tag(db = "name")]
///     name: String,
///     #[tag(db = "created_by")]
///     #[rowmap(readonly)]
///     created_by: String,
///     cache: Vec<u8>,
/// }
/// ```
///
/// `tag` declares one column per annotation label, the mapper picks the pair matching its
/// configured label. Fields without `tag` are invisible to mapping and need not implement
/// `AsValue`. `rowmap(readonly)` makes the mapper refuse to write the field.
#[proc_macro_derive(Record, attributes(tag, rowmap))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    match decode_record(item) {
        Ok(record) => record_trait(&record).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
