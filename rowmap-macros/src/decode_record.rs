use crate::decode_field::{FieldMetadata, decode_field};
use syn::{Error, Fields, ItemStruct, Result, spanned::Spanned};

pub(crate) struct RecordMetadata {
    pub(crate) item: ItemStruct,
    pub(crate) fields: Vec<FieldMetadata>,
}

pub fn decode_record(item: ItemStruct) -> Result<RecordMetadata> {
    if !item.generics.params.is_empty() {
        return Err(Error::new(
            item.generics.span(),
            "Record cannot be derived for a generic struct",
        ));
    }
    let Fields::Named(named) = &item.fields else {
        return Err(Error::new(
            item.fields.span(),
            "Record can only be derived for a struct with named fields",
        ));
    };
    let fields = named
        .named
        .iter()
        .map(decode_field)
        .collect::<Result<_>>()?;
    Ok(RecordMetadata { item, fields })
}
