use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;

pub fn encode_field_def(metadata: &FieldMetadata) -> TokenStream {
    let name = &metadata.name;
    let ty = &metadata.ty;
    let kind = if metadata.is_mapped() {
        quote!(Some(<#ty as ::rowmap::AsValue>::kind()))
    } else {
        quote!(None)
    };
    let tags = metadata
        .tags
        .iter()
        .map(|(label, value)| quote!((#label, #value)));
    let settable = !metadata.readonly;
    quote! {
        ::rowmap::FieldDef {
            name: #name,
            kind: #kind,
            tags: &[#(#tags),*],
            settable: #settable,
        }
    }
}
