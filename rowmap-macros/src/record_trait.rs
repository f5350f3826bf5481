use crate::{decode_record::RecordMetadata, encode_field_def::encode_field_def};
use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn record_trait(record: &RecordMetadata) -> TokenStream {
    let struct_name = &record.item.ident;
    let field_defs = record.fields.iter().map(encode_field_def);
    let mapped = record.fields.iter().filter(|f| f.is_mapped());
    let getters = mapped.clone().map(|f| {
        let ident = &f.ident;
        let name = &f.name;
        quote! {
            #name => Some(::rowmap::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)))
        }
    });
    let setters = mapped.map(|f| {
        let ident = &f.ident;
        let name = &f.name;
        let ty = &f.ty;
        if f.readonly {
            quote! {
                #name => Err(::rowmap::MappingError::FieldNotSettable { field: #name }.into())
            }
        } else {
            quote! {
                #name => {
                    self.#ident = <#ty as ::rowmap::AsValue>::try_from_value(value)?;
                    Ok(())
                }
            }
        }
    });
    quote! {
        impl ::rowmap::Reflect for #struct_name {
            type Underlying = Self;

            fn shape() -> ::rowmap::Shape {
                static FIELDS: ::std::sync::LazyLock<Box<[::rowmap::FieldDef]>> =
                    ::std::sync::LazyLock::new(|| vec![#(#field_defs),*].into_boxed_slice());
                ::rowmap::Shape::Struct(&FIELDS)
            }
        }

        impl ::rowmap::Record for #struct_name {
            fn field_value(&self, field: &str) -> Option<::rowmap::Value> {
                match field {
                    #(#getters,)*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn set_field_value(
                &mut self,
                field: &str,
                value: ::rowmap::Value,
            ) -> ::rowmap::Result<()> {
                match field {
                    #(#setters,)*
                    _ => Err(::rowmap::MappingError::FieldNotFound { name: field.into() }.into()),
                }
            }
        }
    }
}
