use quote::ToTokens;
use syn::{Field, Ident, LitStr, Result, Type, ext::IdentExt, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) name: String,
    pub(crate) tags: Vec<(String, String)>,
    pub(crate) readonly: bool,
}

impl FieldMetadata {
    /// Annotated fields take part in mapping and get accessors generated.
    pub(crate) fn is_mapped(&self) -> bool {
        !self.tags.is_empty()
    }
}

pub fn decode_field(field: &Field) -> Result<FieldMetadata> {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut metadata = FieldMetadata {
        name: ident.unraw().to_string(),
        ident,
        ty: field.ty.clone(),
        tags: Vec::new(),
        readonly: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("tag") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `tag`, use it like: `#[tag(db = \"column\", ...)]`");
            };
            list.parse_nested_meta(|arg| {
                let Some(label) = arg.path.get_ident().map(|v| v.unraw().to_string()) else {
                    panic!(
                        "Annotation label `{}` must be a single identifier",
                        arg.path.to_token_stream().to_string()
                    );
                };
                let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!(
                        "Error while parsing `{label}`, use it like: `#[tag({label} = \"column\")]`"
                    );
                };
                if metadata.tags.iter().any(|(l, _)| *l == label) {
                    panic!(
                        "Annotation label `{label}` appears more than once on field `{}`",
                        metadata.name
                    );
                }
                metadata.tags.push((label, value.value()));
                Ok(())
            })?;
        } else if meta.path().is_ident("rowmap") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `rowmap`, use it like: `#[rowmap(readonly)]`");
            };
            list.parse_nested_meta(|arg| {
                if arg.path.is_ident("readonly") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `readonly`, use it like: `#[rowmap(readonly)]`");
                    };
                    metadata.readonly = true;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside rowmap macro",
                        arg.path.to_token_stream().to_string()
                    );
                }
                Ok(())
            })?;
        }
    }
    Ok(metadata)
}
