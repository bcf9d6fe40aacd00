use syn::{Data, DataStruct, DeriveInput, Fields, Ident, LitStr, Type};

use crate::args::FieldArgs;

/// A field that ends up in the descriptor table.
#[derive(Debug)]
pub struct DescribedField {
    pub ident: Ident,
    pub ty: Type,
    /// `(schema, expression)` pairs in the order they were written.
    pub tags: Vec<(String, LitStr)>,
}

/// Everything `#[derive(Record)]` needs from its input: the struct name and
/// the described fields in declaration order, `#[check(skip)]` fields
/// already removed.
#[derive(Debug)]
pub struct RecordInfo {
    pub ident: Ident,
    pub fields: Vec<DescribedField>,
}

impl RecordInfo {
    pub fn from_derive_input(input: DeriveInput) -> syn::Result<Self> {
        // Descriptor tables are `'static` constants, so no type or lifetime
        // parameters.
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "#[derive(Record)] does not support generic structs",
            ));
        }

        let named = match input.data {
            Data::Struct(DataStruct {
                fields: Fields::Named(named),
                ..
            }) => named.named,
            Data::Struct(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Record)] requires a struct with named fields",
                ))
            }
            Data::Enum(_) | Data::Union(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Record)] can only be used with structs",
                ))
            }
        };

        let mut fields = Vec::with_capacity(named.len());
        for field in named {
            let args = FieldArgs::from_attrs(&field.attrs)?;
            if args.skip {
                continue;
            }
            let Some(ident) = field.ident else {
                continue;
            };
            fields.push(DescribedField {
                ident,
                ty: field.ty,
                tags: args.tags,
            });
        }

        Ok(Self {
            ident: input.ident,
            fields,
        })
    }
}
