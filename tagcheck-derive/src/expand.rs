use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::record_info::RecordInfo;

/// Generate the `Reflect` and `Record` impls for a validated struct.
pub fn expand_record(info: &RecordInfo) -> TokenStream {
    let struct_ident = &info.ident;
    let struct_name = struct_ident.to_string();
    let described = &info.fields;

    let descriptors = described.iter().map(|f| {
        let name = f.ident.to_string();
        let type_name = type_name(&f.ty);
        let tags = f.tags.iter().map(|(schema, expr)| quote! { (#schema, #expr) });
        quote! {
            ::tagcheck::FieldDescriptor::new(#name, #type_name, &[#(#tags),*])
        }
    });

    let arms = described.iter().enumerate().map(|(idx, f)| {
        let ident = &f.ident;
        quote! {
            #idx => ::core::option::Option::Some(::tagcheck::Reflect::reflect(&self.#ident)),
        }
    });

    quote! {
        impl ::tagcheck::Reflect for #struct_ident {
            fn reflect(&self) -> ::tagcheck::Value<'_> {
                ::tagcheck::Value::Record(self)
            }
        }

        impl ::tagcheck::Record for #struct_ident {
            fn record_name(&self) -> &'static str {
                #struct_name
            }

            fn fields(&self) -> &'static [::tagcheck::FieldDescriptor] {
                const FIELDS: &[::tagcheck::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field(&self, index: usize) -> ::core::option::Option<::tagcheck::Value<'_>> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

/// Render a field type the way it was written, without the token spacing
/// `to_string` inserts around punctuation.
fn type_name(ty: &Type) -> String {
    quote!(#ty)
        .to_string()
        .replace(" :: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}
