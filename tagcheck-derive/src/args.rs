use syn::{ext::IdentExt, Attribute, Lit, LitStr, Result};

/// Parsed form of every `#[check(..)]` attribute attached to one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldArgs {
    /// `#[check(skip)]`: leave the field out of the descriptor table.
    pub skip: bool,
    /// `(schema, expression)` pairs in the order they were written.
    pub tags: Vec<(String, LitStr)>,
}

impl FieldArgs {
    /// Parse all `#[check(..)]` attributes of a field. Fields without the
    /// attribute yield the default (no tags, not skipped).
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = FieldArgs::default();
        let mut skip_attr: Option<&Attribute> = None;

        for attr in attrs.iter().filter(|a| a.path().is_ident("check")) {
            attr.parse_nested_meta(|meta| {
                let key_path = meta.path.clone();

                if key_path.is_ident("skip") && !meta.input.peek(syn::Token![=]) {
                    args.skip = true;
                    skip_attr = Some(attr);
                    return Ok(());
                }

                let Some(key) = key_path.get_ident() else {
                    return Err(syn::Error::new_spanned(
                        key_path,
                        "schema name must be a single identifier",
                    ));
                };
                let schema = key.unraw().to_string();

                if !meta.input.peek(syn::Token![=]) {
                    return Err(syn::Error::new_spanned(
                        key_path,
                        "expected `schema = \"rules\"` or `skip`",
                    ));
                }
                let _eq_token: syn::Token![=] = meta.input.parse()?;
                let lit: Lit = meta.input.parse()?;
                let Lit::Str(expr) = lit else {
                    return Err(syn::Error::new_spanned(lit, "Expected string literal"));
                };

                if args.tags.iter().any(|(s, _)| *s == schema) {
                    return Err(syn::Error::new_spanned(
                        key_path,
                        format!("duplicate rules for schema `{}` on this field", schema),
                    ));
                }
                args.tags.push((schema, expr));
                Ok(())
            })?;
        }

        if let Some(attr) = skip_attr.filter(|_| !args.tags.is_empty()) {
            return Err(syn::Error::new_spanned(
                attr,
                "`skip` cannot be combined with schema rules",
            ));
        }

        Ok(args)
    }
}
