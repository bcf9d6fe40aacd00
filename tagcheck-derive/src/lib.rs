//! Proc-macro implementation for `#[derive(Record)]`.
//!
//! The derive builds the field-descriptor table the `tagcheck` engine walks at
//! validation time: every named field, in declaration order, with its declared
//! type and the rule expression attached under each schema name.
use proc_macro::TokenStream;

mod args;
mod expand;
mod record_info;

use record_info::RecordInfo;

type Result<T> = std::result::Result<T, syn::Error>;

/// Derive macro implementing `tagcheck::Record` and `tagcheck::Reflect`.
///
/// # Field attributes
///
/// | Attribute | Purpose |
/// |-----------|---------|
/// | `#[check(schema = "rules")]` | Attach a comma separated rule expression for `schema`. |
/// | `#[check(a = "..", b = "..")]` | Different rules under different schemas. |
/// | `#[check(skip)]` | Leave the field out of the table entirely. |
///
/// # Example
///
/// ```rust,ignore
/// use tagcheck::Record;
///
/// #[derive(Record)]
/// struct SignUp {
///     #[check(signup = "required,email")]
///     email: String,
///     #[check(signup = "required,min=8")]
///     password: String,
///     #[check(signup = "eq=password")]
///     confirmation: String,
/// }
/// ```
///
/// # Errors
///
/// Compile-time errors are emitted for:
/// - enums, tuple structs and unit structs
/// - generic structs
/// - non-string tag values
/// - the same schema named twice on one field
/// - `skip` mixed with schema rules
#[proc_macro_derive(Record, attributes(check))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    derive_record_impl(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_record_impl(input: proc_macro2::TokenStream) -> Result<proc_macro2::TokenStream> {
    let input: syn::DeriveInput = syn::parse2(input)?;
    let info = RecordInfo::from_derive_input(input)?;
    Ok(expand::expand_record(&info))
}
