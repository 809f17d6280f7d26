mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any struct with named fields, or a unit struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use latexexpr_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = format!("`{}` has no value", self.name), labels = ["this variable"])]
/// pub struct NoValue {
///     name: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The text of the labels that point to the spans of the error, in order.       |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// `message` is required. Each tag accepts an expression; `labels` must evaluate to something
/// iterable over string-like items. For structs with named fields, the expression is evaluated
/// with the members of the struct in scope, so they can be used in the expression.
///
/// The generated code refers to the `ariadne` and `latexexpr_error` crates by name, so both must
/// be dependencies of the crate using the derive.
///
/// [`ErrorKind`]: https://docs.rs/latexexpr-error/latest/latexexpr_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl latexexpr_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            #target
        }
    }.into()
}
