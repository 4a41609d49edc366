mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait of `teachers-error` for the given struct.
///
/// The information of the error is given with the `error` attribute:
/// ```
/// use teachers_attrs::ErrorKind;
/// use teachers_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
///
/// assert_eq!(Foo.message(), "unexpected end of input");
/// ```
///
/// Fields of the struct can be used in every tag, and the `i`-th label is placed on the `i`-th
/// span of the error:
/// ```
/// use ariadne::Report;
/// use teachers_attrs::ErrorKind;
/// use teachers_error::{Error, ErrorKind};
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown function `{}`", name),
///     labels = ["this function", "called here"],
///     help = "check the spelling of the function",
/// )]
/// pub struct UnknownFunction {
///     name: String,
/// }
///
/// let kind = UnknownFunction { name: "g".to_string() };
/// assert_eq!(kind.message(), "unknown function `g`");
///
/// let _: Report<(&str, std::ops::Range<usize>)> = kind.build_report("answer", &[0..1, 1..4]);
///
/// let error = Error::new(vec![0..1, 1..4], UnknownFunction { name: "g".to_string() });
/// let rendered = error.render("answer", "g(x)");
/// assert!(rendered.contains("unknown function `g`"));
/// assert!(rendered.contains("this function"));
/// assert!(rendered.contains("check the spelling of the function"));
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error, and by `ErrorKind::message`.  |
/// | `labels`    | Array of label texts; the `i`-th label points at the `i`-th span.            |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated
/// with the fields of the struct in scope (tuple structs are rejected).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ::teachers_error::ErrorKind for #name {
            #target
        }
    }.into()
}
