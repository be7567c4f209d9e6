mod arguments;
mod common;
mod value;

use proc_macro::TokenStream;

/// Derive `bindargs::Arguments` for a struct with named fields. Every field
/// with a `#[bindargs(...)]` attribute becomes a command-line argument.
///
/// Supported keys are `long = "name"`, `short = "n"`, `description = "..."`
/// (defaulting to the field's doc comment), `required`, `unique`, `multiple`,
/// `exclusive`, `default`, `obsolete` and `obsolete_fatal` (each optionally
/// `= "message"`).
#[proc_macro_derive(Arguments, attributes(bindargs))]
pub fn derive_arguments(item: TokenStream) -> TokenStream {
    match arguments::derive_arguments_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `bindargs::parameter::Value` for an enum of unit variants, or for a
/// newtype struct wrapping another `Value`.
#[proc_macro_derive(Value, attributes(bindargs))]
pub fn derive_value(item: TokenStream) -> TokenStream {
    match value::derive_value_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
