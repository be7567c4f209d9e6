use std::collections::HashMap;

use darling::{
    FromAttributes as _,
    util::{Override, SpannedValue},
};
use itertools::Itertools as _;
use lazy_format::lazy_format;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, Type, spanned::Spanned as _};

use crate::common::{
    IdentString, bindargs_attributes, compute_docs, detect_collision, reject_generics,
};

#[derive(darling::FromAttributes, Debug, Default)]
#[darling(attributes(bindargs))]
struct RawFieldAttr {
    long: Option<SpannedValue<String>>,
    short: Option<SpannedValue<String>>,
    description: Option<String>,
    required: Option<()>,
    unique: Option<()>,
    multiple: Option<()>,
    exclusive: Option<()>,
    default: Option<SpannedValue<()>>,
    obsolete: Option<Override<String>>,
    obsolete_fatal: Option<Override<String>>,
}

struct Obsolete {
    message: String,
    fatal: bool,
}

struct ArgumentField<'a> {
    ident: IdentString<'a>,
    ty: &'a Type,
    long: SpannedValue<String>,
    short: Option<SpannedValue<String>>,
    description: String,
    required: bool,
    unique: bool,
    multiple: bool,
    exclusive: bool,
    default: Option<Span>,
    obsolete: Option<Obsolete>,
}

impl<'a> ArgumentField<'a> {
    /// Returns `None` for fields without a `#[bindargs]` attribute.
    fn from_field(field: &'a Field) -> syn::Result<Option<Self>> {
        let Some(attrs) = bindargs_attributes(&field.attrs) else {
            return Ok(None);
        };

        let parsed = RawFieldAttr::from_attributes(&attrs)?;

        let ident = field.ident.as_ref().map(IdentString::new).ok_or_else(|| {
            syn::Error::new(field.span(), "argument fields must have names")
        })?;

        let long = parsed
            .long
            .unwrap_or_else(|| SpannedValue::new(ident.as_str().to_owned(), ident.span()));
        validate_name(&long, "long")?;

        if let Some(ref short) = parsed.short {
            validate_name(short, "short")?;
        }

        let description = match parsed.description {
            Some(description) => description,
            None => compute_docs(&field.attrs)?,
        };

        let obsolete = match (parsed.obsolete, parsed.obsolete_fatal) {
            (Some(_), Some(_)) => {
                return Err(syn::Error::new(
                    field.span(),
                    "use only one of `obsolete` and `obsolete_fatal`",
                ));
            }
            (Some(message), None) => Some(Obsolete {
                message: message.unwrap_or_default(),
                fatal: false,
            }),
            (None, Some(message)) => Some(Obsolete {
                message: message.unwrap_or_default(),
                fatal: true,
            }),
            (None, None) => None,
        };

        Ok(Some(Self {
            ty: &field.ty,
            long,
            short: parsed.short,
            description,
            required: parsed.required.is_some(),
            unique: parsed.unique.is_some(),
            multiple: parsed.multiple.is_some(),
            exclusive: parsed.exclusive.is_some(),
            default: parsed.default.map(|default| default.span()),
            obsolete,
            ident,
        }))
    }

    fn declaration(&self, name: &Ident) -> TokenStream2 {
        let ident = &self.ident;
        let ty = self.ty;
        let long = self.long.as_str();

        let short = self.short.as_ref().map(|short| {
            let short = short.as_str();
            quote! { .short(#short) }
        });

        let description = (!self.description.is_empty()).then(|| {
            let description = self.description.as_str();
            quote! { .description(#description) }
        });

        let flags = [
            (self.required, quote! { .required() }),
            (self.unique, quote! { .unique() }),
            (self.multiple, quote! { .multiple() }),
            (self.exclusive, quote! { .exclusive() }),
            (self.default.is_some(), quote! { .default_argument() }),
        ]
        .into_iter()
        .filter_map(|(enabled, call)| enabled.then_some(call));

        let obsolete = self.obsolete.as_ref().map(|obsolete| {
            let message = obsolete.message.as_str();
            match obsolete.fatal {
                true => quote! { .obsolete_fatal(#message) },
                false => quote! { .obsolete(#message) },
            }
        });

        quote! {
            {
                #[allow(deprecated)]
                fn access(destination: &mut #name) -> &mut #ty {
                    &mut destination.#ident
                }

                table.argument(
                    ::bindargs::spec::ArgumentSpec::builder(#long, access)
                        #short
                        #description
                        #(#flags)*
                        #obsolete
                )?;
            }
        }
    }
}

/// Mirror the runtime name checks, so that mistakes show up at compile time.
fn validate_name(name: &SpannedValue<String>, kind: &str) -> syn::Result<()> {
    let problem = if name.is_empty() {
        "must not be empty"
    } else if name.contains([':', '+', '-']) {
        "must not contain ':', '+', or '-', which separate names from values"
    } else if name.contains(char::is_whitespace) {
        "must not contain whitespace"
    } else if name.contains('"') {
        "must not contain quotes"
    } else if name.starts_with(['@', '/']) {
        "must not start with '@' or '/'"
    } else {
        return Ok(());
    };

    Err(syn::Error::new(
        name.span(),
        lazy_format!("{kind} argument names {problem}"),
    ))
}

fn detect_collisions(fields: &[ArgumentField<'_>]) -> syn::Result<()> {
    let mut long_names = HashMap::new();
    let mut short_names = HashMap::new();
    let mut default = HashMap::new();

    fields.iter().try_for_each(|field| {
        detect_collision(&mut long_names, Some(field.long.clone()), |name| {
            lazy_format!("argument name '-{name}'")
        })?;
        detect_collision(&mut short_names, field.short.clone(), |name| {
            lazy_format!("short name '/{name}'")
        })?;
        detect_collision(
            &mut default,
            field.default.map(|span| SpannedValue::new((), span)),
            |()| "default argument; only one field may be the default",
        )
    })
}

pub fn derive_arguments_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics, "Arguments")?;

    let fields = match input.data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "`derive(Arguments)` needs a struct with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "`derive(Arguments)` only works on structs",
            ));
        }
    };

    let fields: Vec<ArgumentField<'_>> = fields
        .iter()
        .map(ArgumentField::from_field)
        .filter_map_ok(|field| field)
        .try_collect()?;

    detect_collisions(&fields)?;

    let name = &input.ident;
    let declarations = fields.iter().map(|field| field.declaration(name));

    Ok(quote! {
        impl ::bindargs::Arguments for #name {
            fn declare(
                table: &mut ::bindargs::spec::SpecTableBuilder<Self>,
            ) -> ::core::result::Result<(), ::bindargs::errors::ConfigurationError> {
                #(#declarations)*

                ::core::result::Result::Ok(())
            }
        }
    })
}
