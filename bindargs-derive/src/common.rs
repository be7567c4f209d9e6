use std::{
    collections::{HashMap, hash_map::Entry},
    fmt::Display,
    hash::Hash,
};

use darling::util::SpannedValue;
use itertools::Itertools as _;
use lazy_format::lazy_format;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::ToTokens;
use syn::{Attribute, Expr, Generics, Ident, Meta, spanned::Spanned as _};

pub struct IdentString<'a> {
    raw: &'a Ident,
    string: String,
}

impl<'a> IdentString<'a> {
    pub fn new(ident: &'a Ident) -> Self {
        Self {
            string: ident.to_string(),
            raw: ident,
        }
    }

    pub fn as_str(&self) -> &str {
        self.string.as_str()
    }

    pub fn span(&self) -> Span {
        self.raw.span()
    }
}

impl ToTokens for IdentString<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        self.raw.to_tokens(tokens);
    }
}

/// Collect the doc comments on an item into a single line of text. Blank
/// doc lines are dropped, and the rest are joined with spaces.
pub fn compute_docs(attrs: &[Attribute]) -> syn::Result<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| match attr.meta {
            Meta::NameValue(ref meta) => Some(meta),
            _ => None,
        })
        .filter(|meta| meta.path.is_ident("doc"))
        .map(|meta| match meta.value {
            Expr::Lit(ref lit) => match lit.lit {
                syn::Lit::Str(ref lit) => Ok(lit.value()),
                _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
            },
            Expr::Macro(ref expr) => Err(syn::Error::new(
                expr.span(),
                "macro #[doc] attributes aren't supported",
            )),
            _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
        })
        .try_collect()?;

    Ok(lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .join(" "))
}

/// The `#[bindargs(...)]` attributes on an item, or `None` if it has none at
/// all. A bare `#[bindargs]` counts as present, with no options.
pub fn bindargs_attributes(attrs: &[Attribute]) -> Option<Vec<Attribute>> {
    let mut found = false;

    let lists = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("bindargs"))
        .inspect(|_| found = true)
        .filter(|attr| !matches!(attr.meta, Meta::Path(_)))
        .cloned()
        .collect();

    found.then_some(lists)
}

pub fn detect_collision<T: Hash + Eq + Clone, M: Display>(
    known: &mut HashMap<T, Span>,
    new: Option<SpannedValue<T>>,
    message: impl Fn(T) -> M,
) -> syn::Result<()> {
    match new {
        Some(tag) => match known.entry((*tag).clone()) {
            Entry::Occupied(entry) => {
                let name = message((*tag).clone());
                let mut err1 = syn::Error::new(tag.span(), lazy_format!("duplicate {name}"));
                let err2 = syn::Error::new(*entry.get(), "original use here");

                err1.combine(err2);
                Err(err1)
            }
            Entry::Vacant(entry) => {
                entry.insert(tag.span());
                Ok(())
            }
        },
        None => Ok(()),
    }
}

/// The types we derive for are bound into from `'static` parsers, so they
/// can't have any generics.
pub fn reject_generics(generics: &Generics, derive: &str) -> syn::Result<()> {
    match generics.params.first() {
        None => Ok(()),
        Some(param) => Err(syn::Error::new(
            param.span(),
            lazy_format!("generic types aren't supported by `derive({derive})`"),
        )),
    }
}
