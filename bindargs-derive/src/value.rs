use std::collections::HashMap;

use darling::{FromAttributes as _, util::SpannedValue};
use itertools::Itertools;
use lazy_format::lazy_format;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, Token, Type, Variant, punctuated::Punctuated,
    spanned::Spanned,
};

use crate::common::{bindargs_attributes, detect_collision, reject_generics};

#[derive(darling::FromAttributes, Debug, Default)]
#[darling(attributes(bindargs))]
struct VariantAttr {
    name: Option<SpannedValue<String>>,
}

/// Unit variants are matched case-insensitively against their names, which
/// default to the variant identifiers.
fn derive_value_enum(
    ident: &Ident,
    variants: &Punctuated<Variant, Token![,]>,
) -> syn::Result<TokenStream2> {
    let mut seen = HashMap::new();

    let variants: Vec<(String, &Ident)> = variants
        .iter()
        .map(|variant| {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.span(),
                    "`derive(Value)` only supports unit variants",
                ));
            }

            let attr = match bindargs_attributes(&variant.attrs) {
                Some(attrs) => VariantAttr::from_attributes(&attrs)?,
                None => VariantAttr::default(),
            };

            let name = attr.name.unwrap_or_else(|| {
                SpannedValue::new(variant.ident.to_string(), variant.ident.span())
            });

            detect_collision(
                &mut seen,
                Some(SpannedValue::new(name.to_ascii_lowercase(), name.span())),
                |name| lazy_format!("value name {name:?} (names are case-insensitive)"),
            )?;

            Ok(((*name).clone(), &variant.ident))
        })
        .try_collect()?;

    if variants.is_empty() {
        return Err(syn::Error::new(
            ident.span(),
            "`derive(Value)` needs at least one variant",
        ));
    }

    let arms = variants.iter().map(|(name, variant)| {
        quote! {
            if argument.eq_ignore_ascii_case(#name) {
                return ::core::result::Result::Ok(Self::#variant);
            }
        }
    });

    let names = variants.iter().map(|(name, _)| name.as_str());
    let type_name = ident.to_string();

    Ok(quote! {
        impl ::bindargs::parameter::Value for #ident {
            fn from_arg(
                argument: &str,
            ) -> ::core::result::Result<Self, ::bindargs::errors::ValueError> {
                #(#arms)*

                ::core::result::Result::Err(::bindargs::errors::ValueError::ShouldBe {
                    expected: &[ #(#names,)* ],
                })
            }

            fn placeholder() -> ::bindargs::parameter::Placeholder {
                ::bindargs::parameter::Placeholder::Named(#type_name)
            }
        }
    })
}

fn derive_value_newtype(ident: &Ident, field: Option<&Ident>, ty: &Type) -> TokenStream2 {
    let struct_body = match field {
        Some(field) => quote! { { #field: value } },
        None => quote! { ( value ) },
    };

    quote! {
        impl ::bindargs::parameter::Value for #ident {
            const TOGGLE: bool = <#ty as ::bindargs::parameter::Value>::TOGGLE;

            fn from_arg(
                argument: &str,
            ) -> ::core::result::Result<Self, ::bindargs::errors::ValueError> {
                <#ty as ::bindargs::parameter::Value>::from_arg(argument)
                    .map(|value| Self #struct_body)
            }

            fn from_absent() -> ::core::result::Result<Self, ::bindargs::errors::ValueError> {
                <#ty as ::bindargs::parameter::Value>::from_absent()
                    .map(|value| Self #struct_body)
            }

            fn placeholder() -> ::bindargs::parameter::Placeholder {
                <#ty as ::bindargs::parameter::Value>::placeholder()
            }
        }
    }
}

pub fn derive_value_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics, "Value")?;

    match input.data {
        Data::Struct(ref data) => {
            let field = data.fields.iter().exactly_one().map_err(|_| {
                syn::Error::new(
                    input.span(),
                    "can only derive `Value` on structs with exactly one field",
                )
            })?;

            Ok(derive_value_newtype(
                &input.ident,
                field.ident.as_ref(),
                &field.ty,
            ))
        }
        Data::Enum(ref data) => derive_value_enum(&input.ident, &data.variants),
        Data::Union(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Value` on a union",
        )),
    }
}
