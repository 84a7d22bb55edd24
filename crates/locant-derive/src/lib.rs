// SPDX-License-Identifier: MIT OR Apache-2.0
//! `#[derive(JsonSchema)]`: generates `locant_core::JsonSchema`,
//! `JsonValue`, and `WriteJson` impls for a struct from its fields.
//!
//! Field attributes, under `#[locant(...)]`:
//! - `rename = "..."` - use a different JSON member name than the field's
//!   Rust identifier (the tweet `id`/`id_str` pair this was generalized
//!   from needs both names live on the same struct, so this also composes
//!   with two fields sharing a Rust-side prefix but distinct idents).
//! - `as_string` - the JSON value is a quoted string wrapping the literal
//!   (`"id_str": "12345"` for a numeric field), not the bare literal.
//! - `empty_is_null` - an empty string value (`""`) is treated the same as
//!   a JSON `null` rather than constructing an empty `String`.

#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

struct FieldPlan {
    ident: syn::Ident,
    json_name: String,
    as_string: bool,
    empty_is_null: bool,
}

/// Derive `JsonSchema`, `JsonValue`, and `WriteJson` for a struct.
#[proc_macro_derive(JsonSchema, attributes(locant))]
pub fn derive_json_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "JsonSchema can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "JsonSchema can only be derived for structs",
            ));
        }
    };

    let mut plans = Vec::with_capacity(named.len());
    for field in named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "tuple struct fields are not supported"))?;
        let mut json_name = ident.to_string();
        let mut as_string = false;
        let mut empty_is_null = false;
        for attr in &field.attrs {
            if !attr.path().is_ident("locant") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    json_name = lit.value();
                } else if meta.path.is_ident("as_string") {
                    as_string = true;
                } else if meta.path.is_ident("empty_is_null") {
                    empty_is_null = true;
                } else {
                    return Err(meta.error("unrecognized #[locant(...)] attribute"));
                }
                Ok(())
            })?;
        }
        plans.push(FieldPlan {
            ident,
            json_name,
            as_string,
            empty_is_null,
        });
    }

    let members = plans.iter().map(|p| {
        let name = &p.json_name;
        quote! {
            ::locant::MemberMeta {
                name: #name,
                hash: ::locant::hash::name_hash(#name.as_bytes()),
            }
        }
    });

    let parse_fields = plans.iter().enumerate().map(|(pos, p)| {
        let ident = &p.ident;
        let name = &p.json_name;
        let empty_is_null = p.empty_is_null;
        if p.as_string {
            quote! {
                let #ident = ::locant::class::require_as_string(
                    locations, #pos, #name, options, locations.base_offset(), #empty_is_null,
                )?;
            }
        } else {
            quote! {
                let #ident = ::locant::class::require(
                    locations, #pos, #name, options, locations.base_offset(), #empty_is_null,
                )?;
            }
        }
    });
    let field_idents = plans.iter().map(|p| &p.ident).collect::<Vec<_>>();

    let write_fields = plans.iter().enumerate().map(|(i, p)| {
        let ident = &p.ident;
        let name = &p.json_name;
        let is_first = i == 0;
        if p.as_string {
            quote! {
                ::locant::ser::write_member_as_string(sink, #name, &self.#ident, #is_first)?;
            }
        } else {
            quote! {
                ::locant::ser::write_member(sink, #name, &self.#ident, #is_first)?;
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::locant::JsonSchema for #struct_name #ty_generics #where_clause {
            const MEMBERS: &'static [::locant::MemberMeta] = &[ #(#members),* ];

            fn parse(
                locations: &::locant::ClassLocations<'_>,
                options: ::locant::ParseOptions,
            ) -> ::locant::Result<Self> {
                #(#parse_fields)*
                Ok(Self { #(#field_idents),* })
            }

            fn write(&self, sink: &mut dyn ::locant::Sink) -> ::std::fmt::Result {
                #(#write_fields)*
                Ok(())
            }
        }

        impl #impl_generics ::locant::JsonValue for #struct_name #ty_generics #where_clause {
            const TAG: ::locant::Tag = ::locant::Tag::Class;

            fn from_slice(
                slice: ::locant::ValueSlice<'_>,
                options: ::locant::ParseOptions,
            ) -> ::locant::Result<Self> {
                ::locant::parse_class(slice, options)
            }
        }

        impl #impl_generics ::locant::WriteJson for #struct_name #ty_generics #where_clause {
            fn write_json(&self, sink: &mut dyn ::locant::Sink) -> ::std::fmt::Result {
                use ::std::fmt::Write as _;
                sink.write_char('{')?;
                ::locant::JsonSchema::write(self, sink)?;
                sink.write_char('}')
            }
        }
    })
}
