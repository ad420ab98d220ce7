use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub(crate) fn derive_dyn_enum(input: &DeriveInput) -> TokenStream {
    match impl_dyn_enum(input) {
        Ok(ts) => ts.into(),
        Err(e) => e.into_compile_error().into(),
    }
}

fn impl_dyn_enum(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(DynEnum)] does not support generic types",
        ));
    }
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(DynEnum)] only supports enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(DynEnum)] requires at least one variant",
        ));
    }
    for v in &data.variants {
        if !matches!(v.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                v,
                "#[derive(DynEnum)] only supports unit variants",
            ));
        }
    }

    let name_str = name.to_string();
    let name_arms = data.variants.iter().map(|v| {
        let vident = &v.ident;
        let vname = vident.to_string();
        quote! { #vname => ::core::option::Option::Some(Self::#vident), }
    });
    let ordinal_arms = data.variants.iter().enumerate().map(|(i, v)| {
        let vident = &v.ident;
        let ord = i as i64;
        quote! { #ord => ::core::option::Option::Some(Self::#vident), }
    });
    let first = &data.variants[0].ident;

    Ok(quote! {
        impl ::rowbind::DynEnum for #name {
            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#name_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn from_ordinal(ordinal: i64) -> ::core::option::Option<Self> {
                match ordinal {
                    #(#ordinal_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn enum_name() -> &'static str {
                #name_str
            }
        }

        impl ::rowbind::FromValue for #name {
            const KIND: ::rowbind::ValueKind = ::rowbind::ValueKind::Str;

            fn from_value(
                value: ::rowbind::Value,
            ) -> ::core::result::Result<Self, ::rowbind::BindError> {
                ::rowbind::enum_from_value::<Self>(value)
            }

            fn absent() -> Self {
                Self::#first
            }
        }
    })
}
