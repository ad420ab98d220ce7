use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Field, Fields};

pub(crate) fn derive_entity(input: &DeriveInput) -> TokenStream {
    match impl_entity(input) {
        Ok(ts) => ts.into(),
        Err(e) => e.into_compile_error().into(),
    }
}

fn impl_entity(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Entity)] does not support generic types",
        ));
    }
    let Data::Struct(DataStruct {
        fields: Fields::Named(fields),
        ..
    }) = &input.data
    else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Entity)] only supports structs with named fields",
        ));
    };

    let mut properties = Vec::with_capacity(fields.named.len());
    for f in &fields.named {
        if is_skipped(f)? {
            continue;
        }
        let fname = f.ident.as_ref().expect("named field");
        let fname_str = fname.to_string();
        let ty = &f.ty;
        properties.push(quote! {
            ::rowbind::Property::new(
                #fname_str,
                <#ty as ::rowbind::FromValue>::KIND,
                <#ty as ::rowbind::FromValue>::NULLABLE,
                |target: &mut #name, value: ::rowbind::Value| {
                    target.#fname = <#ty as ::rowbind::FromValue>::from_value(value)?;
                    ::core::result::Result::Ok(())
                },
            )
        });
    }

    Ok(quote! {
        impl ::rowbind::Entity for #name {
            fn shape() -> &'static ::rowbind::Shape<Self> {
                static SHAPE: ::std::sync::OnceLock<::rowbind::Shape<#name>> =
                    ::std::sync::OnceLock::new();
                SHAPE.get_or_init(|| {
                    ::rowbind::Shape::new(::std::vec![
                        #(#properties,)*
                    ])
                })
            }
        }
    })
}

/// `#[rowbind(skip)]` excludes a field (e.g. a relationship/navigation
/// member) from the property table entirely.
pub(crate) fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skipped = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("rowbind") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skipped = true;
                Ok(())
            } else {
                Err(meta.error("unsupported rowbind attribute; expected `skip`"))
            }
        })?;
    }
    Ok(skipped)
}
