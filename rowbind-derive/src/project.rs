use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields};

use crate::entity::is_skipped;

pub(crate) fn derive_projection(input: &DeriveInput) -> TokenStream {
    match impl_projection(input) {
        Ok(ts) => ts.into(),
        Err(e) => e.into_compile_error().into(),
    }
}

fn impl_projection(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Projection)] does not support generic types",
        ));
    }
    let Data::Struct(DataStruct {
        fields: Fields::Named(fields),
        ..
    }) = &input.data
    else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Projection)] only supports structs with named fields",
        ));
    };

    let mut params = Vec::with_capacity(fields.named.len());
    let mut inits = Vec::with_capacity(fields.named.len());
    for f in &fields.named {
        if is_skipped(f)? {
            return Err(syn::Error::new_spanned(
                f,
                "#[rowbind(skip)] is not supported on projection parameters",
            ));
        }
        let fname = f.ident.as_ref().expect("named field");
        let fname_str = fname.to_string();
        let ty = &f.ty;
        params.push(quote! { #fname_str });
        inits.push(quote! {
            #fname: ::rowbind::absent_or::<#ty>(args.next().flatten())?
        });
    }

    Ok(quote! {
        impl ::rowbind::Projection for #name {
            const PARAMS: &'static [&'static str] = &[#(#params),*];

            fn build(
                args: ::std::vec::Vec<::core::option::Option<::rowbind::Value>>,
            ) -> ::core::result::Result<Self, ::rowbind::BindError> {
                let mut args = args.into_iter();
                ::core::result::Result::Ok(Self {
                    #(#inits,)*
                })
            }
        }
    })
}
