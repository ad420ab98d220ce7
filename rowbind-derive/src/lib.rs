//! Proc-macros for rowbind: `#[derive(Entity)]`, `#[derive(Projection)]`,
//! and `#[derive(DynEnum)]`.

mod entity;
mod enums;
mod project;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(Entity, attributes(rowbind))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::derive_entity(&input)
}

#[proc_macro_derive(Projection, attributes(rowbind))]
pub fn derive_projection(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    project::derive_projection(&input)
}

#[proc_macro_derive(DynEnum)]
pub fn derive_dyn_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    enums::derive_dyn_enum(&input)
}
