//! Derive macros for the advent-core puzzle framework

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, Lit, LitStr, parse_macro_input};

/// Derive `advent_core::Solver` by dispatching part numbers to `Part<N>` impls
///
/// # Attributes
///
/// - `parts`: Required. Number of parts; every `Part<1>..=Part<parts>` must be implemented
///
/// # Example
///
/// ```ignore
/// #[derive(Solver)]
/// #[solver(parts = 2)]
/// struct Day10;
///
/// impl Puzzle for Day10 { /* ... */ }
/// impl Part<1> for Day10 { /* ... */ }
/// impl Part<2> for Day10 { /* ... */ }
/// ```
#[proc_macro_derive(Solver, attributes(solver))]
pub fn derive_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("solver"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "#[derive(Solver)] requires #[solver(parts = N)]")
        })?;

    let mut parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("parts") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => parts = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "parts must be an integer")),
            }
            Ok(())
        } else {
            Err(meta.error("unsupported solver attribute"))
        }
    })?;

    let parts = parts.ok_or_else(|| syn::Error::new_spanned(attr, "missing `parts`"))?;
    if parts == 0 {
        return Err(syn::Error::new_spanned(attr, "`parts` must be at least 1"));
    }
    let numbers: Vec<u8> = (1..=parts).collect();

    Ok(quote! {
        impl #impl_generics ::advent_core::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #parts;

            fn solve_part(
                input: &mut <Self as ::advent_core::Puzzle>::Input<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::advent_core::SolveError> {
                match part {
                    #( #numbers => <Self as ::advent_core::Part<#numbers>>::solve(input), )*
                    _ => ::core::result::Result::Err(::advent_core::SolveError::PartNotImplemented(part)),
                }
            }
        }
    })
}

/// Derive macro submitting the solver to the plugin inventory
///
/// # Attributes
///
/// - `year`: Required. Event year (e.g., 2025)
/// - `day`: Required. Day number (1-25)
/// - `tags`: Optional. String labels for filtering (e.g., ["gf2", "parsing"])
///
/// The type must be a unit struct implementing `advent_core::Solver`;
/// otherwise compilation fails with an unsatisfied `Solver` bound.
///
/// # Example
///
/// ```ignore
/// #[derive(Solver, AutoRegister)]
/// #[solver(parts = 2)]
/// #[puzzle(year = 2025, day = 10, tags = ["linear-algebra"])]
/// pub struct Day10;
/// ```
#[proc_macro_derive(AutoRegister, attributes(puzzle))]
pub fn derive_auto_register(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("puzzle"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                name,
                "#[derive(AutoRegister)] requires #[puzzle(year = .., day = ..)]",
            )
        })?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<LitStr> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => year = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "year must be an integer")),
            }
        } else if meta.path.is_ident("day") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => day = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "day must be an integer")),
            }
        } else if meta.path.is_ident("tags") {
            // tags = ["a", "b"]
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            let list = content.parse_terminated(
                |input: syn::parse::ParseStream| input.parse::<LitStr>(),
                syn::Token![,],
            )?;
            tags.extend(list);
        } else {
            return Err(meta.error("unsupported puzzle attribute"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new(Span::call_site(), "missing `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new(Span::call_site(), "missing `day`"))?;
    if !(1..=25).contains(&day) {
        return Err(syn::Error::new_spanned(attr, "day must be within 1..=25"));
    }

    Ok(quote! {
        const _: () = {
            trait MustImplementSolver: ::advent_core::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::advent_core::inventory::submit! {
            ::advent_core::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}
