//! Procedural macros for the aoc-plugin library

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{Ident, ItemFn, Lit, parse_macro_input};

/// Attribute macro exporting a function as a solver symbol
///
/// The annotated function must have the shape `fn(&str) -> Result<T, E>` where
/// both `T` and `E` implement `Display`. The function itself is left untouched;
/// alongside it the macro emits a `#[no_mangle]` static named `Day{day}{part}`
/// holding an `aoc_plugin::SolverDecl` that the runner can resolve.
///
/// # Attributes
///
/// - `day`: Required. The day number (1-25)
/// - `part`: Required. `A` or `B` (bare or quoted)
///
/// # Example
///
/// ```ignore
/// use aoc_plugin::solver;
///
/// #[solver(day = 1, part = B)]
/// fn basement(input: &str) -> Result<usize, String> {
///     // ...
/// }
/// ```
///
/// expands to the function plus
///
/// ```ignore
/// #[unsafe(no_mangle)]
/// pub static Day1B: ::aoc_plugin::SolverDecl = /* ... */;
/// ```
#[proc_macro_attribute]
pub fn solver(attr: TokenStream, item: TokenStream) -> TokenStream {
    let function = parse_macro_input!(item as ItemFn);

    let mut day: Option<u8> = None;
    let mut part: Option<Ident> = None;

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("day") {
            let value: Lit = meta.value()?.parse()?;
            let Lit::Int(lit_int) = value else {
                return Err(syn::Error::new_spanned(value, "day must be an integer"));
            };
            let parsed: u8 = lit_int
                .base10_parse()
                .map_err(|_| syn::Error::new(lit_int.span(), "day must be between 1 and 25"))?;
            if !(1..=25).contains(&parsed) {
                return Err(syn::Error::new(lit_int.span(), "day must be between 1 and 25"));
            }
            day = Some(parsed);
            Ok(())
        } else if meta.path.is_ident("part") {
            let input = meta.value()?;
            let (name, span) = if input.peek(syn::LitStr) {
                let lit: syn::LitStr = input.parse()?;
                (lit.value(), lit.span())
            } else {
                let ident: Ident = input.parse()?;
                (ident.to_string(), ident.span())
            };
            match name.as_str() {
                "A" | "B" => {
                    part = Some(Ident::new(&name, span));
                    Ok(())
                }
                _ => Err(syn::Error::new(span, "part must be A or B")),
            }
        } else {
            Err(meta.error("unsupported solver attribute, expected `day` or `part`"))
        }
    });
    parse_macro_input!(attr with parser);

    let Some(day) = day else {
        return missing("day");
    };
    let Some(part) = part else {
        return missing("part");
    };

    let symbol = format_ident!("Day{}{}", day, part, span = part.span());
    let name = &function.sig.ident;

    let expanded = quote! {
        #function

        #[allow(non_upper_case_globals)]
        #[unsafe(no_mangle)]
        pub static #symbol: ::aoc_plugin::SolverDecl = ::aoc_plugin::SolverDecl::new({
            unsafe extern "C" fn __aoc_solve(
                input: *const u8,
                len: usize,
                sink: *mut ::aoc_plugin::abi::OutcomeSink,
            ) {
                unsafe { ::aoc_plugin::abi::dispatch(input, len, sink, #name) }
            }
            __aoc_solve
        });
    };

    TokenStream::from(expanded)
}

fn missing(key: &str) -> TokenStream {
    syn::Error::new(
        Span::call_site(),
        format!("missing required `{}` attribute, e.g. #[solver(day = 1, part = A)]", key),
    )
    .to_compile_error()
    .into()
}
