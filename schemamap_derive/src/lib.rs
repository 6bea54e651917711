extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, Lit, Meta, Type};

/// Implements `schemamap::Described` for a struct with named fields.
///
/// Only structs with named fields are accepted; unit structs, tuple structs,
/// enums and unions are rejected at compile time.
/// The table is named after the struct unless `table_name = "..."` is given.
#[proc_macro_attribute]
pub fn schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let table_name = if attr.is_empty() {
        input.ident.unraw().to_string()
    } else {
        let meta = parse_macro_input!(attr as Meta);
        match table_name_from(&meta) {
            Ok(name) => name,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    match expand(&input, &table_name) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn table_name_from(meta: &Meta) -> syn::Result<String> {
    if let Meta::NameValue(nv) = meta {
        if nv.path.is_ident("table_name") {
            if let Expr::Lit(expr_lit) = &nv.value {
                if let Lit::Str(litstr) = &expr_lit.lit {
                    return Ok(litstr.value());
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        meta,
        "expected `table_name = \"...\"`",
    ))
}

fn expand(input: &DeriveInput, table_name: &str) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "#[schema] needs a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "#[schema] can only be used on structs",
            ));
        }
    };

    let mut cols = Vec::new();
    for f in fields {
        let Some(ident) = &f.ident else { continue };
        let col_name = ident.unraw().to_string();
        let type_name = type_name(&f.ty);
        cols.push(quote! {
            .field(#col_name, ::schemamap::SemanticType::from_type_name(#type_name))
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::schemamap::Described for #struct_name #ty_generics #where_clause {
            fn descriptor() -> ::schemamap::TypeDescriptor {
                ::schemamap::TypeDescriptor::new(#table_name)
                    #(#cols)*
            }
        }
    })
}

// `std::string::String` and `&'a str` classify by their last segment.
fn type_name(ty: &Type) -> String {
    match ty {
        Type::Path(p) => match p.path.segments.last() {
            Some(seg) => seg.ident.unraw().to_string(),
            None => ty.to_token_stream().to_string(),
        },
        Type::Reference(r) => type_name(&r.elem),
        Type::Paren(p) => type_name(&p.elem),
        Type::Group(g) => type_name(&g.elem),
        other => other.to_token_stream().to_string(),
    }
}
