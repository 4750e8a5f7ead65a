use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that turns struct fields into template placeholders.
///
/// For each field, extracts:
/// - Placeholder name (the field name, or #[serde(rename = "...")])
/// - Description (from doc comments)
///
/// Generates `placeholders() -> &'static [Placeholder]` and
/// `substitutions(&self) -> Vec<(&'static str, String)>`. Every field type
/// must implement `Display`.
#[proc_macro_derive(Placeholders, attributes(serde))]
pub fn derive_placeholders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "Placeholders only supports named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Placeholders only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let mut field_info = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let rename = match get_serde_rename(&field.attrs) {
            Ok(rename) => rename,
            Err(err) => return err.to_compile_error().into(),
        };
        let placeholder = rename.unwrap_or_else(|| ident.to_string());
        let doc = get_doc_comment(&field.attrs);
        field_info.push((ident, placeholder, doc));
    }

    let table_entries = field_info.iter().map(|(_, placeholder, desc)| {
        quote! {
            Placeholder {
                name: #placeholder,
                description: #desc,
            }
        }
    });

    let substitutions = field_info.iter().map(|(ident, placeholder, _)| {
        quote! {
            (#placeholder, self.#ident.to_string())
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn placeholders() -> &'static [Placeholder] {
                static PLACEHOLDERS: &[Placeholder] = &[
                    #(#table_entries),*
                ];
                PLACEHOLDERS
            }

            pub fn substitutions(&self) -> Vec<(&'static str, String)> {
                vec![
                    #(#substitutions),*
                ]
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_serde_rename(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(syn::token::Paren) {
                    // rename(serialize = "..", deserialize = "..")
                    meta.parse_nested_meta(|inner| {
                        let value: syn::LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            rename = Some(value.value());
                        }
                        Ok(())
                    })?;
                } else {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                }
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }
    Ok(rename)
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}
