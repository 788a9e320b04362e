//! Procedural macros for block-directory

use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Enable automatic category inference from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,
}

// Verbs that END an action name. Nouns such as "Block", "Notice" or
// "Permission" must not appear here or they would cut the prefix short.
const ACTION_VERBS: &[&str] = &[
    // Request lifecycle
    "Fetch", "Receive", "Start", "Finish", "Cancel", "Fail", // CRUD
    "Add", "Remove", "Clear", "Update", "Set", "Get", "Load", "Save", "Delete", "Create",
    // Flags
    "Enable", "Disable", "Toggle", "Reset",
];

/// Split a PascalCase string into parts
fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Convert a list of PascalCase parts to snake_case
fn parts_to_snake_case(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert snake_case to PascalCase
fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Infer a category from a variant name
///
/// The category is every part before the first verb:
/// - `DownloadableBlocksFetch` -> `downloadable_blocks`
/// - `InstalledBlockTypeRemove` -> `installed_block_type`
/// - `DidReceiveSomething` -> `async_result`
///
/// Names that start with a verb, or contain none, are uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    let first = parts.first()?;

    if first == "Did" {
        return Some("async_result".to_string());
    }

    if ACTION_VERBS.contains(&first.as_str()) {
        return None;
    }

    let verb_at = parts
        .iter()
        .skip(1)
        .position(|p| ACTION_VERBS.contains(&p.as_str()))?
        + 1;

    Some(parts_to_snake_case(&parts[..verb_at]))
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// With `#[action(infer_categories)]`, also generates:
/// - `category() -> Option<&'static str>`
/// - `category_enum() -> {Name}Category`
/// - `is_{category}()` predicates for each category
/// - `{Name}Category` enum with all discovered categories
/// - an `ActionCategory` impl
///
/// Variants accept `#[action(category = "...")]` and `#[action(skip_category)]`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum NoticeAction {
///     ErrorNoticeSet { block_id: String, notice: String },
///     ErrorNoticeClear { block_id: String },
///     Reset,
/// }
///
/// let action = NoticeAction::ErrorNoticeClear { block_id: "b1".into() };
/// assert_eq!(action.name(), "ErrorNoticeClear");
/// assert_eq!(action.category(), Some("error_notice"));
/// assert!(action.is_error_notice());
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    // `{ .. }` matches unit, tuple and struct variants alike
    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();
        quote! { #name::#variant_name { .. } => #variant_str }
    });

    let mut expanded = quote! {
        impl block_directory::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.infer_categories {
        // BTreeMap keeps the generated enum in a stable order
        let mut categories: BTreeMap<String, Vec<&Ident>> = BTreeMap::new();
        let mut variant_categories: Vec<(&Ident, Option<String>)> = Vec::new();

        for v in variants.iter() {
            let cat = if v.skip_category {
                None
            } else if let Some(explicit) = &v.category {
                Some(explicit.clone())
            } else {
                infer_category(&v.ident.to_string())
            };

            if let Some(category) = &cat {
                categories.entry(category.clone()).or_default().push(&v.ident);
            }
            variant_categories.push((&v.ident, cat));
        }

        let category_enum_name = format_ident!("{}Category", name);
        let category_names: Vec<&String> = categories.keys().collect();
        let category_variants: Vec<_> = category_names
            .iter()
            .map(|c| format_ident!("{}", to_pascal_case(c)))
            .collect();

        let category_arms = variant_categories.iter().map(|(variant, cat)| {
            let cat_expr = match cat {
                Some(c) => quote! { ::core::option::Option::Some(#c) },
                None => quote! { ::core::option::Option::None },
            };
            quote! { #name::#variant { .. } => #cat_expr }
        });

        let category_enum_arms = variant_categories.iter().map(|(variant, cat)| {
            let cat_variant = match cat {
                Some(c) => format_ident!("{}", to_pascal_case(c)),
                None => format_ident!("Uncategorized"),
            };
            quote! { #name::#variant { .. } => #category_enum_name::#cat_variant }
        });

        let predicates = categories.iter().map(|(cat, members)| {
            let predicate_name = format_ident!("is_{}", cat);
            let doc = format!("Returns true if this action belongs to the `{}` category.", cat);
            let patterns: Vec<_> = members
                .iter()
                .map(|v| quote! { #name::#v { .. } })
                .collect();
            quote! {
                #[doc = #doc]
                pub fn #predicate_name(&self) -> bool {
                    matches!(self, #(#patterns)|*)
                }
            }
        });

        let category_enum_doc = format!(
            "Action categories for [`{}`].\n\n\
             Use [`{}::category_enum()`] to get the category of an action.",
            name, name
        );

        expanded = quote! {
            #expanded

            #[doc = #category_enum_doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum #category_enum_name {
                #(#category_variants,)*
                /// Actions that don't belong to any specific category.
                Uncategorized,
            }

            impl #category_enum_name {
                /// Get all category values
                pub fn all() -> &'static [Self] {
                    &[#(Self::#category_variants,)* Self::Uncategorized]
                }

                /// Get category name as string
                pub fn name(&self) -> &'static str {
                    match self {
                        #(Self::#category_variants => #category_names,)*
                        Self::Uncategorized => "uncategorized",
                    }
                }
            }

            impl #name {
                /// Get the action's category (if categorized)
                pub fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms,)*
                    }
                }

                /// Get the category as an enum value
                pub fn category_enum(&self) -> #category_enum_name {
                    match self {
                        #(#category_enum_arms,)*
                    }
                }

                #(#predicates)*
            }

            impl block_directory::ActionCategory for #name {
                type Category = #category_enum_name;

                fn category(&self) -> ::core::option::Option<&'static str> {
                    #name::category(self)
                }

                fn category_enum(&self) -> Self::Category {
                    #name::category_enum(self)
                }
            }
        };
    }

    TokenStream::from(expanded)
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(debug), supports(struct_named))]
struct DebugStateOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), DebugStateField>,
}

#[derive(Debug, FromField)]
#[darling(attributes(debug))]
struct DebugStateField {
    ident: Option<syn::Ident>,

    /// Section title; defaults to the struct name
    #[darling(default)]
    section: Option<String>,

    /// Entry key; defaults to the field name
    #[darling(default)]
    label: Option<String>,

    #[darling(default)]
    skip: bool,

    /// Render with `Debug` instead of `Display`
    #[darling(default)]
    debug_fmt: bool,

    /// Render with a `fn(&T) -> String`
    #[darling(default)]
    with: Option<syn::Path>,
}

/// Derive macro for the DebugState trait
///
/// Every named field becomes an entry rendered with `Display`. Sections
/// appear in order of first use.
///
/// Field attributes:
/// - `#[debug(section = "Title")]`: group under a section (default: struct name)
/// - `#[debug(label = "Key")]`: entry key (default: field name)
/// - `#[debug(skip)]`: leave the field out
/// - `#[debug(debug_fmt)]`: render with `{:?}`
/// - `#[debug(with = "path::to::fn")]`: render with `fn(&T) -> String`
///
/// # Example
/// ```ignore
/// #[derive(DebugState)]
/// struct PermissionState {
///     #[debug(section = "Permissions", label = "Install blocks")]
///     has_permission: bool,
/// }
/// ```
#[proc_macro_derive(DebugState, attributes(debug))]
pub fn derive_debug_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match DebugStateOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let default_section = name.to_string();
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => fields,
        _ => {
            return syn::Error::new_spanned(&input, "DebugState can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let mut section_order: Vec<String> = Vec::new();
    let mut section_entries: BTreeMap<String, Vec<proc_macro2::TokenStream>> = BTreeMap::new();

    for field in fields.iter().filter(|f| !f.skip) {
        let Some(ident) = &field.ident else {
            continue;
        };
        let key = field.label.clone().unwrap_or_else(|| ident.to_string());
        let section = field
            .section
            .clone()
            .unwrap_or_else(|| default_section.clone());

        let value = if let Some(with) = &field.with {
            quote! { #with(&self.#ident) }
        } else if field.debug_fmt {
            quote! { ::std::format!("{:?}", self.#ident) }
        } else {
            quote! { ::std::string::ToString::to_string(&self.#ident) }
        };

        if !section_entries.contains_key(&section) {
            section_order.push(section.clone());
        }
        section_entries
            .entry(section)
            .or_default()
            .push(quote! { .entry(#key, #value) });
    }

    let sections = section_order.iter().map(|title| {
        let entries = &section_entries[title];
        quote! {
            block_directory::debug::DebugSection::new(#title) #(#entries)*
        }
    });

    let expanded = quote! {
        impl #impl_generics block_directory::debug::DebugState for #name #ty_generics #where_clause {
            fn debug_sections(&self) -> ::std::vec::Vec<block_directory::debug::DebugSection> {
                ::std::vec![#(#sections),*]
            }
        }
    };

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(
            split_pascal_case("InstalledBlockTypeAdd"),
            vec!["Installed", "Block", "Type", "Add"]
        );
        assert!(split_pascal_case("").is_empty());
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(
            infer_category("DownloadableBlocksFetch").as_deref(),
            Some("downloadable_blocks")
        );
        assert_eq!(
            infer_category("DownloadableBlocksReceive").as_deref(),
            Some("downloadable_blocks")
        );
        assert_eq!(
            infer_category("InstalledBlockTypeRemove").as_deref(),
            Some("installed_block_type")
        );
        assert_eq!(
            infer_category("InstallBlocksPermissionSet").as_deref(),
            Some("install_blocks_permission")
        );
        assert_eq!(infer_category("ErrorNoticeClear").as_deref(), Some("error_notice"));
        assert_eq!(infer_category("DidInstall").as_deref(), Some("async_result"));
    }

    #[test]
    fn test_infer_category_uncategorized() {
        // Leading verb
        assert_eq!(infer_category("ResetAll"), None);
        // No verb at all
        assert_eq!(infer_category("Noop"), None);
        assert_eq!(infer_category("BlockInstalled"), None);
        assert_eq!(infer_category(""), None);
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("error_notice"), "ErrorNotice");
        assert_eq!(to_pascal_case("async_result"), "AsyncResult");
    }
}
