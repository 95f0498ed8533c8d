use std::path::PathBuf;

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

struct Entry {
    name: String,
    path: String,
}

fn read_entries(dir: &LitStr) -> syn::Result<Vec<Entry>> {
    let root = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .map_err(|_| syn::Error::new_spanned(dir, "`CARGO_MANIFEST_DIR` is not set"))?;
    let path = root.join(dir.value());

    let read_dir = std::fs::read_dir(&path).map_err(|e| {
        syn::Error::new_spanned(dir, format!("could not read `{}`: {e}", path.display()))
    })?;

    let mut out = vec![];
    for entry in read_dir {
        let entry = entry.map_err(|e| syn::Error::new_spanned(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| syn::Error::new_spanned(dir, e))?;
        if !file_type.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            return Err(syn::Error::new_spanned(
                dir,
                format!("file name `{:?}` is not valid UTF-8", entry.file_name()),
            ));
        };
        // hidden files are never resources
        if name.starts_with('.') {
            continue;
        }
        let Some(path) = entry.path().to_str().map(str::to_owned) else {
            return Err(syn::Error::new_spanned(
                dir,
                format!("path of `{name}` is not valid UTF-8"),
            ));
        };
        out.push(Entry { name, path });
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

pub fn generate(dir: LitStr) -> syn::Result<TokenStream> {
    let entries = read_entries(&dir)?;

    let items = entries.iter().map(|Entry { name, path }| {
        quote! {
            (#name, ::core::include_bytes!(#path) as &'static [u8])
        }
    });

    Ok(quote! {
        ::schema_upgrade::resource::Embedded::new(&[#(#items),*])
    })
}
