use syn::LitStr;

mod embed;

/// Embed a directory of upgrade resources into the binary.
///
/// The path is resolved relative to the `Cargo.toml` of the crate that uses the macro.
/// Every regular file in the directory becomes one item of the resulting
/// `schema_upgrade::resource::Embedded` collection, keyed by its file name.
/// Files are included with `include_bytes!`, so editing one of them triggers a rebuild.
///
/// Dot files and subdirectories are skipped.
/// Whether a file is actually an upgrade resource is decided later, when the catalog is built.
///
/// ```rust,ignore
/// use schema_upgrade::{Config, Upgrader};
///
/// static RESOURCES: schema_upgrade::resource::Embedded = schema_upgrade::embed!("upgrades");
///
/// let mut upgrader = Upgrader::new(Config::new(RESOURCES).driver(driver))?;
/// upgrader.upgrade()?;
/// ```
///
/// Adding a file to the directory does not by itself trigger a rebuild.
/// Touch the source file that invokes the macro (or add a `build.rs` with
/// `cargo:rerun-if-changed`) when the set of files changes.
#[proc_macro]
pub fn embed(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let dir = syn::parse_macro_input!(item as LitStr);
    match embed::generate(dir) {
        Ok(x) => x,
        Err(e) => e.into_compile_error(),
    }
    .into()
}
