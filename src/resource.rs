//! Collections of named resources that a [crate::Catalog] is built from.
//!
//! The catalog only asks a collection for the names of its items and reads
//! the content of those items whose name looks like an upgrade resource.
use std::{
    io,
    path::{Path, PathBuf},
};

/// A single named item with byte content.
pub trait Resource {
    fn name(&self) -> &str;

    /// Read the full content of the item.
    ///
    /// This is only called for items that parse as upgrade resources.
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// An enumerable collection of [Resource]s.
///
/// The order of [Resources::list] is not significant.
pub trait Resources {
    type Item: Resource;

    fn list(&self) -> io::Result<Vec<Self::Item>>;
}

impl<R: Resources + ?Sized> Resources for &R {
    type Item = R::Item;

    fn list(&self) -> io::Result<Vec<Self::Item>> {
        (**self).list()
    }
}

/// Resources stored as files in a directory.
///
/// Only regular files directly in the directory are listed.
/// File content is read lazily, when the catalog asks for it.
#[derive(Debug, Clone)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A file in a [Directory].
#[derive(Debug, Clone)]
pub struct File {
    name: String,
    path: PathBuf,
}

impl Resource for File {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

impl Resources for Directory {
    type Item = File;

    fn list(&self) -> io::Result<Vec<File>> {
        let mut out = vec![];
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // names that are not UTF-8 can not be upgrade resources
            let Ok(name) = entry.file_name().into_string() else {
                log::debug!("skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };
            out.push(File {
                name,
                path: entry.path(),
            });
        }
        Ok(out)
    }
}

/// Resources compiled into the binary, usually created with [crate::embed!].
#[derive(Debug, Clone, Copy)]
pub struct Embedded {
    items: &'static [(&'static str, &'static [u8])],
}

impl Embedded {
    pub const fn new(items: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { items }
    }
}

/// An item of [Embedded] resources.
#[derive(Debug, Clone, Copy)]
pub struct Static {
    name: &'static str,
    content: &'static [u8],
}

impl Resource for Static {
    fn name(&self) -> &str {
        self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.content.to_vec())
    }
}

impl Resources for Embedded {
    type Item = Static;

    fn list(&self) -> io::Result<Vec<Static>> {
        Ok(self
            .items
            .iter()
            .map(|&(name, content)| Static { name, content })
            .collect())
    }
}

/// Resources held in memory.
///
/// ```
/// use schema_upgrade::resource::Memory;
///
/// let resources = Memory::default()
///     .with("1_up.sql", "CREATE TABLE user (name TEXT);")
///     .with("1_down.sql", "DROP TABLE user;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Memory {
    items: Vec<Owned>,
}

impl Memory {
    /// Add an item to the collection.
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.push(name, content);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.items.push(Owned {
            name: name.into(),
            content: content.into(),
        });
    }
}

impl<N: Into<String>, C: Into<Vec<u8>>> FromIterator<(N, C)> for Memory {
    fn from_iter<T: IntoIterator<Item = (N, C)>>(iter: T) -> Self {
        let mut out = Memory::default();
        for (name, content) in iter {
            out.push(name, content);
        }
        out
    }
}

/// An item of [Memory] resources.
#[derive(Debug, Clone)]
pub struct Owned {
    name: String,
    content: Vec<u8>,
}

impl Resource for Owned {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.content.clone())
    }
}

impl Resources for Memory {
    type Item = Owned;

    fn list(&self) -> io::Result<Vec<Owned>> {
        Ok(self.items.clone())
    }
}
