// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Entry builder.

use alloc::{string::String, vec::Vec};

use crate::{
    entry::Entry,
    system::fs::{FileLoader, FileTree, FsError},
};

/// A builder to incrementally create an [`Entry`] while parsing a file.
///
/// The builder owns the [`FileLoader`] used to resolve the files that an entry references, so it lives exactly as long
/// as one parse. If parsing fails, the builder should simply be dropped, so that no partially filled [`Entry`] is ever
/// returned.
///
/// # Example
///
/// ```no_run
/// use bootentry_core::{entry::builder::EntryBuilder, system::fs::MemFileSystem};
///
/// let mut fs = MemFileSystem::new().with_file("\\vmlinuz", b"kernel".as_slice());
/// let mut builder = EntryBuilder::new(&mut fs);
/// builder.title("Linux");
/// builder.linux("/vmlinuz").expect("Failed to load kernel");
/// let entry = builder.build();
/// ```
#[must_use = "Has no effect if the result is unused"]
pub struct EntryBuilder<'a, T: FileTree + ?Sized> {
    /// The inner [`Entry`] that the builder operates on.
    entry: Entry,

    /// The loader for every file referenced by the entry.
    loader: FileLoader<'a, T>,
}

impl<'a, T: FileTree + ?Sized> EntryBuilder<'a, T> {
    /// Constructs a new, empty [`EntryBuilder`] that resolves files from a [`FileTree`].
    pub fn new(tree: &'a mut T) -> Self {
        Self {
            entry: Entry::default(),
            loader: FileLoader::new(tree),
        }
    }

    /// Loads a file from the same tree as the one the entry is resolved from.
    ///
    /// This does not change the entry. It is used by parsers to read the source file itself.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the file could not be loaded.
    pub fn load(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        self.loader.load(path)
    }

    /// Sets the title of the [`Entry`], replacing any previous title.
    pub fn title(&mut self, title: impl Into<String>) {
        self.entry.title = title.into();
    }

    /// Loads the kernel image of the [`Entry`], replacing any previous kernel.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the kernel image could not be loaded. The entry is left unchanged.
    pub fn linux(&mut self, path: &str) -> Result<(), FsError> {
        self.entry.linux = self.loader.load(path)?;
        Ok(())
    }

    /// Loads a ramdisk image, appending it after every ramdisk loaded before it.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the ramdisk image could not be loaded. The entry is left unchanged.
    pub fn initrd(&mut self, path: &str) -> Result<(), FsError> {
        let initrd = self.loader.load(path)?;
        self.entry.initrd.extend_from_slice(&initrd);
        Ok(())
    }

    /// Sets the options of the [`Entry`], replacing any previous options.
    pub fn options(&mut self, options: impl Into<String>) {
        self.entry.options = options.into();
    }

    /// Appends to the options of the [`Entry`].
    ///
    /// No separator is inserted between the previous options and the new ones.
    pub fn push_options(&mut self, options: &str) {
        self.entry.options.push_str(options);
    }

    /// Records a line that was recognized.
    pub fn recognize(&mut self, line: &str) {
        self.entry.recognized.push_str(line);
    }

    /// Records a line that was not recognized.
    pub fn ignore(&mut self, line: &str) {
        self.entry.ignored.push_str(line);
    }

    /// Finishes the [`Entry`], releasing the [`FileTree`].
    pub fn build(self) -> Entry {
        self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fs::MemFileSystem;

    fn test_fs() -> MemFileSystem {
        MemFileSystem::new()
            .with_file("\\vmlinuz", b"kernel".as_slice())
            .with_file("\\vmlinuz-lts", b"lts".as_slice())
            .with_file("\\ucode.img", b"A".as_slice())
            .with_file("\\initramfs.img", b"B".as_slice())
    }

    #[test]
    fn test_initrd_order() {
        let mut fs = test_fs();
        let mut builder = EntryBuilder::new(&mut fs);
        builder.initrd("/ucode.img").expect("Failed to load initrd");
        builder.initrd("/initramfs.img").expect("Failed to load initrd");
        assert_eq!(builder.build().initrd(), b"AB");
    }

    #[test]
    fn test_linux_overwrites() {
        let mut fs = test_fs();
        let mut builder = EntryBuilder::new(&mut fs);
        builder.linux("/vmlinuz").expect("Failed to load kernel");
        builder.linux("/vmlinuz-lts").expect("Failed to load kernel");
        assert_eq!(builder.build().linux(), b"lts");
    }

    #[test]
    fn test_failed_load_leaves_entry() {
        let mut fs = test_fs();
        let mut builder = EntryBuilder::new(&mut fs);
        builder.initrd("/ucode.img").expect("Failed to load initrd");
        assert!(matches!(
            builder.initrd("/missing.img"),
            Err(FsError::NotFound(_))
        ));
        assert!(builder.linux("/missing").is_err());
        let entry = builder.build();
        assert_eq!(entry.initrd(), b"A");
        assert!(entry.linux().is_empty());
    }

    #[test]
    fn test_text_and_options() {
        let mut fs = test_fs();
        let mut builder = EntryBuilder::new(&mut fs);
        builder.title("first");
        builder.title("second");
        builder.push_options("foo");
        builder.push_options("bar");
        builder.recognize("title second\n");
        builder.ignore("version 1\n");
        let entry = builder.build();
        assert_eq!(entry.title(), "second");
        assert_eq!(entry.options(), "foobar");
        assert_eq!(entry.to_string(), "title second\n");
        assert_eq!(entry.ignored(), "version 1\n");
        assert!(!entry.is_empty());

        let mut fs = test_fs();
        let mut builder = EntryBuilder::new(&mut fs);
        builder.push_options("foo");
        builder.options("bar baz");
        assert_eq!(builder.build().options(), "bar baz");
    }
}
