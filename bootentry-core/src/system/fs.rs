// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Filesystem abstraction for the parsers.
//!
//! The parsers never touch a filesystem directly. Instead, they read through a [`FileLoader`], which wraps any
//! [`FileTree`]. A [`FileTree`] only has to be able to read the whole content of a file given a path written with its
//! own separator. The [`FileLoader`] takes care of translating the forward slash paths found in entry files.
//!
//! Two trees are provided:
//!
//! - [`UefiFileSystem`], a wrapper around the UEFI [`SimpleFileSystem`] protocol. This is what a boot manager will
//!   want to use. Any filesystem supported by the firmware (or by a loaded EFI filesystem driver) works.
//! - [`MemFileSystem`], an in-memory tree. This is mostly useful for testing, fuzzing, or for a caller that already has
//!   the files in memory.
//!
//! No caching is done anywhere, every load reads the file again.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use log::debug;
use thiserror::Error;
use uefi::{
    CStr16, CString16, Status,
    boot::{self, ScopedProtocol},
    proto::media::{
        file::{File, FileAttribute, FileInfo, FileMode, RegularFile},
        fs::SimpleFileSystem,
    },
};

use crate::{
    BootResult,
    system::helper::{StrError, UEFI_SEPARATOR, normalize_path, str_to_cstr},
};

/// The size of one gigabyte in bytes. This is the largest file that will be read.
pub const MAX_FILE_SIZE: usize = 1024 * 1024 * 1024;

/// An error that may result from performing filesystem operations
#[derive(Error, Debug)]
pub enum FsError {
    /// The file does not exist.
    #[error("File \"{0}\" does not exist")]
    NotFound(String),

    /// The path cannot be represented in the file tree.
    #[error("Path \"{path}\" is not valid: {source}")]
    InvalidPath {
        /// The path as it was requested.
        path: String,

        /// Why the path could not be converted.
        #[source]
        source: StrError,
    },

    /// The file is larger than [`MAX_FILE_SIZE`].
    #[error("File \"{path}\" is too large ({size} bytes)")]
    TooLarge {
        /// The path of the file.
        path: String,

        /// The size of the file in bytes.
        size: u64,
    },

    /// A file could not be opened.
    #[error("Failed to open file: returned status {0}")]
    OpenErr(Status),

    /// A file could not be read.
    #[error("Failed to read file: returned status {0}")]
    ReadErr(Status),

    /// Fewer bytes were read from a file than its size.
    #[error("File \"{path}\" was only partially read ({read} of {size} bytes)")]
    ShortRead {
        /// The path of the file.
        path: String,

        /// The size of the file in bytes.
        size: usize,

        /// The amount of bytes that were read.
        read: usize,
    },
}

/// A read only tree of files.
///
/// Implementors only need to read whole files. Writing, listing directories or querying metadata are never needed
/// by the parsers.
pub trait FileTree {
    /// The separator between path components that the tree expects.
    ///
    /// By default this is a backslash, as on UEFI filesystems.
    fn separator(&self) -> char {
        UEFI_SEPARATOR
    }

    /// Reads the entire content of a file into a [`Vec<u8>`].
    ///
    /// The path is already written with [`Self::separator`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the file does not exist, or it could not be read for any reason.
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError>;
}

/// Loads the files referenced by an entry from a [`FileTree`].
pub struct FileLoader<'a, T: FileTree + ?Sized> {
    /// The tree that files are read from.
    tree: &'a mut T,
}

impl<'a, T: FileTree + ?Sized> FileLoader<'a, T> {
    /// Create a new [`FileLoader`] over a [`FileTree`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(tree: &'a mut T) -> Self {
        Self { tree }
    }

    /// Loads the complete content of a file given a forward slash path.
    ///
    /// Every `/` is replaced with the separator of the tree before the file is read.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the file does not exist in the tree, or the file could not be read.
    pub fn load(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        let path = normalize_path(path, self.tree.separator());
        debug!("Loading file {path}");
        self.tree.read(&path)
    }
}

/// An in-memory [`FileTree`].
///
/// Paths are stored exactly as inserted, so they should be inserted with the separator of the tree.
#[derive(Clone, Debug)]
pub struct MemFileSystem {
    /// The files of the tree, keyed by their path.
    files: BTreeMap<String, Vec<u8>>,

    /// The separator of the tree.
    separator: char,
}

impl MemFileSystem {
    /// Create a new, empty [`MemFileSystem`] that uses backslashes as a separator.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new() -> Self {
        Self::with_separator(UEFI_SEPARATOR)
    }

    /// Create a new, empty [`MemFileSystem`] with a custom separator.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn with_separator(separator: char) -> Self {
        Self {
            files: BTreeMap::new(),
            separator,
        }
    }

    /// Inserts a file into the tree, replacing any file that was at the same path.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Inserts a file into the tree, returning the tree.
    #[must_use = "Has no effect if the result is unused"]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Checks if a file exists in the tree.
    #[must_use = "Has no effect if the result is unused"]
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

impl Default for MemFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree for MemFileSystem {
    fn separator(&self) -> char {
        self.separator
    }

    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }
}

/// A rust-ier wrapper around [`SimpleFileSystem`].
///
/// This is similar to [`uefi::fs::FileSystem`], with different design decisions. Only reading is supported.
pub struct UefiFileSystem(ScopedProtocol<SimpleFileSystem>);

impl UefiFileSystem {
    /// Create a new [`UefiFileSystem`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(fs: ScopedProtocol<SimpleFileSystem>) -> Self {
        Self(fs)
    }

    /// Create a new [`UefiFileSystem`] from the same filesystem as the running image.
    ///
    /// This is mainly used when entries are kept on the same partition as the application reading them.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the image's filesystem does not support [`SimpleFileSystem`] for some reason.
    pub fn from_image_fs() -> BootResult<Self> {
        let fs = boot::get_image_file_system(boot::image_handle())?;
        Ok(Self(fs))
    }

    /// Reads the entire content of a file into a [`Vec<u8>`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the volume couldn't be opened, the path does not point to a valid file,
    /// the file is larger than [`MAX_FILE_SIZE`], or the file could not be read for any reason.
    pub fn read_cstr(&mut self, path: &CStr16) -> Result<Vec<u8>, FsError> {
        let mut file = self.get_regular_file(path).map_err(|e| match e {
            FsError::OpenErr(status) if status == Status::NOT_FOUND => {
                FsError::NotFound(path.to_string())
            }
            e => e,
        })?;

        let info = file
            .get_boxed_info::<FileInfo>()
            .map_err(|e| FsError::ReadErr(e.status()))?;

        let size = usize::try_from(info.file_size())
            .ok()
            .filter(|&size| size <= MAX_FILE_SIZE)
            .ok_or_else(|| FsError::TooLarge {
                path: path.to_string(),
                size: info.file_size(),
            })?;

        let mut buf = vec![0; size];
        let read = file
            .read(&mut buf)
            .map_err(|e| FsError::ReadErr(e.status()))?;
        check_read_len(path, size, read)?;

        Ok(buf)
    }

    /// Gets a handle to a [`RegularFile`] in the filesystem.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the volume couldn't be opened, or the path does not point to a file.
    fn get_regular_file(&mut self, path: &CStr16) -> Result<RegularFile, FsError> {
        let mut root = self
            .0
            .open_volume()
            .map_err(|e| FsError::OpenErr(e.status()))?;
        root.open(path, FileMode::Read, FileAttribute::empty())
            .map_err(|e| FsError::OpenErr(e.status()))?
            .into_regular_file()
            .ok_or(FsError::OpenErr(Status::INVALID_PARAMETER))
    }
}

impl FileTree for UefiFileSystem {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, FsError> {
        self.read_cstr(&to_uefi_path(path)?)
    }
}

/// Converts a path into the UCS-2 form that [`SimpleFileSystem`] accepts.
fn to_uefi_path(path: &str) -> Result<CString16, FsError> {
    str_to_cstr(path).map_err(|source| FsError::InvalidPath {
        path: path.to_string(),
        source,
    })
}

/// Checks that the whole file was read.
fn check_read_len(path: &CStr16, size: usize, read: usize) -> Result<(), FsError> {
    if read == size {
        Ok(())
    } else {
        Err(FsError::ShortRead {
            path: path.to_string(),
            size,
            read,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_translates_separator() {
        let mut fs = MemFileSystem::new().with_file("\\EFI\\Linux\\vmlinuz", b"kernel".as_slice());
        let mut loader = FileLoader::new(&mut fs);
        assert_eq!(
            loader.load("/EFI/Linux/vmlinuz").expect("Failed to load existing file"),
            b"kernel"
        );
        // the literal forward slash path is never requested from the tree
        let mut fs = MemFileSystem::new().with_file("/EFI/Linux/vmlinuz", b"kernel".as_slice());
        let mut loader = FileLoader::new(&mut fs);
        assert!(matches!(
            loader.load("/EFI/Linux/vmlinuz"),
            Err(FsError::NotFound(path)) if path == "\\EFI\\Linux\\vmlinuz"
        ));
    }

    #[test]
    fn test_load_native_separator() {
        let mut fs = MemFileSystem::with_separator('/').with_file("/boot/initrd", b"ramdisk".as_slice());
        let mut loader = FileLoader::new(&mut fs);
        assert_eq!(
            loader.load("/boot/initrd").expect("Failed to load existing file"),
            b"ramdisk"
        );
    }

    #[test]
    fn test_load_is_not_cached() {
        let mut fs = MemFileSystem::new().with_file("\\a", b"first".as_slice());
        assert_eq!(FileLoader::new(&mut fs).load("/a").ok(), Some(b"first".to_vec()));
        fs.insert("\\a", b"second".as_slice());
        assert_eq!(FileLoader::new(&mut fs).load("/a").ok(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_invalid_uefi_path() {
        assert!(to_uefi_path("\\EFI\\Linux\\vmlinuz").is_ok());
        assert!(matches!(
            to_uefi_path("\\EFI\\vmlinuz\0"),
            Err(FsError::InvalidPath { path, source: StrError::CstrFromStr(_) }) if path == "\\EFI\\vmlinuz\0"
        ));
    }

    #[test]
    fn test_short_read() {
        let path = uefi::cstr16!("\\vmlinuz");
        assert!(check_read_len(path, 6, 6).is_ok());
        assert!(matches!(
            check_read_len(path, 6, 4),
            Err(FsError::ShortRead { size: 6, read: 4, .. })
        ));
    }

    #[test]
    fn test_mem_exists() {
        let fs = MemFileSystem::default().with_file("\\foo.file", Vec::new());
        assert!(fs.exists("\\foo.file"));
        assert!(!fs.exists("\\foo.other"));
    }
}
