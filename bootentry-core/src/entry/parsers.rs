// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Parses boot entries of various formats into [`Entry`].
//!
//! The currently supported formats are as follows:
//! - BLS Type #1 entry files (also known as UAPI entries)
//! - GRUB configuration files (only the first `menuentry`)

use core::str::FromStr;

use crate::{BootResult, entry::Entry, features, system::fs::FileTree};

/// The GRUB configuration parser.
pub mod grub;

/// The BLS Type #1 (UAPI) entry parser.
pub mod uapi;

/// The formats that can be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryFormat {
    /// A BLS Type #1 entry.
    Uapi,

    /// A GRUB configuration file.
    Grub,
}

impl EntryFormat {
    /// Convert an [`EntryFormat`] type into an [`&str`].
    #[must_use = "Has no effect if the result is unused"]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uapi => "uapi",
            Self::Grub => "grub",
        }
    }

    /// Guesses the format of a file from its suffix.
    ///
    /// Files ending with `.conf` are BLS entries, files ending with `.cfg` are GRUB configurations.
    #[must_use = "Has no effect if the result is unused"]
    pub fn from_path(path: &str) -> Option<Self> {
        let suffix = path.rsplit_once('.')?.1;
        if suffix.eq_ignore_ascii_case("conf") {
            Some(Self::Uapi)
        } else if suffix.eq_ignore_ascii_case("cfg") {
            Some(Self::Grub)
        } else {
            None
        }
    }
}

impl FromStr for EntryFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.to_ascii_lowercase() {
            "uapi" | "bls" => Ok(Self::Uapi),
            "grub" => Ok(Self::Grub),
            _ => Err(()),
        }
    }
}

/// Parses entries.
pub trait EntryParser {
    /// Parses the entry file at `path`, loading every file it references from the same [`FileTree`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the file could not be read, any file it references could not be loaded, or the file
    /// was malformed. No partially parsed [`Entry`] is ever returned.
    fn parse_entry<T: FileTree + ?Sized>(tree: &mut T, path: &str) -> BootResult<Entry>;
}

/// Parses an entry file with the parser for its format.
///
/// # Errors
///
/// May return an `Error` if the parser for the format was disabled, or the parser failed.
pub fn load_entry<T: FileTree + ?Sized>(
    format: EntryFormat,
    tree: &mut T,
    path: &str,
) -> BootResult<Entry> {
    match format {
        EntryFormat::Uapi => features::uapi::UapiEntry::parse_entry(tree, path),
        EntryFormat::Grub => features::grub::GrubEntry::parse_entry(tree, path),
    }
}
