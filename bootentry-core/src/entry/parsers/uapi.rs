// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A parser for BootLoaderSpec type #1 (UAPI) entries, a versionless specification for consistent boot entries.
//!
//! Example entry:
//!
//! ```text
//! title Linux
//! linux /vmlinuz-linux
//! initrd /intel-ucode.img
//! initrd /initramfs-linux.img
//! options root=UUID=e09d636b-0cd9-4e84-8a39-84432cfc2b8e ro
//! ```
//!
//! Only `title`, `linux`, `initrd` and `options` are understood. Every other key (including comments, which have `#`
//! as their key) is kept in [`Entry::ignored`]. Keys are case sensitive. A line without a space has no value, and is
//! skipped entirely.
//!
//! Multiple `initrd` keys have their images concatenated. Multiple `options` keys are concatenated as is, without a
//! space in between. For every other key, the last one wins.
//!
//! The whole file must be valid UTF-8. A single invalid byte anywhere, even inside of a comment, fails the parse
//! with [`UapiError::NotUtf8`].

use alloc::string::{String, ToString};
use log::{debug, warn};
use thiserror::Error;

use crate::{
    BootResult,
    entry::{Entry, builder::EntryBuilder, parsers::EntryParser},
    system::{
        fs::{FileTree, FsError},
        helper::lines_with_terminator,
    },
};

/// An `Error` that may result from parsing a BLS type #1 entry.
#[derive(Error, Debug)]
pub enum UapiError {
    /// The entry file itself could not be read.
    #[error("Error reading entry file: {0}")]
    ReadEntry(#[source] FsError),

    /// The entry file is not valid UTF-8.
    #[error("Entry file is not valid UTF-8")]
    NotUtf8(#[from] core::str::Utf8Error),

    /// A file referenced by a line could not be loaded.
    #[error("Error parsing entry line \"{}\": {source}", .line.trim_end())]
    Resolve {
        /// The line, with its terminator.
        line: String,

        /// The reason the file could not be loaded.
        #[source]
        source: FsError,
    },
}

/// The parser for BLS type #1 entries.
pub struct UapiEntry;

impl EntryParser for UapiEntry {
    fn parse_entry<T: FileTree + ?Sized>(tree: &mut T, path: &str) -> BootResult<Entry> {
        Ok(parse_uapi_entry(tree, path)?)
    }
}

/// Parses the BLS type #1 entry at `path`, and loads every image it references from the same [`FileTree`].
///
/// # Errors
///
/// May return an `Error` if the entry file could not be read or is not UTF-8, or a `linux` or `initrd` file could not
/// be loaded. In that case, nothing parsed so far is returned.
pub fn parse_uapi_entry<T: FileTree + ?Sized>(tree: &mut T, path: &str) -> Result<Entry, UapiError> {
    let mut builder = EntryBuilder::new(tree);

    let content = builder.load(path).map_err(UapiError::ReadEntry)?;
    let content = core::str::from_utf8(&content)?;

    for line in lines_with_terminator(content) {
        parse_line(&mut builder, line).map_err(|source| UapiError::Resolve {
            line: line.to_string(),
            source,
        })?;
    }

    Ok(builder.build())
}

/// Assigns a line to the [`EntryBuilder`], given the line with its terminator.
///
/// # Errors
///
/// May return an `Error` if the line references a file that could not be loaded.
fn parse_line<T: FileTree + ?Sized>(
    builder: &mut EntryBuilder<'_, T>,
    line: &str,
) -> Result<(), FsError> {
    let Some((key, value)) = line.split_once(' ') else {
        return Ok(());
    };

    let value = value.trim_matches(['\n', '\r']).trim();

    match key {
        "title" => builder.title(value),
        "linux" => {
            debug!("[UAPI PARSER]: Loading kernel {value}");
            builder.linux(value)?;
        }
        "initrd" => {
            debug!("[UAPI PARSER]: Loading initrd {value}");
            builder.initrd(value)?;
        }
        "options" => builder.push_options(value),
        _ => {
            warn!("[UAPI PARSER]: Found unrecognized key {key} with value {value}");
            builder.ignore(line);
            return Ok(());
        }
    }

    builder.recognize(line);
    Ok(())
}
