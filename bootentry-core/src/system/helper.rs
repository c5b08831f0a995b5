// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Various helper functions for other modules.

use alloc::string::String;
use thiserror::Error;
use uefi::CString16;

/// The path separator of UEFI filesystems.
pub const UEFI_SEPARATOR: char = '\\';

/// An `Error` that may result from converting a [`String`] to another format.
#[derive(Error, Debug)]
pub enum StrError {
    /// A [`String`] could not be converted into a [`CString16`]
    #[error("Could not convert String to CString16")]
    CstrFromStr(#[from] uefi::data_types::FromStrError),
}

/// Gets a [`CString16`] from an [`&str`].
///
/// # Errors
///
/// May return an `Error` if the string could not be converted into a [`CString16`], either due to unsupported
/// characters or an invalid nul character.
pub(crate) fn str_to_cstr(str: &str) -> Result<CString16, StrError> {
    Ok(CString16::try_from(str)?)
}

/// Normalizes a path written with forward slashes to the separator of a file tree.
///
/// Entry files always use forward slashes, as they are written from the perspective of the installed OS. A UEFI
/// filesystem wants [`UEFI_SEPARATOR`] instead.
#[must_use = "Has no effect if the result is unused"]
pub fn normalize_path(path: &str, separator: char) -> String {
    if separator == '/' {
        return path.into();
    }
    path.chars()
        .map(|c| if c == '/' { separator } else { c })
        .collect()
}

/// Splits a string into lines while keeping the line terminator of each line.
///
/// The last line is returned even if it has no terminator. An empty string yields no lines.
pub(crate) fn lines_with_terminator(content: &str) -> impl Iterator<Item = &str> {
    content.split_inclusive('\n')
}
