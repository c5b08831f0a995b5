// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`BootError`], which encapsulates other errors

use thiserror::Error;

use crate::entry::parsers::EntryFormat;

/// An `Error` resulting from the library.
#[derive(Error, Debug)]
pub enum BootError {
    /// An error with UEFI, or a service from the [`uefi`] crate.
    #[error("UEFI Error")]
    Uefi(#[from] uefi::Error),

    /// The `BootLoaderSpec` type #1 entry could not be parsed.
    #[error("Uapi Parse Error: {0}")]
    UapiError(#[from] crate::entry::parsers::uapi::UapiError),

    /// The GRUB configuration could not be parsed.
    #[error("Grub Parse Error: {0}")]
    GrubError(#[from] crate::entry::parsers::grub::GrubError),

    /// The parser for the format was disabled at compile time.
    #[error("The {} parser is not enabled", .0.as_str())]
    ParserDisabled(EntryFormat),
}
