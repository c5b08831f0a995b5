// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The `bootentry-core` library crate.
//!
//! This extracts boot entries (a kernel image, its ramdisks, the kernel command line and a title) from two on-disk
//! formats:
//!
//! - `BootLoaderSpec` type #1 entry files, see [`entry::parsers::uapi`].
//! - GRUB configuration files, of which the first `menuentry` block is used, see [`entry::parsers::grub`].
//!
//! Every file referenced by an entry is read through a [`system::fs::FileTree`], so the parsers work the same way
//! on a UEFI [`SimpleFileSystem`](uefi::proto::media::fs::SimpleFileSystem) volume as they do on an in-memory tree.
//! The result is an [`entry::Entry`] with the image contents already loaded.
//!
//! A small UEFI frontend built on this crate can be found in `bootentry-cli`.
//!
//! ## MSRV
//!
//! The minimum supported rust version is 1.88.0.

#![cfg_attr(not(any(fuzzing, test, doctest)), no_std)]

/// The primary result type that wraps around [`crate::error::BootError`].
pub type BootResult<T> = Result<T, crate::error::BootError>;

pub mod config;
pub mod entry;
pub mod error;
pub mod system;

mod features;

extern crate alloc;
