// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`Entry`], a boot entry with its images loaded.
//!
//! An [`Entry`] is the common output of every parser in [`parsers`]. It can only be created through an
//! [`EntryBuilder`](builder::EntryBuilder) during a parse, and cannot be changed once built.

use core::fmt;

use alloc::{string::String, vec::Vec};

pub mod builder;
pub mod parsers;

/// A boot entry, with the kernel and ramdisks already loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// The human readable title of the entry.
    title: String,

    /// The content of the kernel image.
    linux: Vec<u8>,

    /// The content of every ramdisk, concatenated in the order they were found.
    initrd: Vec<u8>,

    /// The kernel command line.
    options: String,

    /// Every line that was recognized, exactly as written.
    recognized: String,

    /// Every line that was not recognized, exactly as written.
    ignored: String,
}

impl Entry {
    /// The title of the entry. Empty if the entry had no title.
    #[must_use = "Has no effect if the result is unused"]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The kernel image. Empty if the entry had no kernel.
    #[must_use = "Has no effect if the result is unused"]
    pub fn linux(&self) -> &[u8] {
        &self.linux
    }

    /// The ramdisk image.
    ///
    /// When an entry references more than one ramdisk, this is every ramdisk concatenated in the order they appear in
    /// the entry.
    #[must_use = "Has no effect if the result is unused"]
    pub fn initrd(&self) -> &[u8] {
        &self.initrd
    }

    /// The kernel command line.
    #[must_use = "Has no effect if the result is unused"]
    pub fn options(&self) -> &str {
        &self.options
    }

    /// The lines of the source file that were recognized.
    #[must_use = "Has no effect if the result is unused"]
    pub fn recognized(&self) -> &str {
        &self.recognized
    }

    /// The lines of the source file that were not recognized, and therefore ignored.
    #[must_use = "Has no effect if the result is unused"]
    pub fn ignored(&self) -> &str {
        &self.ignored
    }

    /// Checks if nothing was recognized from the source file.
    #[must_use = "Has no effect if the result is unused"]
    pub fn is_empty(&self) -> bool {
        self.recognized.is_empty()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.recognized)
    }
}
