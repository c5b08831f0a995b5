// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Provides [`LoaderConfig`], the configuration file for frontends of this library.
//!
//! This parses space separated key value pairs, the format of which is defined in the [`LoaderConfig`] struct.
//!
//! The general syntax of the configuration file is the same as that of BLS type #1 entries.
//!
//! Example configuration:
//!
//! ```text
//! # The entry that is parsed when no other entry is given
//! entry /loader/entries/arch.conf
//!
//! # Force the format of the entry, instead of guessing it from its suffix
//! format uapi
//!
//! # The most verbose messages that will be logged
//! log_level debug
//! ```

use alloc::string::String;
use log::{LevelFilter, warn};

use crate::{
    entry::parsers::EntryFormat,
    system::{
        fs::{FileLoader, FileTree},
        helper::{UEFI_SEPARATOR, normalize_path},
    },
};

/// The hardcoded configuration path for the [`LoaderConfig`].
pub const CONFIG_PATH: &str = "/loader/bootentry.conf";

/// The default entry that is parsed.
const DEFAULT_ENTRY: &str = "\\loader\\entries\\default.conf";

/// The configuration file for frontends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// The path to the entry file that is parsed when no other is given.
    pub entry: String,

    /// The format of the entry file, if it should not be guessed.
    pub format: Option<EntryFormat>,

    /// The most verbose log level that will be printed.
    pub log_level: LevelFilter,
}

impl LoaderConfig {
    /// Creates a new [`LoaderConfig`] from [`CONFIG_PATH`] in a [`FileTree`].
    ///
    /// If the configuration file does not exist, or could not be read, a default [`LoaderConfig`] is returned.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new<T: FileTree + ?Sized>(tree: &mut T) -> Self {
        match FileLoader::new(tree).load(CONFIG_PATH) {
            Ok(content) => Self::get_loader_config(&content),
            Err(e) => {
                warn!("{e}");
                Self::default()
            }
        }
    }

    /// Parses the contents of a [`LoaderConfig`] format string.
    ///
    /// Unknown keys and invalid values are ignored.
    #[must_use = "Has no effect if the result is unused"]
    pub fn get_loader_config(content: &[u8]) -> Self {
        let mut config = Self::default();

        if let Ok(content) = core::str::from_utf8(content) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once(' ') {
                    config.assign_to_field(key, value.trim());
                }
            }
        }

        config
    }

    /// The format of the entry, either as configured, or guessed from the suffix of the entry.
    #[must_use = "Has no effect if the result is unused"]
    pub fn format(&self) -> Option<EntryFormat> {
        self.format.or_else(|| EntryFormat::from_path(&self.entry))
    }

    /// Assign a field to the [`LoaderConfig`] given a key and its value.
    fn assign_to_field(&mut self, key: &str, value: &str) {
        match &*key.to_ascii_lowercase() {
            "entry" => self.entry = normalize_path(value, UEFI_SEPARATOR),
            "format" => match value.parse() {
                Ok(format) => self.format = Some(format),
                Err(()) => warn!("[CONFIG]: Unknown entry format {value}"),
            },
            "log_level" => match value.parse() {
                Ok(level) => self.log_level = level,
                Err(e) => warn!("[CONFIG]: Invalid log level {value}: {e}"),
            },
            _ => warn!("[CONFIG]: Found unrecognized key {key} with value {value}"),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY.into(),
            format: None,
            log_level: LevelFilter::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::system::fs::MemFileSystem;

    #[test]
    fn test_full_config() {
        let config = r"
            # comment
            entry /EFI/fedora/grub.cfg
            format grub
            log_level debug
        "
        .as_bytes();

        let config = LoaderConfig::get_loader_config(config);
        assert_eq!(config.entry, "\\EFI\\fedora\\grub.cfg");
        assert_eq!(config.format, Some(EntryFormat::Grub));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_guessed_format() {
        let config = LoaderConfig::get_loader_config(b"entry /EFI/BOOT/grub.cfg");
        assert_eq!(config.format, None);
        assert_eq!(config.format(), Some(EntryFormat::Grub));
        assert_eq!(LoaderConfig::default().format(), Some(EntryFormat::Uapi));

        let config = LoaderConfig::get_loader_config(b"entry /EFI/BOOT/grub.cfg\nformat bls");
        assert_eq!(config.format(), Some(EntryFormat::Uapi));
    }

    #[test]
    fn test_invalid_values() {
        let config = LoaderConfig::get_loader_config(b"format uki\nlog_level loud\nunknown key\nentry");
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_from_tree() {
        let mut fs = MemFileSystem::new().with_file("\\loader\\bootentry.conf", "log_level off\n");
        assert_eq!(LoaderConfig::new(&mut fs).log_level, LevelFilter::Off);
        assert_eq!(
            LoaderConfig::new(&mut MemFileSystem::new()),
            LoaderConfig::default()
        );
    }

    proptest! {
        #[test]
        fn doesnt_panic(x in any::<Vec<u8>>()) {
            let _ = LoaderConfig::get_loader_config(&x);
        }
    }
}
