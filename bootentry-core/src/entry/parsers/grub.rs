// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A parser for GRUB configuration files.
//!
//! Example configuration:
//!
//! ```text
//! menuentry 'Arch Linux' --class arch --class gnu-linux {
//!     load_video
//!     insmod gzio
//!     # the kernel, followed by its command line
//!     linux /vmlinuz-linux root=UUID=e09d636b-0cd9-4e84-8a39-84432cfc2b8e rw quiet
//!     initrd /intel-ucode.img /initramfs-linux.img
//! }
//! ```
//!
//! This is nowhere near a GRUB script interpreter. Only the first `menuentry` block of the file is used, and inside
//! of it, only `linux` and `initrd` are understood. Variables, conditionals and functions are never evaluated, and every
//! other command is kept in [`Entry::ignored`].
//!
//! The body of the block is taken from its first `{` up to the first `}` after it. A block that uses braces inside
//! of its body (such as `${root}`) will therefore only have the part before that brace parsed.

use alloc::{string::String, vec::Vec};
use log::debug;
use thiserror::Error;

use crate::{
    BootResult,
    entry::{Entry, builder::EntryBuilder, parsers::EntryParser},
    system::fs::{FileTree, FsError},
};

pub mod menuentry;

pub use menuentry::{MenuEntries, extract_menu_entries};

/// The length at which a line inside of a block is too long to be scanned.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// An `Error` that may result from parsing a GRUB configuration.
#[derive(Error, Debug)]
pub enum GrubError {
    /// The configuration file itself could not be read.
    #[error("Error reading GRUB configuration: {0}")]
    ReadConfig(#[source] FsError),

    /// The configuration file is not valid UTF-8.
    #[error("GRUB configuration is not valid UTF-8")]
    NotUtf8(#[from] core::str::Utf8Error),

    /// No `menuentry` block was found.
    #[error("No menuentry found in GRUB configuration")]
    NoMenuEntry,

    /// The `menuentry` block had no title.
    #[error("Could not parse menuentry title")]
    NoTitle,

    /// The `menuentry` block had no body.
    #[error("Menuentry block missing braces")]
    NoBody,

    /// The kernel image could not be loaded.
    #[error("Error loading linux image {path}: {source}")]
    LoadLinux {
        /// The path of the kernel image, as written in the configuration.
        path: String,

        /// The reason the image could not be loaded.
        #[source]
        source: FsError,
    },

    /// A ramdisk image could not be loaded.
    #[error("Error loading initrd {path}: {source}")]
    LoadInitrd {
        /// The path of the ramdisk image, as written in the configuration.
        path: String,

        /// The reason the image could not be loaded.
        #[source]
        source: FsError,
    },

    /// A line inside of the block was at least [`MAX_LINE_LEN`] bytes long.
    #[error("Line too long while scanning menuentry ({len} bytes)")]
    LineTooLong {
        /// The length of the line in bytes.
        len: usize,
    },
}

/// The parser for GRUB configuration files.
pub struct GrubEntry;

impl EntryParser for GrubEntry {
    fn parse_entry<T: FileTree + ?Sized>(tree: &mut T, path: &str) -> BootResult<Entry> {
        Ok(parse_grub_entry(tree, path)?)
    }
}

/// Parses the first `menuentry` of the GRUB configuration at `path`, and loads every image it references from the same
/// [`FileTree`].
///
/// # Errors
///
/// May return an `Error` if the configuration could not be read or is not UTF-8, it has no complete `menuentry` block,
/// the block is missing its title or body, a line is too long, or an image could not be loaded.
pub fn parse_grub_entry<T: FileTree + ?Sized>(tree: &mut T, path: &str) -> Result<Entry, GrubError> {
    let mut builder = EntryBuilder::new(tree);

    let content = builder.load(path).map_err(GrubError::ReadConfig)?;
    let content = core::str::from_utf8(&content)?;

    // any other menuentry after the first is discarded
    let block = MenuEntries::new(content)
        .next()
        .ok_or(GrubError::NoMenuEntry)?;

    let title = menuentry::find_menuentry_title(block).ok_or(GrubError::NoTitle)?;
    builder.title(title);

    let body = get_body(block).ok_or(GrubError::NoBody)?;

    for line in body.lines() {
        if line.len() >= MAX_LINE_LEN {
            return Err(GrubError::LineTooLong { len: line.len() });
        }

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        parse_command(&mut builder, line)?;
    }

    Ok(builder.build())
}

/// Gets the text between the first `{` of a block and the first `}` after it.
fn get_body(block: &str) -> Option<&str> {
    let start = block.find('{')? + 1;
    let len = block[start..].find('}')?;
    Some(&block[start..start + len])
}

/// Assigns a trimmed, non-empty line of the block to the [`EntryBuilder`].
///
/// # Errors
///
/// May return an `Error` if the line references an image that could not be loaded.
fn parse_command<T: FileTree + ?Sized>(
    builder: &mut EntryBuilder<'_, T>,
    line: &str,
) -> Result<(), GrubError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    match fields.as_slice() {
        [] | ["linux" | "initrd"] => return Ok(()),
        ["linux", path, options @ ..] => {
            debug!("[GRUB PARSER]: Loading kernel {path}");
            builder.linux(path).map_err(|source| GrubError::LoadLinux {
                path: (*path).into(),
                source,
            })?;

            if !options.is_empty() {
                builder.options(options.join(" "));
            }
        }
        ["initrd", paths @ ..] => {
            for path in paths {
                debug!("[GRUB PARSER]: Loading initrd {path}");
                builder.initrd(path).map_err(|source| GrubError::LoadInitrd {
                    path: (*path).into(),
                    source,
                })?;
            }
        }
        [command, ..] => {
            debug!("[GRUB PARSER]: Ignoring command {command}");
            builder.ignore(line);
            builder.ignore("\n");
            return Ok(());
        }
    }

    builder.recognize(line);
    builder.recognize("\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};

    use proptest::prelude::*;

    use super::*;
    use crate::system::fs::MemFileSystem;

    const CONFIG_PATH: &str = "/boot/grub/grub.cfg";

    const ARCH_CONFIG: &str = r"
### BEGIN /etc/grub.d/00_header ###
insmod part_gpt
if [ -s $prefix/grubenv ]; then
  load_env
fi
set default='0'
### END /etc/grub.d/00_header ###

### BEGIN /etc/grub.d/10_linux ###
menuentry 'Arch Linux' --class arch --class gnu-linux --class gnu --class os $menuentry_id_option 'gnulinux-simple-7a8b' {
	load_video
	set gfxpayload=keep
	insmod gzio
	insmod fat
	search --no-floppy --fs-uuid --set=root 7A8B-1C2D
	echo	'Loading Linux linux ...'
	linux	/vmlinuz-linux root=UUID=e09d636b-0cd9 rw  loglevel=3 quiet
	echo	'Loading initial ramdisk ...'
	initrd	/intel-ucode.img /initramfs-linux.img
}
menuentry 'Arch Linux, with Linux linux (fallback initramfs)' --class arch {
	linux	/vmlinuz-missing root=UUID=e09d636b-0cd9 rw
	initrd	/initramfs-missing.img
}
### END /etc/grub.d/10_linux ###
";

    fn fs_with_config(config: &str) -> MemFileSystem {
        MemFileSystem::new()
            .with_file("\\boot\\grub\\grub.cfg", config)
            .with_file("\\vmlinuz-linux", b"kernel".as_slice())
            .with_file("\\intel-ucode.img", b"A".as_slice())
            .with_file("\\initramfs-linux.img", b"B".as_slice())
    }

    fn parse(config: &str) -> Result<Entry, GrubError> {
        parse_grub_entry(&mut fs_with_config(config), CONFIG_PATH)
    }

    #[test]
    fn test_arch_config() {
        let entry = parse(ARCH_CONFIG).expect("Failed to parse valid config");
        assert_eq!(entry.title(), "Arch Linux");
        assert_eq!(entry.linux(), b"kernel");
        assert_eq!(entry.initrd(), b"AB");
        assert_eq!(entry.options(), "root=UUID=e09d636b-0cd9 rw loglevel=3 quiet");
        assert_eq!(
            entry.recognized(),
            "linux\t/vmlinuz-linux root=UUID=e09d636b-0cd9 rw  loglevel=3 quiet\ninitrd\t/intel-ucode.img /initramfs-linux.img\n"
        );
        assert_eq!(
            entry.ignored(),
            "load_video\nset gfxpayload=keep\ninsmod gzio\ninsmod fat\nsearch --no-floppy --fs-uuid --set=root 7A8B-1C2D\necho\t'Loading Linux linux ...'\necho\t'Loading initial ramdisk ...'\n"
        );
    }

    #[test]
    fn test_only_first_entry() {
        // the second block references files that do not exist, but it is never looked at
        let config = "menuentry 'First' {\n\tlinux /vmlinuz-linux\n}\nmenuentry 'Second' {\n\tlinux /missing\n}\n";
        let entry = parse(config).expect("Failed to parse valid config");
        assert_eq!(entry.title(), "First");
        assert_eq!(entry.linux(), b"kernel");
    }

    #[test]
    fn test_initrd_order() {
        let entry = parse("menuentry 'A' {\ninitrd /initramfs-linux.img\ninitrd /intel-ucode.img /initramfs-linux.img\n}")
            .expect("Failed to parse valid config");
        assert_eq!(entry.initrd(), b"BAB");
    }

    #[test]
    fn test_options_joined() {
        let entry = parse("menuentry 'A' {\n  linux /vmlinuz-linux  a   b\tc\n}")
            .expect("Failed to parse valid config");
        assert_eq!(entry.options(), "a b c");

        // a later linux line without options keeps the earlier ones
        let entry = parse("menuentry 'A' {\nlinux /vmlinuz-linux ro\nlinux /vmlinuz-linux\n}")
            .expect("Failed to parse valid config");
        assert_eq!(entry.options(), "ro");
    }

    #[test]
    fn test_later_linux_replaces_options() {
        let config = "menuentry 'A' {\nlinux /vmlinuz-linux ro\nlinux /vmlinuz-linux quiet splash\n}";
        let entry = parse(config).expect("Failed to parse valid config");
        assert_eq!(entry.options(), "quiet splash");
        assert_eq!(entry.linux(), b"kernel");
    }

    #[test]
    fn test_brace_on_later_line() {
        let entry = parse("menuentry 'A'\n{\n  linux /vmlinuz-linux\n}")
            .expect("Failed to parse valid config");
        assert_eq!(entry.title(), "A");
        assert_eq!(entry.linux(), b"kernel");
    }

    #[test]
    fn test_commands_without_paths() {
        let entry = parse("menuentry 'A' {\n\tlinux\n\tinitrd\n\t# linux /missing\n\n}")
            .expect("Failed to parse valid config");
        assert!(entry.linux().is_empty());
        assert!(entry.recognized().is_empty());
        assert!(entry.ignored().is_empty());
    }

    #[test]
    fn test_nested_braces_truncate_body() {
        // the body stops at the first closing brace, so the initrd is never seen
        let entry = parse("menuentry 'A' {\n\tlinux /vmlinuz-linux root=${root}\n\tinitrd /missing.img\n}")
            .expect("Failed to parse valid config");
        assert_eq!(entry.options(), "root=${root");
        assert!(entry.initrd().is_empty());
    }

    #[test]
    fn test_empty_config() {
        assert!(matches!(parse(""), Err(GrubError::NoMenuEntry)));
        assert!(matches!(
            parse("set timeout=5\nmenuentry \"Quoted\" {\n}\n"),
            Err(GrubError::NoMenuEntry)
        ));
        assert!(matches!(
            parse("menuentry 'A' {\n\tlinux /vmlinuz-linux\n"),
            Err(GrubError::NoMenuEntry)
        ));
    }

    #[test]
    fn test_missing_body() {
        assert!(matches!(parse("menuentry 'A' }{\n"), Err(GrubError::NoBody)));
    }

    #[test]
    fn test_missing_linux() {
        match parse("menuentry 'A' {\n\tlinux /vmlinuz-lts quiet\n}") {
            Err(GrubError::LoadLinux { path, source }) => {
                assert_eq!(path, "/vmlinuz-lts");
                assert!(matches!(source, FsError::NotFound(path) if path == "\\vmlinuz-lts"));
            }
            other => panic!("Expected a linux load error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_initrd() {
        match parse("menuentry 'A' {\n\tlinux /vmlinuz-linux\n\tinitrd /intel-ucode.img /missing.img\n}") {
            Err(GrubError::LoadInitrd { path, .. }) => assert_eq!(path, "/missing.img"),
            other => panic!("Expected an initrd load error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_config() {
        assert!(matches!(
            parse_grub_entry(&mut MemFileSystem::new(), CONFIG_PATH),
            Err(GrubError::ReadConfig(FsError::NotFound(_)))
        ));
    }

    #[test]
    fn test_line_too_long() {
        let config = format!("menuentry 'A' {{\n\techo {}\n}}", "x".repeat(MAX_LINE_LEN));
        assert!(matches!(parse(&config), Err(GrubError::LineTooLong { .. })));

        // the limit itself is already too long, one byte less is fine
        let config = format!("menuentry 'A' {{\n{}\n}}", "x".repeat(MAX_LINE_LEN));
        assert!(matches!(
            parse(&config),
            Err(GrubError::LineTooLong { len: MAX_LINE_LEN })
        ));
        let config = format!("menuentry 'A' {{\n{}\n}}", "x".repeat(MAX_LINE_LEN - 1));
        assert!(parse(&config).is_ok());
    }

    #[test]
    fn test_path_translation() {
        let mut fs = MemFileSystem::new()
            .with_file("\\grub.cfg", "menuentry 'A' {\n\tlinux a/b/c\n\tinitrd d/e\n}")
            .with_file("a\\b\\c", b"kernel".as_slice())
            .with_file("d\\e", b"ramdisk".as_slice());
        let entry = parse_grub_entry(&mut fs, "/grub.cfg").expect("Failed to parse valid config");
        assert_eq!(entry.linux(), b"kernel");
        assert_eq!(entry.initrd(), b"ramdisk");
    }

    #[test]
    fn test_error_message() {
        let err = parse("menuentry 'A' {\n\tinitrd /missing.img\n}").expect_err("Parsed config with missing initrd");
        assert!(err.to_string().starts_with("Error loading initrd /missing.img"));
    }

    proptest! {
        #[test]
        fn doesnt_panic(x in any::<Vec<u8>>()) {
            let mut fs = MemFileSystem::new().with_file("\\grub.cfg", x);
            let _ = parse_grub_entry(&mut fs, "/grub.cfg");
        }

        #[test]
        fn sets_title(x in "[^'\n{}]+") {
            let config = format!("menuentry '{x}' {{\n}}");
            let entry = parse(&config).expect("Failed to parse title only config");
            prop_assert_eq!(entry.title(), x);
        }
    }
}
