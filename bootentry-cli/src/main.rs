// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! A command line interface frontend to `bootentry-core`.
//!
//! Parses an entry from the same filesystem as the application, then prints what was loaded.

#![no_main]
#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};

use bootentry_core::{
    BootResult,
    config::LoaderConfig,
    entry::{
        Entry,
        parsers::{EntryFormat, load_entry},
    },
    system::{fs::UefiFileSystem, log_backend::UefiLogger},
};
use getargs::{Arg, Options};
use uefi::{Status, boot, cstr16, entry, println, proto::loaded_image::LoadedImage};

/// The actual main function of the program, which returns a [`BootResult`].
///
/// # Errors
///
/// May return an `Error` if the program could not obtain the `LoadedImage` protocol, the filesystem of the program
/// could not be opened, or the entry could not be parsed.
fn main_func() -> BootResult<()> {
    uefi::helpers::init()?; // initialize helpers (for print)

    let load_options = {
        let handle = boot::image_handle();
        let loaded_image = boot::open_protocol_exclusive::<LoadedImage>(handle)?;
        loaded_image
            .load_options_as_cstr16()
            .unwrap_or(cstr16!("bootentry-cli.efi")) // there is at least one argument, which is the filename
            .to_string()
    }; // loaded_image dropped here

    let mut options = load_options.split_whitespace();

    let Some(app_filename) = options.next() else {
        println!("Error: No load options were passed to the program");
        return Ok(());
    };

    let mut fs = UefiFileSystem::from_image_fs()?;
    let config = LoaderConfig::new(&mut fs);
    UefiLogger::install(config.log_level);

    let mut request: Option<(EntryFormat, String)> = None;

    let mut opts = Options::new(options);
    while let Ok(Some(arg)) = opts.next_arg() {
        let format = match arg {
            Arg::Short('u') | Arg::Long("uapi") => EntryFormat::Uapi,
            Arg::Short('g') | Arg::Long("grub") => EntryFormat::Grub,
            Arg::Short('h') | Arg::Long("help") => {
                print_usage(app_filename);
                return Ok(());
            }
            Arg::Short(invalid) => {
                println!("Error: Unknown short argument: -{invalid}");
                continue;
            }
            Arg::Long(invalid) => {
                println!("Error: Unknown long argument: --{invalid}");
                continue;
            }
            Arg::Positional(invalid) => {
                println!("Error: Unknown positional argument: {invalid}");
                continue;
            }
        };

        let Ok(path) = opts.value() else {
            println!(
                "Error: A path was not passed into the {} argument",
                format.as_str()
            );
            return Ok(());
        };
        request = Some((format, path.to_string()));
    }

    let (format, path) = if let Some(request) = request {
        request
    } else {
        let Some(format) = config.format() else {
            println!(
                "Error: Could not guess the format of {} (set format in the config file)",
                config.entry
            );
            return Ok(());
        };
        (format, config.entry)
    };

    let entry = load_entry(format, &mut fs, &path)?;
    print_entry(&entry);

    Ok(())
}

/// Prints what was loaded from an [`Entry`].
fn print_entry(entry: &Entry) {
    println!("Title:   {}", entry.title());
    println!("Kernel:  {} bytes", entry.linux().len());
    println!("Initrd:  {} bytes", entry.initrd().len());
    println!("Options: {}", entry.options());

    if !entry.is_empty() {
        println!("\nRecognized:\n{entry}");
    }
    if !entry.ignored().is_empty() {
        println!("\nIgnored:\n{}", entry.ignored());
    }
}

/// Prints the usage of the program.
fn print_usage(app_filename: &str) {
    println!(
        r"Usage: {app_filename} [OPTIONS] [ARGS]...

-h, --help       display this help and exit
-u, --uapi       parse the given BLS type #1 entry
-g, --grub       parse the first menuentry of the given GRUB configuration

Without arguments, the entry in \loader\bootentry.conf is parsed.
"
    );
}

/// The main function of the program.
///
/// This will not panic on a fatal error, rather, it will return control to the UEFI shell (or the firmware menu).
/// This program is intended to be ran as a shell script, so panicking here would not make any sense.
#[entry]
fn main() -> Status {
    match main_func() {
        Ok(()) => Status::SUCCESS,
        Err(e) => {
            println!("Error: {e}");
            Status::ABORTED
        }
    }
}
