// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Simple UEFI backend for the [`log`] crate.
//!
//! The library itself only ever logs through the [`log`] macros. A frontend running under UEFI can install
//! [`UefiLogger`] to have those messages printed to the console.

use core::fmt::Write;

use alloc::boxed::Box;
use log::{LevelFilter, Metadata, Record};
use uefi::{runtime, system::with_stdout};

/// A simple logging backend for UEFI.
pub struct UefiLogger {
    /// The most verbose level that will be printed.
    level: LevelFilter,
}

impl UefiLogger {
    /// Constructs a new [`UefiLogger`] printing records up to and including `level`.
    #[must_use = "Has no effect if the result is unused"]
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Constructs a new [`UefiLogger`], then immediately leaks it so that it can be used with `set_logger`.
    #[must_use = "Has no effect if the result is unused"]
    pub fn static_new(level: LevelFilter) -> &'static Self {
        Box::leak(Box::new(Self::new(level)))
    }

    /// Installs the [`UefiLogger`] as the global logger, and sets the max level to its level.
    ///
    /// Does nothing if a logger was already installed.
    pub fn install(level: LevelFilter) {
        let _ = log::set_logger(Self::static_new(level)).map(|()| log::set_max_level(level));
    }
}

impl Default for UefiLogger {
    fn default() -> Self {
        Self::new(LevelFilter::Warn)
    }
}

impl log::Log for UefiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let time = runtime::get_time().unwrap_or(runtime::Time::invalid());
            let level = record.level();
            let file = record.file().unwrap_or_default();
            let line = record.line().unwrap_or_default();
            let args = record.args();
            with_stdout(|stdout| {
                let _ = stdout.write_fmt(format_args!("[{time} {level} {file}:{line}] - {args}\n"));
            });
        }
    }

    fn flush(&self) {}
}
