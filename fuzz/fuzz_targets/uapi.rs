// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

#![no_main]

use bootentry_core::{entry::parsers::uapi::parse_uapi_entry, system::fs::MemFileSystem};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut fs = MemFileSystem::new()
        .with_file("\\entry.conf", data)
        .with_file("\\vmlinuz", b"kernel".as_slice())
        .with_file("\\initrd.img", b"initrd".as_slice());
    let _ = parse_uapi_entry(&mut fs, "/entry.conf");
});
