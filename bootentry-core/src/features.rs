// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Stubs for features that are disabled

/// Creates an optional parser.
///
/// For a parser that implements `EntryParser`, one should add the parser to this features file in order to allow it
/// to be disabled or enabled through the features.
///
/// This macro takes four parameters. The first of these is the feature as a string literal, like "grub".
/// The second is the feature as an identifier, and should be the name of the parser module.
/// The third is the name of the struct that implements `EntryParser`, like `GrubEntry`.
/// The last is the `EntryFormat` variant of the parser, which is reported when the parser is disabled.
/// The final macro invocation should look something like `optional_parser!("grub", grub, GrubEntry, Grub)`.
macro_rules! optional_parser {
    ($feature:literal, $name:ident, $parser:ident, $format:ident) => {
        /// The parser for $parser
        #[cfg(feature = $feature)]
        pub(crate) mod $name {
            pub(crate) use crate::entry::parsers::$name::$parser;
        }

        /// The disabled parser for $parser
        #[cfg(not(feature = $feature))]
        pub(crate) mod $name {
            use crate::{
                BootResult,
                entry::{
                    Entry,
                    parsers::{EntryFormat, EntryParser},
                },
                error::BootError,
                system::fs::FileTree,
            };

            pub(crate) struct $parser;

            impl EntryParser for $parser {
                fn parse_entry<T: FileTree + ?Sized>(_tree: &mut T, _path: &str) -> BootResult<Entry> {
                    Err(BootError::ParserDisabled(EntryFormat::$format))
                }
            }
        }
    };
}

optional_parser!("grub", grub, GrubEntry, Grub);
optional_parser!("uapi", uapi, UapiEntry, Uapi);
