// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! Extracts `menuentry` blocks from a GRUB configuration file.
//!
//! GRUB configuration files are written in a shell-like scripting language. This does not interpret that language at
//! all. A block starts at a line of the form `menuentry '<title>' ...`, and ends at the first line after which every
//! `{` seen since the start of the block has been closed by a `}`.
//!
//! Braces are counted naively. A brace inside a quoted string or a comment is counted the same as a structural one,
//! so something like `echo '{'` inside a block will make the block end at the wrong line. Only titles in single quotes
//! are recognized.

use alloc::vec::Vec;

/// The keyword that starts a block.
const MENUENTRY: &str = "menuentry";

/// Lazily yields every `menuentry` block in a GRUB configuration, in the order they appear.
///
/// Each block is a slice of the original text, from the start of the `menuentry` line to the end of the line that
/// closed the block, so line breaks are preserved. A block that is never closed is not yielded.
pub struct MenuEntries<'a> {
    /// The text being scanned.
    text: &'a str,

    /// The remaining lines of the text.
    lines: core::str::Split<'a, char>,

    /// The byte offset of the next line in the text.
    offset: usize,
}

/// The state of a block that is being collected.
struct OpenBlock {
    /// The byte offset of the `menuentry` line in the text.
    start: usize,

    /// The amount of `{` minus the amount of `}` seen so far.
    depth: isize,

    /// Whether a `{` was seen yet.
    opened: bool,
}

impl<'a> MenuEntries<'a> {
    /// Creates a new [`MenuEntries`] over a GRUB configuration.
    #[must_use = "Has no effect if the result is unused"]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.split('\n'),
            offset: 0,
        }
    }
}

impl<'a> Iterator for MenuEntries<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current: Option<OpenBlock> = None;

        for line in self.lines.by_ref() {
            let line_start = self.offset;
            let line_end = line_start + line.len();
            self.offset = line_end + 1;

            if current.is_none() && match_menuentry_title(line).is_none() {
                continue;
            }

            let block = current.get_or_insert(OpenBlock {
                start: line_start,
                depth: 0,
                opened: false,
            });

            for c in line.chars() {
                match c {
                    '{' => {
                        block.depth += 1;
                        block.opened = true;
                    }
                    '}' => block.depth -= 1,
                    _ => (),
                }
            }

            // the opening brace may be on a later line than the menuentry itself
            if block.opened && block.depth == 0 {
                return Some(&self.text[block.start..line_end]);
            }
        }

        None
    }
}

/// Extracts every `menuentry` block in a GRUB configuration, in the order they appear.
///
/// See [`MenuEntries`] for how a block is delimited.
#[must_use = "Has no effect if the result is unused"]
pub fn extract_menu_entries(text: &str) -> Vec<&str> {
    MenuEntries::new(text).collect()
}

/// Matches a line that starts a block, returning the title of the block.
///
/// The line must consist of optional whitespace, `menuentry`, at least one whitespace, then a non-empty title in
/// single quotes. Anything may come after the title.
#[must_use = "Has no effect if the result is unused"]
pub fn match_menuentry_title(line: &str) -> Option<&str> {
    title_at(line.trim_start_matches(is_space))
}

/// Finds the title of the first `menuentry '<title>'` anywhere in a block.
#[must_use = "Has no effect if the result is unused"]
pub fn find_menuentry_title(block: &str) -> Option<&str> {
    block
        .match_indices(MENUENTRY)
        .find_map(|(idx, _)| title_at(&block[idx..]))
}

/// Parses `menuentry\s+'([^']+)'` at the very start of `text`.
fn title_at(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(MENUENTRY)?;
    let quoted = rest.trim_start_matches(is_space);
    if quoted.len() == rest.len() {
        return None; // at least one space is required
    }

    let (title, _) = quoted.strip_prefix('\'')?.split_once('\'')?;
    (!title.is_empty()).then_some(title)
}

/// The whitespace characters allowed around `menuentry`.
const fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}
