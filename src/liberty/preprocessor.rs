// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Liberty Preprocessor
//!
//! Pass 1: Preprocesses Liberty files by:
//! - Removing `/* ... */` block comments and `//` line comments
//! - Joining backslash line continuations
//! - Keeping every newline so offsets map back to original line numbers
//!
//! A continuation inside a quoted string joins the string into one line;
//! its newline is written right after the closing quote instead.

use std::fmt;

/// Preprocessed Liberty content
#[derive(Debug)]
pub struct PreprocessedLiberty {
    pub text: String,
    pub line_starts: Vec<usize>, // Byte offset of each line start in `text`
}

impl PreprocessedLiberty {
    fn new(text: String) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Original line number (1-based) of a byte offset in `text`
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Offset of a remaining-input slice produced while parsing `text`
    pub fn offset_of(&self, remaining: &str) -> usize {
        self.text.len().saturating_sub(remaining.len())
    }

    /// Format error message with original line number
    pub fn format_error(&self, offset: usize, message: &str) -> String {
        format!("Line {}: {}", self.line_of(offset), message)
    }
}

impl fmt::Display for PreprocessedLiberty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Preprocessed Liberty:")?;
        writeln!(f, "  Bytes: {}", self.text.len())?;
        writeln!(f, "  Lines: {}", self.line_starts.len())?;
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Code,
    Quoted,
    BlockComment,
    LineComment,
}

/// Preprocess Liberty file content
///
/// # Processing steps:
/// 1. Blank out comments (outside quoted strings)
/// 2. Blank out `\` line continuations, or join them inside strings
/// 3. Blank out carriage returns
pub fn preprocess(content: &str) -> PreprocessedLiberty {
    let mut text = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();
    let mut held_newlines = 0;

    while let Some(c) = chars.next() {
        if c == '\n' {
            if state == State::LineComment {
                state = State::Code;
            }
            text.push('\n');
            continue;
        }
        if c == '\r' {
            text.push(' ');
            continue;
        }

        match state {
            State::Code => match c {
                '"' => {
                    state = State::Quoted;
                    text.push(c);
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                    text.push_str("  ");
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                    text.push_str("  ");
                }
                '\\' if is_continuation(chars.clone()) => text.push(' '),
                _ => text.push(c),
            },
            State::Quoted => match c {
                '\\' if is_continuation(chars.clone()) => {
                    for skipped in chars.by_ref() {
                        if skipped == '\n' {
                            break;
                        }
                    }
                    held_newlines += 1;
                }
                '\\' => {
                    text.push(c);
                    if let Some(&next) = chars.peek() {
                        if next != '\n' {
                            chars.next();
                            text.push(next);
                        }
                    }
                }
                '"' => {
                    state = State::Code;
                    text.push(c);
                    push_newlines(&mut text, &mut held_newlines);
                }
                _ => text.push(c),
            },
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                    text.push_str("  ");
                } else {
                    push_blank(&mut text, c);
                }
            }
            State::LineComment => push_blank(&mut text, c),
        }
    }
    push_newlines(&mut text, &mut held_newlines);

    PreprocessedLiberty::new(text)
}

fn push_newlines(text: &mut String, count: &mut usize) {
    for _ in 0..*count {
        text.push('\n');
    }
    *count = 0;
}

/// Whether the rest of the line after a backslash is blank
fn is_continuation(rest: impl Iterator<Item = char>) -> bool {
    for c in rest {
        match c {
            ' ' | '\t' | '\r' => continue,
            '\n' => return true,
            _ => return false,
        }
    }
    true
}

// Keep byte offsets stable for multi-byte characters inside comments.
fn push_blank(text: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        text.push(' ');
    }
}
