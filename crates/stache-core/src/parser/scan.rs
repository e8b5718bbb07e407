//! Delimiter scanning for the template parser
//!
//! The scanner reads the template one character at a time and never moves
//! backwards. Delimiters are matched against the tail of the destination
//! buffer rather than a fixed lookahead window, so a delimiter may overlap
//! text that has already been buffered (`<%` after a literal `<`).

use std::str::Chars;

/// Forward-only character reader over template text
pub(crate) struct Scanner<'a> {
    chars: Chars<'a>,
    /// Current line number (for error messages)
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            line: 1,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Read a single character
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        #[cfg(test)]
        test_counter::inc();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Append characters to `buf` until `delimiter` has been read
    ///
    /// Returns `true` when the delimiter was found; the part of it that had
    /// been appended is removed again and the scanner sits just past it.
    /// Returns `false` at end of input, leaving everything read in `buf`.
    pub fn read_until(&mut self, delimiter: &str, buf: &mut String) -> bool {
        let Some(stopper) = delimiter.chars().last() else {
            return true;
        };
        let head = &delimiter[..delimiter.len() - stopper.len_utf8()];

        while let Some(ch) = self.next_char() {
            if ch == stopper && buf.ends_with(head) {
                buf.truncate(buf.len() - head.len());
                return true;
            }
            buf.push(ch);
        }
        false
    }
}
