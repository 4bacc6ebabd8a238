use std::fmt::{Debug, Formatter};

/// 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
pub struct Line(pub usize);

/// Forward-only cursor over an immutable source string.
///
/// `start..current` is the lexeme currently being scanned. Both are byte offsets that
/// always sit on a char boundary, so slicing the source with them can't panic.
#[derive(Clone, PartialEq)]
pub struct Cursor<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    line: Line,
}

impl<'a> Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Printing the source is usually too verbose, so by default
        // we only print the position
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("line", &self.line)
                .field("start", &self.start)
                .field("current", &self.current)
                .field("source", &self.source)
                .finish()
        } else {
            f.debug_struct("Cursor")
                .field("line", &self.line)
                .field("start", &self.start)
                .field("current", &self.current)
                .finish()
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, start: 0, current: 0, line: Line(1) }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line.0 += 1;
        }
        Some(c)
    }

    pub fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes characters as long as `pred` holds. Returns the number of consumed chars.
    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(&pred) {
            self.advance();
            count += 1;
        }
        count
    }

    /// Marks the current position as the start of the next lexeme.
    pub fn begin_lexeme(&mut self) {
        self.start = self.current;
    }

    pub fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}
