//! Sentinel-wrapped source text and lazily positioned characters.
//!
//! The scanner normalizes line endings, then brackets the text as
//! `STX + "\n" + text + ETX`. The prepended `"\n"` puts the first line of
//! user text at line index 0 once the sentinel line is compensated for,
//! and guarantees every block-comment opener can be preceded by a
//! newline-containing whitespace token.
//!
//! [`Char`] values are constructed lazily per access and hold a non-owning
//! back-reference to the scanner; line/column are derived on demand from a
//! prebuilt newline-position table.

/// Start-of-text sentinel bracketing every source. Never valid source content.
pub const STX: char = '\u{0002}';

/// End-of-text sentinel bracketing every source. Never valid source content.
pub const ETX: char = '\u{0003}';

/// Owns the normalized, sentinel-wrapped source text.
///
/// Immutable once constructed. Construction always succeeds — invalid
/// input is detected later by the lexer.
#[derive(Debug)]
pub struct Scanner {
    /// Wrapped text, one entry per Unicode scalar.
    chars: Vec<char>,
    /// Char indices of every `\n` in the wrapped text, ascending.
    newlines: Vec<u32>,
}

impl Scanner {
    /// Normalize line endings and bracket `source` with the sentinels.
    pub fn new(source: &str) -> Self {
        let normalized = normalize_line_endings(source);
        let mut chars = Vec::with_capacity(normalized.len() + 3);
        chars.push(STX);
        chars.push('\n');
        chars.extend(normalized.chars());
        chars.push(ETX);

        let mut newlines = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' {
                newlines.push(index_u32(i));
            }
        }
        Scanner { chars, newlines }
    }

    /// Number of chars in the wrapped text (sentinels included).
    pub fn len(&self) -> u32 {
        index_u32(self.chars.len())
    }

    /// The wrapped text is never empty (it always holds the sentinels).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The wrapped source text, reassembled.
    pub fn source_text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The `Char` at `index`, or `None` past the end.
    pub fn char_at(&self, index: u32) -> Option<Char<'_>> {
        (index < self.len()).then_some(Char {
            scanner: self,
            index,
        })
    }

    /// Lazy, finite, in-order sequence of every `Char` in the wrapped text.
    pub fn generate(&self) -> impl Iterator<Item = Char<'_>> + '_ {
        (0..self.len()).map(move |index| Char {
            scanner: self,
            index,
        })
    }
}

/// The character at a source index, with lazily derived line and column.
///
/// `Copy` — a `Char` is just a scanner back-reference plus an index.
#[derive(Clone, Copy)]
pub struct Char<'a> {
    scanner: &'a Scanner,
    index: u32,
}

impl<'a> Char<'a> {
    /// The character itself.
    pub fn source(&self) -> char {
        self.scanner.chars[self.index as usize]
    }

    /// Char index into the wrapped text.
    pub fn source_index(&self) -> u32 {
        self.index
    }

    /// Zero-based line index.
    ///
    /// Counts `\n` chars before this index, minus one to compensate for the
    /// prepended sentinel line: the STX char sits on line `-1`, the first
    /// line of user text on line `0`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn line_index(&self) -> i32 {
        let newlines_before = self.scanner.newlines.partition_point(|&n| n < self.index);
        newlines_before as i32 - 1
    }

    /// Zero-based column index: chars since the most recent preceding `\n`.
    /// Resets at each `\n` (a `\n` char itself gets the column after the
    /// previous line's last char).
    pub fn col_index(&self) -> u32 {
        let newlines_before = self.scanner.newlines.partition_point(|&n| n < self.index);
        match newlines_before {
            0 => self.index,
            k => self.index - self.scanner.newlines[k - 1] - 1,
        }
    }

    /// The `Char` `n` positions ahead, or `None` at end-of-text.
    pub fn lookahead(&self, n: u32) -> Option<Char<'a>> {
        self.scanner.char_at(self.index + n)
    }
}

impl std::fmt::Debug for Char<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}:{})",
            self.source(),
            self.index,
            self.line_index(),
            self.col_index()
        )
    }
}

/// Normalize `\r\n` and lone `\r` to `\n`.
///
/// memchr fast path: source without any `\r` is passed through without a
/// rebuild.
fn normalize_line_endings(source: &str) -> std::borrow::Cow<'_, str> {
    if memchr::memchr(b'\r', source.as_bytes()).is_none() {
        return std::borrow::Cow::Borrowed(source);
    }
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    std::borrow::Cow::Owned(out)
}

fn index_u32(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}
