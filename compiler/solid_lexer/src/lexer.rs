//! The lexer: ordered dispatch over a 4-character lookahead window.
//!
//! Recognizers collect the token's cargo into a local buffer while
//! advancing, then construct the immutable [`Token`] once the span is
//! known. Tokens never hold a lexer back-reference.
//!
//! Block-comment openers are disambiguated from line comments by one bit
//! of lexer state: whether the previously yielded token was a whitespace
//! run containing a newline. This is deliberately order-dependent on token
//! yield order, not a lookahead decision.

use solid_ir::tables::{
    is_identifier_continue, is_identifier_start, is_radix_digit, keyword_index, punctuator_index,
    radix_for_key, RADIX_DEFAULT, RADIX_ESCAPE, SEPARATOR,
};
use solid_ir::{CommentKind, SolidConfig, Span, TemplatePosition, Token, TokenKind};
use solid_scan::{Char, Scanner, ETX, STX};

use crate::lex_error::{LexError, LexErrorKind};

/// Start position of a token under construction.
#[derive(Clone, Copy)]
struct Anchor {
    start: u32,
    line: i32,
    col: u32,
}

/// The Solid lexer.
///
/// Maintains lookahead registers `c0..c3` (current character + 3 ahead),
/// re-derived after each advance.
pub struct Lexer<'s> {
    config: &'s SolidConfig,
    c0: Option<Char<'s>>,
    c1: Option<Char<'s>>,
    c2: Option<Char<'s>>,
    c3: Option<Char<'s>>,
    /// Whether the previously yielded token was whitespace containing `\n`.
    prev_whitespace_newline: bool,
}

impl<'s> Lexer<'s> {
    /// Construct a lexer over a scanner's character sequence.
    pub fn new(scanner: &'s Scanner, config: &'s SolidConfig) -> Self {
        let c0 = scanner.char_at(0);
        let mut lexer = Lexer {
            config,
            c0,
            c1: None,
            c2: None,
            c3: None,
            prev_whitespace_newline: false,
        };
        lexer.rederive();
        lexer
    }

    /// Produce the lazy token sequence. The first error fuses the stream.
    pub fn generate(self) -> TokenStream<'s> {
        TokenStream {
            lexer: self,
            failed: false,
        }
    }

    /// Advance `n` characters and re-derive the lookahead registers.
    fn advance(&mut self, n: u32) {
        self.c0 = self.c0.and_then(|c| c.lookahead(n));
        self.rederive();
    }

    fn rederive(&mut self) {
        self.c1 = self.c0.and_then(|c| c.lookahead(1));
        self.c2 = self.c0.and_then(|c| c.lookahead(2));
        self.c3 = self.c0.and_then(|c| c.lookahead(3));
    }

    fn peek(&self, n: u32) -> Option<char> {
        match n {
            0 => self.c0.map(|c| c.source()),
            1 => self.c1.map(|c| c.source()),
            2 => self.c2.map(|c| c.source()),
            _ => self.c3.map(|c| c.source()),
        }
    }

    /// The next 2- and 3-character candidate strings for punctuator and
    /// delimiter matching.
    fn candidate2(&self) -> Option<String> {
        match (self.peek(0), self.peek(1)) {
            (Some(a), Some(b)) => Some([a, b].iter().collect()),
            _ => None,
        }
    }

    fn candidate3(&self) -> Option<String> {
        match (self.peek(0), self.peek(1), self.peek(2)) {
            (Some(a), Some(b), Some(c)) => Some([a, b, c].iter().collect()),
            _ => None,
        }
    }

    fn anchor(&self, c: Char<'s>) -> Anchor {
        Anchor {
            start: c.source_index(),
            line: c.line_index(),
            col: c.col_index(),
        }
    }

    fn finish(&self, kind: TokenKind, text: String, anchor: Anchor) -> Token {
        let len = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        Token::new(
            kind,
            text,
            Span::new(anchor.start, anchor.start + len),
            anchor.line,
            anchor.col,
        )
    }

    fn unterminated(&self, anchor: Anchor, tag: &'static str) -> LexError {
        LexError::at_position(anchor.line, anchor.col, LexErrorKind::UnterminatedToken { tag })
    }

    /// Push the current character onto `text` and advance one.
    fn bump(&mut self, text: &mut String) {
        if let Some(c) = self.c0 {
            text.push(c.source());
            self.advance(1);
        }
    }

    // === Dispatch ===

    /// Recognize one token at `c0`. Checked in strict order; first match wins.
    fn next_token(&mut self, c: Char<'s>) -> Result<Token, LexError> {
        let features = &self.config.features;
        let ch = c.source();
        let anchor = self.anchor(c);

        // 1. Filebound sentinels.
        if ch == STX || ch == ETX {
            self.advance(1);
            return Ok(self.finish(
                TokenKind::Filebound { start: ch == STX },
                ch.to_string(),
                anchor,
            ));
        }

        // 2. Whitespace run.
        if is_whitespace_char(ch) {
            return Ok(self.lex_whitespace(anchor));
        }

        // 3. Punctuators, longest match first.
        if let Some(s3) = self.candidate3() {
            if let Some(index) = punctuator_index(&s3) {
                self.advance(3);
                return Ok(self.finish(TokenKind::Punctuator { index }, s3, anchor));
            }
        }
        if let Some(s2) = self.candidate2() {
            if let Some(index) = punctuator_index(&s2) {
                self.advance(2);
                return Ok(self.finish(TokenKind::Punctuator { index }, s2, anchor));
            }
        }
        if ch == '+' || ch == '-' {
            // Unary sign: re-dispatch as a signed number when a digit (or an
            // enabled radix escape with a valid key) follows.
            let signed_digit = self.peek(1).is_some_and(|c1| c1.is_ascii_digit());
            let signed_radix = features.integer_radices
                && self.peek(1) == Some(RADIX_ESCAPE)
                && self.peek(2).and_then(radix_for_key).is_some();
            if signed_digit || signed_radix {
                return self.lex_number(anchor);
            }
        }
        if let Some(index) = punctuator_index(ch.to_string().as_str()) {
            self.advance(1);
            return Ok(self.finish(TokenKind::Punctuator { index }, ch.to_string(), anchor));
        }

        // 4. Keyword or basic identifier.
        if is_identifier_start(ch) {
            return self.lex_word(anchor);
        }

        // 5. Backtick-delimited unicode identifier.
        if ch == '`' && features.variables {
            return self.lex_unicode_identifier(anchor);
        }

        // 6. Bare number, default radix.
        if ch.is_ascii_digit() {
            return self.lex_number(anchor);
        }

        // 7. Radix-escaped number.
        if ch == RADIX_ESCAPE && features.integer_radices {
            return self.lex_number(anchor);
        }

        // 8. Template literal pieces.
        if features.templates {
            if self.candidate3().as_deref() == Some("'''") {
                return self.lex_template(anchor, true);
            }
            if self.candidate2().as_deref() == Some("}}") {
                return self.lex_template(anchor, false);
            }
        }

        // 9. Single-quoted string.
        if ch == '\'' && features.strings {
            return self.lex_string(anchor);
        }

        // 10. Comments.
        if features.comments {
            if ch == '{' && self.peek(1) == Some('%') {
                return self.lex_comment_multi(anchor);
            }
            if ch == '%' {
                if self.candidate3().as_deref() == Some("%%%") && self.prev_whitespace_newline {
                    return self.lex_comment_block(anchor);
                }
                return self.lex_comment_line(anchor);
            }
        }

        // 11. Nothing matched.
        Err(LexError::at(c, LexErrorKind::UnrecognizedChar { found: ch }))
    }

    // === Recognizers ===

    fn lex_whitespace(&mut self, anchor: Anchor) -> Token {
        let mut text = String::new();
        while self.peek(0).is_some_and(is_whitespace_char) {
            self.bump(&mut text);
        }
        self.finish(TokenKind::Whitespace, text, anchor)
    }

    fn lex_word(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let mut text = String::new();
        while self.peek(0).is_some_and(is_identifier_continue) {
            self.bump(&mut text);
        }
        if let Some(index) = keyword_index(&text) {
            return Ok(self.finish(TokenKind::Keyword { index }, text, anchor));
        }
        if self.config.features.variables {
            return Ok(self.finish(TokenKind::IdentifierBasic, text, anchor));
        }
        Err(LexError::at_position(
            anchor.line,
            anchor.col,
            LexErrorKind::IdentifiersDisabled,
        ))
    }

    fn lex_unicode_identifier(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let mut text = String::new();
        self.bump(&mut text); // opening backtick
        loop {
            match self.peek(0) {
                None => return Err(self.unterminated(anchor, "IDENTIFIER")),
                Some(c) if c == ETX => return Err(self.unterminated(anchor, "IDENTIFIER")),
                Some('`') => {
                    self.bump(&mut text);
                    return Ok(self.finish(TokenKind::IdentifierUnicode, text, anchor));
                }
                Some(_) => self.bump(&mut text),
            }
        }
    }

    fn lex_number(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let separators = self.config.features.numeric_separators;
        let mut text = String::new();
        if matches!(self.peek(0), Some('+' | '-')) {
            self.bump(&mut text);
        }
        if self.peek(0) == Some(RADIX_ESCAPE) {
            self.bump(&mut text); // the escape
            let radix = match self.peek(0).and_then(radix_for_key) {
                Some(r) => r,
                None => {
                    if let Some(key) = self.peek(0) {
                        text.push(key);
                    }
                    return Err(LexError::at_position(
                        anchor.line,
                        anchor.col,
                        LexErrorKind::InvalidEscape { text },
                    ));
                }
            };
            self.bump(&mut text); // the radix key
            // The next character must be a valid digit of this radix.
            let next = self.peek(0);
            if !next.is_some_and(|c| is_radix_digit(c, radix)) {
                return Err(LexError::at_position(
                    anchor.line,
                    anchor.col,
                    LexErrorKind::InvalidRadixDigit { radix, found: next },
                ));
            }
            self.consume_digits(&mut text, radix, separators)?;
            return Ok(self.finish(
                TokenKind::Number {
                    radix,
                    separators,
                    float: false,
                },
                text,
                anchor,
            ));
        }

        // Default radix, possibly a float.
        self.consume_digits(&mut text, RADIX_DEFAULT, separators)?;
        let mut float = false;
        if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            float = true;
            self.bump(&mut text); // the point
            self.consume_digits(&mut text, RADIX_DEFAULT, separators)?;
            // Exponent part only when a digit (or signed digit) follows `e`.
            let exp_digit = self.peek(1).is_some_and(|c| c.is_ascii_digit());
            let exp_signed = matches!(self.peek(1), Some('+' | '-'))
                && self.peek(2).is_some_and(|c| c.is_ascii_digit());
            if self.peek(0) == Some('e') && (exp_digit || exp_signed) {
                self.bump(&mut text); // the marker
                if matches!(self.peek(0), Some('+' | '-')) {
                    self.bump(&mut text);
                }
                self.consume_digits(&mut text, RADIX_DEFAULT, separators)?;
            }
        }
        Ok(self.finish(
            TokenKind::Number {
                radix: RADIX_DEFAULT,
                separators,
                float,
            },
            text,
            anchor,
        ))
    }

    /// Consume a run of digits of `radix`, enforcing that each separator
    /// sits between two valid digits.
    fn consume_digits(
        &mut self,
        text: &mut String,
        radix: u32,
        separators: bool,
    ) -> Result<(), LexError> {
        loop {
            match self.peek(0) {
                Some(c) if is_radix_digit(c, radix) => self.bump(text),
                Some(c) if c == SEPARATOR && separators => {
                    let next_is_digit = self.peek(1).is_some_and(|n| is_radix_digit(n, radix));
                    if !next_is_digit {
                        // Trailing or doubled separator.
                        let Some(here) = self.c0 else { break };
                        return Err(LexError::at(here, LexErrorKind::SeparatorPlacement));
                    }
                    self.bump(text);
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn lex_string(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let mut text = String::new();
        self.bump(&mut text); // opening quote
        loop {
            match self.peek(0) {
                None => return Err(self.unterminated(anchor, "STRING")),
                Some(c) if c == ETX => return Err(self.unterminated(anchor, "STRING")),
                Some('\'') => {
                    self.bump(&mut text);
                    return Ok(self.finish(TokenKind::Str, text, anchor));
                }
                Some('\\') => {
                    self.bump(&mut text);
                    match self.peek(0) {
                        None => return Err(self.unterminated(anchor, "STRING")),
                        Some(c) if c == ETX => return Err(self.unterminated(anchor, "STRING")),
                        Some('u') if self.peek(1) == Some('{') => {
                            self.bump(&mut text); // u
                            self.bump(&mut text); // {
                            self.consume_escape_hex(&mut text, anchor)?;
                        }
                        // Fixed escape, line continuation, or identity escape:
                        // all consume exactly one character here.
                        Some(_) => self.bump(&mut text),
                    }
                }
                Some(_) => self.bump(&mut text),
            }
        }
    }

    /// Consume the hex digits and closing brace of a `\u{…}` escape.
    fn consume_escape_hex(&mut self, text: &mut String, anchor: Anchor) -> Result<(), LexError> {
        loop {
            match self.peek(0) {
                Some(c) if c.is_ascii_hexdigit() => self.bump(text),
                Some('}') => {
                    self.bump(text);
                    return Ok(());
                }
                Some(c) if c != ETX => {
                    text.push(c);
                    return Err(LexError::at_position(
                        anchor.line,
                        anchor.col,
                        LexErrorKind::InvalidEscape { text: text.clone() },
                    ));
                }
                _ => return Err(self.unterminated(anchor, "STRING")),
            }
        }
    }

    /// Template literal piece. `from_quotes` distinguishes a `'''` opener
    /// (FULL/HEAD) from a `}}` opener (MIDDLE/TAIL).
    fn lex_template(&mut self, anchor: Anchor, from_quotes: bool) -> Result<Token, LexError> {
        let mut text = String::new();
        let opener_len = if from_quotes { 3 } else { 2 };
        for _ in 0..opener_len {
            self.bump(&mut text);
        }
        loop {
            if self.peek(0).is_none() || self.peek(0) == Some(ETX) {
                return Err(self.unterminated(anchor, "TEMPLATE"));
            }
            if self.candidate3().as_deref() == Some("'''") {
                for _ in 0..3 {
                    self.bump(&mut text);
                }
                let position = if from_quotes {
                    TemplatePosition::Full
                } else {
                    TemplatePosition::Tail
                };
                return Ok(self.finish(TokenKind::Template { position }, text, anchor));
            }
            if self.candidate2().as_deref() == Some("{{") {
                for _ in 0..2 {
                    self.bump(&mut text);
                }
                let position = if from_quotes {
                    TemplatePosition::Head
                } else {
                    TemplatePosition::Middle
                };
                return Ok(self.finish(TokenKind::Template { position }, text, anchor));
            }
            self.bump(&mut text);
        }
    }

    fn lex_comment_multi(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let mut text = String::new();
        self.bump(&mut text); // {
        self.bump(&mut text); // %
        let mut depth = 1u32;
        loop {
            if self.peek(0).is_none() || self.peek(0) == Some(ETX) {
                return Err(self.unterminated(anchor, "COMMENT"));
            }
            if self.candidate2().as_deref() == Some("{%") {
                depth += 1;
                self.bump(&mut text);
                self.bump(&mut text);
            } else if self.candidate2().as_deref() == Some("%}") {
                depth -= 1;
                self.bump(&mut text);
                self.bump(&mut text);
                if depth == 0 {
                    return Ok(self.finish(
                        TokenKind::Comment {
                            kind: CommentKind::Multi,
                        },
                        text,
                        anchor,
                    ));
                }
            } else {
                self.bump(&mut text);
            }
        }
    }

    fn lex_comment_block(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let mut text = String::new();
        for _ in 0..3 {
            self.bump(&mut text); // opening %%%
        }
        loop {
            match self.peek(0) {
                None => return Err(self.unterminated(anchor, "COMMENT")),
                Some(c) if c == ETX => return Err(self.unterminated(anchor, "COMMENT")),
                Some('\n')
                    if self.peek(1) == Some('%')
                        && self.peek(2) == Some('%')
                        && self.peek(3) == Some('%')
                        && closing_stands_alone(self.c0) =>
                {
                    for _ in 0..4 {
                        self.bump(&mut text); // \n%%%
                    }
                    return Ok(self.finish(
                        TokenKind::Comment {
                            kind: CommentKind::Block,
                        },
                        text,
                        anchor,
                    ));
                }
                Some(_) => self.bump(&mut text),
            }
        }
    }

    fn lex_comment_line(&mut self, anchor: Anchor) -> Result<Token, LexError> {
        let mut text = String::new();
        self.bump(&mut text); // %
        loop {
            match self.peek(0) {
                None => return Err(self.unterminated(anchor, "COMMENT")),
                Some(c) if c == ETX => return Err(self.unterminated(anchor, "COMMENT")),
                Some('\n') => {
                    return Ok(self.finish(
                        TokenKind::Comment {
                            kind: CommentKind::Line,
                        },
                        text,
                        anchor,
                    ))
                }
                Some(_) => self.bump(&mut text),
            }
        }
    }
}

/// The closing `%%%` of a block comment must stand alone on its own line:
/// the char after it has to be a line feed or the end sentinel.
fn closing_stands_alone(newline: Option<Char<'_>>) -> bool {
    match newline.and_then(|c| c.lookahead(4)) {
        Some(after) => {
            let c = after.source();
            c == '\n' || c == ETX
        }
        None => true,
    }
}

fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Lazy token stream. Fuses after the first error.
pub struct TokenStream<'s> {
    lexer: Lexer<'s>,
    failed: bool,
}

impl Iterator for TokenStream<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let c = self.lexer.c0?;
        match self.lexer.next_token(c) {
            Ok(token) => {
                self.lexer.prev_whitespace_newline =
                    token.kind == TokenKind::Whitespace && token.text.contains('\n');
                Some(Ok(token))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use solid_ir::{Cooked, Features};

    fn config_all() -> SolidConfig {
        SolidConfig {
            features: Features {
                comments: true,
                integer_radices: true,
                numeric_separators: true,
                variables: true,
                strings: true,
                templates: true,
            },
            ..SolidConfig::default()
        }
    }

    fn lex(source: &str, config: &SolidConfig) -> Result<Vec<Token>, LexError> {
        let scanner = Scanner::new(source);
        Lexer::new(&scanner, config).generate().collect()
    }

    fn lex_ok(source: &str, config: &SolidConfig) -> Vec<Token> {
        match lex(source, config) {
            Ok(tokens) => tokens,
            Err(err) => panic!("unexpected lex error: {err}"),
        }
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn nontrivia(tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter().filter(|t| !t.is_trivia()).collect()
    }

    // === Round-Trip ===

    #[test]
    fn roundtrip_reproduces_wrapped_source() {
        let config = config_all();
        let source = "let x = 5 + 42; % done\n'str' ^ `uni`";
        let scanner = Scanner::new(source);
        let tokens = lex_ok(source, &config);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, scanner.source_text());
    }

    // === Filebound & Whitespace ===

    #[test]
    fn filebound_brackets_stream() {
        let config = config_all();
        let tokens = lex_ok("", &config);
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Filebound { start: true },
                TokenKind::Whitespace,
                TokenKind::Filebound { start: false },
            ]
        );
    }

    #[test]
    fn whitespace_is_maximal_run() {
        let config = config_all();
        let tokens = lex_ok("a \t\n b", &config);
        let ws: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Whitespace)
            .collect();
        // Sentinel newline+nothing, then the interior run.
        assert_eq!(ws.len(), 2);
        assert_eq!(ws[1].text, " \t\n ");
    }

    // === Punctuators ===

    #[test]
    fn punctuators_longest_match_first() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("a &&= b && c", &config));
        assert_eq!(tokens[2].text, "&&=");
        assert_eq!(tokens[4].text, "&&");
    }

    #[test]
    fn plus_before_nondigit_is_punctuator() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("a + b", &config));
        assert_eq!(tokens[2].kind, TokenKind::Punctuator { index: 11 });
    }

    // === Keywords & Identifiers ===

    #[test]
    fn keyword_let_cooks_to_128() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("let", &config));
        assert_eq!(tokens[1].kind, TokenKind::Keyword { index: 0 });
        assert_eq!(tokens[1].cook(), Cooked::Integer(128));
    }

    #[test]
    fn unicode_identifier_backticks() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("`hëllo wörld`", &config));
        assert_eq!(tokens[1].kind, TokenKind::IdentifierUnicode);
        assert_eq!(tokens[1].text, "`hëllo wörld`");
    }

    #[test]
    fn identifiers_disabled_is_error() {
        let mut config = config_all();
        config.features.variables = false;
        let Err(err) = lex("foobar", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::IdentifiersDisabled);
    }

    // === Numbers ===

    #[test]
    fn signed_radix_number_cooks() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("-\\x1F", &config));
        assert_eq!(
            tokens[1].kind,
            TokenKind::Number {
                radix: 16,
                separators: true,
                float: false
            }
        );
        assert_eq!(tokens[1].cook(), Cooked::Integer(-31));
    }

    #[test]
    fn signed_default_radix_number() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("-42", &config));
        assert_eq!(tokens[1].cook(), Cooked::Integer(-42));
    }

    #[test]
    fn radix_without_digit_is_error() {
        let config = config_all();
        let Err(err) = lex("\\x", &config) else {
            panic!("expected error");
        };
        assert_eq!(
            err.kind,
            LexErrorKind::InvalidRadixDigit {
                radix: 16,
                found: Some('\u{3}')
            }
        );
    }

    #[test]
    fn radix_disabled_sign_is_punctuator() {
        let mut config = config_all();
        config.features.integer_radices = false;
        let Err(err) = lex("-\\x1F", &config) else {
            panic!("expected error");
        };
        // `-` lexes as the punctuator; the stray `\` is unrecognized.
        assert_eq!(err.kind, LexErrorKind::UnrecognizedChar { found: '\\' });
    }

    #[test]
    fn trailing_separator_is_error() {
        let config = config_all();
        let Err(err) = lex("12_345_", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::SeparatorPlacement);
    }

    #[test]
    fn doubled_separator_is_error() {
        let config = config_all();
        let Err(err) = lex("12__345", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::SeparatorPlacement);
    }

    #[test]
    fn float_with_exponent() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("5.5e+3", &config));
        assert_eq!(tokens[1].text, "5.5e+3");
        let Cooked::Float(v) = tokens[1].cook() else {
            panic!("expected float");
        };
        assert!((v - 5500.0).abs() < 1e-9);
    }

    #[test]
    fn bare_e_stays_identifier() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("1.5e", &config));
        assert_eq!(tokens[1].text, "1.5");
        assert_eq!(tokens[2].kind, TokenKind::IdentifierBasic);
    }

    // === Strings ===

    #[test]
    fn string_escape_cooks_tab() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("'a\\tb'", &config));
        assert_eq!(tokens[1].kind, TokenKind::Str);
        assert_eq!(tokens[1].cook(), Cooked::CodeUnits(vec![b'a', 0x09, b'b']));
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("'a\\'b'", &config));
        assert_eq!(tokens[1].text, "'a\\'b'");
    }

    #[test]
    fn unterminated_string_is_error() {
        let config = config_all();
        let Err(err) = lex("'abc", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::UnterminatedToken { tag: "STRING" });
    }

    #[test]
    fn malformed_unicode_escape_is_error() {
        let config = config_all();
        let Err(err) = lex("'\\u{24Q}'", &config) else {
            panic!("expected error");
        };
        assert!(matches!(err.kind, LexErrorKind::InvalidEscape { .. }));
    }

    // === Templates ===

    #[test]
    fn template_full_and_pieces() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("'''plain'''", &config));
        assert_eq!(
            tokens[1].kind,
            TokenKind::Template {
                position: TemplatePosition::Full
            }
        );

        let tokens = nontrivia(lex_ok("'''a{{ x }}b'''", &config));
        let positions: Vec<TokenKind> = kinds(&tokens);
        assert_eq!(
            positions[1],
            TokenKind::Template {
                position: TemplatePosition::Head
            }
        );
        assert_eq!(positions[2], TokenKind::IdentifierBasic);
        assert_eq!(
            positions[3],
            TokenKind::Template {
                position: TemplatePosition::Tail
            }
        );
    }

    #[test]
    fn unterminated_template_is_error() {
        let config = config_all();
        let Err(err) = lex("'''abc", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::UnterminatedToken { tag: "TEMPLATE" });
    }

    // === Comments ===

    #[test]
    fn line_comment_stops_before_newline() {
        let config = config_all();
        let tokens = lex_ok("% hi\nx", &config);
        let comment = tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Comment { .. }));
        assert_eq!(comment.map(|t| t.text.as_str()), Some("% hi"));
    }

    #[test]
    fn multiline_comment_nests() {
        let config = config_all();
        let tokens = lex_ok("{% outer {% inner %} still %}", &config);
        let comment = tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Comment { .. }));
        assert_eq!(
            comment.map(|t| t.text.as_str()),
            Some("{% outer {% inner %} still %}")
        );
    }

    #[test]
    fn block_comment_requires_preceding_newline_state() {
        let config = config_all();
        // At the start of text the sentinel newline precedes, so this is a
        // block comment.
        let tokens = lex_ok("%%%\nbody\n%%%", &config);
        let comment = tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Comment { .. }));
        assert_eq!(
            comment.map(|t| t.kind),
            Some(TokenKind::Comment {
                kind: CommentKind::Block
            })
        );
        assert_eq!(comment.map(|t| t.text.as_str()), Some("%%%\nbody\n%%%"));
    }

    #[test]
    fn unterminated_block_comment_is_error() {
        let config = config_all();
        let Err(err) = lex("%%%\nabc", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::UnterminatedToken { tag: "COMMENT" });
    }

    #[test]
    fn mid_line_triple_percent_is_line_comment() {
        let config = config_all();
        let tokens = lex_ok("x %%% not a block\ny", &config);
        let comment = tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Comment { .. }));
        assert_eq!(
            comment.map(|t| t.kind),
            Some(TokenKind::Comment {
                kind: CommentKind::Line
            })
        );
    }

    #[test]
    fn comments_disabled_percent_is_error() {
        let mut config = config_all();
        config.features.comments = false;
        let Err(err) = lex("% hi", &config) else {
            panic!("expected error");
        };
        assert_eq!(err.kind, LexErrorKind::UnrecognizedChar { found: '%' });
    }

    // === Positions ===

    #[test]
    fn token_positions_are_first_char() {
        let config = config_all();
        let tokens = nontrivia(lex_ok("let x", &config));
        // `let` at line 0 col 0; `x` at col 4.
        assert_eq!((tokens[1].line_index, tokens[1].col_index), (0, 0));
        assert_eq!((tokens[2].line_index, tokens[2].col_index), (0, 4));
    }

    #[test]
    fn stream_fuses_after_error() {
        let config = config_all();
        let scanner = Scanner::new("'unterminated");
        let results: Vec<Result<Token, LexError>> =
            Lexer::new(&scanner, &config).generate().collect();
        let errors = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(errors, 1);
        assert!(results.last().is_some_and(Result::is_err));
    }
}
