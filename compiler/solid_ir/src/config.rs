//! Feature-toggle configuration consumed by the lexer and parser.
//!
//! An external collaborator owns loading and defaulting; the front end only
//! reads the flags. Each flag gates a set of lexer/grammar productions.

/// Configuration object for a single compile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolidConfig {
    /// Language feature toggles.
    pub features: Features,
    /// Compiler behavior toggles (carried for downstream collaborators).
    pub compiler_options: CompilerOptions,
}

/// Language feature toggles gating lexer/grammar productions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Features {
    /// Line, multiline, and block comments.
    pub comments: bool,
    /// Explicit-radix integer literals (`\x1f`, `\b101`).
    pub integer_radices: bool,
    /// `_` separators inside numeric literals.
    pub numeric_separators: bool,
    /// Identifiers (basic and backtick-delimited unicode).
    pub variables: bool,
    /// Single-quoted string literals.
    pub strings: bool,
    /// Triple-quote template literals.
    pub templates: bool,
}

impl Default for Features {
    fn default() -> Self {
        Features {
            comments: true,
            integer_radices: false,
            numeric_separators: false,
            variables: true,
            strings: true,
            templates: true,
        }
    }
}

/// Compiler behavior toggles. Unused by the front end itself but part of the
/// configuration interchange with the validator/decorator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Fold constant expressions during decoration.
    pub constant_folding: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            constant_folding: true,
        }
    }
}
