//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `~=` beats `~`, `:nth-child(2n)` beats `:nth-child`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Whitespace is skipped, but every token keeps its byte span so the parser
//! can tell `div.note` (one compound) from `div .note` (descendant).

use std::ops::Range;

use logos::Logos;

use crate::css::parser::ParseError;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// Functional pseudo-class with its argument: `:nth-child(2n+1)`.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*\([^)]*\)")]
    PseudoFunction,

    /// Pseudo-element: `::before`. Lexed so it can be rejected with a clear error.
    #[regex(r"::[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoElement,

    /// Pseudo-class: `:first-child`, `:root`, etc.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Id selector: `#main`.
    #[regex(r"#([a-zA-Z0-9_-]|[^\x00-\x7F]|\\[^\r\n\x0C0-9a-fA-F])+")]
    Hash,

    /// Double-quoted string literal.
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'([^'\\]|\\.)*'")]
    StringLiteralSingle,

    /// Identifier: tag, class and attribute names, unquoted attribute values.
    ///
    /// Follows the CSS name rules: non-ASCII code points and backslash escapes
    /// count as name characters, and `--` may start a name.
    #[regex(
        r"(--|-?([a-zA-Z_]|[^\x00-\x7F]|\\[^\r\n\x0C0-9a-fA-F]))([a-zA-Z0-9_-]|[^\x00-\x7F]|\\[^\r\n\x0C0-9a-fA-F])*"
    )]
    Ident,

    /// Unquoted numeric attribute value.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// `~=`
    #[token("~=")]
    IncludesMatch,

    /// `|=`
    #[token("|=")]
    DashMatch,

    /// `^=`
    #[token("^=")]
    PrefixMatch,

    /// `$=`
    #[token("$=")]
    SuffixMatch,

    /// `*=`
    #[token("*=")]
    SubstringMatch,

    // ── Single-character punctuation ─────────────────────────────────

    /// `=`
    #[token("=")]
    Equals,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,

    /// `+`
    #[token("+")]
    Plus,

    /// `~`
    #[token("~")]
    Tilde,
}

/// A token with its source text and byte span.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub text: String,
    pub span: Range<usize>,
}

/// Tokenize selector text.
///
/// Unlike a lossy lexer, any unrecognised character is an error: a selector
/// that silently lost a character would match the wrong elements.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push(SpannedToken {
                token,
                text: input[span.clone()].to_string(),
                span,
            }),
            Err(()) => {
                return Err(ParseError::InvalidCharacter {
                    offset: span.start,
                    text: input[span].to_string(),
                })
            }
        }
    }
    Ok(tokens)
}
