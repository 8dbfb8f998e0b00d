//! Recursive descent selector parser.
//!
//! Parses selector text into a [`Selector`] or a comma-separated
//! [`SelectorList`]. Uses the logos-based tokenizer from
//! [`crate::css::tokenizer`].
//!
//! Items are emitted in source order, so `Display` of a parsed selector is its
//! canonical form: `ul > li.done` parses to
//! `[Type("ul"), Combinator(Child), Type("li"), Class("done")]` and prints as
//! `ul>li.done`.

use crate::css::selector::{
    AttributeMatch, AttributeSelector, Combinator, Nth, PseudoClass, Selector, SelectorItem,
    SelectorList,
};
use crate::css::tokenizer::{tokenize, SpannedToken, Token};

/// Errors from selector parsing. Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid character at position {offset}: {text:?}")]
    InvalidCharacter { offset: usize, text: String },
    #[error("unknown pseudo-class ':{0}'")]
    UnknownPseudoClass(String),
    #[error("invalid nth expression '{0}'")]
    InvalidNth(String),
}

/// Parse a single selector. A comma is an error here; use
/// [`parse_selector_list`] for grouped selectors.
pub fn parse_selector(input: &str) -> Result<Selector, ParseError> {
    let mut parser = Parser::new(input)?;
    let selector = parser.parse_complex_selector()?;
    parser.expect_eof()?;
    Ok(selector)
}

/// Parse a comma-separated selector list. Duplicate selectors collapse.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, ParseError> {
    let mut parser = Parser::new(input)?;
    let mut list = SelectorList::new();

    list.push(parser.parse_complex_selector()?);
    while parser.peek().is_some_and(|t| t.token == Token::Comma) {
        parser.advance(); // consume comma
        list.push(parser.parse_complex_selector()?);
    }

    parser.expect_eof()?;
    Ok(list)
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    cursor: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: tokenize(input)?,
            cursor: 0,
        })
    }

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.span.start == prev.span.end,
            None => false,
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(unexpected(tok, "expected end of selector")),
        }
    }

    /// Take the next token, requiring it to be `expected` and adjacent to the
    /// previous one.
    fn expect_adjacent(&mut self, expected: Token, what: &str) -> Result<SpannedToken, ParseError> {
        let adjacent = self.is_adjacent();
        match self.advance() {
            Some(tok) if tok.token == expected && adjacent => Ok(tok),
            Some(tok) => Err(unexpected(&tok, &format!("expected {what}"))),
            None => Err(ParseError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    /// Parse compound groups joined by combinators.
    fn parse_complex_selector(&mut self) -> Result<Selector, ParseError> {
        let mut items = Vec::new();
        self.parse_compound(&mut items)?;

        loop {
            let combinator = match self.peek() {
                None => break,
                Some(t) if t.token == Token::Comma => break,
                Some(t) if t.token == Token::GreaterThan => Combinator::Child,
                Some(t) if t.token == Token::Plus => Combinator::AdjacentSibling,
                Some(t) if t.token == Token::Tilde => Combinator::GeneralSibling,
                // A compound-starting token separated by whitespace is a
                // descendant combinator. An adjacent one would already have
                // been consumed by parse_compound unless it is misplaced.
                Some(t) if starts_compound(t.token) => {
                    if self.is_adjacent() {
                        return Err(unexpected(t, "type selector must come first in a compound"));
                    }
                    items.push(SelectorItem::Combinator(Combinator::Descendant));
                    self.parse_compound(&mut items)?;
                    continue;
                }
                Some(t) => return Err(unexpected(t, "expected combinator or ','")),
            };
            self.advance();
            items.push(SelectorItem::Combinator(combinator));
            self.parse_compound(&mut items)?;
        }

        Ok(Selector::new(items))
    }

    /// Parse one compound group, e.g. `li.done:last-child`.
    ///
    /// Only the first component may be a type or `*`; the rest must follow
    /// without whitespace.
    fn parse_compound(&mut self, items: &mut Vec<SelectorItem>) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t.token == Token::Ident => {
                let name = unescape(&t.text).to_ascii_lowercase();
                self.advance();
                items.push(SelectorItem::Type(name));
            }
            Some(t) if t.token == Token::Star => {
                self.advance();
                items.push(SelectorItem::Universal);
            }
            Some(t) if starts_simple(t.token) => {
                let item = self.parse_simple()?;
                items.push(item);
            }
            Some(t) => return Err(unexpected(t, "expected selector")),
            None => return Err(ParseError::UnexpectedEof("expected selector".into())),
        }

        while self.is_adjacent() && self.peek().is_some_and(|t| starts_simple(t.token)) {
            let item = self.parse_simple()?;
            items.push(item);
        }

        Ok(())
    }

    /// Parse `.class`, `#id`, `[attr...]` or a pseudo-class.
    fn parse_simple(&mut self) -> Result<SelectorItem, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected selector".into()))?;

        match tok.token {
            Token::Dot => {
                let name = self.expect_adjacent(Token::Ident, "class name after '.'")?;
                Ok(SelectorItem::Class(unescape(&name.text)))
            }
            Token::Hash => Ok(SelectorItem::Id(unescape(&tok.text[1..]))),
            Token::BracketOpen => self.parse_attribute(),
            Token::PseudoClass => {
                let name = &tok.text[1..];
                PseudoClass::from_keyword(name)
                    .map(SelectorItem::Pseudo)
                    .ok_or_else(|| ParseError::UnknownPseudoClass(name.to_ascii_lowercase()))
            }
            Token::PseudoFunction => parse_pseudo_function(&tok.text).map(SelectorItem::Pseudo),
            Token::PseudoElement => Err(unexpected(&tok, "pseudo-elements are not supported")),
            _ => Err(unexpected(&tok, "expected selector")),
        }
    }

    /// Parse the rest of an attribute selector after `[`.
    fn parse_attribute(&mut self) -> Result<SelectorItem, ParseError> {
        let name = match self.advance() {
            Some(t) if t.token == Token::Ident => unescape(&t.text),
            Some(t) => return Err(unexpected(&t, "expected attribute name")),
            None => return Err(ParseError::UnexpectedEof("expected attribute name".into())),
        };

        let op = match self.advance() {
            Some(t) if t.token == Token::BracketClose => {
                return Ok(SelectorItem::Attribute(AttributeSelector::exists(name)));
            }
            Some(t) => match t.token {
                Token::Equals => AttributeMatch::Equals,
                Token::IncludesMatch => AttributeMatch::Includes,
                Token::DashMatch => AttributeMatch::DashMatch,
                Token::PrefixMatch => AttributeMatch::Prefix,
                Token::SuffixMatch => AttributeMatch::Suffix,
                Token::SubstringMatch => AttributeMatch::Substring,
                _ => return Err(unexpected(&t, "expected ']' or attribute operator")),
            },
            None => return Err(ParseError::UnexpectedEof("expected ']'".into())),
        };

        let value = match self.advance() {
            Some(t) if t.token == Token::Ident => unescape(&t.text),
            Some(t) if t.token == Token::Number => t.text,
            Some(t) if matches!(t.token, Token::StringLiteral | Token::StringLiteralSingle) => {
                unquote(&t.text)
            }
            Some(t) => return Err(unexpected(&t, "expected attribute value")),
            None => return Err(ParseError::UnexpectedEof("expected attribute value".into())),
        };

        match self.advance() {
            Some(t) if t.token == Token::BracketClose => {}
            Some(t) => return Err(unexpected(&t, "expected ']'")),
            None => return Err(ParseError::UnexpectedEof("expected ']'".into())),
        }

        Ok(SelectorItem::Attribute(AttributeSelector::new(name, op, value)))
    }
}

fn unexpected(tok: &SpannedToken, message: &str) -> ParseError {
    ParseError::UnexpectedToken {
        position: tok.span.start,
        message: format!("{message}, got {:?} '{}'", tok.token, tok.text),
    }
}

fn starts_simple(token: Token) -> bool {
    matches!(
        token,
        Token::Dot
            | Token::Hash
            | Token::BracketOpen
            | Token::PseudoClass
            | Token::PseudoFunction
            | Token::PseudoElement
    )
}

fn starts_compound(token: Token) -> bool {
    matches!(token, Token::Ident | Token::Star) || starts_simple(token)
}

/// Strip the surrounding quotes and resolve backslash escapes.
fn unquote(text: &str) -> String {
    unescape(&text[1..text.len() - 1])
}

/// Resolve backslash escapes: `\x` stands for `x`.
fn unescape(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// `:nth-child(2n+1)` and friends. The lexer guarantees the `(...)` shape.
fn parse_pseudo_function(text: &str) -> Result<PseudoClass, ParseError> {
    let open = text.find('(').unwrap_or(text.len());
    let name = &text[1..open];
    let arg = text
        .get(open + 1..text.len().saturating_sub(1))
        .unwrap_or_default();
    let nth = parse_nth(arg)?;
    PseudoClass::from_function(name, nth)
        .ok_or_else(|| ParseError::UnknownPseudoClass(name.to_ascii_lowercase()))
}

/// Parse an `an+b` expression, `odd` or `even`.
pub fn parse_nth(arg: &str) -> Result<Nth, ParseError> {
    let compact: String = arg
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let invalid = || ParseError::InvalidNth(arg.trim().to_string());

    match compact.as_str() {
        "odd" => return Ok(Nth::ODD),
        "even" => return Ok(Nth::EVEN),
        "" => return Err(invalid()),
        _ => {}
    }

    let Some((a_part, b_part)) = compact.split_once('n') else {
        let b = compact.parse::<i32>().map_err(|_| invalid())?;
        return Ok(Nth::new(0, b));
    };

    let a = match a_part {
        "" | "+" => 1,
        "-" => -1,
        digits => digits.parse::<i32>().map_err(|_| invalid())?,
    };
    let b = match b_part {
        "" => 0,
        signed if signed.starts_with('+') || signed.starts_with('-') => {
            signed.parse::<i32>().map_err(|_| invalid())?
        }
        _ => return Err(invalid()),
    };

    Ok(Nth::new(a, b))
}
