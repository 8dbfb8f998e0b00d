//! Crate-level error type.

use crate::css::parser::ParseError;
use crate::layout::LayoutError;

/// Any failure from the fallible front ends: selector text and box layout.
///
/// Matching and painting never fail; they degrade to "matches nothing" and
/// "paints nothing".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("selector parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parse_selector;

    fn parse(input: &str) -> Result<usize> {
        Ok(parse_selector(input)?.items().len())
    }

    #[test]
    fn parse_errors_convert() {
        assert_eq!(parse("a > b").unwrap(), 3);
        let err = parse("a:hover").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnknownPseudoClass(_))));
        assert_eq!(err.to_string(), "selector parse error: unknown pseudo-class ':hover'");
    }

    #[test]
    fn layout_errors_convert() {
        let err: Error = LayoutError::InvalidPageSize { width: 0.0, height: 1.0 }.into();
        assert_eq!(err.to_string(), "layout error: invalid page size 0x1");
    }
}
