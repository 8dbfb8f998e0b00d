//! Selector engine: tokenizer, parser, selector model, matching, specificity,
//! ranked rule lookup.

pub mod tokenizer;
pub mod parser;
pub mod selector;
pub mod matching;
pub mod specificity;
pub mod stylesheet;

pub use parser::{parse_selector, parse_selector_list, ParseError};
pub use selector::{
    AttributeMatch, AttributeSelector, Combinator, Nth, PseudoClass, Selector, SelectorItem,
    SelectorList,
};
pub use specificity::Specificity;
pub use stylesheet::{MatchedRule, StyleRule, Stylesheet};
