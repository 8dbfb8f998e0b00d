//! Ranked rule lookup.
//!
//! A [`Stylesheet`] holds rules in source order, each pairing a
//! [`SelectorList`] with an already-resolved payload (for the painter this is
//! typically a `Vec<BackgroundLayer>`). Looking up an element collects every
//! rule with a matching selector and orders them by specificity, then source
//! order; the last entry wins.
//!
//! There is no inheritance and no per-property merging: the winning rule's
//! payload is returned whole.

use crate::css::parser::{parse_selector_list, ParseError};
use crate::css::selector::SelectorList;
use crate::css::specificity::Specificity;
use crate::dom::ElementTree;

/// One rule: a selector list and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule<T> {
    pub selectors: SelectorList,
    pub payload: T,
}

impl<T> StyleRule<T> {
    pub fn new(selectors: SelectorList, payload: T) -> Self {
        Self { selectors, payload }
    }
}

/// A rule that matched an element, with its ranking keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedRule<'a, T> {
    /// Highest specificity among the rule's selectors that matched.
    pub specificity: Specificity,
    /// Position of the rule in the stylesheet.
    pub source_order: usize,
    /// Index, within the rule's list, of the selector that supplied `specificity`.
    pub selector_index: usize,
    pub payload: &'a T,
}

/// Rules in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet<T> {
    rules: Vec<StyleRule<T>>,
}

impl<T> Default for Stylesheet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> Stylesheet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Later rules win ties.
    pub fn push(&mut self, rule: StyleRule<T>) {
        self.rules.push(rule);
    }

    /// Parse `selectors` and append a rule with `payload`.
    pub fn add(&mut self, selectors: &str, payload: T) -> Result<(), ParseError> {
        let selectors = parse_selector_list(selectors)?;
        self.push(StyleRule::new(selectors, payload));
        Ok(())
    }

    /// Builder form of [`Stylesheet::add`].
    pub fn with(mut self, selectors: &str, payload: T) -> Result<Self, ParseError> {
        self.add(selectors, payload)?;
        Ok(self)
    }

    pub fn rules(&self) -> &[StyleRule<T>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule matching `element`, sorted ascending by
    /// (specificity, source order).
    pub fn matching_rules<E: ElementTree + ?Sized>(
        &self,
        tree: &E,
        element: E::Handle,
    ) -> Vec<MatchedRule<'_, T>> {
        let mut matches = Vec::new();

        for (source_order, rule) in self.rules.iter().enumerate() {
            let mut best: Option<(usize, Specificity)> = None;
            for (index, selector) in rule.selectors.iter().enumerate() {
                if !selector.matches(tree, element) {
                    continue;
                }
                let specificity = selector.specificity();
                if best.map_or(true, |(_, current)| specificity > current) {
                    best = Some((index, specificity));
                }
            }

            if let Some((selector_index, specificity)) = best {
                matches.push(MatchedRule {
                    specificity,
                    source_order,
                    selector_index,
                    payload: &rule.payload,
                });
            }
        }

        matches.sort_by(|a, b| {
            a.specificity
                .cmp(&b.specificity)
                .then(a.source_order.cmp(&b.source_order))
        });
        matches
    }

    /// Payload of the winning rule, if any rule matches.
    pub fn resolve<E: ElementTree + ?Sized>(&self, tree: &E, element: E::Handle) -> Option<&T> {
        self.matching_rules(tree, element)
            .last()
            .map(|matched| matched.payload)
    }
}
