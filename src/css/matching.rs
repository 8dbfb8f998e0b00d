//! Selector matching against an [`ElementTree`].
//!
//! Matching runs right to left. The rightmost compound group must match the
//! candidate element. Each combinator then locates the related element(s) the
//! group to its left must match. Descendant and general-sibling combinators
//! try every candidate, so `a > b c` still matches when the nearest `b`
//! ancestor is not a child of an `a` but a farther one is.
//!
//! Everything here is a pure function of the tree and the selector.

use crate::css::selector::{
    AttributeMatch, AttributeSelector, Combinator, PseudoClass, Selector, SelectorItem,
    SelectorList,
};
use crate::dom::element::ElementTree;

impl Selector {
    /// Whether this selector matches `element`.
    ///
    /// An empty selector has no compound group to test and never matches.
    /// Malformed item lists (leading, trailing or doubled combinators) never
    /// match either.
    pub fn matches<T: ElementTree + ?Sized>(&self, tree: &T, element: T::Handle) -> bool {
        matches_items(tree, self.items(), element)
    }
}

impl SelectorList {
    /// Whether any selector in the list matches `element`.
    pub fn matches<T: ElementTree + ?Sized>(&self, tree: &T, element: T::Handle) -> bool {
        self.iter().any(|selector| selector.matches(tree, element))
    }

    /// Selectors in this list that match `element`, in list order.
    pub fn matching<T: ElementTree + ?Sized>(&self, tree: &T, element: T::Handle) -> Vec<&Selector> {
        self.iter()
            .filter(|selector| selector.matches(tree, element))
            .collect()
    }
}

impl SelectorItem {
    /// Test a single non-combinator item against `element`.
    ///
    /// Combinator items relate two elements and cannot be tested alone;
    /// they return `false` here.
    pub fn matches<T: ElementTree + ?Sized>(&self, tree: &T, element: T::Handle) -> bool {
        match self {
            SelectorItem::Type(name) => tree.tag_name(element).eq_ignore_ascii_case(name),
            SelectorItem::Class(name) => tree.has_class(element, name),
            SelectorItem::Id(id) => tree.element_id(element) == Some(id.as_str()),
            SelectorItem::Attribute(attr) => matches_attribute(tree, element, attr),
            SelectorItem::Pseudo(pseudo) => matches_pseudo(tree, element, *pseudo),
            SelectorItem::Universal => true,
            SelectorItem::Combinator(_) => false,
        }
    }
}

/// Match the item list ending at `element`, recursing leftward through combinators.
fn matches_items<T: ElementTree + ?Sized>(
    tree: &T,
    items: &[SelectorItem],
    element: T::Handle,
) -> bool {
    let Some(split) = items.iter().rposition(SelectorItem::is_combinator) else {
        return matches_compound(tree, items, element);
    };

    let (left, rest) = items.split_at(split);
    let Some((SelectorItem::Combinator(combinator), compound)) = rest.split_first() else {
        return false;
    };

    if !matches_compound(tree, compound, element) || left.is_empty() {
        return false;
    }

    match combinator {
        Combinator::Child => tree
            .parent(element)
            .is_some_and(|parent| matches_items(tree, left, parent)),
        Combinator::Descendant => {
            let mut current = tree.parent(element);
            while let Some(ancestor) = current {
                if matches_items(tree, left, ancestor) {
                    return true;
                }
                current = tree.parent(ancestor);
            }
            false
        }
        Combinator::AdjacentSibling => tree
            .previous_sibling(element)
            .is_some_and(|sibling| matches_items(tree, left, sibling)),
        Combinator::GeneralSibling => {
            let mut current = tree.previous_sibling(element);
            while let Some(sibling) = current {
                if matches_items(tree, left, sibling) {
                    return true;
                }
                current = tree.previous_sibling(sibling);
            }
            false
        }
    }
}

/// A compound group matches when it is non-empty and every item matches.
fn matches_compound<T: ElementTree + ?Sized>(
    tree: &T,
    compound: &[SelectorItem],
    element: T::Handle,
) -> bool {
    !compound.is_empty() && compound.iter().all(|item| item.matches(tree, element))
}

fn matches_attribute<T: ElementTree + ?Sized>(
    tree: &T,
    element: T::Handle,
    attr: &AttributeSelector,
) -> bool {
    let Some(actual) = tree.attribute(element, &attr.name) else {
        return false;
    };
    let Some(expected) = attr.value.as_deref() else {
        return true;
    };

    match attr.effective_mode() {
        AttributeMatch::Equals => actual == expected,
        AttributeMatch::Includes => {
            !expected.is_empty()
                && !expected.contains(char::is_whitespace)
                && actual.split_ascii_whitespace().any(|word| word == expected)
        }
        AttributeMatch::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttributeMatch::Prefix => !expected.is_empty() && actual.starts_with(expected),
        AttributeMatch::Suffix => !expected.is_empty() && actual.ends_with(expected),
        AttributeMatch::Substring => !expected.is_empty() && actual.contains(expected),
    }
}

/// 1-based position of `element` among its siblings.
///
/// `of_type` restricts counting to siblings with the same tag; `from_end`
/// counts from the last sibling. Returns `None` for parentless elements.
fn sibling_position<T: ElementTree + ?Sized>(
    tree: &T,
    element: T::Handle,
    of_type: bool,
    from_end: bool,
) -> Option<(usize, usize)> {
    tree.parent(element)?;
    let tag = tree.tag_name(element);
    let mut position = None;
    let mut total = 0;
    for &sibling in tree.siblings(element) {
        if of_type && !tree.tag_name(sibling).eq_ignore_ascii_case(tag) {
            continue;
        }
        total += 1;
        if sibling == element {
            position = Some(total);
        }
    }
    let position = position?;
    let index = if from_end { total - position + 1 } else { position };
    Some((index, total))
}

fn matches_pseudo<T: ElementTree + ?Sized>(
    tree: &T,
    element: T::Handle,
    pseudo: PseudoClass,
) -> bool {
    let nth = |of_type: bool, from_end: bool, test: &dyn Fn(usize, usize) -> bool| {
        sibling_position(tree, element, of_type, from_end)
            .is_some_and(|(index, total)| test(index, total))
    };

    match pseudo {
        PseudoClass::FirstChild => nth(false, false, &|i, _| i == 1),
        PseudoClass::LastChild => nth(false, true, &|i, _| i == 1),
        PseudoClass::OnlyChild => nth(false, false, &|_, total| total == 1),
        PseudoClass::FirstOfType => nth(true, false, &|i, _| i == 1),
        PseudoClass::LastOfType => nth(true, true, &|i, _| i == 1),
        PseudoClass::OnlyOfType => nth(true, false, &|_, total| total == 1),
        PseudoClass::NthChild(n) => nth(false, false, &|i, _| n.matches(i)),
        PseudoClass::NthLastChild(n) => nth(false, true, &|i, _| n.matches(i)),
        PseudoClass::NthOfType(n) => nth(true, false, &|i, _| n.matches(i)),
        PseudoClass::NthLastOfType(n) => nth(true, true, &|i, _| n.matches(i)),
        PseudoClass::Empty => tree.children(element).is_empty() && !tree.has_text(element),
        PseudoClass::Root => tree.parent(element).is_none(),
        PseudoClass::Checked => {
            tree.attribute(element, "checked").is_some()
                || tree.attribute(element, "selected").is_some()
        }
        PseudoClass::Disabled => tree.attribute(element, "disabled").is_some(),
        PseudoClass::Enabled => tree.attribute(element, "disabled").is_none(),
    }
}
