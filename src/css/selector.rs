//! Selector model: SelectorItem, Selector, SelectorList.
//!
//! A [`Selector`] is a flat, ordered list of [`SelectorItem`]s in source
//! order. Combinator items split the list into compound groups, so
//! `div > p.note` is
//! `[Type("div"), Combinator(Child), Type("p"), Class("note")]`.
//!
//! The canonical string form of a selector is the concatenation of its items'
//! string forms. It is used as an equality and cache key, never parsed back.

use std::fmt;

use crate::css::specificity::Specificity;

/// Relationship between two compound groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: `A B`, B has an ancestor matching A.
    Descendant,
    /// `A > B`, B's parent matches A.
    Child,
    /// `A + B`, B's immediately preceding sibling matches A.
    AdjacentSibling,
    /// `A ~ B`, some preceding sibling of B matches A.
    GeneralSibling,
}

impl Combinator {
    /// The combinator's own string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::AdjacentSibling => "+",
            Combinator::GeneralSibling => "~",
        }
    }
}

/// How an attribute selector compares the attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeMatch {
    /// `[a=v]` exact match.
    Equals,
    /// `[a~=v]` whitespace-separated list contains `v`.
    Includes,
    /// `[a|=v]` equals `v` or starts with `v-`.
    DashMatch,
    /// `[a^=v]` starts with `v`.
    Prefix,
    /// `[a$=v]` ends with `v`.
    Suffix,
    /// `[a*=v]` contains `v`.
    Substring,
}

impl AttributeMatch {
    /// The operator as written in CSS.
    pub fn operator(self) -> &'static str {
        match self {
            AttributeMatch::Equals => "=",
            AttributeMatch::Includes => "~=",
            AttributeMatch::DashMatch => "|=",
            AttributeMatch::Prefix => "^=",
            AttributeMatch::Suffix => "$=",
            AttributeMatch::Substring => "*=",
        }
    }
}

/// An attribute predicate: presence test, or value test with a match mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Attribute name, ASCII lowercase.
    pub name: String,
    /// Expected value; `None` tests presence only.
    pub value: Option<String>,
    /// Comparison mode; `None` with a value means [`AttributeMatch::Equals`].
    pub mode: Option<AttributeMatch>,
}

impl AttributeSelector {
    /// `[name]`
    pub fn exists(name: impl Into<String>) -> Self {
        Self { name: name.into().to_ascii_lowercase(), value: None, mode: None }
    }

    /// `[name<op>value]`
    pub fn new(name: impl Into<String>, mode: AttributeMatch, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: Some(value.into()),
            mode: Some(mode),
        }
    }

    /// The effective match mode when a value is present.
    pub fn effective_mode(&self) -> AttributeMatch {
        self.mode.unwrap_or(AttributeMatch::Equals)
    }
}

/// `an+b` argument of the `:nth-*` pseudo-classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nth {
    pub a: i32,
    pub b: i32,
}

impl Nth {
    /// `odd` is `2n+1`.
    pub const ODD: Nth = Nth { a: 2, b: 1 };
    /// `even` is `2n`.
    pub const EVEN: Nth = Nth { a: 2, b: 0 };

    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Whether the 1-based `position` equals `a*n + b` for some `n >= 0`.
    ///
    /// Evaluated in `i64`, so extreme `a` and `b` never overflow.
    pub fn matches(self, position: usize) -> bool {
        let Ok(position) = i64::try_from(position) else {
            return false;
        };
        let (a, b) = (i64::from(self.a), i64::from(self.b));
        let diff = position - b;
        if a == 0 {
            return diff == 0;
        }
        diff % a == 0 && diff / a >= 0
    }
}

impl fmt::Display for Nth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (0, b) => write!(f, "{b}"),
            (a, b) => {
                match a {
                    1 => f.write_str("n")?,
                    -1 => f.write_str("-n")?,
                    a => write!(f, "{a}n")?,
                }
                match b {
                    0 => Ok(()),
                    b if b > 0 => write!(f, "+{b}"),
                    b => write!(f, "{b}"),
                }
            }
        }
    }
}

/// Supported pseudo-classes. All are tree-structural or attribute-derived,
/// so matching needs nothing beyond [`crate::dom::ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    /// No element children and no text.
    Empty,
    /// No parent.
    Root,
    /// `checked` or `selected` attribute present.
    Checked,
    /// `disabled` attribute present.
    Disabled,
    /// `disabled` attribute absent.
    Enabled,
}

impl PseudoClass {
    /// Keyword form without the leading colon or argument.
    pub fn name(self) -> &'static str {
        match self {
            PseudoClass::FirstChild => "first-child",
            PseudoClass::LastChild => "last-child",
            PseudoClass::OnlyChild => "only-child",
            PseudoClass::FirstOfType => "first-of-type",
            PseudoClass::LastOfType => "last-of-type",
            PseudoClass::OnlyOfType => "only-of-type",
            PseudoClass::NthChild(_) => "nth-child",
            PseudoClass::NthLastChild(_) => "nth-last-child",
            PseudoClass::NthOfType(_) => "nth-of-type",
            PseudoClass::NthLastOfType(_) => "nth-last-of-type",
            PseudoClass::Empty => "empty",
            PseudoClass::Root => "root",
            PseudoClass::Checked => "checked",
            PseudoClass::Disabled => "disabled",
            PseudoClass::Enabled => "enabled",
        }
    }

    /// Resolve an argument-less pseudo-class keyword.
    pub fn from_keyword(name: &str) -> Option<Self> {
        let pseudo = match name.to_ascii_lowercase().as_str() {
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "empty" => PseudoClass::Empty,
            "root" => PseudoClass::Root,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            _ => return None,
        };
        Some(pseudo)
    }

    /// Resolve a functional `:nth-*()` pseudo-class.
    pub fn from_function(name: &str, nth: Nth) -> Option<Self> {
        let pseudo = match name.to_ascii_lowercase().as_str() {
            "nth-child" => PseudoClass::NthChild(nth),
            "nth-last-child" => PseudoClass::NthLastChild(nth),
            "nth-of-type" => PseudoClass::NthOfType(nth),
            "nth-last-of-type" => PseudoClass::NthLastOfType(nth),
            _ => return None,
        };
        Some(pseudo)
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoClass::NthChild(nth)
            | PseudoClass::NthLastChild(nth)
            | PseudoClass::NthOfType(nth)
            | PseudoClass::NthLastOfType(nth) => write!(f, ":{}({nth})", self.name()),
            _ => write!(f, ":{}", self.name()),
        }
    }
}

/// One atomic predicate or combinator of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorItem {
    /// Type selector: `div`. Stored in ASCII lowercase.
    Type(String),
    /// Class selector: `.name`.
    Class(String),
    /// ID selector: `#name`.
    Id(String),
    /// Attribute selector: `[name]`, `[name=value]`, ...
    Attribute(AttributeSelector),
    /// Pseudo-class: `:first-child`, `:nth-of-type(2n)`, ...
    Pseudo(PseudoClass),
    /// Universal selector: `*`.
    Universal,
    /// Relationship to the preceding compound group.
    Combinator(Combinator),
}

impl SelectorItem {
    /// Fixed specificity contribution of this item.
    pub fn specificity(&self) -> Specificity {
        Specificity::of_item(self)
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, SelectorItem::Combinator(_))
    }
}

impl fmt::Display for SelectorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorItem::Type(name) => f.write_str(name),
            SelectorItem::Class(name) => write!(f, ".{name}"),
            SelectorItem::Id(name) => write!(f, "#{name}"),
            SelectorItem::Attribute(attr) => match &attr.value {
                None => write!(f, "[{}]", attr.name),
                Some(value) => write!(
                    f,
                    "[{}{}\"{}\"]",
                    attr.name,
                    attr.effective_mode().operator(),
                    value.replace('"', "\\\"")
                ),
            },
            SelectorItem::Pseudo(pseudo) => write!(f, "{pseudo}"),
            SelectorItem::Universal => f.write_str("*"),
            SelectorItem::Combinator(combinator) => f.write_str(combinator.as_str()),
        }
    }
}

/// An ordered, immutable sequence of selector items.
///
/// Specificity is computed once at construction; the item list cannot change
/// afterwards, so the cached value always agrees with the items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    items: Vec<SelectorItem>,
    specificity: Specificity,
}

impl Selector {
    /// Freeze an item list into a selector.
    ///
    /// An empty list is legal and never matches anything.
    pub fn new(items: Vec<SelectorItem>) -> Self {
        let specificity = Specificity::of_items(&items);
        Self { items, specificity }
    }

    /// Items in source order.
    pub fn items(&self) -> &[SelectorItem] {
        &self.items
    }

    /// Sum of the item contributions.
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<SelectorItem> for Selector {
    fn from_iter<I: IntoIterator<Item = SelectorItem>>(iter: I) -> Self {
        Selector::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Comma-separated group of selectors with OR semantics.
///
/// Duplicate selectors are dropped on insertion; iteration follows first
/// insertion order so debug output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Create an empty list. An empty list never matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selector unless an equal one is already present.
    pub fn push(&mut self, selector: Selector) {
        if !self.selectors.contains(&selector) {
            self.selectors.push(selector);
        }
    }

    /// Add a selector (builder).
    pub fn with(mut self, selector: Selector) -> Self {
        self.push(selector);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl FromIterator<Selector> for SelectorList {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        let mut list = SelectorList::new();
        for selector in iter {
            list.push(selector);
        }
        list
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
