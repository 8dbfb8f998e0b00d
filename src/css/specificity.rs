//! Additive selector specificity.
//!
//! Every selector item contributes a fixed weight and a selector's specificity
//! is the plain sum over its items:
//!
//! ```text
//! #id                      100
//! .class  [attr]  :pseudo   10
//! type                       1
//! *  and combinators         0
//! ```
//!
//! The value is order-independent and stable for a given item list. Breaking
//! ties between equally specific rules (source order, origin, importance) is
//! left to whoever ranks the rules, see [`crate::css::stylesheet`].

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::css::selector::SelectorItem;

/// Weight of an id selector.
pub const ID_WEIGHT: u32 = 100;
/// Weight of a class, attribute or pseudo-class selector.
pub const CLASS_WEIGHT: u32 = 10;
/// Weight of a type selector.
pub const TYPE_WEIGHT: u32 = 1;

/// Integer specificity score. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32);

impl Specificity {
    /// Zero specificity (universal selector, empty selector).
    pub const ZERO: Specificity = Specificity(0);

    /// The raw integer value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// The fixed contribution of a single item.
    pub fn of_item(item: &SelectorItem) -> Self {
        let weight = match item {
            SelectorItem::Id(_) => ID_WEIGHT,
            SelectorItem::Class(_) | SelectorItem::Attribute(_) | SelectorItem::Pseudo(_) => {
                CLASS_WEIGHT
            }
            SelectorItem::Type(_) => TYPE_WEIGHT,
            SelectorItem::Universal | SelectorItem::Combinator(_) => 0,
        };
        Specificity(weight)
    }

    /// Sum of the contributions of `items`.
    pub fn of_items<'a>(items: impl IntoIterator<Item = &'a SelectorItem>) -> Self {
        items.into_iter().map(Specificity::of_item).sum()
    }
}

impl Add for Specificity {
    type Output = Specificity;
    fn add(self, rhs: Specificity) -> Specificity {
        Specificity(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Specificity {
    fn sum<I: Iterator<Item = Specificity>>(iter: I) -> Self {
        iter.fold(Specificity::ZERO, Add::add)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
