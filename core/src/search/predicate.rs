//! The root of a filter tree and its renderer.

use crate::error::FilterError;
use crate::search::criterion::{Criterion, UniqueArgCriterion};
use crate::search::field::FilterField;
use crate::search::group::Group;
use crate::search::operator::Combinator;

/// Any node of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<F> {
    Criterion(Criterion<F>),
    UniqueArg(UniqueArgCriterion<F>),
    Group(Group<F>),
}

impl<F: FilterField> Predicate<F> {
    /// Render the tree into the query grammar.
    ///
    /// Leaves always render; only an empty group can fail.
    pub fn render(&self) -> Result<String, FilterError> {
        match self {
            Predicate::Criterion(c) => Ok(c.render()),
            Predicate::UniqueArg(u) => Ok(u.render()),
            Predicate::Group(g) => g.render(),
        }
    }

    /// Combine with `other` into a new `AND` group.
    pub fn and(self, other: impl Into<Predicate<F>>) -> Group<F> {
        self.combine(Combinator::And, other.into())
    }

    /// Combine with `other` into a new `OR` group.
    pub fn or(self, other: impl Into<Predicate<F>>) -> Group<F> {
        self.combine(Combinator::Or, other.into())
    }

    fn combine(self, combinator: Combinator, other: Predicate<F>) -> Group<F> {
        Group::with_children(combinator, [self, other])
    }
}

impl<F> From<Criterion<F>> for Predicate<F> {
    fn from(criterion: Criterion<F>) -> Self {
        Predicate::Criterion(criterion)
    }
}

impl<F> From<UniqueArgCriterion<F>> for Predicate<F> {
    fn from(criterion: UniqueArgCriterion<F>) -> Self {
        Predicate::UniqueArg(criterion)
    }
}

impl<F> From<Group<F>> for Predicate<F> {
    fn from(group: Group<F>) -> Self {
        Predicate::Group(group)
    }
}
