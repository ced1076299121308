//! AND/OR groups of predicates.

use crate::error::FilterError;
use crate::search::field::FilterField;
use crate::search::operator::Combinator;
use crate::search::predicate::Predicate;

/// A boolean combination of child predicates.
///
/// One combinator applies between every pair of adjacent children; mixing
/// `AND` and `OR` takes a nested group. A group may be built empty and filled
/// incrementally, but it must hold at least one child when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<F> {
    combinator: Combinator,
    children: Vec<Predicate<F>>,
}

impl<F: FilterField> Group<F> {
    pub fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            children: Vec::new(),
        }
    }

    /// Group whose children must all match.
    pub fn all<I, P>(children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate<F>>,
    {
        Self::with_children(Combinator::And, children)
    }

    /// Group where any child may match.
    pub fn any<I, P>(children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate<F>>,
    {
        Self::with_children(Combinator::Or, children)
    }

    pub fn with_children<I, P>(combinator: Combinator, children: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate<F>>,
    {
        Self {
            combinator,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, child: impl Into<Predicate<F>>) {
        self.children.push(child.into());
    }

    pub fn with(mut self, child: impl Into<Predicate<F>>) -> Self {
        self.push(child);
        self
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn children(&self) -> &[Predicate<F>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Render as `(c1 OP c2 OP ...)`.
    ///
    /// Fails with `InvalidState` if this group or any nested group is empty.
    pub fn render(&self) -> Result<String, FilterError> {
        if self.children.is_empty() {
            return Err(FilterError::InvalidState(format!(
                "cannot render an empty {} group",
                self.combinator
            )));
        }
        let rendered = self
            .children
            .iter()
            .map(Predicate::render)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("({})", rendered.join(&format!(" {} ", self.combinator))))
    }
}
