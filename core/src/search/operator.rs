//! Comparison operators and the boolean combinators that join predicates.
//!
//! Every operator's wire token, spacing, arity and multi-value rule live in
//! the `match` tables below. They are the single source of truth for
//! rendering and for construction-time validation.

use std::fmt;

use strum::{AsRefStr, EnumIter};

/// Boolean connective used between the children of a group, and between
/// the comparisons of a multi-valued criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Number of operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No operand, e.g. `IS NULL`.
    Nullary,
    /// Exactly one operand.
    Unary,
    /// Exactly two operands, e.g. the bounds of `BETWEEN`.
    Binary,
    /// One or more operands.
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Nullary => count == 0,
            Arity::Unary => count == 1,
            Arity::Binary => count == 2,
            Arity::Variadic => count >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Nullary => write!(f, "no values"),
            Arity::Unary => write!(f, "exactly one value"),
            Arity::Binary => write!(f, "exactly two values"),
            Arity::Variadic => write!(f, "at least one value"),
        }
    }
}

/// How the operands of a criterion are laid out after the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLayout {
    /// Nothing follows the operator.
    Suppressed,
    /// A single operand.
    Single,
    /// One comparison per operand, joined by the combinator.
    Repeat(Combinator),
    /// Parenthesised, comma separated list: `("a","b")`.
    List,
    /// Two bounds joined by `AND`.
    Range,
}

/// A comparison or existence operator of the search grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Is,
    IsNot,
    Contains,
    NotContains,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// Canonical wire token, without surrounding whitespace.
    pub const fn token(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Is => "IS",
            Operator::IsNot => "IS NOT",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT CONTAINS",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Token as it appears between the field and the operand.
    ///
    /// Symbols sit flush against both sides. Keywords are padded with a
    /// space on each side, except the existence checks which end the
    /// criterion and only get a leading space.
    pub const fn rendered(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Is => " IS ",
            Operator::IsNot => " IS NOT ",
            Operator::Contains => " CONTAINS ",
            Operator::NotContains => " NOT CONTAINS ",
            Operator::Like => " LIKE ",
            Operator::NotLike => " NOT LIKE ",
            Operator::In => " IN ",
            Operator::NotIn => " NOT IN ",
            Operator::Between => " BETWEEN ",
            Operator::IsNull => " IS NULL",
            Operator::IsNotNull => " IS NOT NULL",
        }
    }

    pub const fn arity(self) -> Arity {
        match self {
            Operator::IsNull | Operator::IsNotNull => Arity::Nullary,
            Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThan
            | Operator::GreaterThanOrEqual => Arity::Unary,
            Operator::Between => Arity::Binary,
            Operator::Equal
            | Operator::NotEqual
            | Operator::Is
            | Operator::IsNot
            | Operator::Contains
            | Operator::NotContains
            | Operator::Like
            | Operator::NotLike
            | Operator::In
            | Operator::NotIn => Arity::Variadic,
        }
    }

    /// Layout of the operand portion. Positive matches repeated over several
    /// values are alternatives (`OR`); negated ones must all hold (`AND`).
    pub const fn layout(self) -> ValueLayout {
        match self {
            Operator::IsNull | Operator::IsNotNull => ValueLayout::Suppressed,
            Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThan
            | Operator::GreaterThanOrEqual => ValueLayout::Single,
            Operator::Equal | Operator::Is | Operator::Contains | Operator::Like => {
                ValueLayout::Repeat(Combinator::Or)
            }
            Operator::NotEqual | Operator::IsNot | Operator::NotContains | Operator::NotLike => {
                ValueLayout::Repeat(Combinator::And)
            }
            Operator::In | Operator::NotIn => ValueLayout::List,
            Operator::Between => ValueLayout::Range,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
