//! Leaf predicates: a field or a unique-arg key compared against operands.
//!
//! # Design
//! Both leaf kinds share one rendering routine and differ only in the
//! subject they place in front of the operator. Operand counts are checked
//! against the operator's arity at construction, so a value of either type
//! always renders.

use std::fmt;
use std::marker::PhantomData;

use crate::error::FilterError;
use crate::search::field::{FilterField, SupportsUniqueArgs};
use crate::search::operator::{Operator, ValueLayout};
use crate::search::value::Value;

/// A single `field operator value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion<F> {
    field: F,
    operator: Operator,
    values: Vec<Value>,
}

impl<F: FilterField> Criterion<F> {
    /// Build a criterion from any operator and operand list.
    ///
    /// Fails with `InvalidArgument` when the number of values does not match
    /// the operator's arity.
    pub fn new<I, V>(field: F, operator: Operator, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = collect_values(operator, values)?;
        Ok(Self {
            field,
            operator,
            values,
        })
    }

    fn single(field: F, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field,
            operator,
            values: vec![value.into()],
        }
    }

    pub fn equal(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Equal, value)
    }

    pub fn not_equal(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::NotEqual, value)
    }

    pub fn less_than(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::LessThan, value)
    }

    pub fn less_than_or_equal(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::LessThanOrEqual, value)
    }

    pub fn greater_than(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::GreaterThan, value)
    }

    pub fn greater_than_or_equal(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::GreaterThanOrEqual, value)
    }

    pub fn is(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Is, value)
    }

    pub fn is_not(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::IsNot, value)
    }

    pub fn contains(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Contains, value)
    }

    pub fn not_contains(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::NotContains, value)
    }

    pub fn like(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::Like, value)
    }

    pub fn not_like(field: F, value: impl Into<Value>) -> Self {
        Self::single(field, Operator::NotLike, value)
    }

    /// `field BETWEEN low AND high`, bounds inclusive.
    pub fn between(field: F, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self {
            field,
            operator: Operator::Between,
            values: vec![low.into(), high.into()],
        }
    }

    pub fn is_in<I, V>(field: F, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(field, Operator::In, values)
    }

    pub fn not_in<I, V>(field: F, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(field, Operator::NotIn, values)
    }

    pub fn is_null(field: F) -> Self {
        Self {
            field,
            operator: Operator::IsNull,
            values: Vec::new(),
        }
    }

    pub fn is_not_null(field: F) -> Self {
        Self {
            field,
            operator: Operator::IsNotNull,
            values: Vec::new(),
        }
    }

    pub fn field(&self) -> F {
        self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn render_operator(&self) -> &'static str {
        self.operator.rendered()
    }

    /// Operand portion that follows the operator.
    ///
    /// With several values under a repeated layout (`=`, `IS`, `CONTAINS`,
    /// `LIKE` and their negations) this lists the operands joined by the
    /// combinator, while [`render`](Self::render) repeats the whole comparison
    /// per operand.
    /// Otherwise `render()` is exactly `(` subject, operator, value `)`.
    pub fn render_value(&self) -> String {
        render_value(self.operator, &self.values)
    }

    pub fn render(&self) -> String {
        render_comparison(self.field.as_ref(), self.operator, &self.values)
    }
}

impl<F: FilterField> fmt::Display for Criterion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A predicate over a custom tracking argument, `unique_args['<name>']`.
///
/// Only constructible for domains that record unique args.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueArgCriterion<F> {
    name: String,
    operator: Operator,
    values: Vec<Value>,
    domain: PhantomData<F>,
}

impl<F: SupportsUniqueArgs> UniqueArgCriterion<F> {
    /// Fails with `InvalidArgument` when the name is empty or contains a
    /// quote or backslash, or when the value count does not match the
    /// operator's arity.
    pub fn new<I, V>(name: impl Into<String>, operator: Operator, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let name = name.into();
        validate_unique_arg_name(&name)?;
        let values = collect_values(operator, values)?;
        Ok(Self {
            name,
            operator,
            values,
            domain: PhantomData,
        })
    }

    pub fn equal(name: impl Into<String>, value: impl Into<Value>) -> Result<Self, FilterError> {
        Self::new(name, Operator::Equal, [value.into()])
    }

    pub fn not_equal(name: impl Into<String>, value: impl Into<Value>) -> Result<Self, FilterError> {
        Self::new(name, Operator::NotEqual, [value.into()])
    }
}

impl<F: FilterField> UniqueArgCriterion<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn render_operator(&self) -> &'static str {
        self.operator.rendered()
    }

    /// Operand portion that follows the operator.
    ///
    /// With several values under a repeated layout (`=`, `IS`, `CONTAINS`,
    /// `LIKE` and their negations) this lists the operands joined by the
    /// combinator, while [`render`](Self::render) repeats the whole comparison
    /// per operand.
    /// Otherwise `render()` is exactly `(` subject, operator, value `)`.
    pub fn render_value(&self) -> String {
        render_value(self.operator, &self.values)
    }

    pub fn render(&self) -> String {
        render_comparison(&format!("unique_args['{}']", self.name), self.operator, &self.values)
    }
}

impl<F: FilterField> fmt::Display for UniqueArgCriterion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn collect_values<I, V>(operator: Operator, values: I) -> Result<Vec<Value>, FilterError>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    let arity = operator.arity();
    if !arity.accepts(values.len()) {
        return Err(FilterError::InvalidArgument(format!(
            "operator {operator} takes {arity}, got {}",
            values.len()
        )));
    }
    Ok(values)
}

fn validate_unique_arg_name(name: &str) -> Result<(), FilterError> {
    if name.is_empty() {
        return Err(FilterError::InvalidArgument("unique arg name is empty".to_string()));
    }
    if name.contains(['\'', '\\']) {
        return Err(FilterError::InvalidArgument(format!(
            "unique arg name {name:?} contains a quote or backslash"
        )));
    }
    Ok(())
}

fn render_value(operator: Operator, values: &[Value]) -> String {
    let rendered = values.iter().map(Value::to_string);
    match operator.layout() {
        ValueLayout::Suppressed => String::new(),
        ValueLayout::Single => rendered.collect(),
        ValueLayout::Repeat(combinator) => rendered.collect::<Vec<_>>().join(&format!(" {combinator} ")),
        ValueLayout::List => format!("({})", rendered.collect::<Vec<_>>().join(",")),
        ValueLayout::Range => rendered.collect::<Vec<_>>().join(" AND "),
    }
}

fn render_comparison(subject: &str, operator: Operator, values: &[Value]) -> String {
    let op = operator.rendered();
    match operator.layout() {
        ValueLayout::Repeat(combinator) if values.len() > 1 => {
            let comparisons: Vec<String> = values.iter().map(|v| format!("{subject}{op}{v}")).collect();
            format!("({})", comparisons.join(&format!(" {combinator} ")))
        }
        _ => format!("({subject}{op}{})", render_value(operator, values)),
    }
}
