//! Typed filter expressions for the provider's search grammar.
//!
//! Callers compose [`Criterion`] and [`UniqueArgCriterion`] leaves into
//! [`Group`]s; the resulting [`Predicate`] renders itself into the query
//! string that the search endpoints expect:
//!
//! ```
//! use mailgrid_core::search::{Criterion, EmailActivitiesFilterField as Field, Group, Value};
//!
//! let filter = Group::all([
//!     Criterion::is(Field::Status, Value::keyword("delivered").unwrap()),
//!     Criterion::greater_than(Field::OpensCount, 0),
//! ]);
//! assert_eq!(
//!     filter.render().unwrap(),
//!     "((status IS delivered) AND (opens_count>0))"
//! );
//! ```
//!
//! Rendering never URL-encodes; the client does that when the string goes
//! into a query parameter.

pub mod criterion;
pub mod field;
pub mod group;
pub mod operator;
pub mod predicate;
pub mod value;

pub use criterion::{Criterion, UniqueArgCriterion};
pub use field::{ContactsFilterField, EmailActivitiesFilterField, FilterField, SupportsUniqueArgs};
pub use group::Group;
pub use operator::{Arity, Combinator, Operator, ValueLayout};
pub use predicate::Predicate;
pub use value::Value;
