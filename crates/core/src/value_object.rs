//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two value
/// objects with the same attribute values are the same value. To "modify" one,
/// construct a new instance. `Money` is the canonical example here: adding two
/// amounts yields a third, the operands are untouched.
///
/// The bounds keep implementations cheap to copy, comparable, and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
