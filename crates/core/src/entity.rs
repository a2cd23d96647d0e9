//! Entity trait: objects with identity that outlives their state.

/// Entity marker + minimal interface.
///
/// Unlike a [`crate::ValueObject`], an entity is the same thing across state
/// changes: an `Account` keeps its identity through every credit and debit.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
