use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an item inside an `ItemStore`.
///
/// Positions are stable for the lifetime of the store and double as the
/// scheduler's round order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(usize);

impl ItemId {
    /// Creates a new `ItemId`
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying list position
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_display_and_debug() {
        let id = ItemId::new(7);
        assert_eq!(id.to_string(), "#7");
        assert_eq!(format!("{id:?}"), "ItemId(7)");
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn item_ids_order_by_position() {
        assert!(ItemId::new(1) < ItemId::new(2));
    }
}
