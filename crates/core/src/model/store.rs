use std::collections::HashMap;

use crate::model::{Item, ItemError, ItemId};

/// Ordered, immutable collection of items with O(1) lookup by question.
///
/// List order is the scheduler's round order and its tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
    by_question: HashMap<String, ItemId>,
}

impl ItemStore {
    /// Builds a store from items in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::DuplicateQuestion` if two items share a question.
    pub fn new(items: Vec<Item>) -> Result<Self, ItemError> {
        let mut by_question = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if by_question
                .insert(item.question().to_owned(), ItemId::new(index))
                .is_some()
            {
                return Err(ItemError::DuplicateQuestion {
                    question: item.question().to_owned(),
                });
            }
        }
        Ok(Self { items, by_question })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    #[must_use]
    pub fn lookup(&self, question: &str) -> Option<ItemId> {
        self.by_question.get(question).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId::new(index), item))
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
