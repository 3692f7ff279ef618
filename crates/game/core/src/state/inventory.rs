use super::Item;

/// Ordered item list. Capacity comes from [`GameConfig::inventory_capacity`].
///
/// [`GameConfig::inventory_capacity`]: crate::config::GameConfig::inventory_capacity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn is_full(&self, capacity: usize) -> bool {
        self.items.len() >= capacity
    }

    /// Appends `item`, handing it back when the inventory is full.
    pub fn push(&mut self, item: Item, capacity: usize) -> Result<(), Item> {
        if self.is_full(capacity) {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Puts `item` back at `index` (clamped to the end of the list).
    pub fn insert(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
