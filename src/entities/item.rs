use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The part of an item template the costume gate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    pub item_id: ItemId,
    /// First on-use spell of the item.
    pub spell_id: u32,
}

impl ItemTemplate {
    pub fn new(item_id: u32, spell_id: u32) -> Self {
        Self {
            item_id: ItemId(item_id),
            spell_id,
        }
    }
}
