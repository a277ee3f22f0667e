use crate::entities::costume::{CostumeDefinition, CostumeRow};
use crate::entities::item::ItemId;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// Costume definitions keyed by the item that triggers them.
#[derive(Debug, Clone, Default)]
pub struct CostumeCatalog {
    costumes: HashMap<ItemId, Arc<CostumeDefinition>>,
}

impl CostumeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole catalog. Later rows win over earlier rows with the
    /// same item entry. Returns the number of costumes loaded.
    pub fn load<'a, I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = &'a CostumeRow>,
    {
        let mut costumes = HashMap::new();
        for row in rows {
            match CostumeDefinition::from_row(row) {
                Some(costume) => {
                    costumes.insert(costume.item_id, Arc::new(costume));
                }
                None => warn!(
                    "costumes: skipping item {} with unusable scale {}",
                    row.item_entry, row.scale
                ),
            }
        }
        self.costumes = costumes;
        self.costumes.len()
    }

    pub fn lookup(&self, item_id: ItemId) -> Option<Arc<CostumeDefinition>> {
        self.costumes.get(&item_id).cloned()
    }

    pub fn clear(&mut self) {
        self.costumes.clear();
    }

    pub fn len(&self) -> usize {
        self.costumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costumes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_rows_keep_the_last() {
        let mut catalog = CostumeCatalog::new();
        let rows = vec![CostumeRow::new(5, 100), CostumeRow::new(5, 200)];
        assert_eq!(catalog.load(&rows), 1);
        assert_eq!(catalog.lookup(ItemId(5)).unwrap().display_id, 200);
    }

    #[test]
    fn load_replaces_previous_entries() {
        let mut catalog = CostumeCatalog::new();
        catalog.load(&vec![CostumeRow::new(5, 100)]);
        catalog.load(&vec![CostumeRow::new(6, 101)]);
        assert!(catalog.lookup(ItemId(5)).is_none());
        assert!(catalog.lookup(ItemId(6)).is_some());
    }

    #[test]
    fn invalid_duplicate_does_not_replace_valid_row() {
        let mut catalog = CostumeCatalog::new();
        let rows = vec![
            CostumeRow::new(5, 100),
            CostumeRow {
                scale: 0.0,
                ..CostumeRow::new(5, 200)
            },
        ];
        assert_eq!(catalog.load(&rows), 1);
        assert_eq!(catalog.lookup(ItemId(5)).unwrap().display_id, 100);
    }

    #[test]
    fn unknown_items_are_not_costumes() {
        let mut catalog = CostumeCatalog::new();
        assert_eq!(catalog.load(&Vec::new()), 0);
        assert!(catalog.is_empty());
        assert!(catalog.lookup(ItemId(1)).is_none());
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let mut catalog = CostumeCatalog::new();
        let bad = CostumeRow {
            scale: 0.0,
            ..CostumeRow::new(7, 102)
        };
        assert_eq!(catalog.load(&vec![CostumeRow::new(5, 100), bad]), 1);
        assert!(catalog.lookup(ItemId(7)).is_none());
    }

    #[test]
    fn clear_empties_catalog() {
        let mut catalog = CostumeCatalog::new();
        catalog.load(&vec![CostumeRow::new(5, 100)]);
        catalog.clear();
        assert_eq!(catalog.len(), 0);
    }
}
