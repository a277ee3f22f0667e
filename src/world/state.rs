use crate::entities::effects::MorphState;
use crate::entities::player::PlayerId;
use crate::world::cooldowns::CooldownTracker;
use std::collections::HashMap;

/// Costume bookkeeping for one player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerCostumeState {
    pub morph: Option<MorphState>,
    pub cooldowns: CooldownTracker,
}

impl PlayerCostumeState {
    pub fn is_empty(&self) -> bool {
        self.morph.is_none() && self.cooldowns.is_empty()
    }
}

/// Owns every tracked player's costume state. Records are created on first
/// use and removed as soon as they hold neither a morph nor a cooldown.
#[derive(Debug, Clone, Default)]
pub struct CostumeStore {
    players: HashMap<PlayerId, PlayerCostumeState>,
}

impl CostumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerCostumeState> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerCostumeState> {
        self.players.get_mut(&id)
    }

    pub fn get_or_create(&mut self, id: PlayerId) -> &mut PlayerCostumeState {
        self.players.entry(id).or_default()
    }

    pub fn morph(&self, id: PlayerId) -> Option<&MorphState> {
        self.players.get(&id).and_then(|state| state.morph.as_ref())
    }

    pub fn morph_mut(&mut self, id: PlayerId) -> Option<&mut MorphState> {
        self.players
            .get_mut(&id)
            .and_then(|state| state.morph.as_mut())
    }

    pub fn take_morph(&mut self, id: PlayerId) -> Option<MorphState> {
        self.players.get_mut(&id).and_then(|state| state.morph.take())
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    /// Removes the record if it no longer holds anything.
    pub fn remove_if_empty(&mut self, id: PlayerId) -> bool {
        if self.players.get(&id).map_or(false, PlayerCostumeState::is_empty) {
            self.players.remove(&id);
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::costume::{CostumeDefinition, CostumeRow};
    use crate::entities::item::ItemId;
    use crate::world::time::Timestamp;
    use std::sync::Arc;

    #[test]
    fn records_are_created_lazily() {
        let mut store = CostumeStore::new();
        assert!(store.get(PlayerId(1)).is_none());
        store.get_or_create(PlayerId(1));
        assert_eq!(store.len(), 1);
        assert!(store.remove_if_empty(PlayerId(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn non_empty_records_are_kept() {
        let mut store = CostumeStore::new();
        store
            .get_or_create(PlayerId(1))
            .cooldowns
            .set_cooldown(ItemId(5), Timestamp(0), 1000);
        assert!(!store.remove_if_empty(PlayerId(1)));

        let costume = Arc::new(CostumeDefinition::from_row(&CostumeRow::new(5, 100)).unwrap());
        store.get_or_create(PlayerId(2)).morph = Some(MorphState::active(costume, 1000));
        assert!(!store.remove_if_empty(PlayerId(2)));
        assert!(store.take_morph(PlayerId(2)).is_some());
        assert!(store.remove_if_empty(PlayerId(2)));
        assert_eq!(store.player_ids(), vec![PlayerId(1)]);
    }
}
