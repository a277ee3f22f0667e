use crate::entities::item::ItemId;
use crate::world::time::{Cooldown, Timestamp};
use std::collections::HashMap;

/// Per-costume cooldowns of a single player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooldownTracker {
    cooldowns: HashMap<ItemId, Cooldown>,
}

impl CooldownTracker {
    pub fn is_on_cooldown(&self, item_id: ItemId, now: Timestamp) -> bool {
        self.cooldowns
            .get(&item_id)
            .map_or(false, |cooldown| !cooldown.is_ready(now))
    }

    pub fn set_cooldown(&mut self, item_id: ItemId, now: Timestamp, duration_ms: i64) {
        self.cooldowns
            .insert(item_id, Cooldown::from_millis_from(now, duration_ms));
    }

    pub fn remaining_seconds(&self, item_id: ItemId, now: Timestamp) -> Option<u64> {
        self.cooldowns
            .get(&item_id)
            .filter(|cooldown| !cooldown.is_ready(now))
            .map(|cooldown| cooldown.remaining_seconds(now))
    }

    /// Drops every cooldown that is over. Returns true if anything was removed.
    pub fn sweep(&mut self, now: Timestamp) -> bool {
        let before = self.cooldowns.len();
        self.cooldowns.retain(|_, cooldown| !cooldown.is_ready(now));
        self.cooldowns.len() != before
    }

    pub fn len(&self) -> usize {
        self.cooldowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cooldowns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Cooldown)> + '_ {
        self.cooldowns.iter().map(|(item_id, cooldown)| (*item_id, *cooldown))
    }
}
