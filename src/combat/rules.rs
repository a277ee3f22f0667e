use crate::config::CostumeConfig;
use crate::scripting::hooks::{PlayerHandle, UseRejection};

/// Where a costume may be used or worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRules {
    pub can_use_in_combat: bool,
    pub can_use_in_battleground: bool,
    pub can_use_in_arena: bool,
}

impl Default for UsageRules {
    fn default() -> Self {
        Self {
            can_use_in_combat: false,
            can_use_in_battleground: false,
            can_use_in_arena: false,
        }
    }
}

impl UsageRules {
    pub fn from_config(config: &CostumeConfig) -> Self {
        Self {
            can_use_in_combat: config.can_use_in_combat,
            can_use_in_battleground: config.can_use_in_battleground,
            can_use_in_arena: config.can_use_in_arena,
        }
    }

    pub fn check_use(&self, player: &dyn PlayerHandle) -> Result<(), UseRejection> {
        if !self.can_use_in_combat && player.in_combat() {
            return Err(UseRejection::InCombat);
        }
        if !self.can_use_in_battleground && player.in_battleground() {
            return Err(UseRejection::InBattleground);
        }
        if !self.can_use_in_arena && player.in_arena() {
            return Err(UseRejection::InArena);
        }
        Ok(())
    }

    /// True when the player's current map does not allow wearing a costume.
    pub fn forbids_map(&self, player: &dyn PlayerHandle) -> bool {
        (!self.can_use_in_battleground && player.in_battleground())
            || (!self.can_use_in_arena && player.in_arena())
    }
}
