//! Seams between the costume service and the game server that hosts it.
//!
//! The host drives the service through the observer traits and hands it a
//! [`CostumeHost`] to reach players. Nothing here keeps a player reference
//! across calls; players are looked up by id every time.

use crate::config::{ConfigError, CostumeConfig};
use crate::entities::costume::CostumeRow;
use crate::entities::item::ItemTemplate;
use crate::entities::player::PlayerId;
use crate::persistence::costume_table::CatalogError;
use crate::world::time::Timestamp;
use std::fmt;

pub trait PlayerHandle {
    fn display_id(&self) -> u32;
    fn set_display_id(&mut self, display_id: u32);
    fn restore_native_display(&mut self);
    fn object_scale(&self) -> f32;
    fn set_object_scale(&mut self, scale: f32);
    fn cast_visual(&mut self, spell_id: u32);
    fn play_distance_sound(&mut self, sound_id: u32);
    fn in_combat(&self) -> bool;
    fn in_battleground(&self) -> bool;
    fn in_arena(&self) -> bool;
    fn send_notification(&mut self, message: &str);
}

pub trait CostumeHost {
    /// `None` when the player is no longer online.
    fn find_player(&mut self, id: PlayerId) -> Option<&mut dyn PlayerHandle>;
}

/// Where configuration and the costume table come from on startup and reload.
pub trait CostumeSource {
    fn costume_config(&self) -> Result<CostumeConfig, ConfigError>;
    fn costume_rows(&self) -> Result<Vec<CostumeRow>, CatalogError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseRejection {
    InCombat,
    InBattleground,
    InArena,
    Cooldown { remaining_seconds: u64 },
}

impl fmt::Display for UseRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UseRejection::InCombat => write!(f, "can't do that while in combat"),
            UseRejection::InBattleground => write!(f, "can't do that in a battleground"),
            UseRejection::InArena => write!(f, "can't do that in an arena"),
            UseRejection::Cooldown { remaining_seconds } => {
                write!(f, "cooldown active for {}s", remaining_seconds)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseDecision {
    /// Not a costume use; the host handles the item as usual.
    Pass,
    /// The costume service consumed the use.
    Used,
    Rejected(UseRejection),
}

impl UseDecision {
    pub fn allows_use(self) -> bool {
        !matches!(self, UseDecision::Rejected(_))
    }
}

pub trait ItemUseGate {
    fn can_use_item(
        &mut self,
        host: &mut dyn CostumeHost,
        player: PlayerId,
        item: &ItemTemplate,
        now: Timestamp,
    ) -> UseDecision;
}

pub trait CombatObserver {
    fn on_enter_combat(&mut self, player: PlayerId);
}

pub trait MapChangeObserver {
    fn on_map_changed(&mut self, host: &mut dyn CostumeHost, player: PlayerId);
}

pub trait TickObserver {
    fn on_update(&mut self, host: &mut dyn CostumeHost, diff: u32, now: Timestamp);
}

pub trait WorldObserver {
    fn on_startup(&mut self, source: &dyn CostumeSource);
    fn on_shutdown(&mut self);
    fn on_config_load(&mut self, source: &dyn CostumeSource, reload: bool);
}
