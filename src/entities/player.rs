use crate::entities::costume::DEFAULT_SCALE;
use crate::scripting::hooks::PlayerHandle;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapKind {
    #[default]
    World,
    Battleground,
    Arena,
}

impl MapKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "world" | "w" => Some(MapKind::World),
            "battleground" | "bg" => Some(MapKind::Battleground),
            "arena" => Some(MapKind::Arena),
            _ => None,
        }
    }
}

/// An online player as kept by the in-memory roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub native_display_id: u32,
    pub display_id: u32,
    pub scale: f32,
    pub in_combat: bool,
    pub map: MapKind,
    pub notifications: Vec<String>,
    pub cast_spells: Vec<u32>,
    pub sounds: Vec<u32>,
}

impl Player {
    pub fn new(id: PlayerId, native_display_id: u32) -> Self {
        Self {
            id,
            native_display_id,
            display_id: native_display_id,
            scale: DEFAULT_SCALE,
            in_combat: false,
            map: MapKind::World,
            notifications: Vec::new(),
            cast_spells: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Map loads drop any display override on the client.
    pub fn restore_display_after_load(&mut self) {
        self.display_id = self.native_display_id;
    }

    pub fn is_morphed(&self) -> bool {
        self.display_id != self.native_display_id
    }
}

impl PlayerHandle for Player {
    fn display_id(&self) -> u32 {
        self.display_id
    }

    fn set_display_id(&mut self, display_id: u32) {
        self.display_id = display_id;
    }

    fn restore_native_display(&mut self) {
        self.display_id = self.native_display_id;
    }

    fn object_scale(&self) -> f32 {
        self.scale
    }

    fn set_object_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn cast_visual(&mut self, spell_id: u32) {
        self.cast_spells.push(spell_id);
    }

    fn play_distance_sound(&mut self, sound_id: u32) {
        self.sounds.push(sound_id);
    }

    fn in_combat(&self) -> bool {
        self.in_combat
    }

    fn in_battleground(&self) -> bool {
        self.map == MapKind::Battleground
    }

    fn in_arena(&self) -> bool {
        self.map == MapKind::Arena
    }

    fn send_notification(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_kind_parses_aliases() {
        assert_eq!(MapKind::parse("BG"), Some(MapKind::Battleground));
        assert_eq!(MapKind::parse("arena"), Some(MapKind::Arena));
        assert_eq!(MapKind::parse("world"), Some(MapKind::World));
        assert_eq!(MapKind::parse("dungeon"), None);
    }

    #[test]
    fn restoring_native_display_clears_morph() {
        let mut player = Player::new(PlayerId(1), 49);
        player.set_display_id(1000);
        assert!(player.is_morphed());
        player.restore_native_display();
        assert!(!player.is_morphed());
    }

    #[test]
    fn context_queries_follow_map_kind() {
        let mut player = Player::new(PlayerId(1), 49);
        assert!(!player.in_battleground() && !player.in_arena());
        player.map = MapKind::Arena;
        assert!(player.in_arena());
        assert!(!player.in_battleground());
    }
}
