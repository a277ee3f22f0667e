use crate::entities::player::{Player, PlayerId};
use crate::scripting::hooks::{CostumeHost, PlayerHandle};
use std::collections::BTreeMap;

/// Online players kept in memory.
#[derive(Debug, Clone, Default)]
pub struct PlayerRoster {
    players: BTreeMap<PlayerId, Player>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn logout(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl CostumeHost for PlayerRoster {
    fn find_player(&mut self, id: PlayerId) -> Option<&mut dyn PlayerHandle> {
        self.players
            .get_mut(&id)
            .map(|player| player as &mut dyn PlayerHandle)
    }
}
