use crate::admin::commands::{parse_admin_command, AdminCommand};
use crate::entities::item::ItemTemplate;
use crate::entities::player::{Player, PlayerId};
use crate::scripting::hooks::{
    CombatObserver, CostumeSource, ItemUseGate, MapChangeObserver, TickObserver, WorldObserver,
};
use crate::world::costumes::CostumeService;
use crate::world::roster::PlayerRoster;
use crate::world::time::GameClock;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    Running,
    Stopped,
}

/// Replays admin commands against an in-memory world.
pub struct Console<S: CostumeSource> {
    pub service: CostumeService,
    pub roster: PlayerRoster,
    pub clock: GameClock,
    source: S,
    state: ConsoleState,
}

impl<S: CostumeSource> Console<S> {
    pub fn start(source: S) -> Self {
        let mut service = CostumeService::default();
        service.on_startup(&source);
        Self {
            service,
            roster: PlayerRoster::new(),
            clock: GameClock::new(),
            source,
            state: ConsoleState::Running,
        }
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    /// Runs one script line and returns what should be echoed.
    pub fn execute_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Vec::new();
        }
        match parse_admin_command(trimmed) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => vec![format!("not a command: {}", trimmed)],
            Err(err) => {
                warn!("costumes: {}", err);
                vec![format!("error: {}", err)]
            }
        }
    }

    pub fn execute(&mut self, command: AdminCommand) -> Vec<String> {
        if self.state == ConsoleState::Stopped {
            return vec!["console stopped".to_string()];
        }
        let now = self.clock.now();
        match command {
            AdminCommand::Login {
                player,
                display_id,
                scale,
            } => {
                self.roster
                    .login(Player::new(player, display_id).with_scale(scale));
                vec![format!("player {} online", player)]
            }
            AdminCommand::Logout { player } => match self.roster.logout(player) {
                Some(_) => vec![format!("player {} offline", player)],
                None => vec![format!("player {} not online", player)],
            },
            AdminCommand::Use {
                player,
                item,
                spell,
            } => {
                let spell = spell.unwrap_or(self.service.config().spell_id);
                let item = ItemTemplate::new(item, spell);
                let decision = self
                    .service
                    .can_use_item(&mut self.roster, player, &item, now);
                let mut lines = vec![format!(
                    "player {} item {}: {:?}",
                    player, item.item_id, decision
                )];
                if !decision.allows_use() {
                    lines.push(format!("player {} item {} blocked", player, item.item_id));
                }
                lines
            }
            AdminCommand::Combat { player, engaged } => {
                let Some(target) = self.roster.get_mut(player) else {
                    return vec![format!("player {} not online", player)];
                };
                target.in_combat = engaged;
                if engaged {
                    self.service.on_enter_combat(player);
                }
                vec![format!("player {} combat {}", player, engaged)]
            }
            AdminCommand::Map { player, map } => {
                let Some(target) = self.roster.get_mut(player) else {
                    return vec![format!("player {} not online", player)];
                };
                target.map = map;
                target.restore_display_after_load();
                MapChangeObserver::on_map_changed(&mut self.service, &mut self.roster, player);
                vec![format!("player {} map {:?}", player, map)]
            }
            AdminCommand::Tick { diff } => {
                let now = self.clock.advance(diff);
                self.service.on_update(&mut self.roster, diff, now);
                vec![format!("t={}ms", now.0)]
            }
            AdminCommand::Reload => {
                self.service.on_config_load(&self.source, true);
                vec![format!(
                    "reloaded: {} costumes",
                    self.service.catalog().len()
                )]
            }
            AdminCommand::Status => self.status_lines(),
            AdminCommand::Shutdown => {
                self.service.on_shutdown();
                self.state = ConsoleState::Stopped;
                vec!["shutdown".to_string()]
            }
            AdminCommand::Unknown(name) => vec![format!("unknown command: {}", name)],
        }
    }

    pub fn status_lines(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut lines = vec![format!(
            "t={}ms costumes={} tracked={}",
            now.0,
            self.service.catalog().len(),
            self.service.tracked_players()
        )];
        let mut ids: Vec<PlayerId> = self.service.store().player_ids();
        ids.sort();
        for id in ids {
            let Some(state) = self.service.store().get(id) else {
                continue;
            };
            let morph = match state.morph.as_ref() {
                Some(morph) => format!(
                    "item {} {:?} delay={}ms left={}ms",
                    morph.costume().item_id,
                    morph.phase(),
                    morph.start_delay().max(0),
                    morph.duration_left().max(0)
                ),
                None => "none".to_string(),
            };
            let mut cooldowns: Vec<String> = state
                .cooldowns
                .iter()
                .map(|(item_id, cooldown)| {
                    format!("{}:{}s", item_id, cooldown.remaining_seconds(now))
                })
                .collect();
            cooldowns.sort();
            lines.push(format!(
                "player {} morph={} cooldowns=[{}]",
                id,
                morph,
                cooldowns.join(", ")
            ));
        }
        for player in self.roster.players() {
            lines.push(format!(
                "online {} display={} scale={} morphed={}",
                player.id,
                player.display_id,
                player.scale,
                player.is_morphed()
            ));
        }
        lines
    }
}
