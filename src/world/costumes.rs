//! The costume service: item-use gate, morph state machine and the per-tick
//! scheduler that drives every tracked player.
//!
//! All entry points run on the host's update thread. State changes caused by
//! host events are either applied on the spot (item use, map change) or left
//! for the next [`CostumeService::update`] pass (combat).

use crate::combat::rules::UsageRules;
use crate::config::CostumeConfig;
use crate::entities::costume::{CostumeDefinition, CostumeRow, DEFAULT_SCALE};
use crate::entities::effects::{MorphState, MorphStep, SCALE_CHANGE_DELAY_MS};
use crate::entities::item::{ItemId, ItemTemplate};
use crate::entities::player::PlayerId;
use crate::scripting::hooks::{
    CombatObserver, CostumeHost, CostumeSource, ItemUseGate, MapChangeObserver, PlayerHandle,
    TickObserver, UseDecision, UseRejection, WorldObserver,
};
use crate::world::catalog::CostumeCatalog;
use crate::world::state::CostumeStore;
use crate::world::time::{format_cooldown, Timestamp, IN_MILLISECONDS};
use log::{debug, info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CostumeService {
    config: CostumeConfig,
    rules: UsageRules,
    catalog: CostumeCatalog,
    store: CostumeStore,
}

impl CostumeService {
    pub fn new(config: CostumeConfig) -> Self {
        let rules = UsageRules::from_config(&config);
        Self {
            config,
            rules,
            catalog: CostumeCatalog::new(),
            store: CostumeStore::new(),
        }
    }

    pub fn config(&self) -> &CostumeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CostumeCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &CostumeStore {
        &self.store
    }

    pub fn apply_config(&mut self, config: CostumeConfig) {
        self.rules = UsageRules::from_config(&config);
        self.config = config;
    }

    /// Reloads the catalog from `rows`. A disabled service keeps it empty.
    pub fn load_costumes(&mut self, rows: &[CostumeRow]) -> usize {
        self.catalog.clear();
        if !self.config.enabled {
            return 0;
        }
        self.catalog.load(rows)
    }

    pub fn morph(&self, player: PlayerId) -> Option<&MorphState> {
        self.store.morph(player)
    }

    pub fn is_on_cooldown(&self, player: PlayerId, item_id: ItemId, now: Timestamp) -> bool {
        self.store
            .get(player)
            .map_or(false, |state| state.cooldowns.is_on_cooldown(item_id, now))
    }

    pub fn cooldown_remaining(
        &self,
        player: PlayerId,
        item_id: ItemId,
        now: Timestamp,
    ) -> Option<u64> {
        self.store
            .get(player)
            .and_then(|state| state.cooldowns.remaining_seconds(item_id, now))
    }

    pub fn tracked_players(&self) -> usize {
        self.store.len()
    }

    pub fn request_costume(
        &mut self,
        host: &mut dyn CostumeHost,
        player_id: PlayerId,
        item: &ItemTemplate,
        now: Timestamp,
    ) -> UseDecision {
        if !self.config.enabled || item.spell_id != self.config.spell_id {
            return UseDecision::Pass;
        }
        let Some(costume) = self.catalog.lookup(item.item_id) else {
            return UseDecision::Pass;
        };
        let Some(player) = host.find_player(player_id) else {
            return UseDecision::Pass;
        };

        if let Err(reason) = self.rules.check_use(&*player) {
            debug!(
                "costumes: player {} can't use item {}: {}",
                player_id, item.item_id, reason
            );
            return UseDecision::Rejected(reason);
        }

        if player.display_id() == costume.display_id {
            self.demorph_player(player_id, player);
            return UseDecision::Used;
        }

        if let Some(remaining_seconds) = self.cooldown_remaining(player_id, item.item_id, now) {
            player.send_notification(&format!("Cooldown: {}", format_cooldown(remaining_seconds)));
            debug!(
                "costumes: player {} item {} on cooldown for {}s",
                player_id, item.item_id, remaining_seconds
            );
            return UseDecision::Rejected(UseRejection::Cooldown { remaining_seconds });
        }

        let current_scale = player.object_scale();
        self.demorph_player(player_id, player);

        let delayed = costume.scale_differs(current_scale);
        let start_delay = if delayed { SCALE_CHANGE_DELAY_MS } else { 0 };
        if delayed {
            player.set_object_scale(costume.scale);
        } else {
            self.apply_costume(player, &costume);
        }

        let duration_ms = costume
            .duration_seconds(self.config.duration)
            .saturating_mul(IN_MILLISECONDS);
        let cooldown_ms = costume
            .cooldown_seconds(self.config.cooldown)
            .saturating_add(start_delay / IN_MILLISECONDS)
            .saturating_mul(IN_MILLISECONDS);

        let state = self.store.get_or_create(player_id);
        state.morph = Some(MorphState::pending(
            Arc::clone(&costume),
            start_delay,
            duration_ms,
        ));
        state.cooldowns.set_cooldown(costume.item_id, now, cooldown_ms);
        info!(
            "costumes: player {} uses item {} (display {}, {}ms, start delay {}ms)",
            player_id, costume.item_id, costume.display_id, duration_ms, start_delay
        );
        UseDecision::Used
    }

    /// Drops the player's morph and reverts the visuals. Cooldowns stay.
    pub fn demorph(&mut self, host: &mut dyn CostumeHost, player_id: PlayerId) {
        if self.store.morph(player_id).is_none() {
            return;
        }
        match host.find_player(player_id) {
            Some(player) => self.demorph_player(player_id, player),
            None => {
                self.discard_morph(player_id);
                debug!("costumes: player {} offline, morph discarded", player_id);
            }
        }
    }

    /// Marks the morph for removal on the next update pass.
    pub fn force_expire_on_combat(&mut self, player_id: PlayerId) {
        if !self.config.enabled || self.rules.can_use_in_combat {
            return;
        }
        if let Some(morph) = self.store.morph_mut(player_id) {
            morph.force_expire();
            debug!("costumes: player {} entered combat, morph expires", player_id);
        }
    }

    pub fn on_map_changed(&mut self, host: &mut dyn CostumeHost, player_id: PlayerId) {
        if self.store.morph(player_id).is_none() {
            return;
        }
        let Some(player) = host.find_player(player_id) else {
            return;
        };
        if self.rules.forbids_map(&*player) {
            info!("costumes: player {} entered a restricted map", player_id);
            self.demorph_player(player_id, player);
            return;
        }
        if let Some(morph) = self.store.morph_mut(player_id) {
            if morph.reapply_after_map_change() {
                debug!("costumes: player {} changed map, re-applying", player_id);
            }
        }
    }

    pub fn update(&mut self, host: &mut dyn CostumeHost, diff: u32, now: Timestamp) {
        let diff = i64::from(diff);
        for player_id in self.store.player_ids() {
            let step = self
                .store
                .morph_mut(player_id)
                .map_or(MorphStep::Waiting, |morph| morph.advance(diff));
            match step {
                MorphStep::Apply => {
                    let costume = self
                        .store
                        .morph(player_id)
                        .map(|morph| Arc::clone(morph.costume()));
                    match (costume, host.find_player(player_id)) {
                        (Some(costume), Some(player)) => self.apply_costume(player, &costume),
                        _ => debug!("costumes: player {} offline, apply skipped", player_id),
                    }
                }
                MorphStep::Expire => self.demorph(host, player_id),
                MorphStep::Waiting => {}
            }
            if let Some(state) = self.store.get_mut(player_id) {
                state.cooldowns.sweep(now);
            }
            if self.store.remove_if_empty(player_id) {
                debug!("costumes: player {} no longer tracked", player_id);
            }
        }
    }

    pub fn reload(&mut self, source: &dyn CostumeSource) {
        match source.costume_config() {
            Ok(config) => self.apply_config(config),
            Err(err) => warn!("costumes: {}; keeping previous configuration", err),
        }
        self.catalog.clear();
        if !self.config.enabled {
            info!("costumes: disabled, catalog not loaded");
            return;
        }
        match source.costume_rows() {
            Ok(rows) => {
                let loaded = self.load_costumes(&rows);
                if loaded == 0 {
                    warn!("costumes: costume table is empty");
                } else {
                    info!("costumes: loaded {} costumes", loaded);
                }
            }
            Err(err) => warn!("costumes: {}; catalog left empty", err),
        }
    }

    pub fn shutdown(&mut self) {
        self.catalog.clear();
        self.store.clear();
        info!("costumes: shut down");
    }

    fn apply_costume(&self, player: &mut dyn PlayerHandle, costume: &CostumeDefinition) {
        player.set_display_id(costume.display_id);
        player.set_object_scale(costume.scale);
        player.cast_visual(self.config.visual_spell_id);
        if let Some(sound_id) = costume.sound_id {
            player.play_distance_sound(sound_id);
        }
    }

    fn demorph_player(&mut self, player_id: PlayerId, player: &mut dyn PlayerHandle) {
        if self.discard_morph(player_id).is_none() {
            return;
        }
        player.restore_native_display();
        player.set_object_scale(DEFAULT_SCALE);
        player.cast_visual(self.config.visual_spell_id);
    }

    fn discard_morph(&mut self, player_id: PlayerId) -> Option<MorphState> {
        let morph = self.store.take_morph(player_id)?;
        info!(
            "costumes: player {} demorphed from item {}",
            player_id,
            morph.costume().item_id
        );
        Some(morph)
    }
}

impl ItemUseGate for CostumeService {
    fn can_use_item(
        &mut self,
        host: &mut dyn CostumeHost,
        player: PlayerId,
        item: &ItemTemplate,
        now: Timestamp,
    ) -> UseDecision {
        self.request_costume(host, player, item, now)
    }
}

impl CombatObserver for CostumeService {
    fn on_enter_combat(&mut self, player: PlayerId) {
        self.force_expire_on_combat(player);
    }
}

impl MapChangeObserver for CostumeService {
    fn on_map_changed(&mut self, host: &mut dyn CostumeHost, player: PlayerId) {
        CostumeService::on_map_changed(self, host, player);
    }
}

impl TickObserver for CostumeService {
    fn on_update(&mut self, host: &mut dyn CostumeHost, diff: u32, now: Timestamp) {
        self.update(host, diff, now);
    }
}

impl WorldObserver for CostumeService {
    fn on_startup(&mut self, source: &dyn CostumeSource) {
        self.reload(source);
    }

    fn on_shutdown(&mut self) {
        self.shutdown();
    }

    fn on_config_load(&mut self, source: &dyn CostumeSource, reload: bool) {
        if reload {
            info!("costumes: reloading configuration");
        }
        self.reload(source);
    }
}
