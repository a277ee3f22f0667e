use crate::entities::costume::CostumeDefinition;
use std::sync::Arc;

/// Wait before the display change when the scale has to change first.
pub const SCALE_CHANGE_DELAY_MS: i64 = 2000;
/// Wait after a map change before the costume is put back on.
pub const MAP_CHANGE_REAPPLY_DELAY_MS: i64 = 1000;
/// Morphs with this much time left or less are not re-applied after a map change.
pub const MAP_CHANGE_GUARD_MS: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphPhase {
    Pending,
    Active,
}

/// What the scheduler has to do after advancing a morph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphStep {
    Waiting,
    Apply,
    Expire,
}

/// A live costume on one player.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphState {
    costume: Arc<CostumeDefinition>,
    start_delay: i64,
    duration_left: i64,
    morphed: bool,
    forced: bool,
}

impl MorphState {
    pub fn active(costume: Arc<CostumeDefinition>, duration_ms: i64) -> Self {
        Self {
            costume,
            start_delay: 0,
            duration_left: duration_ms,
            morphed: true,
            forced: false,
        }
    }

    pub fn pending(costume: Arc<CostumeDefinition>, start_delay_ms: i64, duration_ms: i64) -> Self {
        if start_delay_ms <= 0 {
            return Self::active(costume, duration_ms);
        }
        Self {
            costume,
            start_delay: start_delay_ms,
            duration_left: duration_ms,
            morphed: false,
            forced: false,
        }
    }

    pub fn costume(&self) -> &Arc<CostumeDefinition> {
        &self.costume
    }

    pub fn phase(&self) -> MorphPhase {
        if self.morphed {
            MorphPhase::Active
        } else {
            MorphPhase::Pending
        }
    }

    pub fn is_morphed(&self) -> bool {
        self.morphed
    }

    pub fn start_delay(&self) -> i64 {
        self.start_delay
    }

    pub fn duration_left(&self) -> i64 {
        self.duration_left
    }

    /// Pending morphs count down their start delay; the duration only runs
    /// once the costume is on. A forced expiry ends a pending morph without
    /// applying it.
    pub fn advance(&mut self, diff_ms: i64) -> MorphStep {
        if !self.morphed {
            if self.forced {
                return MorphStep::Expire;
            }
            self.start_delay -= diff_ms;
            if self.start_delay <= 0 {
                self.morphed = true;
                return MorphStep::Apply;
            }
            return MorphStep::Waiting;
        }
        self.duration_left -= diff_ms;
        if self.duration_left <= 0 {
            MorphStep::Expire
        } else {
            MorphStep::Waiting
        }
    }

    pub fn force_expire(&mut self) {
        self.forced = true;
        self.duration_left = 0;
    }

    /// The client drops the display on every map load. Returns true when the
    /// morph went back to pending.
    pub fn reapply_after_map_change(&mut self) -> bool {
        if !self.morphed || self.duration_left <= MAP_CHANGE_GUARD_MS {
            return false;
        }
        self.morphed = false;
        self.start_delay = MAP_CHANGE_REAPPLY_DELAY_MS;
        true
    }
}
