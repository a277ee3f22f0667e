use crate::entities::item::ItemId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALE: f32 = 1.0;

/// Scales closer than this are treated as equal.
pub const SCALE_EPSILON: f32 = 0.00001;

/// One row of the costume table, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostumeRow {
    pub item_entry: u32,
    pub display_id: u32,
    #[serde(default)]
    pub sound_id: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_duration")]
    pub duration: i32,
    #[serde(default = "default_cooldown")]
    pub cooldown: i64,
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

fn default_duration() -> i32 {
    -1
}

fn default_cooldown() -> i64 {
    -1
}

impl CostumeRow {
    pub fn new(item_entry: u32, display_id: u32) -> Self {
        Self {
            item_entry,
            display_id,
            sound_id: 0,
            scale: DEFAULT_SCALE,
            duration: -1,
            cooldown: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostumeDefinition {
    pub item_id: ItemId,
    pub display_id: u32,
    pub sound_id: Option<u32>,
    pub scale: f32,
    /// Seconds; negative means the configured default.
    pub duration: i32,
    /// Seconds; negative means the configured default.
    pub cooldown: i64,
}

impl CostumeDefinition {
    pub fn from_row(row: &CostumeRow) -> Option<Self> {
        if !row.scale.is_finite() || row.scale <= 0.0 {
            return None;
        }
        Some(Self {
            item_id: ItemId(row.item_entry),
            display_id: row.display_id,
            sound_id: (row.sound_id != 0).then_some(row.sound_id),
            scale: row.scale,
            duration: row.duration,
            cooldown: row.cooldown,
        })
    }

    pub fn duration_seconds(&self, default_seconds: i32) -> i64 {
        if self.duration < 0 {
            i64::from(default_seconds.max(0))
        } else {
            i64::from(self.duration)
        }
    }

    pub fn cooldown_seconds(&self, default_seconds: i64) -> i64 {
        if self.cooldown < 0 {
            default_seconds.max(0)
        } else {
            self.cooldown
        }
    }

    pub fn scale_differs(&self, current: f32) -> bool {
        (current - self.scale).abs() > SCALE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sound_means_no_cue() {
        let costume = CostumeDefinition::from_row(&CostumeRow::new(5, 100)).unwrap();
        assert_eq!(costume.sound_id, None);
        let row = CostumeRow {
            sound_id: 42,
            ..CostumeRow::new(5, 100)
        };
        assert_eq!(CostumeDefinition::from_row(&row).unwrap().sound_id, Some(42));
    }

    #[test]
    fn rejects_unusable_scale() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let row = CostumeRow {
                scale,
                ..CostumeRow::new(5, 100)
            };
            assert!(CostumeDefinition::from_row(&row).is_none(), "scale={}", scale);
        }
    }

    #[test]
    fn negative_overrides_fall_back_to_defaults() {
        let mut costume = CostumeDefinition::from_row(&CostumeRow::new(5, 100)).unwrap();
        assert_eq!(costume.duration_seconds(60), 60);
        assert_eq!(costume.cooldown_seconds(240), 240);
        costume.duration = 0;
        costume.cooldown = 15;
        assert_eq!(costume.duration_seconds(60), 0);
        assert_eq!(costume.cooldown_seconds(240), 15);
    }

    #[test]
    fn scale_comparison_uses_epsilon() {
        let costume = CostumeDefinition::from_row(&CostumeRow::new(5, 100)).unwrap();
        assert!(!costume.scale_differs(1.000_001));
        assert!(costume.scale_differs(1.1));
    }
}
