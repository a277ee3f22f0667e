pub const IN_MILLISECONDS: i64 = 1000;

/// Monotonic server time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn after_millis(self, millis: i64) -> Self {
        if millis <= 0 {
            return self;
        }
        Timestamp(self.0.saturating_add(millis as u64))
    }

    pub fn millis_until(self, later: Timestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameClock {
    now: Timestamp,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn advance(&mut self, diff_ms: u32) -> Timestamp {
        self.now.0 = self.now.0.saturating_add(u64::from(diff_ms));
        self.now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    ready_at: Timestamp,
}

impl Cooldown {
    pub fn new(ready_at: Timestamp) -> Self {
        Self { ready_at }
    }

    pub fn from_millis_from(now: Timestamp, millis: i64) -> Self {
        Self {
            ready_at: now.after_millis(millis),
        }
    }

    pub fn ready_at(&self) -> Timestamp {
        self.ready_at
    }

    pub fn is_ready(&self, now: Timestamp) -> bool {
        now >= self.ready_at
    }

    pub fn remaining_millis(&self, now: Timestamp) -> u64 {
        now.millis_until(self.ready_at)
    }

    /// Whole seconds left, rounded up so a running cooldown never reports 0.
    pub fn remaining_seconds(&self, now: Timestamp) -> u64 {
        let millis = self.remaining_millis(now);
        (millis + 999) / 1000
    }
}

/// Formats a remaining cooldown as `HH:MM:SS`, `MM:SS` or `SSs`,
/// dropping leading units that are zero.
pub fn format_cooldown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{:02}:{:02}", minutes, seconds)
    } else {
        format!("{:02}s", seconds)
    }
}
