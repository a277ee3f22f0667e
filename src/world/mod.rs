pub mod catalog;
pub mod cooldowns;
pub mod costumes;
pub mod roster;
pub mod state;
pub mod time;
