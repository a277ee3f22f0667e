pub mod costume;
pub mod effects;
pub mod item;
pub mod player;
