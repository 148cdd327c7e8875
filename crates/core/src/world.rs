//! Real-time gameplay on top of a generated dungeon.

pub mod collision;
pub mod enemy;
pub mod item;
pub mod player;
pub mod run;

pub use collision::Rect;
pub use enemy::{Enemy, EnemyState, EnemyStats};
pub use item::Item;
pub use player::{Player, PlayerInput};
pub use run::{Run, RunEvent};
