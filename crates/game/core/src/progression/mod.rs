//! Player experience and the level-up selection loop.

pub mod events;
pub mod experience;
pub mod selection;

pub use events::{EventQueue, ProgressionEvent};
pub use experience::{Experience, LevelCurve};
pub use selection::{LevelUpFlow, apply_offer, revoke_skill, sync_passives};
