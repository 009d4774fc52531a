//! Headless reference host for `progression-core`.
//!
//! The runtime owns the pieces a game would own: an arena of enemies, the
//! player's skill scheduler and level-up flow, and the per-frame loop that
//! drives them in a fixed order. It is used by the `wave-sim` binary and by
//! integration tests.
pub mod config;
pub mod error;
pub mod payloads;
pub mod sim;
pub mod world;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use payloads::demo_payloads;
pub use sim::{SimContent, SimReport, WaveSim};
pub use world::{Arena, Enemy, EnemyId, Player, Vitals};
