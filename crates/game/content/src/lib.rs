//! Authored progression content and its loaders.
//!
//! This crate turns RON/TOML data files into validated core values:
//! - Skill catalog (data-driven via RON)
//! - Rarity weights for level-up offers (data-driven via RON)
//! - Base stat presets per difficulty (data-driven via RON)
//! - Progression configuration (data-driven via TOML)
//!
//! Every loader runs the core validation after parsing, so content that
//! reaches the simulation is known to satisfy its authoring invariants.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, LoadResult, RarityLoader, StatPresetLoader,
    StatPresets,
};
