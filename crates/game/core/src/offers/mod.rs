//! Level-up offers: rarity weights and the weighted generator.
//!
//! [`OfferGenerator::generate`] is called once per level-up. Its result is
//! handed to the player for a choice and the chosen [`SkillOffer`] is fed
//! back into the scheduler and stat engine by
//! [`apply_offer`](crate::progression::apply_offer).

pub mod generator;
pub mod offer;
pub mod weights;

pub use generator::OfferGenerator;
pub use offer::SkillOffer;
pub use weights::RarityWeights;
