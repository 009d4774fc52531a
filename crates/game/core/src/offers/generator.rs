//! Weighted sampling of level-up offers without replacement.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use super::{RarityWeights, SkillOffer};
use crate::error::ValidationError;
use crate::skills::{OwnedLevels, Rarity, SkillCatalog, SkillDefinition};

struct Candidate {
    definition: Arc<SkillDefinition>,
    current_level: u32,
    rarity: Rarity,
    weight: f32,
}

/// Produces duplicate-free offer batches from a catalog.
#[derive(Clone, Debug, Default)]
pub struct OfferGenerator {
    weights: RarityWeights,
}

impl OfferGenerator {
    pub fn new(weights: RarityWeights) -> Result<Self, ValidationError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &RarityWeights {
        &self.weights
    }

    /// Draws up to `count` distinct offers.
    ///
    /// A definition is eligible when it is offerable and below its max level.
    /// Fewer than `count` offers (possibly none) are returned when the
    /// eligible pool runs out.
    pub fn generate<O, R>(
        &self,
        catalog: &SkillCatalog,
        owned: &O,
        count: usize,
        rng: &mut R,
    ) -> Vec<SkillOffer>
    where
        O: OwnedLevels + ?Sized,
        R: Rng + ?Sized,
    {
        let mut pool: Vec<Candidate> = catalog
            .iter()
            .filter_map(|definition| {
                let current_level = owned.level_of(&definition.id);
                if !definition.offerable || current_level >= definition.max_level {
                    return None;
                }
                let rarity = definition.rarity_for(current_level);
                Some(Candidate {
                    definition: Arc::clone(definition),
                    current_level,
                    rarity,
                    weight: self.weights.candidate_weight(rarity, current_level > 0),
                })
            })
            .collect();

        let mut offers = Vec::with_capacity(count.min(pool.len()));
        while offers.len() < count && !pool.is_empty() {
            let picked = pool.remove(pick_weighted(&pool, rng));
            offers.push(SkillOffer::new(
                picked.definition,
                picked.current_level,
                picked.rarity,
            ));
        }

        debug!(requested = count, offered = offers.len(), "generated offers");
        offers
    }
}

/// Linear cumulative-weight pick. Falls back to the last candidate.
fn pick_weighted<R: Rng + ?Sized>(pool: &[Candidate], rng: &mut R) -> usize {
    let total: f32 = pool.iter().map(|c| c.weight).filter(|w| *w > 0.0).sum();
    let draw = rng.r#gen::<f32>() * total;

    let mut cumulative = 0.0;
    for (index, candidate) in pool.iter().enumerate() {
        if candidate.weight <= 0.0 {
            continue;
        }
        cumulative += candidate.weight;
        if cumulative >= draw {
            return index;
        }
    }

    warn!(total, draw, "weighted pick fell through, using last candidate");
    pool.len() - 1
}
