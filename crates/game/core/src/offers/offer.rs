//! A single level-up candidate.

use std::sync::Arc;

use crate::skills::{Rarity, SkillDefinition, SkillId};

/// One candidate presented at a level-up.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillOffer {
    pub definition: Arc<SkillDefinition>,
    /// 0 when the skill is not owned yet.
    pub current_level: u32,
    pub target_level: u32,
    /// Rarity resolved for this presentation.
    pub rarity: Rarity,
}

impl SkillOffer {
    pub fn new(definition: Arc<SkillDefinition>, current_level: u32, rarity: Rarity) -> Self {
        Self {
            definition,
            current_level,
            target_level: current_level + 1,
            rarity,
        }
    }

    pub fn id(&self) -> &SkillId {
        &self.definition.id
    }

    pub fn is_upgrade(&self) -> bool {
        self.current_level > 0
    }
}
