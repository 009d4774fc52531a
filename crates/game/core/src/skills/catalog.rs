//! Validated set of skill definitions.

use std::collections::HashMap;
use std::sync::Arc;

use super::{SkillDefinition, SkillId};
use crate::error::ValidationError;

/// Every skill a run can grant, keyed by id and kept in authored order.
///
/// Definitions are shared (`Arc`) with the instances and offers that
/// reference them.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    definitions: Vec<Arc<SkillDefinition>>,
    index: HashMap<SkillId, usize>,
}

impl SkillCatalog {
    /// Builds a catalog, rejecting invalid or duplicate definitions.
    pub fn new(
        definitions: impl IntoIterator<Item = SkillDefinition>,
    ) -> Result<Self, ValidationError> {
        let mut catalog = Self::default();
        for definition in definitions {
            definition.validate()?;
            if catalog.index.contains_key(&definition.id) {
                return Err(ValidationError::DuplicateSkill { id: definition.id });
            }
            catalog
                .index
                .insert(definition.id.clone(), catalog.definitions.len());
            catalog.definitions.push(Arc::new(definition));
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &SkillId) -> Option<&Arc<SkillDefinition>> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, id: &SkillId) -> bool {
        self.index.contains_key(id)
    }

    /// Definitions in authored order.
    pub fn definitions(&self) -> &[Arc<SkillDefinition>] {
        &self.definitions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SkillDefinition>> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
