//! Notifications emitted by the level-up flow, buffered until the host drains them.

use std::collections::VecDeque;

use crate::skills::SkillId;

/// Progression notifications for the host to drain once per frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressionEvent {
    /// The player reached `level`.
    LeveledUp { level: u32 },

    /// A selection started; the host should pause and present these skills.
    OffersPresented { skills: Vec<SkillId> },

    /// A pending level-up had no eligible offers and was consumed.
    NothingToOffer { level: u32 },

    /// The player chose the offer at `choice`.
    SelectionCompleted { skill: SkillId, choice: usize },

    SkillAcquired { skill: SkillId },

    SkillUpgraded { skill: SkillId, level: u32 },
}

/// Bounded FIFO of progression events. The oldest event is dropped when full.
#[derive(Clone, Debug)]
pub struct EventQueue {
    events: VecDeque<ProgressionEvent>,
    capacity: usize,
}

impl EventQueue {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, event: ProgressionEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Removes and yields every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = ProgressionEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgressionEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
