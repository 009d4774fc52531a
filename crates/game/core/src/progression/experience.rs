//! Experience accumulation and the per-level requirement curve.

/// Experience required per player level: `base * growth^(level - 1)`, rounded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelCurve {
    pub base: u32,
    pub growth: f32,
}

impl LevelCurve {
    pub const DEFAULT_BASE: u32 = 10;
    pub const DEFAULT_GROWTH: f32 = 1.25;

    /// Experience needed to advance from `level` to `level + 1`. Never 0.
    pub fn required_for(&self, level: u32) -> u32 {
        let exponent = level.saturating_sub(1) as i32;
        let required = self.base as f32 * self.growth.powi(exponent);
        (required.round() as u32).max(1)
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            growth: Self::DEFAULT_GROWTH,
        }
    }
}

/// Player level, progress into it, and level-ups waiting for a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Experience {
    level: u32,
    progress: u32,
    pending: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            level: 1,
            progress: 0,
            pending: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated toward the next level.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Adds experience and returns how many levels were gained.
    ///
    /// Each level gained queues one pending level-up, up to `max_pending`.
    pub fn gain(&mut self, amount: u32, curve: &LevelCurve, max_pending: u32) -> u32 {
        self.progress = self.progress.saturating_add(amount);

        let mut gained = 0;
        loop {
            let required = curve.required_for(self.level);
            if self.progress < required {
                break;
            }
            self.progress -= required;
            self.level += 1;
            gained += 1;
            self.pending = (self.pending + 1).min(max_pending);
        }
        gained
    }

    /// Consumes one pending level-up.
    pub fn take_pending(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_grows_geometrically() {
        let curve = LevelCurve {
            base: 10,
            growth: 1.5,
        };
        assert_eq!(curve.required_for(1), 10);
        assert_eq!(curve.required_for(2), 15);
        assert_eq!(curve.required_for(3), 23);
        assert_eq!(curve.required_for(0), 10);
    }

    #[test]
    fn large_gain_crosses_several_levels() {
        let curve = LevelCurve {
            base: 10,
            growth: 1.0,
        };
        let mut xp = Experience::new();
        assert_eq!(xp.gain(35, &curve, 16), 3);
        assert_eq!(xp.level(), 4);
        assert_eq!(xp.progress(), 5);
        assert_eq!(xp.pending(), 3);
    }

    #[test]
    fn pending_is_capped() {
        let curve = LevelCurve {
            base: 1,
            growth: 1.0,
        };
        let mut xp = Experience::new();
        xp.gain(10, &curve, 2);
        assert_eq!(xp.level(), 11);
        assert_eq!(xp.pending(), 2);

        assert!(xp.take_pending());
        assert!(xp.take_pending());
        assert!(!xp.take_pending());
    }
}
