//! Host configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings of one headless wave run.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory holding `skills.ron`, `rarity.ron`, `stats.ron` and `config.toml`.
    pub data_dir: PathBuf,
    /// Name of the base stat preset in `stats.ron`.
    pub difficulty: String,
    pub duration_secs: f32,
    /// Simulation frames per second.
    pub tick_rate: u32,
    pub seed: u64,
    /// Enemies in the first wave. Later waves grow from this.
    pub enemies_per_wave: u32,
    pub starting_skill: String,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WAVE_DATA_DIR` - Content directory (default: `data`)
    /// - `WAVE_DIFFICULTY` - Stat preset name (default: `normal`)
    /// - `WAVE_DURATION_SECS` - Simulated seconds (default: 120)
    /// - `WAVE_TICK_RATE` - Frames per second (default: 30)
    /// - `WAVE_SEED` - RNG seed for spawns and offers (default: 7)
    /// - `WAVE_ENEMIES` - Enemies in the first wave (default: 6)
    /// - `WAVE_STARTING_SKILL` - Skill granted at start (default: `arc_volley`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("WAVE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(difficulty) = env::var("WAVE_DIFFICULTY") {
            config.difficulty = difficulty;
        }
        if let Some(secs) = read_env::<f32>("WAVE_DURATION_SECS") {
            config.duration_secs = secs.max(0.0);
        }
        if let Some(rate) = read_env::<u32>("WAVE_TICK_RATE") {
            config.tick_rate = rate.max(1);
        }
        if let Some(seed) = read_env::<u64>("WAVE_SEED") {
            config.seed = seed;
        }
        if let Some(enemies) = read_env::<u32>("WAVE_ENEMIES") {
            config.enemies_per_wave = enemies.max(1);
        }
        if let Ok(skill) = env::var("WAVE_STARTING_SKILL") {
            config.starting_skill = skill;
        }

        config
    }

    /// Seconds per frame.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            difficulty: "normal".to_string(),
            duration_secs: 120.0,
            tick_rate: 30,
            seed: 7,
            enemies_per_wave: 6,
            starting_skill: "arc_volley".to_string(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_follows_tick_rate() {
        let config = RuntimeConfig {
            tick_rate: 20,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.dt(), 0.05);
    }
}
