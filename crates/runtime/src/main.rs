//! Headless wave-survival simulation.
//!
//! Loads content from `WAVE_DATA_DIR`, runs the progression rules against
//! spawning waves and prints a summary.
//!
//! ```bash
//! WAVE_DIFFICULTY=hard WAVE_SEED=3 RUST_LOG=debug cargo run -p progression-runtime
//! ```

use anyhow::Result;
use progression_runtime::{RuntimeConfig, SimContent, WaveSim};
use tracing::info;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        difficulty = %config.difficulty,
        seed = config.seed,
        "starting wave simulation"
    );

    let content = SimContent::load(&config)?;
    let mut sim = WaveSim::new(content, &config)?;
    let report = sim.run(config.duration_secs, config.dt());

    println!(
        "{} after {:.1}s: wave {}, {} kills, level {}, {} casts",
        if report.survived { "Survived" } else { "Destroyed" },
        report.elapsed,
        report.waves,
        report.kills,
        report.player_level,
        report.casts,
    );
    println!(
        "damage: {:.0} direct, {:.0} from effects",
        report.direct_damage, report.effect_damage
    );
    for (skill, level) in &report.skills {
        println!("  {skill} lv{level}");
    }

    Ok(())
}
