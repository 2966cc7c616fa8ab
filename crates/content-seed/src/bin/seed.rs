//! Replaces the site's posts with freshly generated ones.
//!
//! Run with:
//! ```
//! cargo run -p content-seed --bin seed
//! ```
//!
//! Settings come from `SEED_CONFIG` (a JSON file) when set, otherwise the
//! defaults, and are then overridden by `CONTENT_DIR`, `POST_COUNT`,
//! `POST_DAYS` and `SEED`.

use std::env;
use std::str::FromStr;

use anyhow::Context;
use content_seed::config::SeedConfig;
use content_seed::seeder::ContentSeeder;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match env::var("SEED_CONFIG") {
        Ok(path) => SeedConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        Err(_) => SeedConfig::default(),
    };

    if let Ok(dir) = env::var("CONTENT_DIR") {
        config.output_dir = dir.into();
    }
    if let Some(count) = env_parse("POST_COUNT")? {
        config.post_count = count;
    }
    if let Some(days) = env_parse("POST_DAYS")? {
        config.days = days;
    }
    if let Some(seed) = env_parse("SEED")? {
        config.seed = Some(seed);
    }

    tracing::info!("Seeding posts into {}", config.output_dir.display());

    let result = ContentSeeder::new(config).run_default()?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Posts: {}", result.metrics.post_count);
    tracing::info!("  Removed files: {}", result.metrics.removed_files);
    tracing::info!("  Bytes written: {}", result.metrics.bytes_written);
    tracing::info!("  Elapsed: {}ms", result.metrics.elapsed_ms);

    Ok(())
}

/// Reads and parses an environment variable, if set.
fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {key}: {value}")),
        Err(_) => Ok(None),
    }
}
