//! Seeding runs: clear the content directory, then generate and write posts.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::config::SeedConfig;
use crate::generators::PostGenerator;
use crate::output::{ContentWriter, SeedError, WrittenPost};

/// Result of a seeding run.
#[derive(Debug)]
pub struct SeedResult {
    pub posts: Vec<WrittenPost>,
    pub metrics: SeedMetrics,
}

/// Counters and timing from a seeding run.
#[derive(Debug, Clone, Default)]
pub struct SeedMetrics {
    /// Files removed from the content directory before writing.
    pub removed_files: usize,
    /// Posts written.
    pub post_count: usize,
    /// Total bytes of Markdown written.
    pub bytes_written: usize,
    /// Wall time of the whole run (milliseconds).
    pub elapsed_ms: u64,
}

/// Runs a full seeding pass for a [`SeedConfig`].
///
/// # Example
///
/// ```rust,ignore
/// let config = SeedConfig::new(10, 365).with_output_dir("site/content/posts");
/// let result = ContentSeeder::new(config).run(&mut rand::thread_rng())?;
/// ```
pub struct ContentSeeder {
    config: SeedConfig,
    today: Option<Date>,
}

impl ContentSeeder {
    pub fn new(config: SeedConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Anchors generated dates at `today` instead of the current UTC date.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Runs with the configured seed, or a fresh thread rng when unset.
    pub fn run_default(&self) -> Result<SeedResult, SeedError> {
        match self.config.seed {
            Some(seed) => self.run(&mut StdRng::seed_from_u64(seed)),
            None => self.run(&mut rand::thread_rng()),
        }
    }

    /// Clears the output directory and writes `post_count` new posts.
    pub fn run(&self, rng: &mut impl Rng) -> Result<SeedResult, SeedError> {
        let start = Instant::now();

        let today = self
            .today
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        self.config.validate_at(today)?;
        let post_gen = PostGenerator::with_config(&self.config, today);
        let writer = ContentWriter::new(&self.config.output_dir);

        let removed_files = writer.clear()?;

        info!(
            "Generating {} posts dated {} to {}",
            self.config.post_count,
            post_gen.dates().earliest(),
            post_gen.dates().latest()
        );

        let mut posts = Vec::with_capacity(self.config.post_count);
        for _ in 0..self.config.post_count {
            let post = post_gen.generate(rng);
            posts.push(writer.write_post(&post)?);
        }

        let metrics = SeedMetrics {
            removed_files,
            post_count: posts.len(),
            bytes_written: posts.iter().map(|p| p.bytes).sum(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        Ok(SeedResult { posts, metrics })
    }
}

/// Replaces the posts in the default content directory with `posts` new ones
/// dated within the last `days` days.
pub fn generate_content(posts: usize, days: u32) -> Result<SeedResult, SeedError> {
    ContentSeeder::new(SeedConfig::new(posts, days)).run_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use time::macros::date;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("content-seed-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn test_run_writes_posts() {
        let dir = temp_dir();
        let seeder = ContentSeeder::new(SeedConfig::new(5, 30).with_output_dir(&dir));

        let result = seeder.run(&mut rand::thread_rng()).unwrap();

        assert_eq!(result.posts.len(), 5);
        assert_eq!(result.metrics.post_count, 5);
        assert_eq!(result.metrics.removed_files, 0);
        assert!(result.metrics.bytes_written > 0);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 5);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_rerun_replaces_posts() {
        let dir = temp_dir();
        let seeder = ContentSeeder::new(SeedConfig::new(4, 30).with_output_dir(&dir));

        seeder.run(&mut rand::thread_rng()).unwrap();
        let second = seeder.run(&mut rand::thread_rng()).unwrap();

        assert_eq!(second.metrics.removed_files, 4);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 4);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_seeded_runs_match() {
        let first_dir = temp_dir();
        let second_dir = temp_dir();
        let config = SeedConfig::new(3, 90).with_seed(99);

        let first = ContentSeeder::new(config.clone().with_output_dir(&first_dir))
            .with_today(date!(2024 - 05 - 01))
            .run_default()
            .unwrap();
        let second = ContentSeeder::new(config.with_output_dir(&second_dir))
            .with_today(date!(2024 - 05 - 01))
            .run_default()
            .unwrap();

        for (a, b) in first.posts.iter().zip(&second.posts) {
            assert_eq!(a.path.file_name(), b.path.file_name());
            assert_eq!(a.post.to_markdown(), b.post.to_markdown());
        }

        std::fs::remove_dir_all(first_dir).ok();
        std::fs::remove_dir_all(second_dir).ok();
    }

    #[test]
    fn test_window_past_calendar_start_is_rejected() {
        let dir = temp_dir();
        let seeder = ContentSeeder::new(SeedConfig::new(1, u32::MAX).with_output_dir(&dir))
            .with_today(date!(2024 - 05 - 01));

        assert!(matches!(
            seeder.run(&mut rand::thread_rng()),
            Err(SeedError::Config(_))
        ));
        assert!(!dir.exists());
    }

    #[test]
    fn test_invalid_config_touches_nothing() {
        let dir = temp_dir();
        let seeder = ContentSeeder::new(SeedConfig::new(3, 0).with_output_dir(&dir));

        assert!(matches!(
            seeder.run(&mut rand::thread_rng()),
            Err(SeedError::Config(_))
        ));
        assert!(!dir.exists());
    }
}
