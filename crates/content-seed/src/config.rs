//! Configuration types for content generation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::generators::DateGenerator;
use crate::output::SeedError;

/// Post categories understood by the site theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Python,
    Data,
    Docker,
    Go,
    Kubernetes,
}

impl Category {
    /// Every category, in the order the theme lists them.
    pub const ALL: [Category; 5] = [
        Category::Python,
        Category::Data,
        Category::Docker,
        Category::Go,
        Category::Kubernetes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Python => "python",
            Category::Data => "data",
            Category::Docker => "docker",
            Category::Go => "go",
            Category::Kubernetes => "kubernetes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Configuration for a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of posts to generate.
    pub post_count: usize,

    /// Window, in days before today, that post dates are drawn from.
    pub days: u32,

    /// Directory the posts are written to. Its files are removed first.
    pub output_dir: PathBuf,

    /// Front matter `layout` value.
    pub layout: String,

    /// Categories a post may be assigned.
    pub categories: Vec<Category>,

    /// Prose paragraphs before the code listing.
    pub paragraphs_before: usize,

    /// Prose paragraphs after the code listing.
    pub paragraphs_after: usize,

    /// Language passed to the highlight shortcode.
    pub highlight_language: String,

    /// Seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            post_count: 25,
            days: 730,
            output_dir: PathBuf::from("content/posts"),
            layout: "post".to_string(),
            categories: Category::ALL.to_vec(),
            paragraphs_before: 3,
            paragraphs_after: 1,
            highlight_language: "rust".to_string(),
            seed: None,
        }
    }
}

impl SeedConfig {
    /// Creates a config for `post_count` posts dated within the last `days` days.
    pub fn new(post_count: usize, days: u32) -> Self {
        Self {
            post_count,
            days,
            ..Default::default()
        }
    }

    /// Loads a config from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SeedConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the seed for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the settings a run cannot work without, for a run today (UTC).
    pub fn validate(&self) -> Result<(), SeedError> {
        self.validate_at(OffsetDateTime::now_utc().date())
    }

    /// Checks the settings for a run whose dates are anchored at `today`.
    pub fn validate_at(&self, today: Date) -> Result<(), SeedError> {
        if self.days == 0 {
            return Err(SeedError::Config("days must be at least 1".into()));
        }
        if !DateGenerator::fits(today, self.days) {
            return Err(SeedError::Config(format!(
                "a window of {} days before {today} is out of range",
                self.days
            )));
        }
        if self.categories.is_empty() {
            return Err(SeedError::Config("at least one category is required".into()));
        }
        if self.layout.trim().is_empty() {
            return Err(SeedError::Config("layout must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("rust".parse::<Category>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = SeedConfig::default();
        assert_eq!(config.post_count, 25);
        assert_eq!(config.days, 730);
        assert_eq!(config.layout, "post");
        assert_eq!(config.categories.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SeedConfig =
            serde_json::from_str(r#"{"post_count": 3, "categories": ["go", "data"]}"#).unwrap();

        assert_eq!(config.post_count, 3);
        assert_eq!(config.days, 730);
        assert_eq!(config.categories, vec![Category::Go, Category::Data]);
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        let config = SeedConfig::new(5, 0);
        assert!(matches!(config.validate(), Err(SeedError::Config(_))));

        let config = SeedConfig {
            categories: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unrepresentable_window() {
        let today = time::macros::date!(2024 - 01 - 01);

        let config = SeedConfig::new(5, u32::MAX);
        assert!(matches!(config.validate_at(today), Err(SeedError::Config(_))));
        assert!(config.validate().is_err());

        assert!(SeedConfig::new(5, 3650).validate_at(today).is_ok());
    }
}
