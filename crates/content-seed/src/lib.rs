//! Synthetic blog posts for seeding a Hugo site's content directory.
//!
//! Each post gets random front matter (a three-word title, a date inside a
//! window of past days, one category) and a body of filler prose around a
//! code listing quoted from this crate's own generators.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use content_seed::prelude::*;
//!
//! // Replace content/posts with 25 posts from the last two years.
//! let result = generate_content(25, 730)?;
//!
//! // Or configure the run.
//! let config = SeedConfig::new(10, 90)
//!     .with_output_dir("site/content/posts")
//!     .with_seed(12345);
//! let result = ContentSeeder::new(config).run_default()?;
//! ```

pub mod config;
pub mod document;
pub mod generators;
pub mod output;
pub mod seeder;

pub use seeder::generate_content;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{Category, SeedConfig};
    pub use crate::document::{FrontMatter, FrontMatterError, parse_document};
    pub use crate::generators::{
        DateGenerator, GeneratedPost, PostGenerator, Snippet, SnippetGenerator, TextGenerator,
    };
    pub use crate::output::{ContentWriter, SeedError, WrittenPost};
    pub use crate::seeder::{ContentSeeder, SeedMetrics, SeedResult, generate_content};
}
