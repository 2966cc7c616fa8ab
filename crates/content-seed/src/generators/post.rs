//! Blog post generation.

use rand::Rng;
use time::Date;
use uuid::{Builder, Uuid};

use crate::config::{Category, SeedConfig};
use crate::document::{self, FrontMatter};
use crate::generators::date::DateGenerator;
use crate::generators::snippet::{Snippet, SnippetGenerator};
use crate::generators::text::TextGenerator;

/// Generated post ready to be written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedPost {
    pub id: Uuid,
    pub front_matter: FrontMatter,
    pub paragraphs_before: Vec<String>,
    pub snippet: Snippet,
    pub paragraphs_after: Vec<String>,
}

impl GeneratedPost {
    /// File name of the post: the id in simple hex form plus `.md`.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.id.simple())
    }

    /// Renders the full Markdown document.
    pub fn to_markdown(&self) -> String {
        document::render_post(self)
    }
}

/// Generates complete posts from the text, date and snippet generators.
pub struct PostGenerator {
    text: TextGenerator,
    dates: DateGenerator,
    snippets: SnippetGenerator,
    layout: String,
    categories: Vec<Category>,
    paragraphs_before: usize,
    paragraphs_after: usize,
}

impl PostGenerator {
    /// Creates a post generator with default settings anchored at `today`.
    pub fn new(today: Date) -> Self {
        Self::with_config(&SeedConfig::default(), today)
    }

    /// Creates a generator from a seeding config.
    ///
    /// The config is not validated here. An empty `categories` list falls
    /// back to [`Category::ALL`] and the date window is clamped as
    /// [`DateGenerator::new`] describes. [`SeedConfig::validate`] rejects both
    /// cases before a seeding run.
    pub fn with_config(config: &SeedConfig, today: Date) -> Self {
        let categories = if config.categories.is_empty() {
            Category::ALL.to_vec()
        } else {
            config.categories.clone()
        };

        Self {
            text: TextGenerator::new(),
            dates: DateGenerator::new(today, config.days),
            snippets: SnippetGenerator::new().with_language(config.highlight_language.clone()),
            layout: config.layout.clone(),
            categories,
            paragraphs_before: config.paragraphs_before,
            paragraphs_after: config.paragraphs_after,
        }
    }

    /// Replaces the snippet source.
    pub fn with_snippets(mut self, snippets: SnippetGenerator) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn dates(&self) -> &DateGenerator {
        &self.dates
    }

    /// Generates a single post.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedPost {
        // Drawn from the caller's rng so seeded runs produce the same file names.
        let id = Builder::from_random_bytes(rng.r#gen()).into_uuid();

        let written = self.dates.generate(rng);
        let title = self.text.title(rng);
        let category = self.categories[rng.gen_range(0..self.categories.len())];

        let front_matter = FrontMatter {
            title,
            date: written,
            publish_date: written,
            layout: self.layout.clone(),
            categories: vec![category],
        };

        let paragraphs_before = self.text.paragraphs(self.paragraphs_before, rng);
        let snippet = self.snippets.generate(rng);
        let paragraphs_after = self.text.paragraphs(self.paragraphs_after, rng);

        GeneratedPost {
            id,
            front_matter,
            paragraphs_before,
            snippet,
            paragraphs_after,
        }
    }

    /// Generates multiple posts.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedPost> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}
