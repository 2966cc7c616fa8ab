//! Markdown rendering and front matter parsing for Hugo posts.

use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::config::Category;
use crate::generators::GeneratedPost;

const DELIMITER: &str = "---";
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("Front matter must start and end with a `---` line")]
    MissingDelimiter,
    #[error("Front matter is missing `{0}`")]
    MissingKey(&'static str),
    #[error("Malformed front matter line: {0}")]
    InvalidLine(String),
    #[error("Invalid date for `{key}`: {source}")]
    InvalidDate {
        key: &'static str,
        #[source]
        source: time::error::Parse,
    },
    #[error("Invalid categories list: {0}")]
    InvalidCategories(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Metadata block at the top of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub date: Date,
    pub publish_date: Date,
    pub layout: String,
    pub categories: Vec<Category>,
}

impl FrontMatter {
    /// Renders the block, delimiters included, ending with a newline.
    pub fn render(&self) -> String {
        let categories = self
            .categories
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{DELIMITER}\n\
             title: \"{title}\"\n\
             date: {date}\n\
             publishdate: {publish_date}\n\
             layout: {layout}\n\
             categories: [{categories}]\n\
             {DELIMITER}\n",
            title = escape(&self.title),
            date = self.date,
            publish_date = self.publish_date,
            layout = self.layout,
        )
    }

    /// Parses the front matter at the top of a Markdown document.
    pub fn parse(markdown: &str) -> Result<Self, FrontMatterError> {
        parse_document(markdown).map(|(front_matter, _)| front_matter)
    }
}

/// Splits a document into its front matter and body.
pub fn parse_document(markdown: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let rest = markdown
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
        .ok_or(FrontMatterError::MissingDelimiter)?;

    let mut title = None;
    let mut date = None;
    let mut publish_date = None;
    let mut layout = None;
    let mut categories = None;

    let mut consumed = 0;
    let mut closed = false;
    for line in rest.split_inclusive('\n') {
        consumed += line.len();
        let line = line.trim_end();

        if line == DELIMITER {
            closed = true;
            break;
        }
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| FrontMatterError::InvalidLine(line.to_string()))?;
        let value = value.trim();

        match key.trim() {
            "title" => title = Some(unquote(value)),
            "date" => date = Some(parse_date("date", value)?),
            "publishdate" => publish_date = Some(parse_date("publishdate", value)?),
            "layout" => layout = Some(value.to_string()),
            "categories" => categories = Some(parse_categories(value)?),
            // Hugo accepts many more keys; they carry nothing we generate.
            _ => {}
        }
    }

    if !closed {
        return Err(FrontMatterError::MissingDelimiter);
    }

    let front_matter = FrontMatter {
        title: title.ok_or(FrontMatterError::MissingKey("title"))?,
        date: date.ok_or(FrontMatterError::MissingKey("date"))?,
        publish_date: publish_date.ok_or(FrontMatterError::MissingKey("publishdate"))?,
        layout: layout.ok_or(FrontMatterError::MissingKey("layout"))?,
        categories: categories.ok_or(FrontMatterError::MissingKey("categories"))?,
    };

    Ok((front_matter, &rest[consumed..]))
}

/// Renders a complete post: front matter, prose, highlighted listing, prose.
pub fn render_post(post: &GeneratedPost) -> String {
    let mut out = post.front_matter.render();

    for paragraph in &post.paragraphs_before {
        out.push_str(paragraph);
        out.push_str("\n\n");
    }

    out.push_str(&format!(
        "{{{{< highlight {lang} >}}}}\n{source}\n{{{{< /highlight >}}}}\n\n",
        lang = post.snippet.language,
        source = post.snippet.source,
    ));

    for paragraph in &post.paragraphs_after {
        out.push_str(paragraph);
        out.push_str("\n\n");
    }

    out
}

fn parse_date(key: &'static str, value: &str) -> Result<Date, FrontMatterError> {
    Date::parse(value, DATE_FORMAT).map_err(|source| FrontMatterError::InvalidDate { key, source })
}

fn parse_categories(value: &str) -> Result<Vec<Category>, FrontMatterError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| FrontMatterError::InvalidCategories(value.to_string()))?;

    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let name = unquote(item);
            name.parse::<Category>()
                .map_err(|_| FrontMatterError::UnknownCategory(name))
        })
        .collect()
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.replace("\\\"", "\"").replace("\\\\", "\\")
}
