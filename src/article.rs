//! Defines the [`Article`] record and the logic for loading articles from the
//! CSV table into memory. Text fields are passed through
//! [`crate::sanitize::sanitize`] on the way in.

use crate::sanitize::sanitize;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

/// The format of the `Date` column, e.g. `2024-03-05 09:30:00`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The language of the primary title and description columns.
pub const PRIMARY_LANGUAGE: &str = "English";

const TITLE: &str = "Article title in English";
const PUBLICATION: &str = "Where it was published";
const DESCRIPTION: &str = "Article Description in English";
const PHOTO: &str = "Photo";
const URL: &str = "Article URL";
const DATE: &str = "Date";
const HIGHLIGHT: &str = "Highlight";
const CATEGORY: &str = "Category";

const TITLE_PREFIX: &str = "Article title in ";
const DESCRIPTION_PREFIX: &str = "Article Description in ";

/// A title and description in a language other than English.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Translation {
    pub title: String,
    pub description: String,
}

/// One row of the articles table.
#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    pub title: String,
    pub publication: String,
    pub description: String,
    pub photo: String,
    pub url: String,
    pub date: NaiveDateTime,
    pub highlight: bool,

    /// Lower-cased; this is the partition key for category pages.
    pub category: String,

    /// Keyed by language name (e.g. `Portuguese`).
    pub translations: BTreeMap<String, Translation>,
}

impl Article {
    /// Returns the title in `language`, falling back to the English title.
    pub fn title_in(&self, language: &str) -> &str {
        match self.translations.get(language) {
            Some(t) => &t.title,
            None => &self.title,
        }
    }

    /// Returns the description in `language`, falling back to the English
    /// description.
    pub fn description_in(&self, language: &str) -> &str {
        match self.translations.get(language) {
            Some(t) => &t.description,
            None => &self.description,
        }
    }
}

/// Column positions resolved from the header row.
struct Columns {
    title: usize,
    publication: usize,
    description: usize,
    photo: usize,
    url: usize,
    date: usize,
    highlight: usize,
    category: usize,

    /// Language name and the (title, description) positions. Either column of
    /// a pair may be absent.
    translations: Vec<(String, Option<usize>, Option<usize>)>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Columns> {
        let find = |name: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(Error::MissingColumn(name))
        };

        let mut languages: Vec<String> = Vec::new();
        for header in headers.iter() {
            let header = header.trim();
            let language = header
                .strip_prefix(TITLE_PREFIX)
                .or_else(|| header.strip_prefix(DESCRIPTION_PREFIX));
            if let Some(language) = language {
                if language != PRIMARY_LANGUAGE && !languages.iter().any(|l| l == language) {
                    languages.push(language.to_owned());
                }
            }
        }

        let position = |name: String| headers.iter().position(|h| h.trim() == name);
        let translations = languages
            .into_iter()
            .map(|language| {
                let title = position(format!("{}{}", TITLE_PREFIX, language));
                let description = position(format!("{}{}", DESCRIPTION_PREFIX, language));
                (language, title, description)
            })
            .collect();

        Ok(Columns {
            title: find(TITLE)?,
            publication: find(PUBLICATION)?,
            description: find(DESCRIPTION)?,
            photo: find(PHOTO)?,
            url: find(URL)?,
            date: find(DATE)?,
            highlight: find(HIGHLIGHT)?,
            category: find(CATEGORY)?,
            translations,
        })
    }

    fn article(&self, record: &csv::StringRecord) -> Result<Article> {
        let field = |i: usize| record.get(i).unwrap_or_default();
        let optional = |i: Option<usize>| match i {
            Some(i) => sanitize(field(i)),
            None => String::new(),
        };

        let raw_date = field(self.date);
        let date = NaiveDateTime::parse_from_str(raw_date, DATE_FORMAT).map_err(|err| {
            Error::InvalidDate {
                title: field(self.title).to_owned(),
                date: raw_date.to_owned(),
                err,
            }
        })?;

        Ok(Article {
            title: sanitize(field(self.title)),
            publication: sanitize(field(self.publication)),
            description: sanitize(field(self.description)),
            photo: sanitize(field(self.photo)),
            url: sanitize(field(self.url)),
            date,
            highlight: field(self.highlight).trim().to_lowercase() == "true",
            category: sanitize(field(self.category)).to_lowercase(),
            translations: self
                .translations
                .iter()
                .map(|(language, title, description)| {
                    (
                        language.clone(),
                        Translation {
                            title: optional(*title),
                            description: optional(*description),
                        },
                    )
                })
                .collect(),
        })
    }
}

/// Parses every row of the CSV table read from `r`, in file order. The first
/// row must be a header naming at least the `Article title in English`,
/// `Where it was published`, `Article Description in English`, `Photo`,
/// `Article URL`, `Date`, `Highlight` and `Category` columns, in any order.
/// Any bad row aborts the whole load.
pub fn parse_articles<R: io::Read>(r: R) -> Result<Vec<Article>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(r);
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut articles = Vec::new();
    for result in reader.records() {
        articles.push(columns.article(&result?)?);
    }
    Ok(articles)
}

/// Loads the articles table at `path`. See [`parse_articles`].
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let file = std::fs::File::open(path).map_err(|err| Error::Open {
        path: path.display().to_string(),
        err,
    })?;
    let articles = parse_articles(io::BufReader::new(file))?;
    tracing::debug!(path = %path.display(), count = articles.len(), "Loaded articles");
    Ok(articles)
}

/// Represents the result of an article-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading [`Article`]s.
#[derive(Debug)]
pub enum Error {
    /// Returned when the articles file can't be opened.
    Open { path: String, err: io::Error },

    /// Returned when the header row lacks a required column.
    MissingColumn(&'static str),

    /// Returned when a row's `Date` doesn't match [`DATE_FORMAT`]. `title`
    /// and `date` are the raw column values.
    InvalidDate {
        title: String,
        date: String,
        err: chrono::ParseError,
    },

    /// Returned for malformed CSV (e.g., a row with the wrong number of
    /// fields) and read errors.
    Csv(csv::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening articles file '{}': {}", path, err)
            }
            Error::MissingColumn(name) => {
                write!(f, "Articles table is missing the `{}` column", name)
            }
            Error::InvalidDate { title, date, err: _ } => {
                write!(f, "Invalid date format for '{}': {}", title, date)
            }
            Error::Csv(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::MissingColumn(_) => None,
            Error::InvalidDate { err, .. } => Some(err),
            Error::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for Error {
    /// Converts a [`csv::Error`] into an [`Error`]. It allows us to use the
    /// `?` operator for reading records.
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}
