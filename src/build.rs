//! Exports the [`build_site`] and [`build_bilingual`] functions which stitch
//! together the high-level steps of a build: loading the articles table
//! ([`crate::article`]), partitioning it ([`crate::index`]), rendering every
//! page in memory ([`crate::pages`] or [`crate::bilingual`]), and finally
//! writing the pages to disk ([`crate::write`]).

use crate::article::{load_articles, Article, Error as LoadError};
use crate::bilingual;
use crate::config::Config;
use crate::fragments::{nav_items, HOME_PAGE};
use crate::index::{by_date, index_articles};
use crate::layout::Layout;
use crate::pages::{render_category, render_home};
use crate::template::{Error as TemplateError, Template};
use crate::write::{Error as WriteError, Page, Writer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Builds the home page and one page per category from a [`Config`]. Returns
/// the paths written.
pub fn build_site(config: &Config) -> Result<Vec<PathBuf>> {
    let articles = load_articles(&config.articles_file)?;
    tracing::info!(count = articles.len(), "Loaded articles");
    let pages = render_site(config, &articles, copyright_year(config));
    write(config, &pages)
}

/// Renders the site's pages without touching the disk. The home page comes
/// first, followed by the category pages in configuration order.
pub fn render_site(config: &Config, articles: &[Article], year: i32) -> Vec<Page> {
    let nav = nav_items(&config.categories);
    let layout = Layout {
        site: &config.site,
        nav: &nav,
        year,
    };

    let mut pages = vec![Page {
        file_name: HOME_PAGE.to_owned(),
        html: render_home(&layout, &config.categories),
    }];
    for index in index_articles(&config.categories, articles) {
        tracing::debug!(
            category = %index.category.name,
            highlights = index.highlights.len(),
            others = index.others.len(),
            "Indexed category"
        );
        pages.push(Page {
            file_name: index.category.file_name.clone(),
            html: render_category(&layout, &index),
        });
    }
    pages
}

/// Builds one page per configured language from the shared bilingual
/// template. Returns the paths written.
pub fn build_bilingual(config: &Config) -> Result<Vec<PathBuf>> {
    let articles = load_articles(&config.articles_file)?;
    tracing::info!(count = articles.len(), "Loaded articles");
    let pages = render_bilingual(config, &articles)?;
    write(config, &pages)
}

/// Renders the bilingual pages without writing them. Reads the template and
/// the per-language about fragments.
pub fn render_bilingual(config: &Config, articles: &[Article]) -> Result<Vec<Page>> {
    let template_path = &config.bilingual.template;
    let template = Template::new(
        template_path.display().to_string(),
        read(template_path)?,
    );
    let sorted = by_date(articles);

    let mut pages = Vec::with_capacity(config.bilingual.languages.len());
    for language in config.bilingual.languages.iter() {
        let about = read(&language.about)?;
        pages.push(Page {
            file_name: language.output.clone(),
            html: bilingual::render_page(&template, language, &about, &sorted)?,
        });
    }
    Ok(pages)
}

fn copyright_year(config: &Config) -> i32 {
    use chrono::Datelike;
    match config.copyright_year {
        Some(year) => year,
        None => chrono::Local::now().year(),
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| Error::Read {
        path: path.to_owned(),
        err,
    })
}

fn write(config: &Config, pages: &[Page]) -> Result<Vec<PathBuf>> {
    let writer = Writer {
        output_directory: &config.output_directory,
    };
    Ok(writer.write_pages(pages)?)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during loading,
/// template reading and filling, and writing.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the articles table.
    Load(LoadError),

    /// Returned for I/O problems while reading template or fragment files.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned for errors filling the bilingual template.
    Template(TemplateError),

    /// Returned for errors writing pages to disk.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(err) => err.fmt(f),
            Error::Read { path, err } => {
                write!(f, "Reading file '{}': {}", path.display(), err)
            }
            Error::Template(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load(err) => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::Template(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<LoadError> for Error {
    /// Converts [`LoadError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: LoadError) -> Error {
        Error::Load(err)
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
