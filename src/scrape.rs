//! Scrapes article metadata from Folha de S.Paulo article pages into a CSV
//! shaped like the articles table (see [`COLUMNS`]).
//!
//! Requests are made one at a time, in input order. Any failed request aborts
//! the whole batch and nothing is written. Extraction itself never fails: an
//! element missing from the page yields an empty field.

use scraper::{ElementRef, Html, Selector};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use url::Url;

/// The header row of the scraped CSV.
pub const COLUMNS: [&str; 5] = [
    "Photo",
    "Article title in Portuguese",
    "Date",
    "Where it was published",
    "Article URL",
];

/// Prefixed to the section name in the `Where it was published` column.
pub const PUBLICATION_PREFIX: &str = "Folha de S.Paulo - ";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One scraped row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrapedArticle {
    pub photo: String,
    pub title: String,
    pub date: String,
    pub publication: String,
    pub url: String,
}

impl ScrapedArticle {
    fn fields(&self) -> [&str; 5] {
        [
            &self.photo,
            &self.title,
            &self.date,
            &self.publication,
            &self.url,
        ]
    }
}

/// Fetches a page body for a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP with a blocking client. Non-success statuses are
/// errors.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<HttpFetcher> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Client)?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    fn fetch(&self, url: &str) -> Result<String> {
        let http = |err: reqwest::Error| Error::Http {
            url: url.to_owned(),
            err,
        };
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(http)?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

/// The CSS selectors for the fields pulled out of an article page.
pub struct Selectors {
    title: Selector,
    date: Selector,
    section: Selector,
    section_link: Selector,
    image: Selector,
}

impl Selectors {
    pub fn new() -> Result<Selectors> {
        fn parse(selector: &str) -> Result<Selector> {
            Selector::parse(selector).map_err(|e| Error::Selector {
                selector: selector.to_owned(),
                message: e.to_string(),
            })
        }

        Ok(Selectors {
            title: parse("h1.c-content-head__title")?,
            date: parse("time.c-more-options__published-date")?,
            section: parse("li.c-site-nav__item--section")?,
            section_link: parse("a")?,
            image: parse("meta[property=\"og:image\"]")?,
        })
    }

    /// Extracts a [`ScrapedArticle`] from the page at `url` whose markup is
    /// `html`.
    pub fn extract(&self, url: &str, html: &str) -> ScrapedArticle {
        let document = Html::parse_document(html);
        let first = |selector: &Selector| document.select(selector).next();
        let attr = |element: Option<ElementRef>, name: &str| {
            element
                .and_then(|e| e.value().attr(name))
                .map(|v| v.trim().to_owned())
                .unwrap_or_default()
        };

        let section = first(&self.section)
            .and_then(|li| li.select(&self.section_link).next())
            .map(|a| text(&a))
            .unwrap_or_default();

        ScrapedArticle {
            photo: attr(first(&self.image), "content"),
            title: first(&self.title).map(|h1| text(&h1)).unwrap_or_default(),
            date: attr(first(&self.date), "datetime"),
            publication: if section.is_empty() {
                String::new()
            } else {
                format!("{}{}", PUBLICATION_PREFIX, capitalize(&section))
            },
            url: url.to_owned(),
        }
    }
}

fn text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Upper-cases the first character of `s` and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Parses a URL list: one URL per line, skipping blank lines and lines
/// beginning with `#`. Every URL must be absolute. URLs are returned as
/// written, duplicates included.
pub fn parse_urls(input: &str) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        Url::parse(line).map_err(|err| Error::InvalidUrl {
            line: i + 1,
            url: line.to_owned(),
            err,
        })?;
        urls.push(line.to_owned());
    }
    Ok(urls)
}

/// Reads and parses the URL list at `path`. See [`parse_urls`].
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let input = std::fs::read_to_string(path).map_err(|err| Error::Io {
        path: path.to_owned(),
        err,
    })?;
    parse_urls(&input)
}

/// Fetches and extracts every URL in order. Stops at the first fetch error.
pub fn scrape<F: Fetch>(fetcher: &F, urls: &[String]) -> Result<Vec<ScrapedArticle>> {
    let selectors = Selectors::new()?;
    let mut articles = Vec::with_capacity(urls.len());
    for url in urls {
        let html = fetcher.fetch(url)?;
        let article = selectors.extract(url, &html);
        if article.title.is_empty() {
            tracing::warn!(%url, "No title found; the page markup may have changed");
        }
        articles.push(article);
    }
    info!(count = articles.len(), "Scraped articles");
    Ok(articles)
}

/// Encodes `s` as ISO-8859-1. Characters above U+00FF are an error.
pub fn encode_latin1(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) => Ok(b),
            Err(_) => Err(Error::Encoding {
                character: c,
                text: s.to_owned(),
            }),
        })
        .collect()
}

/// Serializes `articles` under the [`COLUMNS`] header with CRLF line endings,
/// encoded as ISO-8859-1.
pub fn to_csv(articles: &[ScrapedArticle]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS.iter())?;
    for article in articles {
        let encoded = article
            .fields()
            .iter()
            .map(|field| encode_latin1(field))
            .collect::<Result<Vec<Vec<u8>>>>()?;
        writer.write_record(&encoded)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))
}

/// Scrapes `urls` and writes the CSV to `output`. The file is only written
/// once every URL has been scraped and encoded.
pub fn scrape_to_file<F: Fetch>(fetcher: &F, urls: &[String], output: &Path) -> Result<usize> {
    let articles = scrape(fetcher, urls)?;
    let bytes = to_csv(&articles)?;
    std::fs::write(output, bytes).map_err(|err| Error::Io {
        path: output.to_owned(),
        err,
    })?;
    info!(path = %output.display(), rows = articles.len(), "Data exported");
    Ok(articles.len())
}

/// Represents the result of a scrape operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error scraping articles.
#[derive(Debug)]
pub enum Error {
    /// Returned when a line of the URL list isn't an absolute URL.
    InvalidUrl {
        line: usize,
        url: String,
        err: url::ParseError,
    },

    /// Returned when the HTTP client can't be constructed.
    Client(reqwest::Error),

    /// Returned for transport errors and non-success statuses.
    Http { url: String, err: reqwest::Error },

    /// Returned when a built-in CSS selector fails to parse.
    Selector { selector: String, message: String },

    /// Returned when a scraped field can't be represented in ISO-8859-1.
    Encoding { character: char, text: String },

    /// Returned for errors serializing the CSV.
    Csv(csv::Error),

    /// Returned for I/O errors reading the URL list or writing the CSV.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidUrl { line, url, err } => {
                write!(f, "line {}: invalid URL `{}`: {}", line, url, err)
            }
            Error::Client(err) => write!(f, "building HTTP client: {}", err),
            Error::Http { url, err } => write!(f, "fetching `{}`: {}", url, err),
            Error::Selector { selector, message } => {
                write!(f, "parsing selector `{}`: {}", selector, message)
            }
            Error::Encoding { character, text } => write!(
                f,
                "character {:?} in `{}` can't be encoded as ISO-8859-1",
                character, text
            ),
            Error::Csv(err) => err.fmt(f),
            Error::Io { path, err } => write!(f, "'{}': {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUrl { err, .. } => Some(err),
            Error::Client(err) => Some(err),
            Error::Http { err, .. } => Some(err),
            Error::Selector { .. } => None,
            Error::Encoding { .. } => None,
            Error::Csv(err) => Some(err),
            Error::Io { err, .. } => Some(err),
        }
    }
}

impl From<csv::Error> for Error {
    /// Converts a [`csv::Error`] into an [`Error`]. It allows us to use the
    /// `?` operator for writing records.
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta property="og:image" content=" https://f.i.uol.com.br/fotografia/2023/07/img.jpg " />
</head>
<body>
    <ul>
        <li class="c-site-nav__item c-site-nav__item--section"><a href="/tec">TEC</a></li>
    </ul>
    <h1 class="c-content-head__title">
        Inteligências artificiais <em>envenenadas</em> são problema
    </h1>
    <time class="c-more-options__published-date" datetime="2023-07-15 12:00:00">15.jul.2023</time>
</body>
</html>"#;

    /// Serves canned pages and records the URLs requested.
    struct FakeFetcher {
        pages: HashMap<&'static str, &'static str>,
        requested: RefCell<Vec<String>>,
    }

    impl Fetch for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_owned());
            match self.pages.get(url) {
                Some(page) => Ok((*page).to_owned()),
                None => Err(Error::Io {
                    path: PathBuf::from(url),
                    err: io::Error::new(io::ErrorKind::NotFound, "404"),
                }),
            }
        }
    }

    fn fetcher(pages: &[(&'static str, &'static str)]) -> FakeFetcher {
        FakeFetcher {
            pages: pages.iter().cloned().collect(),
            requested: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_extract() -> Result<()> {
        let url = "https://www1.folha.uol.com.br/tec/2023/07/a.shtml";
        let article = Selectors::new()?.extract(url, PAGE);
        assert_eq!(
            ScrapedArticle {
                photo: "https://f.i.uol.com.br/fotografia/2023/07/img.jpg".to_owned(),
                title: "Inteligências artificiais envenenadas são problema".to_owned(),
                date: "2023-07-15 12:00:00".to_owned(),
                publication: "Folha de S.Paulo - Tec".to_owned(),
                url: url.to_owned(),
            },
            article
        );
        Ok(())
    }

    #[test]
    fn test_extract_missing_elements_yields_empty_fields() -> Result<()> {
        let article = Selectors::new()?.extract(
            "https://example.org/",
            "<html><body><li class=\"c-site-nav__item--section\">no link</li></body></html>",
        );
        assert_eq!(
            ScrapedArticle {
                url: "https://example.org/".to_owned(),
                ..ScrapedArticle::default()
            },
            article
        );
        Ok(())
    }

    #[test]
    fn test_http_fetcher_builds() -> Result<()> {
        HttpFetcher::new().map(|_| ())
    }

    #[test]
    fn test_client_error_message() {
        // An unparsable URL fails inside reqwest before any request is sent.
        let err = reqwest::blocking::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let message = Error::Client(err).to_string();
        assert!(message.starts_with("building HTTP client: "), "{}", message);
        assert!(!message.contains("fetching ``"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!("Poder", capitalize("PODER"));
        assert_eq!("Ilustrada", capitalize("ilustrada"));
        assert_eq!("Éx", capitalize("éX"));
        assert_eq!("", capitalize(""));
    }

    #[test]
    fn test_parse_urls() -> Result<()> {
        let urls = parse_urls("# Folha\nhttps://a.example/x\n\n  https://a.example/x  \nhttps://b.example/y\n")?;
        assert_eq!(
            vec!["https://a.example/x", "https://a.example/x", "https://b.example/y"],
            urls
        );

        match parse_urls("https://a.example/\nnot a url\n") {
            Err(Error::InvalidUrl { line, url, .. }) => {
                assert_eq!(2, line);
                assert_eq!("not a url", url);
            }
            other => panic!("wanted InvalidUrl; found {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_scrape_stops_at_first_failure() {
        let fetcher = fetcher(&[("https://a.example/1", PAGE), ("https://a.example/3", PAGE)]);
        let urls = vec![
            "https://a.example/1".to_owned(),
            "https://a.example/2".to_owned(),
            "https://a.example/3".to_owned(),
        ];
        assert!(scrape(&fetcher, &urls).is_err());
        assert_eq!(
            vec!["https://a.example/1", "https://a.example/2"],
            *fetcher.requested.borrow()
        );
    }

    #[test]
    fn test_scrape_to_file_writes_nothing_on_failure() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("scraped_articles.csv");
        let fetcher = fetcher(&[("https://a.example/1", PAGE)]);
        let urls = vec!["https://a.example/1".to_owned(), "https://a.example/2".to_owned()];
        assert!(scrape_to_file(&fetcher, &urls, &output).is_err());
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_scrape_to_file_latin1() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("scraped_articles.csv");
        let fetcher = fetcher(&[("https://a.example/1", PAGE)]);
        let rows = scrape_to_file(&fetcher, &["https://a.example/1".to_owned()], &output)?;
        assert_eq!(1, rows);

        let bytes = std::fs::read(&output)?;
        let wanted = "Photo,Article title in Portuguese,Date,Where it was published,Article URL\r\n\
            https://f.i.uol.com.br/fotografia/2023/07/img.jpg,Inteligências artificiais envenenadas são problema,2023-07-15 12:00:00,Folha de S.Paulo - Tec,https://a.example/1\r\n";
        assert_eq!(encode_latin1(wanted)?, bytes);
        // "ê" is a single byte in ISO-8859-1.
        assert!(bytes.contains(&0xEA));
        Ok(())
    }

    #[test]
    fn test_to_csv_quotes_and_rejects_unencodable() -> Result<()> {
        let article = ScrapedArticle {
            title: "Hackers, \"vacinas\"".to_owned(),
            ..ScrapedArticle::default()
        };
        let bytes = to_csv(&[article])?;
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        assert!(text.ends_with(",\"Hackers, \"\"vacinas\"\"\",,,\r\n"));

        let article = ScrapedArticle {
            title: "Emoji \u{1F600}".to_owned(),
            ..ScrapedArticle::default()
        };
        match to_csv(&[article]) {
            Err(Error::Encoding { character, .. }) => assert_eq!('\u{1F600}', character),
            other => panic!("wanted Encoding; found {:?}", other),
        }
        Ok(())
    }
}
