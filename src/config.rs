//! Loads the project file (`folio.yaml`) and resolves it into a [`Config`].
//! Every setting except `author` has a default, so the smallest useful
//! project file is a single line.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "folio.yaml";

#[derive(Deserialize)]
struct Project {
    author: String,

    #[serde(default = "default_role")]
    role: String,

    #[serde(default = "default_description")]
    description: String,

    #[serde(default = "default_home_title")]
    home_title: String,

    #[serde(default = "default_home_description")]
    home_description: String,

    #[serde(default = "default_portrait")]
    portrait: String,

    #[serde(default = "default_stylesheet")]
    stylesheet: String,

    #[serde(default = "default_fonts")]
    fonts: String,

    #[serde(default = "default_font_awesome_kit")]
    font_awesome_kit: String,

    #[serde(default)]
    copyright_year: Option<i32>,

    #[serde(default = "default_articles")]
    articles: PathBuf,

    #[serde(default = "default_bio")]
    bio: String,

    #[serde(default = "default_social_links")]
    social_links: Vec<SocialLink>,

    #[serde(default = "default_categories")]
    categories: Vec<CategoryEntry>,

    #[serde(default)]
    bilingual: BilingualEntry,
}

#[derive(Deserialize)]
struct CategoryEntry {
    name: String,
    title: String,
}

#[derive(Deserialize)]
struct BilingualEntry {
    #[serde(default = "default_template")]
    template: PathBuf,

    #[serde(default = "default_languages")]
    languages: Vec<Language>,
}

impl Default for BilingualEntry {
    fn default() -> Self {
        BilingualEntry {
            template: default_template(),
            languages: default_languages(),
        }
    }
}

/// A link rendered as an icon in the hero and footer.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,

    /// The Font Awesome classes for the icon, e.g. `fa-brands fa-github`.
    pub icon: String,
}

/// Details about the site owner and the page shell shared by every page.
#[derive(Clone, Debug)]
pub struct Site {
    pub author: String,
    pub role: String,
    pub description: String,
    pub home_title: String,
    pub home_description: String,
    pub portrait: String,
    pub stylesheet: String,
    pub fonts: String,
    pub font_awesome_kit: String,
    pub bio: String,
    pub social_links: Vec<SocialLink>,
}

/// A category page. Articles whose `Category` column matches `name`
/// (case-insensitively) are rendered into `file_name`.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    /// The lower-cased partition key.
    pub name: String,

    /// The page heading and navigation label.
    pub title: String,

    /// The slug of `name` with an `.html` extension.
    pub file_name: String,
}

impl Category {
    pub fn new(name: &str, title: &str) -> Category {
        Category {
            name: name.trim().to_lowercase(),
            title: title.to_owned(),
            file_name: format!("{}.html", slug::slugify(name)),
        }
    }
}

/// One page of the bilingual build.
#[derive(Clone, Debug, Deserialize)]
pub struct Language {
    /// The language name as it appears in the CSV column headers, e.g.
    /// `Portuguese` for `Article title in Portuguese`.
    pub name: String,

    /// The value of the `lang` placeholder.
    pub code: String,

    /// The output file name.
    pub output: String,

    pub title: String,
    pub description: String,
    pub language_selector: String,

    /// The HTML fragment file for the "about" section.
    pub about: PathBuf,

    pub work: String,
    pub more_work: String,

    /// A `chrono` format string applied to each article's date.
    pub date_format: String,
}

/// Settings for the bilingual build.
#[derive(Clone, Debug)]
pub struct Bilingual {
    pub template: PathBuf,
    pub languages: Vec<Language>,
}

/// The fully resolved configuration. Paths are absolute (or relative to the
/// working directory) rather than relative to the project file.
#[derive(Clone, Debug)]
pub struct Config {
    pub site: Site,
    pub articles_file: PathBuf,
    pub output_directory: PathBuf,
    pub copyright_year: Option<i32>,
    pub categories: Vec<Category>,
    pub bilingual: Bilingual,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for [`PROJECT_FILE`]
    /// and loads the first one found. If `output_directory` is `None`, pages
    /// are written next to the project file.
    pub fn from_directory(dir: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let dir = dir
            .canonicalize()
            .map_err(|e| anyhow!("Resolving project directory `{}`: {}", dir.display(), e))?;
        let mut current: Option<&Path> = Some(&dir);
        while let Some(candidate) = current {
            let path = candidate.join(PROJECT_FILE);
            if path.exists() {
                return match Config::from_project_file(&path, output_directory) {
                    Ok(config) => Ok(config),
                    Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
                };
            }
            current = candidate.parent();
        }
        Err(anyhow!(
            "Could not find `{}` in any parent directory",
            PROJECT_FILE
        ))
    }

    pub fn from_project_file(path: &Path, output_directory: Option<&Path>) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                for language in project.bilingual.languages.iter() {
                    check_date_format(&language.date_format)?;
                }
                let config = project.resolve(project_root, output_directory);
                check_categories(&config.categories)?;
                Ok(config)
            }
        }
    }
}

/// Rejects `chrono` format strings containing unknown specifiers, which would
/// otherwise fail at render time.
fn check_date_format(format: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("Invalid date format `{}`", format));
    }
    Ok(())
}

/// Rejects categories whose pages would overwrite the home page or each
/// other.
fn check_categories(categories: &[Category]) -> Result<()> {
    use crate::fragments::HOME_PAGE;
    let mut seen: Vec<&Category> = Vec::with_capacity(categories.len());
    for category in categories {
        if category.file_name == ".html" {
            return Err(anyhow!(
                "Category `{}` has no usable file name",
                category.name
            ));
        }
        if category.file_name == HOME_PAGE {
            return Err(anyhow!(
                "Category `{}` would overwrite the home page `{}`",
                category.name,
                HOME_PAGE
            ));
        }
        if let Some(other) = seen.iter().find(|c| c.file_name == category.file_name) {
            return Err(anyhow!(
                "Categories `{}` and `{}` both render to `{}`",
                other.name,
                category.name,
                category.file_name
            ));
        }
        seen.push(category);
    }
    Ok(())
}

impl Project {
    fn resolve(self, project_root: &Path, output_directory: Option<&Path>) -> Config {
        Config {
            site: Site {
                author: self.author,
                role: self.role,
                description: self.description,
                home_title: self.home_title,
                home_description: self.home_description,
                portrait: self.portrait,
                stylesheet: self.stylesheet,
                fonts: self.fonts,
                font_awesome_kit: self.font_awesome_kit,
                bio: self.bio,
                social_links: self.social_links,
            },
            articles_file: project_root.join(self.articles),
            output_directory: match output_directory {
                Some(dir) => dir.to_owned(),
                None => project_root.to_owned(),
            },
            copyright_year: self.copyright_year,
            categories: self
                .categories
                .iter()
                .map(|c| Category::new(&c.name, &c.title))
                .collect(),
            bilingual: Bilingual {
                template: project_root.join(self.bilingual.template),
                languages: self
                    .bilingual
                    .languages
                    .into_iter()
                    .map(|language| Language {
                        about: project_root.join(&language.about),
                        ..language
                    })
                    .collect(),
            },
        }
    }
}

fn default_role() -> String {
    "AI ETHICS RESEARCHER · DATA, TECH JOURNALIST".to_owned()
}

fn default_description() -> String {
    "Portfolio of Raphael Hernandes, AI ethics researcher and journalist.".to_owned()
}

fn default_home_title() -> String {
    "Raphael Hernandes · AI Ethics Researcher & Journalist".to_owned()
}

fn default_home_description() -> String {
    "Portfolio and bio of Raphael Hernandes, AI ethics researcher and data journalist.".to_owned()
}

fn default_portrait() -> String {
    "static/img/rh.jpg".to_owned()
}

fn default_stylesheet() -> String {
    "assets/css/style.css".to_owned()
}

fn default_fonts() -> String {
    "https://fonts.googleapis.com/css2?family=Source+Serif+4:wght@400;500;600;700&display=swap"
        .to_owned()
}

fn default_font_awesome_kit() -> String {
    "https://kit.fontawesome.com/c796ba7827.js".to_owned()
}

fn default_articles() -> PathBuf {
    PathBuf::from("articles.csv")
}

fn default_template() -> PathBuf {
    PathBuf::from("template.html")
}

const DEFAULT_BIO: &str = "I am an artificial intelligence (AI) ethics researcher and data journalist specializing in the intersections between AI, journalism, and society. My work combines in-depth reporting and quantitative analysis to explore the ethical implications and societal impacts of AI technologies.

I am currently pursuing a <a href=\"https://www.cdh.cam.ac.uk/about/people/raphael-hernandes/\" target=\"_blank\" rel=\"noopener\">PhD at Cambridge Digital Humanities</a>, University of Cambridge, where my research examines how AI reshapes journalism, information environments, and epistemic security. My work is supported by a <a href=\"https://www.hardingscholars.fund.cam.ac.uk/raphael-hernandes-2025-cohort\" target=\"_blank\" rel=\"noopener\">Harding Distinguished Postgraduate Scholarship</a>.

My journalism career includes roles as a Data Journalist at <a href=\"https://www.theguardian.com/profile/raphael-hernandes\" target=\"_blank\" rel=\"noopener\">The Guardian</a> (UK) and as Editor-at-Large at <a href=\"https://www1.folha.uol.com.br/autores/raphael-hernandes.shtml\" target=\"_blank\" rel=\"noopener\">Folha de S.Paulo</a> (Brazil), where I led innovative data- and AI-driven newsroom projects and reported on the intersections of technology, media, and society.

I hold an MPhil in Ethics of AI, Data, and Algorithms from Cambridge, graduating with distinction and receiving the <a href=\"https://www.lcfi.ac.uk/education/mphil/huw-price-prize\" target=\"_blank\" rel=\"noopener\">Huw Price Prize</a> for best overall performance.

As a Research Assistant at the Leverhulme Centre for the Future of Intelligence (Cambridge), I analyzed media coverage of AI and examined the use of generative systems in political communication, co-creating a <a href=\"https://www.desirableai.com/journalism-toolkit\" target=\"_blank\" rel=\"noopener\">toolkit to help journalists responsibly adopt AI</a> technologies in their work.

I regularly speak at technology and journalism conferences, engaging diverse audiences to foster a critical understanding of AI's role in society. I am committed to empowering the public through technology, data, and informed discourse on AI ethics and responsible innovation.";

fn default_bio() -> String {
    DEFAULT_BIO.to_owned()
}

fn default_social_links() -> Vec<SocialLink> {
    [
        (
            "LinkedIn",
            "https://www.linkedin.com/in/raphaelhernandes/",
            "fa-brands fa-linkedin-in",
        ),
        (
            "Bluesky",
            "https://bsky.app/profile/hernandesraph.bsky.social",
            "fa-brands fa-bluesky",
        ),
        (
            "GitHub",
            "https://github.com/rhhernandes",
            "fa-brands fa-github",
        ),
        (
            "Instagram",
            "https://www.instagram.com/hernandesraph/",
            "fa-brands fa-instagram",
        ),
        (
            "Google Scholar",
            "https://scholar.google.com/citations?user=arCHs-gAAAAJ&hl=en",
            "fa-solid fa-graduation-cap",
        ),
        (
            "Cambridge Digital Humanities",
            "https://www.cdh.cam.ac.uk/about/people/raphael-hernandes/",
            "fa-solid fa-building-columns",
        ),
    ]
    .iter()
    .map(|(label, url, icon)| SocialLink {
        label: (*label).to_owned(),
        url: (*url).to_owned(),
        icon: (*icon).to_owned(),
    })
    .collect()
}

fn default_categories() -> Vec<CategoryEntry> {
    vec![
        CategoryEntry {
            name: "academic".to_owned(),
            title: "Academic Work".to_owned(),
        },
        CategoryEntry {
            name: "journalism".to_owned(),
            title: "Journalism Work".to_owned(),
        },
    ]
}

fn default_languages() -> Vec<Language> {
    vec![
        Language {
            name: "Portuguese".to_owned(),
            code: "pt".to_owned(),
            output: "pt.html".to_owned(),
            title: "Pesquisador em Ética de Inteligência Artificial; Jornalista de tecnologia, dados e IA"
                .to_owned(),
            description: "Pesquisador em Ética de IA e Jornalista".to_owned(),
            language_selector: "Português / <a href=\"./index.html\">English</a>".to_owned(),
            about: PathBuf::from("about_pt.html"),
            work: "Trabalhos selecionados".to_owned(),
            more_work: "Mais trabalhos selecionados".to_owned(),
            date_format: "%d/%m/%Y".to_owned(),
        },
        Language {
            name: "English".to_owned(),
            code: "en".to_owned(),
            output: "index.html".to_owned(),
            title: "Artificial Intelligence Ethics Researcher; Tech, data and AI journalist"
                .to_owned(),
            description: "AI Ethics Researcher, Journalist".to_owned(),
            language_selector: "<a href=\"./pt.html\">Português</a> / English".to_owned(),
            about: PathBuf::from("about_en.html"),
            work: "Selected work".to_owned(),
            more_work: "More selected work".to_owned(),
            date_format: "%b/%d/%Y".to_owned(),
        },
    ]
}
