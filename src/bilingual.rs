//! The bilingual build: one page per configured [`Language`], each made by
//! filling the shared [`Template`] with that language's strings and the
//! article fragments. Unlike the category pages, every article appears here;
//! highlights become alternating spotlights and the rest compact entries.

use crate::article::Article;
use crate::config::Language;
use crate::template::{Result, Template};
use std::collections::HashMap;

/// Returns the spotlight orientation for the `n`th highlight, counting from
/// one.
fn orientation(n: usize) -> &'static str {
    if n % 2 == 0 {
        "orient-left"
    } else {
        "orient-right"
    }
}

/// Renders one spotlight section per highlighted article, alternating
/// between right- and left-oriented images.
pub fn render_spotlights(articles: &[&Article], language: &Language) -> String {
    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        out.push_str(&format!(
            r#"
        <section class="spotlight style1 {orient} content-align-left image-position-center onscroll-image-fade-in">
            <div class="content">
                <h2><a href="{url}" target="_blank">{title}</a></h2>
                    <ul class="alt">
                        <li>{date}</li>
                        <li>{publication}</li>
                        <li></li>
                        <p>{description}</p>
                    <ul class="actions stacked">
            </div>
            <div class="image">
                <a href="{url}" target="_blank"><img src="{photo}" alt="" /></a>
            </div>
</section>"#,
            orient = orientation(i + 1),
            url = article.url,
            title = article.title_in(&language.name),
            date = article.date.format(&language.date_format),
            publication = article.publication,
            description = article.description_in(&language.name),
            photo = article.photo,
        ));
    }
    out
}

/// Renders one compact section per non-highlighted article.
pub fn render_entries(articles: &[&Article], language: &Language) -> String {
    let mut out = String::new();
    for article in articles {
        out.push_str(&format!(
            r#"
        <section>
            <header>
                <h3><a href="{url}" target="_blank">{date}</a></h3>
                {publication}
            </header>
            <div class="content">
                <p><a href="{url}" target="_blank">{title}</a></p>
                <p>{description}</p>
            </div>
        </section>"#,
            url = article.url,
            date = article.date.format(&language.date_format),
            publication = article.publication,
            title = article.title_in(&language.name),
            description = article.description_in(&language.name),
        ));
    }
    out
}

/// Renders the page for `language`. `articles` must already be sorted most
/// recent first; `about` is the contents of the language's about fragment.
pub fn render_page(
    template: &Template,
    language: &Language,
    about: &str,
    articles: &[&Article],
) -> Result<String> {
    let (highlights, others): (Vec<&Article>, Vec<&Article>) =
        articles.iter().copied().partition(|a| a.highlight);
    let highlights = render_spotlights(&highlights, language);
    let entries = render_entries(&others, language);

    let mut values: HashMap<&str, &str> = HashMap::new();
    values.insert("lang", &language.code);
    values.insert("title", &language.title);
    values.insert("description", &language.description);
    values.insert("language_selector", &language.language_selector);
    values.insert("about", about);
    values.insert("work", &language.work);
    values.insert("more_work", &language.more_work);
    values.insert("highlights", &highlights);
    values.insert("articles", &entries);
    template.fill(&values)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::article::Translation;
    use crate::testutil::article;
    use std::path::PathBuf;

    fn language(name: &str, date_format: &str) -> Language {
        Language {
            name: name.to_owned(),
            code: name[..2].to_lowercase(),
            output: "index.html".to_owned(),
            title: format!("{} title", name),
            description: format!("{} description", name),
            language_selector: "<a href=\"./pt.html\">Português</a> / English".to_owned(),
            about: PathBuf::from("about.html"),
            work: "Selected work".to_owned(),
            more_work: "More selected work".to_owned(),
            date_format: date_format.to_owned(),
        }
    }

    #[test]
    fn test_spotlights_alternate() {
        let a = article("a", 3, true, "journalism");
        let b = article("b", 2, true, "journalism");
        let c = article("c", 1, true, "journalism");
        let html = render_spotlights(&[&a, &b, &c], &language("English", "%b/%d/%Y"));

        let orients: Vec<&str> = html
            .split("spotlight style1 ")
            .skip(1)
            .filter_map(|s| s.split(' ').next())
            .collect();
        assert_eq!(vec!["orient-right", "orient-left", "orient-right"], orients);
        assert!(html.contains("<li>Jan/03/2024</li>"));
    }

    #[test]
    fn test_entries_use_translation() {
        let mut a = article("a", 5, false, "academic");
        a.translations.insert(
            "Portuguese".to_owned(),
            Translation {
                title: "Título".to_owned(),
                description: "Descrição".to_owned(),
            },
        );
        let html = render_entries(&[&a], &language("Portuguese", "%d/%m/%Y"));
        assert!(html.contains("<h3><a href=\"https://example.org/a\" target=\"_blank\">05/01/2024</a></h3>"));
        assert!(html.contains("<p><a href=\"https://example.org/a\" target=\"_blank\">Título</a></p>"));
        assert!(html.contains("<p>Descrição</p>"));

        let english = render_entries(&[&a], &language("English", "%b/%d/%Y"));
        assert!(english.contains(">a</a></p>"));
        assert!(english.contains("Jan/05/2024"));
    }

    #[test]
    fn test_render_page() -> Result<()> {
        let template = Template::new(
            "template.html",
            "<html lang=\"{lang}\"><title>{title}</title>{language_selector}{about}<h2>{work}</h2>{highlights}<h2>{more_work}</h2>{articles}<style>p {{ margin: 0 }}</style></html>",
        );
        let highlighted = article("featured", 9, true, "journalism");
        let listed = article("listed", 2, false, "academic");
        let html = render_page(
            &template,
            &language("English", "%b/%d/%Y"),
            "<p>About me</p>",
            &[&highlighted, &listed],
        )?;

        assert!(html.starts_with("<html lang=\"en\"><title>English title</title>"));
        assert!(html.contains("<p>About me</p>"));
        let spotlight = html.find("spotlight style1").unwrap();
        let more = html.find("<h2>More selected work</h2>").unwrap();
        let entry = html.find("<h3><a href=\"https://example.org/listed\"").unwrap();
        assert!(spotlight < more && more < entry);
        assert!(!html[..more].contains("https://example.org/listed"));
        assert!(html.ends_with("<style>p { margin: 0 }</style></html>"));
        Ok(())
    }
}
