//! The fixed HTML fragments that category pages are assembled from: feature
//! cards for highlighted articles, list items for the rest, plus the
//! navigation and social-link blocks shared with the page shell.
//!
//! Article fields are interpolated as they come out of
//! [`crate::sanitize::sanitize`]; descriptions may carry inline links, so
//! nothing is HTML-escaped here.

use crate::article::Article;
use crate::config::{Category, SocialLink};
use chrono::NaiveDateTime;

/// The date format used on category pages, e.g. `Mar 05, 2024`.
pub const CARD_DATE_FORMAT: &str = "%b %d, %Y";

/// The home page's file name.
pub const HOME_PAGE: &str = "index.html";

pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(CARD_DATE_FORMAT).to_string()
}

/// A navigation entry: its label and target file.
pub struct NavItem<'a> {
    pub label: &'a str,
    pub href: &'a str,
}

/// Returns the navigation entries: the home page followed by one entry per
/// category page.
pub fn nav_items(categories: &[Category]) -> Vec<NavItem<'_>> {
    let mut items = vec![NavItem {
        label: "Home",
        href: HOME_PAGE,
    }];
    items.extend(categories.iter().map(|c| NavItem {
        label: &c.title,
        href: &c.file_name,
    }));
    items
}

/// Renders the navigation links. The entry whose `href` equals `current` is
/// marked with `aria-current="page"`.
pub fn render_nav(items: &[NavItem], current: &str) -> String {
    let mut out = String::new();
    for item in items {
        let state = if item.href == current {
            " aria-current=\"page\""
        } else {
            ""
        };
        out.push_str(&format!("<a href=\"{}\"{}>{}</a>", item.href, state, item.label));
    }
    out
}

/// Renders the social-link list with the base `social-links` class plus
/// `extra_class` when it isn't empty.
pub fn render_social_links(links: &[SocialLink], extra_class: &str) -> String {
    let classes = if extra_class.is_empty() {
        "social-links".to_owned()
    } else {
        format!("social-links {}", extra_class)
    };

    let mut items = String::new();
    for link in links {
        items.push_str(&format!(
            r#"
            <li>
                <a class="social-link" href="{url}" target="_blank" rel="noopener" aria-label="{label}">
                    <i class="{icon}" aria-hidden="true"></i>
                    <span class="sr-only">{label}</span>
                </a>
            </li>
            "#,
            url = link.url,
            label = link.label,
            icon = link.icon,
        ));
    }
    format!("<ul class=\"{}\">{}</ul>", classes, items)
}

/// Renders one feature card per article, in order.
pub fn render_feature_cards(articles: &[&Article]) -> String {
    let mut out = String::new();
    for article in articles {
        out.push_str(&format!(
            r#"
            <article class="feature-card" data-reveal>
                <div class="feature-media">
                    <img src="{photo}" alt="Illustration for {title}" loading="lazy" />
                </div>
                <div class="feature-content">
                    <p class="feature-meta">{date} · {publication}</p>
                    <h3><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
                    <p>{description}</p>
                    <a class="feature-link" href="{url}" target="_blank" rel="noopener">Read more<span aria-hidden="true"> →</span></a>
                </div>
            </article>
            "#,
            photo = article.photo,
            title = article.title,
            date = format_date(&article.date),
            publication = article.publication,
            url = article.url,
            description = article.description,
        ));
    }
    out
}

/// Renders one list item per article, in order.
pub fn render_article_list(articles: &[&Article]) -> String {
    let mut out = String::new();
    for article in articles {
        out.push_str(&format!(
            r#"
            <li class="article-item" data-reveal>
                <div class="article-meta">
                    <span>{date}</span>
                    <span>{publication}</span>
                </div>
                <a class="article-title" href="{url}" target="_blank" rel="noopener">{title}</a>
                <p>{description}</p>
            </li>
            "#,
            date = format_date(&article.date),
            publication = article.publication,
            url = article.url,
            title = article.title,
            description = article.description,
        ));
    }
    out
}
