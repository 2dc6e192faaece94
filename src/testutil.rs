//! Fixtures shared by the unit tests.

use crate::article::Article;
use crate::config::{Site, SocialLink};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

pub fn site() -> Site {
    Site {
        author: "Jane Doe".to_owned(),
        role: "WRITER".to_owned(),
        description: "Default description".to_owned(),
        home_title: "Jane Doe · Writer".to_owned(),
        home_description: "Home description".to_owned(),
        portrait: "static/img/me.jpg".to_owned(),
        stylesheet: "assets/css/style.css".to_owned(),
        fonts: "https://fonts.example/css".to_owned(),
        font_awesome_kit: "https://kit.example/k.js".to_owned(),
        bio: "One.\n\n  Two.  \n\n\n".to_owned(),
        social_links: vec![SocialLink {
            label: "GitHub".to_owned(),
            url: "https://github.com/jane".to_owned(),
            icon: "fa-brands fa-github".to_owned(),
        }],
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

/// An article dated `day` January 2024 whose other text fields are derived
/// from `title`.
pub fn article(title: &str, day: u32, highlight: bool, category: &str) -> Article {
    Article {
        title: title.to_owned(),
        publication: format!("{} publication", title),
        description: format!("{} description", title),
        photo: format!("{}.jpg", title),
        url: format!("https://example.org/{}", title),
        date: date(2024, 1, day),
        highlight,
        category: category.to_owned(),
        translations: BTreeMap::new(),
    }
}
