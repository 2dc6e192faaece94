//! Assembles the home page and the category pages from the fragments in
//! [`crate::fragments`] and wraps them in the [`Layout`] shell.

use crate::config::{Category, Site};
use crate::fragments::{render_article_list, render_feature_cards, render_social_links, HOME_PAGE};
use crate::index::Index;
use crate::layout::{Layout, Shell};

/// Reveals the deferred header navigation once the reader has scrolled past
/// half of the hero portrait.
pub const NAV_REVEAL_SCRIPT: &str = r#"
    <script>
    (function() {
        var header = document.querySelector('.site-header');
        var heroImage = document.querySelector('.hero-media img');
        if (!header || !heroImage || !header.classList.contains('site-header--deferred')) { return; }

        function computeThreshold() {
            var rect = heroImage.getBoundingClientRect();
            var imageHeight = heroImage.offsetHeight || heroImage.naturalHeight || 0;
            return window.scrollY + rect.top + (imageHeight / 2);
        }

        var threshold = 0;

        function recalc() {
            threshold = computeThreshold();
            toggle();
        }

        function toggle() {
            if (threshold <= 0) {
                header.classList.remove('nav-visible');
                return;
            }

            if (window.scrollY >= threshold) {
                header.classList.add('nav-visible');
            } else {
                header.classList.remove('nav-visible');
            }
        }

        if (!heroImage.complete) {
            heroImage.addEventListener('load', recalc);
        }

        recalc();
        window.addEventListener('scroll', toggle, { passive: true });
        window.addEventListener('resize', recalc);
    })();
    </script>
    "#;

/// The empty state shown on a category page with no highlighted articles.
pub const NO_HIGHLIGHTS: &str = "Highlights coming soon.";

const HERO_LINK_SEPARATOR: &str =
    "\n                    <span class=\"hero-links-separator\" aria-hidden=\"true\">·</span>\n                    ";

/// Splits `bio` on blank lines and wraps each non-empty paragraph in a
/// `<p data-reveal>`.
pub fn render_bio(bio: &str) -> String {
    bio.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p data-reveal>{}</p>", p))
        .collect()
}

fn render_hero(site: &Site, categories: &[Category]) -> String {
    let links: Vec<String> = categories
        .iter()
        .map(|c| format!("<a href=\"{}\">{}</a>", c.file_name, c.title))
        .collect();
    format!(
        r#"
    <section class="hero">
        <div class="container hero-grid">
            <div class="hero-copy">
                <h1>{author}</h1>
                <p class="hero-role">{role}</p>
                {social}
                <div class="hero-links">
                    {links}
                </div>
            </div>
            <div class="hero-media">
                <img src="{portrait}" alt="Portrait of {author}" loading="lazy" />
            </div>
        </div>
    </section>
    "#,
        author = site.author,
        role = site.role,
        social = render_social_links(&site.social_links, "social-links-hero"),
        links = links.join(HERO_LINK_SEPARATOR),
        portrait = site.portrait,
    )
}

/// Renders `index.html`: the hero, the bio, and the deferred navigation.
pub fn render_home(layout: &Layout, categories: &[Category]) -> String {
    let site = layout.site;
    let mut main = render_hero(site, categories);
    main.push_str(&format!(
        r#"
    <section class="section bio-section">
        <div class="container narrow">
            <h2>Bio</h2>
            {bio}
        </div>
    </section>
    "#,
        bio = render_bio(&site.bio),
    ));

    layout.render(
        &Shell {
            title: &site.home_title,
            current: HOME_PAGE,
            description: Some(&site.home_description),
            extra_body_end: NAV_REVEAL_SCRIPT,
            defer_nav: true,
        },
        &main,
    )
}

/// Renders a category page: the title, the highlights (or the empty state),
/// and the remaining articles when there are any.
pub fn render_category(layout: &Layout, index: &Index) -> String {
    let category = index.category;
    let mut main = format!(
        r#"
        <section class="section section-title">
            <div class="container">
                <h1>{title}</h1>
            </div>
        </section>
        "#,
        title = category.title,
    );

    if index.highlights.is_empty() {
        main.push_str(&format!(
            r#"
            <section class="section">
                <div class="container">
                    <div class="empty-state">{empty}</div>
                </div>
            </section>
        "#,
            empty = NO_HIGHLIGHTS,
        ));
    } else {
        main.push_str(&format!(
            r#"
            <section class="section">
                <div class="container">
                    <h2>Highlights</h2>
                    <div class="feature-grid">{cards}</div>
                </div>
            </section>
            "#,
            cards = render_feature_cards(&index.highlights),
        ));
    }

    if !index.others.is_empty() {
        main.push_str(&format!(
            r#"
        <section class="section">
            <div class="container">
                <h2>More selected work</h2>
                <ul class="article-list">{items}</ul>
            </div>
        </section>
        "#,
            items = render_article_list(&index.others),
        ));
    }

    let title = format!("{} · {}", category.title, layout.site.author);
    layout.render(
        &Shell {
            title: &title,
            current: &category.file_name,
            description: None,
            extra_body_end: "",
            defer_nav: false,
        },
        &main,
    )
}
