//! The page shell shared by the home and category pages: head, header with
//! navigation, footer with social links, and the scroll-reveal script.

use crate::config::Site;
use crate::fragments::{render_nav, render_social_links, NavItem, HOME_PAGE};

/// Reveals `[data-reveal]` elements as they scroll into view.
pub const SCROLL_REVEAL_SCRIPT: &str = r#"
    <script>
    (function() {
        var elements = Array.prototype.slice.call(document.querySelectorAll('[data-reveal]'));
        if (!elements.length) { return; }

        function revealAll() {
            elements.forEach(function(el) { el.classList.add('is-visible'); });
        }

        var reduceMotionQuery = window.matchMedia ? window.matchMedia('(prefers-reduced-motion: reduce)') : null;

        if (!('IntersectionObserver' in window)) {
            revealAll();
            return;
        }

        if (reduceMotionQuery && reduceMotionQuery.matches) {
            revealAll();
            return;
        }

        var observer = new IntersectionObserver(function(entries) {
            entries.forEach(function(entry) {
                if (entry.isIntersecting || entry.intersectionRatio > 0) {
                    entry.target.classList.add('is-visible');
                    observer.unobserve(entry.target);
                }
            });
        }, {
            threshold: 0.2,
            rootMargin: '0px 0px -10% 0px'
        });

        elements.forEach(function(el) { observer.observe(el); });

        if (reduceMotionQuery) {
            reduceMotionQuery.addEventListener('change', function(event) {
                if (event.matches) {
                    observer.disconnect();
                    revealAll();
                }
            });
        }
    })();
    </script>
"#;

/// Everything a page needs from the site that doesn't vary page to page.
pub struct Layout<'a> {
    pub site: &'a Site,
    pub nav: &'a [NavItem<'a>],

    /// The year printed in the footer's copyright line.
    pub year: i32,
}

/// The per-page parts of the shell.
pub struct Shell<'a> {
    /// The contents of `<title>`.
    pub title: &'a str,

    /// The file name of the page being rendered, used to mark the current
    /// navigation entry.
    pub current: &'a str,

    /// The meta description. Defaults to [`Site::description`].
    pub description: Option<&'a str>,

    /// Markup appended after the scroll-reveal script.
    pub extra_body_end: &'a str,

    /// Hides the header navigation until a page script reveals it.
    pub defer_nav: bool,
}

impl Layout<'_> {
    /// Wraps `main` in the page shell.
    pub fn render(&self, shell: &Shell, main: &str) -> String {
        let description = shell.description.unwrap_or(&self.site.description);
        let header_classes = if shell.defer_nav {
            "site-header site-header--deferred"
        } else {
            "site-header"
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <meta name="description" content="{description}" />
    <title>{title}</title>
    <link rel="preconnect" href="https://fonts.googleapis.com" />
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin />
        <link href="{fonts}" rel="stylesheet" />
            <link rel="stylesheet" href="{stylesheet}" />
            <script src="{kit}" crossorigin="anonymous"></script>
</head>
<body>
    <header class="{header_classes}">
        <div class="container">
            <a class="brand" href="{home}">{author}</a>
            <nav class="site-nav">{nav}</nav>
        </div>
    </header>
    <main>
        {main}
    </main>
    <footer class="site-footer">
        <div class="container">
                <p>© {year} {author}. All rights reserved.</p>
                {social}
        </div>
    </footer>
        {reveal}
    {extra}
</body>
</html>"#,
            description = description,
            title = shell.title,
            fonts = self.site.fonts,
            stylesheet = self.site.stylesheet,
            kit = self.site.font_awesome_kit,
            header_classes = header_classes,
            home = HOME_PAGE,
            author = self.site.author,
            nav = render_nav(self.nav, shell.current),
            main = main,
            year = self.year,
            social = render_social_links(&self.site.social_links, "social-links-footer"),
            reveal = SCROLL_REVEAL_SCRIPT,
            extra = shell.extra_body_end,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutil::site;

    #[test]
    fn test_render_shell() {
        let site = site();
        let nav = vec![NavItem {
            label: "Home",
            href: "index.html",
        }];
        let layout = Layout {
            site: &site,
            nav: &nav,
            year: 2025,
        };
        let html = layout.render(
            &Shell {
                title: "Page",
                current: "index.html",
                description: None,
                extra_body_end: "<!-- extra -->",
                defer_nav: false,
            },
            "MAIN",
        );

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<meta name=\"description\" content=\"Default description\" />"));
        assert!(html.contains("<title>Page</title>"));
        assert!(html.contains("<header class=\"site-header\">"));
        assert!(html.contains("<a href=\"index.html\" aria-current=\"page\">Home</a>"));
        assert!(html.contains("<p>© 2025 Jane Doe. All rights reserved.</p>"));
        assert!(html.contains("social-links social-links-footer"));
        assert!(html.contains("IntersectionObserver"));
        assert!(html.ends_with("<!-- extra -->\n</body>\n</html>"));
    }

    #[test]
    fn test_render_deferred_header_with_description() {
        let site = site();
        let layout = Layout {
            site: &site,
            nav: &[],
            year: 2025,
        };
        let html = layout.render(
            &Shell {
                title: "Page",
                current: "index.html",
                description: Some("Custom"),
                extra_body_end: "",
                defer_nav: true,
            },
            "",
        );
        assert!(html.contains("content=\"Custom\""));
        assert!(html.contains("<header class=\"site-header site-header--deferred\">"));
    }
}
