//! Partitions [`Article`]s into per-category indices. Each [`Index`] holds the
//! category's highlighted and non-highlighted articles, each sorted most
//! recent first.

use crate::article::Article;
use crate::config::Category;

/// The articles belonging to one category page.
#[derive(Debug)]
pub struct Index<'a> {
    pub category: &'a Category,

    /// Articles flagged `Highlight`, most recent first.
    pub highlights: Vec<&'a Article>,

    /// Everything else in the category, most recent first.
    pub others: Vec<&'a Article>,
}

/// Sorts `articles` by date, most recent first. Ties keep their input order.
pub fn sort_by_date(articles: &mut [&Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Returns every article in `articles` ordered most recent first, keeping
/// input order for ties.
pub fn by_date(articles: &[Article]) -> Vec<&Article> {
    let mut sorted: Vec<&Article> = articles.iter().collect();
    sort_by_date(&mut sorted);
    sorted
}

fn belongs_to(article: &Article, category: &Category) -> bool {
    article.category.to_lowercase() == category.name.to_lowercase()
}

/// Returns the articles whose category matches none of `categories`, in
/// input order.
pub fn unindexed<'a>(categories: &[Category], articles: &'a [Article]) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| !categories.iter().any(|c| belongs_to(a, c)))
        .collect()
}

/// Builds one [`Index`] per category, in the order the categories are given.
/// Articles whose category matches none of `categories` are left out with a
/// warning.
pub fn index_articles<'a>(categories: &'a [Category], articles: &'a [Article]) -> Vec<Index<'a>> {
    for article in unindexed(categories, articles) {
        tracing::warn!(
            title = %article.title,
            category = %article.category,
            "Article matches no configured category; leaving it out"
        );
    }
    categories
        .iter()
        .map(|category| {
            let mut scoped: Vec<&Article> = articles
                .iter()
                .filter(|a| belongs_to(a, category))
                .collect();
            sort_by_date(&mut scoped);
            let (highlights, others) = scoped.into_iter().partition(|a| a.highlight);
            Index {
                category,
                highlights,
                others,
            }
        })
        .collect()
}
