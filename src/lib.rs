//! The library code for the `folio` portfolio site generator. A build is a
//! single pass with two distinct steps:
//!
//! 1. Loading articles from the CSV table into memory ([`crate::article`])
//! 2. Rendering the articles into pages and writing them to disk
//!    ([`crate::build`])
//!
//! The second step comes in two flavors. The site build partitions articles
//! by category and highlight flag ([`crate::index`]) and renders a home page
//! plus one page per category ([`crate::pages`]). The bilingual build renders
//! every article into one page per language by filling a shared template
//! ([`crate::bilingual`]).
//!
//! Every page is rendered in memory before anything is written, so a bad row
//! leaves the output directory untouched.
//!
//! Separately, [`crate::scrape`] collects article metadata from news-site
//! pages into a CSV shaped like the articles table.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod bilingual;
pub mod build;
pub mod config;
pub mod fragments;
pub mod index;
pub mod layout;
pub mod pages;
pub mod sanitize;
pub mod scrape;
pub mod template;
mod util;
pub mod write;

#[cfg(test)]
mod testutil;
