//! Display model for search results.
//!
//! [`Renderer::render`] is a pure function from enriched results to a
//! [`DisplayModel`]; applying the model to an actual UI is left to the caller.
//!
//! Snippets are cleaned with a tag-matching regex, not an HTML parser. The
//! result is lossy on purpose: entities are left alone and a stray `<` without
//! a closing `>` survives.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::share::ShareData;
use crate::wiki::{SearchResult, article_url};

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Remove every `<tag>`-shaped substring.
pub fn strip_tags(input: &str) -> Cow<'_, str> {
    TAG_PATTERN.replace_all(input, "")
}

/// Everything needed to draw a results area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    /// Count header, e.g. "Found 2 results".
    pub header: String,
    pub cards: Vec<Card>,
}

/// One result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    /// Snippet with markup stripped.
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<CardImage>,
    /// External "Read Article" link.
    pub read_url: String,
    pub actions: Vec<CardAction>,
    /// Presentation toggle; carries no data.
    pub reading_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardImage {
    pub src: String,
    pub alt: String,
}

/// Affordances offered on every card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardAction {
    CopyLink { url: String },
    Share(ShareData),
    ToggleReadingMode,
}

impl DisplayModel {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Flip reading mode on card `index`, returning the new value.
    pub fn toggle_reading_mode(&mut self, index: usize) -> Option<bool> {
        let card = self.cards.get_mut(index)?;
        card.reading_mode = !card.reading_mode;
        Some(card.reading_mode)
    }
}

/// Builds display models; holds only the link base.
#[derive(Debug, Clone)]
pub struct Renderer {
    article_base: String,
}

impl Renderer {
    pub fn new(article_base: impl Into<String>) -> Self {
        Self { article_base: article_base.into() }
    }

    pub fn render(&self, results: &[SearchResult]) -> DisplayModel {
        DisplayModel {
            header: format!("Found {} results", results.len()),
            cards: results.iter().map(|r| self.card(r)).collect(),
        }
    }

    fn card(&self, result: &SearchResult) -> Card {
        let read_url = article_url(&self.article_base, result.page_id);

        Card {
            title: result.title.clone(),
            snippet: strip_tags(&result.snippet).into_owned(),
            image: result
                .thumbnail
                .as_ref()
                .map(|src| CardImage { src: src.clone(), alt: result.title.clone() }),
            actions: vec![
                CardAction::CopyLink { url: read_url.clone() },
                CardAction::Share(ShareData::for_article(&result.title, read_url.clone())),
                CardAction::ToggleReadingMode,
            ],
            read_url,
            reading_mode: false,
        }
    }
}
