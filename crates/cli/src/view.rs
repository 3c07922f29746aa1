//! Applies display models to the terminal.

use std::borrow::Cow;

use colored::{ColoredString, Colorize};
use wikisearch_client::{Card, DisplayModel, SearchState};
use wikisearch_core::Theme;

/// Column at which reading-mode snippets wrap.
const READING_WIDTH: usize = 72;

/// Title styling per theme; dark terminals get the bright variants.
fn title(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.blue().bold(),
        Theme::Dark => text.bright_cyan().bold(),
    }
}

fn muted(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.dimmed(),
        Theme::Dark => text.bright_black(),
    }
}

pub fn print_state(state: &SearchState, theme: Theme) {
    match state {
        SearchState::Idle => {}
        SearchState::Loading => println!("{}", muted("searching...", theme)),
        SearchState::Rendered(model) => print_model(model, theme),
        SearchState::Empty(message) => println!("{}", message.yellow()),
        SearchState::Errored(message) => println!("{}", message.red()),
    }
}

pub fn print_model(model: &DisplayModel, theme: Theme) {
    println!("{}", model.header.bold());
    for (index, card) in model.cards.iter().enumerate() {
        println!();
        print_card(index + 1, card, theme);
    }
}

fn print_card(position: usize, card: &Card, theme: Theme) {
    println!("{} {}", format!("[{position}]").bold(), title(&card.title, theme));

    if card.reading_mode {
        println!();
        for line in reading_lines(&card.snippet) {
            println!("      {line}");
        }
        println!();
    } else {
        println!("    {}", card.snippet);
    }

    if let Some(image) = &card.image {
        println!("    {} {}", muted("image:", theme), image.src);
    }
    println!("    {} {}", muted("read:", theme), card.read_url.underline());
    println!(
        "    {}",
        muted(&format!(":copy {position}  :share {position}  :read {position}"), theme)
    );
}

pub fn print_history(entries: &[String], theme: Theme) {
    if entries.is_empty() {
        println!("{}", muted("no recent searches", theme));
        return;
    }
    for (index, term) in entries.iter().enumerate() {
        println!("{} {term}", format!("{}.", index + 1).bold());
    }
}

pub fn print_notice(message: &str) {
    println!("{}", message.green());
}

fn reading_lines(snippet: &str) -> Vec<Cow<'_, str>> {
    textwrap::wrap(snippet, READING_WIDTH)
}
