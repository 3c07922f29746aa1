//! Line-oriented live search prompt.
//!
//! Plain lines feed the debounced live search. Lines starting with `!` are
//! explicit submissions and lines starting with `:` are commands. Published
//! search states are printed as they arrive.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use wikisearch_client::{CardAction, DisplayModel, SearchController, SearchState, copy_article_link, share_article};
use wikisearch_core::ThemeStore;

use crate::clipboard::SystemClipboard;
use crate::view;

const HELP: &str = "\
type to search live, or:
  !<term>      search and remember <term>
  :random      show a random article
  :history     list recent searches
  :h <n>       search history entry <n> again
  :rm <term>   forget <term>
  :copy <n>    copy the link of card <n>
  :share <n>   share card <n>
  :read <n>    toggle reading mode on card <n>
  :theme       switch between light and dark
  :quit        exit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Live(String),
    Submit(String),
    Random,
    History,
    RunHistory(usize),
    Remove(String),
    Copy(usize),
    Share(usize),
    Read(usize),
    Theme,
    Help,
    Quit,
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();

        if let Some(term) = line.strip_prefix('!') {
            return Input::Submit(term.trim().to_string());
        }
        let Some(command) = line.strip_prefix(':') else {
            return Input::Live(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match (name, arg) {
            ("random", _) => Input::Random,
            ("history", _) => Input::History,
            ("theme", _) => Input::Theme,
            ("help" | "?", _) => Input::Help,
            ("quit" | "q", _) => Input::Quit,
            ("rm", term) if !term.is_empty() => Input::Remove(term.to_string()),
            ("h", n) => position(n).map_or_else(|| Input::Invalid(line.to_string()), Input::RunHistory),
            ("copy", n) => position(n).map_or_else(|| Input::Invalid(line.to_string()), Input::Copy),
            ("share", n) => position(n).map_or_else(|| Input::Invalid(line.to_string()), Input::Share),
            ("read", n) => position(n).map_or_else(|| Input::Invalid(line.to_string()), Input::Read),
            _ => Input::Invalid(line.to_string()),
        }
    }
}

/// 1-based position to index.
fn position(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

pub async fn run(controller: Arc<SearchController>, themes: ThemeStore, debounce: Duration) -> Result<()> {
    let mut theme = themes.current().await;
    let mut states = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let live = controller.live_search(debounce);
    let clipboard = SystemClipboard;
    let mut shown: Option<DisplayModel> = None;

    println!("{HELP}");

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                shown = cards_on_screen(&state);
                view::print_state(&state, theme);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match Input::parse(&line) {
                    Input::Live(term) => live.call(term),
                    Input::Submit(term) => {
                        live.cancel();
                        let controller = controller.clone();
                        tokio::spawn(async move { controller.submit(&term).await });
                    }
                    Input::Random => {
                        live.cancel();
                        let controller = controller.clone();
                        tokio::spawn(async move { controller.random().await });
                    }
                    Input::History => view::print_history(&controller.history().await, theme),
                    Input::RunHistory(index) => {
                        let entries = controller.history().await;
                        let Some(term) = entries.get(index).cloned() else {
                            println!("no history entry at position {}", index + 1);
                            continue;
                        };
                        live.cancel();
                        let controller = controller.clone();
                        tokio::spawn(async move { controller.activate_history(&term).await });
                    }
                    Input::Remove(term) => {
                        if !controller.remove_history(&term).await {
                            println!("'{term}' is not in history");
                        }
                        view::print_history(&controller.history().await, theme);
                    }
                    Input::Copy(index) | Input::Share(index) | Input::Read(index) if card_missing(&shown, index) => {
                        println!("no card at position {}", index + 1);
                    }
                    Input::Copy(index) => {
                        if let Some(url) = find_action(&shown, index, |action| match action {
                            CardAction::CopyLink { url } => Some(url.clone()),
                            _ => None,
                        }) {
                            match copy_article_link(&clipboard, &url).await {
                                Ok(notice) => view::print_notice(notice),
                                Err(e) => tracing::warn!(error = %e, "error copying link"),
                            }
                        }
                    }
                    Input::Share(index) => {
                        if let Some(data) = find_action(&shown, index, |action| match action {
                            CardAction::Share(data) => Some(data.clone()),
                            _ => None,
                        }) && let Ok(notice) = share_article(None, &clipboard, &data).await
                        {
                            view::print_notice(notice);
                        }
                    }
                    Input::Read(index) => {
                        if let Some(model) = shown.as_mut() {
                            model.toggle_reading_mode(index);
                            view::print_model(model, theme);
                        }
                    }
                    Input::Theme => {
                        theme = themes.toggle().await;
                        println!("theme: {theme}");
                    }
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                    Input::Invalid(line) => println!("unrecognized command '{line}', try :help"),
                }
            }
        }
    }

    live.cancel();
    Ok(())
}

/// Cards the `:copy`, `:share` and `:read` commands act on after `state` is shown.
fn cards_on_screen(state: &SearchState) -> Option<DisplayModel> {
    match state {
        SearchState::Rendered(model) => Some(model.clone()),
        _ => None,
    }
}

fn card_missing(shown: &Option<DisplayModel>, index: usize) -> bool {
    shown.as_ref().is_none_or(|model| index >= model.len())
}

fn find_action<R>(shown: &Option<DisplayModel>, index: usize, pick: impl Fn(&CardAction) -> Option<R>) -> Option<R> {
    shown.as_ref()?.cards.get(index)?.actions.iter().find_map(pick)
}
