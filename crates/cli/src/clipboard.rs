//! System clipboard via arboard.
//!
//! Terminals have no native share target, so this is the only share
//! collaborator the CLI provides.

use async_trait::async_trait;
use wikisearch_client::{Clipboard, ShareError};

pub struct SystemClipboard;

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ShareError> {
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(text)
        })
        .await
        .map_err(|e| ShareError::Clipboard(e.to_string()))?
        .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}
