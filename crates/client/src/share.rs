//! Copying and sharing article links.
//!
//! Clipboard and native share are platform capabilities behind traits. When
//! no native share is available, sharing falls back to copying the link.

use async_trait::async_trait;
use serde::Serialize;

/// Notice shown after a successful copy.
pub const COPIED_NOTICE: &str = "Link copied to clipboard!";

/// Notice shown after a successful native share.
pub const SHARED_NOTICE: &str = "Article shared successfully!";

/// Payload handed to a native share target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareData {
    pub fn for_article(title: &str, url: impl Into<String>) -> Self {
        Self {
            title: format!("Wikipedia: {title}"),
            text: format!("Check out this Wikipedia article about {title}"),
            url: url.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("share failed: {0}")]
    Share(String),
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ShareError>;
}

#[async_trait]
pub trait NativeShare: Send + Sync {
    async fn share(&self, data: &ShareData) -> Result<(), ShareError>;
}

/// Copy `url` and return the notice to display.
pub async fn copy_article_link(clipboard: &dyn Clipboard, url: &str) -> Result<&'static str, ShareError> {
    clipboard.write_text(url).await?;
    Ok(COPIED_NOTICE)
}

/// Share through `native` when present, otherwise copy the link.
pub async fn share_article(
    native: Option<&dyn NativeShare>, clipboard: &dyn Clipboard, data: &ShareData,
) -> Result<&'static str, ShareError> {
    let outcome = match native {
        Some(target) => target.share(data).await.map(|_| SHARED_NOTICE),
        None => copy_article_link(clipboard, &data.url).await,
    };

    if let Err(e) = &outcome {
        tracing::warn!(error = %e, url = %data.url, "error sharing article");
    }

    outcome
}
