//! System variable resolution.
//!
//! Replaces reserved `{{...}}` tokens (date, time, time zone, user identity,
//! clipboard) with runtime values. Resolution never fails: every degraded
//! source substitutes a fallback string instead of propagating an error.

use chrono::{DateTime, Local};
use launchpad_core::{AppError, AppResult};

use crate::parser::token_regex;

/// Substituted when the clipboard cannot be read.
pub const CLIPBOARD_FALLBACK: &str = "[clipboard unavailable]";

/// Identity of the requesting user, as supplied by the host application.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Display name; falls back to the literal `User` when unknown
    pub display_name: Option<String>,

    /// BCP 47 locale tag; falls back to `en` when unknown
    pub locale: Option<String>,
}

/// Source of the current wall-clock time and IANA time zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
    fn timezone(&self) -> String;
}

/// Real clock backed by the OS.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn timezone(&self) -> String {
        iana_time_zone::get_timezone().unwrap_or_else(|err| {
            tracing::debug!("Time zone lookup failed: {}", err);
            "UTC".to_string()
        })
    }
}

/// Async source of clipboard text.
///
/// Reading may prompt the user for permission on some platforms; this is the
/// only I/O the template system performs.
#[async_trait::async_trait]
pub trait ClipboardSource: Send + Sync {
    async fn read_text(&self) -> AppResult<String>;
}

/// Arboard-based clipboard implementation.
pub struct SystemClipboard;

#[async_trait::async_trait]
impl ClipboardSource for SystemClipboard {
    async fn read_text(&self) -> AppResult<String> {
        tokio::task::spawn_blocking(|| {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| AppError::Clipboard(format!("{}", e)))?;
            clipboard
                .get_text()
                .map_err(|e| AppError::Clipboard(format!("{}", e)))
        })
        .await
        .map_err(|e| AppError::Clipboard(format!("{}", e)))?
    }
}

/// Resolves reserved system tokens in a template.
pub struct SystemResolver {
    user: UserContext,
    clock: Box<dyn Clock>,
    clipboard: Box<dyn ClipboardSource>,
}

impl SystemResolver {
    /// Create a resolver backed by the real clock and clipboard.
    pub fn new(user: UserContext) -> Self {
        Self::with_parts(user, Box::new(SystemClock), Box::new(SystemClipboard))
    }

    /// Create a resolver with injected clock and clipboard sources.
    pub fn with_parts(
        user: UserContext,
        clock: Box<dyn Clock>,
        clipboard: Box<dyn ClipboardSource>,
    ) -> Self {
        Self {
            user,
            clock,
            clipboard,
        }
    }

    /// Replace every recognized system token in `text` with its runtime value.
    ///
    /// Matching is case-insensitive and ignores any `|...` annotation on the
    /// token. The clipboard is read at most once, and only when a clipboard
    /// token is actually present.
    pub async fn resolve(&self, text: &str) -> String {
        if !text.contains("{{") {
            return text.to_string();
        }

        let clipboard_value = if self.mentions_clipboard(text) {
            Some(self.read_clipboard().await)
        } else {
            None
        };

        let now = self.clock.now();

        token_regex()
            .replace_all(text, |caps: &regex::Captures| {
                let content = caps[1].trim();
                let name = match content.split_once('|') {
                    Some((name, _)) => name.trim(),
                    None => content,
                };

                match name.to_ascii_lowercase().as_str() {
                    "date" => now.format("%B %-d, %Y").to_string(),
                    "datetime" => now.format("%B %-d, %Y %H:%M").to_string(),
                    "time" => now.format("%H:%M").to_string(),
                    "timezone" => self.clock.timezone(),
                    "weekday" => now.format("%A").to_string(),
                    "user_name" => self
                        .user
                        .display_name
                        .clone()
                        .unwrap_or_else(|| "User".to_string()),
                    "user_locale" => self.user.locale.clone().unwrap_or_else(|| "en".to_string()),
                    "clipboard" => clipboard_value
                        .clone()
                        .unwrap_or_else(|| CLIPBOARD_FALLBACK.to_string()),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Whether the text contains a clipboard token in any casing.
    fn mentions_clipboard(&self, text: &str) -> bool {
        token_regex().captures_iter(text).any(|caps| {
            let content = caps[1].trim();
            let name = match content.split_once('|') {
                Some((name, _)) => name.trim(),
                None => content,
            };
            name.eq_ignore_ascii_case("clipboard")
        })
    }

    async fn read_clipboard(&self) -> String {
        match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("Clipboard read failed: {}", err);
                CLIPBOARD_FALLBACK.to_string()
            }
        }
    }
}
