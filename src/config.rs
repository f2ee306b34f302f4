//! Parser configuration.
//!
//! [`ParserConfig`] controls the few knobs the export format leaves open:
//! the media placeholder text, the label given to system notifications, and
//! which date order wins when a date like `3/4/23` is ambiguous.

use serde::{Deserialize, Serialize};

use crate::message::{MEDIA_PLACEHOLDER, SYSTEM_SENDER};

/// Configuration for chat export parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new().with_month_first(true);
/// assert!(config.month_first);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Body text denoting an omitted attachment (default: `<Media omitted>`).
    pub media_placeholder: String,

    /// Sender label assigned to system notifications
    /// (default: `group_notification`).
    pub system_sender: String,

    /// Try month-first date formats before day-first ones (default: false).
    /// Only matters for dates where both readings are valid.
    pub month_first: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            media_placeholder: MEDIA_PLACEHOLDER.to_string(),
            system_sender: SYSTEM_SENDER.to_string(),
            month_first: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the media placeholder text.
    #[must_use]
    pub fn with_media_placeholder(mut self, text: impl Into<String>) -> Self {
        self.media_placeholder = text.into();
        self
    }

    /// Sets the system notification sender label.
    #[must_use]
    pub fn with_system_sender(mut self, label: impl Into<String>) -> Self {
        self.system_sender = label.into();
        self
    }

    /// Prefers month-first (US) date order for ambiguous dates.
    #[must_use]
    pub fn with_month_first(mut self, month_first: bool) -> Self {
        self.month_first = month_first;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.media_placeholder, "<Media omitted>");
        assert_eq!(config.system_sender, "group_notification");
        assert!(!config.month_first);
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::new()
            .with_media_placeholder("<attachment>")
            .with_system_sender("system")
            .with_month_first(true);
        assert_eq!(config.media_placeholder, "<attachment>");
        assert_eq!(config.system_sender, "system");
        assert!(config.month_first);
    }
}
