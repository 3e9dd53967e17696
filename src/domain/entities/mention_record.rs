use crate::domain::values::sentiment_label::SentimentLabel;
use chrono::{DateTime, Utc};

/// One social-media post or comment as stored by the collectors.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub sentiment_label: Option<SentimentLabel>,
}

impl MentionRecord {
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        title: impl Into<String>,
        content: impl Into<String>,
        sentiment_label: Option<SentimentLabel>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            title: title.into(),
            content: content.into(),
            sentiment_label,
        }
    }

    /// Title and content joined the way symbols are searched.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}
