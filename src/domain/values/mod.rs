pub mod alert_level;
pub mod detector_config;
pub mod sentiment_label;
pub mod signal_weights;
pub mod watchlist;
