pub mod blob_store;
pub mod market_signal;
pub mod mention_source;
