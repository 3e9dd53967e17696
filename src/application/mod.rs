pub mod baseline;
pub mod detect;
pub mod extractor;
pub mod persist;
pub mod ranking;
pub mod signals;
pub mod spikes;
