pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::detect::{BaselineReport, DetectTrendingUseCase, TrendScan};
use crate::application::persist::SaveOpportunitiesUseCase;
use crate::application::ranking;
use crate::config::{AppConfig, MarketDataMode};
use crate::domain::entities::mention_record::MentionRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::blob_store::BlobStore;
use crate::domain::ports::market_signal::MarketSignal;
use crate::domain::ports::mention_source::MentionSource;
use crate::domain::values::detector_config::DetectorConfig;
use crate::domain::values::watchlist::Watchlist;
use crate::infrastructure::corpus::csv_source::CsvMentionSource;
use crate::infrastructure::market::neutral::NeutralSignal;
use crate::infrastructure::market::yahoo::{YahooChartClient, YahooPriceSignal, YahooVolumeSignal};
use crate::infrastructure::storage::local::LocalBlobStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct TrendWatch {
    detect_uc: DetectTrendingUseCase,
    save_uc: SaveOpportunitiesUseCase,
}

impl TrendWatch {
    pub fn new(config: &AppConfig) -> Self {
        let store: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.data_dir));
        let source: Arc<dyn MentionSource> =
            Arc::new(CsvMentionSource::new(store.clone(), config.corpus_prefix.clone()));

        let volume: Arc<dyn MarketSignal>;
        let price: Arc<dyn MarketSignal>;
        match config.market_data {
            MarketDataMode::Yahoo => {
                let client = Arc::new(YahooChartClient::new(&config.detector.watchlist));
                volume = Arc::new(YahooVolumeSignal::new(client.clone()));
                price = Arc::new(YahooPriceSignal::new(client));
            }
            MarketDataMode::Disabled => {
                let neutral = config.detector.neutral_score;
                volume = Arc::new(NeutralSignal::new("volume_disabled", neutral));
                price = Arc::new(NeutralSignal::new("price_disabled", neutral));
            }
        }

        Self::with_providers(
            source,
            store,
            volume,
            price,
            config.detector.clone(),
            config.output_prefix.clone(),
        )
    }

    pub fn with_providers(
        source: Arc<dyn MentionSource>,
        store: Arc<dyn BlobStore>,
        volume: Arc<dyn MarketSignal>,
        price: Arc<dyn MarketSignal>,
        detector: DetectorConfig,
        output_prefix: String,
    ) -> Self {
        Self {
            detect_uc: DetectTrendingUseCase::new(source, volume, price, detector),
            save_uc: SaveOpportunitiesUseCase::new(store, output_prefix),
        }
    }

    // Delegating methods
    pub async fn detect(&self, now: DateTime<Utc>) -> TrendScan {
        self.detect_uc.execute(now).await
    }

    pub async fn detect_records(&self, records: &[MentionRecord], now: DateTime<Utc>) -> TrendScan {
        self.detect_uc.analyze(records, now).await
    }

    pub async fn save(&self, scan: &TrendScan) -> Result<Option<String>, DomainError> {
        self.save_uc.execute(&scan.opportunities, scan.scanned_at).await
    }

    pub fn summary(&self, scan: &TrendScan, top_n: usize) -> String {
        ranking::summary(&scan.opportunities, top_n)
    }

    pub async fn baseline(&self, symbol: &str, now: DateTime<Utc>) -> BaselineReport {
        self.detect_uc.baseline(symbol, now).await
    }

    pub fn extract_symbols(&self, text: &str) -> Vec<String> {
        self.detect_uc.extractor().extract(text).into_iter().collect()
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.detect_uc.config().watchlist
    }
}
