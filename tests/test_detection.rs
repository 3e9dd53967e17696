//! Detection runs over in-memory corpora: spikes, scoring, classification,
//! ranking, and degraded market data.

mod common;

use common::*;
use std::sync::Arc;
use trendwatch::domain::values::alert_level::AlertLevel;
use trendwatch::domain::values::sentiment_label::SentimentLabel;
use trendwatch::domain::values::signal_weights::SignalWeights;

#[tokio::test]
async fn test_empty_corpus_yields_empty_scan() {
    let (v, p) = zero_market();
    let h = harness(vec![], v, p, config(&["GME"]));
    let scan = h.tw.detect(now()).await;
    assert_eq!(scan.records_scanned, 0);
    assert_eq!(scan.spikes_detected, 0);
    assert_eq!(scan.total_opportunities, 0);
    assert!(scan.opportunities.is_empty());
}

#[tokio::test]
async fn test_gme_tenfold_spike_end_to_end() {
    let mut records = history("GME", 1, 30);
    records.extend(recent("GME", 10));

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME", "AMC"]));
    let scan = h.tw.detect(now()).await;

    assert_eq!(scan.spikes_detected, 1);
    let opp = &scan.opportunities[0];
    assert_eq!(opp.symbol, "GME");
    assert_eq!(opp.baseline_mentions, 1.0);
    assert_eq!(opp.recent_mentions, 10);
    assert_eq!(opp.spike_ratio, 10.0);
    assert_eq!(opp.individual_scores.reddit_score, 1.0);
    assert_eq!(opp.composite_score, 0.4);
    assert_eq!(opp.alert_level, AlertLevel::Medium);
    assert_eq!(opp.reason, "10.0x mention spike (10 mentions vs 1.0 baseline)");
    assert_eq!(opp.detected_at, now());
}

#[tokio::test]
async fn test_symbol_without_history_not_flagged() {
    let mut records = recent("AMC", 5);
    records.extend(history("GME", 1, 10));

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME", "AMC"]));
    let scan = h.tw.detect(now()).await;

    assert!(scan.opportunities.iter().all(|o| o.symbol != "AMC"));
    assert_eq!(scan.total_opportunities, 0);
}

#[tokio::test]
async fn test_spike_ratio_formula_holds_for_every_spike() {
    let mut records = history("GME", 2, 20);
    records.extend(recent("GME", 9));
    records.extend(history("AMC", 3, 5));
    records.extend(recent("AMC", 30));
    records.extend(history("TSLA", 4, 10));
    records.extend(recent("TSLA", 4));

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME", "AMC", "TSLA"]));
    let scan = h.tw.detect(now()).await;

    assert_eq!(scan.spikes_detected, 2, "TSLA is below 3x");
    for opp in &scan.opportunities {
        assert_eq!(
            opp.spike_ratio,
            opp.recent_mentions as f64 / opp.baseline_mentions.max(0.1)
        );
        assert!(opp.spike_ratio >= 3.0);
        assert!((0.0..=1.0).contains(&opp.composite_score));
    }
}

#[tokio::test]
async fn test_exact_boundary_classifies_high() {
    // ratio 6 -> mention score 0.6; market signals 0.6; sentiment unweighted
    let mut records = history("GME", 1, 10);
    records.extend(recent("GME", 6));

    let mut cfg = config(&["GME"]);
    cfg.weights = SignalWeights::new(0.5, 0.25, 0.25, 0.0).unwrap();
    let h = harness(
        records,
        Arc::new(StaticSignal::constant(0.6)),
        Arc::new(StaticSignal::constant(0.6)),
        cfg,
    );
    let scan = h.tw.detect(now()).await;

    let opp = &scan.opportunities[0];
    assert!((opp.composite_score - 0.6).abs() < 1e-12);
    assert_eq!(opp.alert_level, AlertLevel::High);
    assert_eq!(opp.risk_warning, "HIGH RISK - Volatile, significant risk of loss");
}

#[tokio::test]
async fn test_equal_signals_at_point_six_classify_high() {
    // mention: 30 recent vs 5/day -> 0.6; sentiment: 18/30 bullish vs none -> 0.6
    let mut records = Vec::new();
    for d in 1..=4 {
        for i in 0..5 {
            records.push(labelled(&format!("h{d}-{i}"), "GME", 24 * d + 2, SentimentLabel::OneStar));
        }
    }
    for i in 0..30 {
        let label = if i < 18 { SentimentLabel::FiveStars } else { SentimentLabel::ThreeStars };
        records.push(labelled(&format!("r{i}"), "GME", 1, label));
    }

    let h = harness(
        records,
        Arc::new(StaticSignal::constant(0.6)),
        Arc::new(StaticSignal::constant(0.6)),
        config(&["GME"]),
    );
    let scan = h.tw.detect(now()).await;

    let opp = &scan.opportunities[0];
    let s = &opp.individual_scores;
    for score in [s.reddit_score, s.volume_score, s.price_score, s.sentiment_score] {
        assert!((score - 0.6).abs() < 1e-12);
    }
    assert!((opp.composite_score - 0.6).abs() < 1e-12);
    assert_eq!(opp.alert_level, AlertLevel::High);
}

#[tokio::test]
async fn test_extreme_tier_with_strong_market_signals() {
    let mut records = history("GME", 1, 10);
    records.extend(recent("GME", 20));

    let h = harness(
        records,
        Arc::new(StaticSignal::constant(0.9)),
        Arc::new(StaticSignal::constant(1.0)),
        config(&["GME"]),
    );
    let scan = h.tw.detect(now()).await;
    let opp = &scan.opportunities[0];
    // 0.4 + 0.27 + 0.2 + 0
    assert!((opp.composite_score - 0.87).abs() < 1e-12);
    assert_eq!(opp.alert_level, AlertLevel::Extreme);
    assert_eq!(
        opp.risk_warning,
        "EXTREME RISK - 90%+ failure rate, most likely pump & dump"
    );
}

#[tokio::test]
async fn test_failed_market_signal_degrades_to_neutral() {
    let mut records = history("GME", 1, 10);
    records.extend(recent("GME", 10));
    records.extend(history("AMC", 1, 10));
    records.extend(recent("AMC", 10));

    let volume = Arc::new(StaticSignal::constant(0.5).failing_for("GME"));
    let price = Arc::new(StaticSignal::constant(0.5));
    let h = harness(records, volume, price, config(&["GME", "AMC"]));
    let scan = h.tw.detect(now()).await;

    assert_eq!(scan.total_opportunities, 2);
    assert_eq!(scan.signal_failures, 1);

    let gme = scan.opportunities.iter().find(|o| o.symbol == "GME").unwrap();
    let amc = scan.opportunities.iter().find(|o| o.symbol == "AMC").unwrap();
    assert_eq!(gme.individual_scores.volume_score, 0.0);
    assert_eq!(gme.individual_scores.price_score, 0.5);
    assert_eq!(amc.individual_scores.volume_score, 0.5);
    assert!(amc.composite_score > gme.composite_score);
    assert_eq!(scan.opportunities[0].symbol, "AMC");
}

#[tokio::test]
async fn test_market_data_only_requested_for_spikes() {
    let mut records = history("GME", 1, 10);
    records.extend(recent("GME", 10));
    records.extend(history("AMC", 5, 10));
    records.extend(recent("AMC", 5));

    let volume = Arc::new(StaticSignal::constant(0.1));
    let price = Arc::new(StaticSignal::constant(0.1));
    let h = harness(records, volume.clone(), price.clone(), config(&["GME", "AMC"]));
    let scan = h.tw.detect(now()).await;

    assert_eq!(scan.spikes_detected, 1);
    assert_eq!(volume.calls(), 1);
    assert_eq!(price.calls(), 1);
}

#[tokio::test]
async fn test_ties_broken_alphabetically_and_runs_repeat() {
    let mut records = Vec::new();
    for sym in ["TSLA", "AMC", "GME"] {
        records.extend(history(sym, 1, 10));
        records.extend(recent(sym, 5));
    }

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME", "AMC", "TSLA"]));
    let first = h.tw.detect(now()).await;
    let second = h.tw.detect(now()).await;

    let symbols: Vec<&str> = first.opportunities.iter().map(|o| o.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AMC", "GME", "TSLA"]);
    assert_eq!(first.opportunities, second.opportunities);
}

#[tokio::test]
async fn test_ranked_by_composite_descending() {
    let mut records = Vec::new();
    records.extend(history("GME", 1, 10));
    records.extend(recent("GME", 4));
    records.extend(history("AMC", 1, 10));
    records.extend(recent("AMC", 9));
    records.extend(history("BB", 1, 10));
    records.extend(recent("BB", 6));

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME", "AMC", "BB"]));
    let scan = h.tw.detect(now()).await;

    let symbols: Vec<&str> = scan.opportunities.iter().map(|o| o.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AMC", "BB", "GME"]);
    for pair in scan.opportunities.windows(2) {
        assert!(pair[0].composite_score >= pair[1].composite_score);
    }
}

#[tokio::test]
async fn test_bullish_sentiment_shift_feeds_composite() {
    let mut records = Vec::new();
    for d in 1..=4 {
        records.push(labelled(&format!("h{d}"), "GME", 24 * d + 2, SentimentLabel::OneStar));
    }
    for i in 0..12 {
        records.push(labelled(&format!("r{i}"), "GME", 1, SentimentLabel::FiveStars));
    }

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME"]));
    let scan = h.tw.detect(now()).await;

    let opp = &scan.opportunities[0];
    assert_eq!(opp.individual_scores.sentiment_score, 1.0);
    // 0.4 (mention, ratio 12) + 0.1 (sentiment)
    assert!((opp.composite_score - 0.5).abs() < 1e-12);
}

#[tokio::test]
async fn test_common_words_never_become_symbols() {
    let mut records = Vec::new();
    for i in 0..20 {
        records.push(trendwatch::domain::entities::mention_record::MentionRecord::new(
            format!("x{i}"),
            now() - chrono::Duration::hours(1),
            "THE BEST DD FOR YOU",
            "",
            None,
        ));
    }
    records.extend(history("GME", 1, 3));

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME"]));
    assert!(h.tw.detect(now()).await.opportunities.is_empty());
    assert!(h.tw.extract_symbols("THE BEST DD FOR $gme").contains(&"GME".to_string()));
}

#[tokio::test]
async fn test_baseline_report() {
    let mut records = history("GME", 2, 5);
    records.extend(recent("GME", 3));

    let (v, p) = zero_market();
    let h = harness(records, v, p, config(&["GME"]));
    let report = h.tw.baseline("gme", now()).await;
    assert_eq!(report.symbol, "GME");
    assert_eq!(report.baseline_mentions, 2.0);
    assert_eq!(report.recent_mentions, 3);
    assert_eq!(report.daily_counts.len(), 5);
}

#[tokio::test]
async fn test_oversized_baseline_window_does_not_abort_run() {
    let mut records = history("GME", 1, 10);
    records.extend(recent("GME", 10));

    let mut cfg = config(&["GME"]);
    cfg.baseline_days = 200_000_000;
    let (v, p) = zero_market();
    let h = harness(records, v, p, cfg);
    let scan = h.tw.detect(now()).await;
    assert_eq!(scan.spikes_detected, 1);
}
