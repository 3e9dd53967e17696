//! Final ordering and the human-readable report.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::domain::entities::opportunity::Opportunity;

/// Sort by composite score descending, then symbol ascending. Inputs are
/// left untouched.
pub fn rank(opportunities: &[Opportunity]) -> Vec<Opportunity> {
    let mut ranked = opportunities.to_vec();
    ranked.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    ranked
}

/// Top-`n` summary of an already ranked list.
pub fn summary(ranked: &[Opportunity], n: usize) -> String {
    if ranked.is_empty() {
        return "No trending opportunities detected at this time\n".to_string();
    }
    let mut out = String::from("TRENDING OPPORTUNITIES DETECTED:\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');
    for opp in ranked.iter().take(n) {
        let _ = writeln!(
            out,
            "{} - Score: {:.2} ({})",
            opp.symbol, opp.composite_score, opp.alert_level
        );
        let _ = writeln!(out, "   Reason: {}", opp.reason);
        let _ = writeln!(out, "   {}", opp.risk_warning);
        out.push('\n');
    }
    out
}
