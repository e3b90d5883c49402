pub use crate::error::AnalyzerError;
use analytics::SharpeReport;
use core_types::PerAssetStatistic;
use serde::Serialize;
use std::cmp::Ordering;

pub mod error;

/// One asset's place in the ranking. Rank 1 is the best.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAsset {
    pub rank: usize,
    pub asset: String,
    pub ratio: f64,
}

/// The outcome of a selection: the winner, its ratio, and the full ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub best_asset: String,
    pub best_ratio: f64,
    pub ranking: Vec<RankedAsset>,
}

/// Picks the winning asset from a Sharpe report.
#[derive(Debug, Default)]
pub struct Analyzer {}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the best asset by annualised Sharpe ratio and ranks the rest.
    pub fn run(&self, report: &SharpeReport) -> Result<Selection, AnalyzerError> {
        let ratios = &report.annualised_sharpe_ratio;

        // 1. Select
        let best_asset = pick_best_stock(ratios)?;
        let best_ratio = ratios.get(&best_asset).unwrap_or(f64::NAN);

        // 2. Rank
        let ranking = rank_assets(ratios);

        tracing::info!(asset = %best_asset, ratio = best_ratio, "Best asset selected");
        Ok(Selection {
            best_asset,
            best_ratio,
            ranking,
        })
    }
}

/// Returns the asset with the highest ratio.
///
/// Ties go to the asset seen first. NaN ratios are never selected; if there are
/// no assets, or every ratio is NaN, an error is returned instead.
pub fn pick_best_stock(ratios: &PerAssetStatistic) -> Result<String, AnalyzerError> {
    if ratios.is_empty() {
        return Err(AnalyzerError::EmptyInput);
    }

    let mut best: Option<(&str, f64)> = None;
    for (asset, ratio) in ratios.iter().filter(|(_, r)| !r.is_nan()) {
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((asset, ratio)),
        }
    }

    best.map(|(asset, _)| asset.to_string())
        .ok_or(AnalyzerError::AllUndefined(ratios.len()))
}

/// Orders assets from best to worst ratio.
///
/// The sort is stable, so tied assets keep their column order. `-0.0` and `0.0`
/// tie. NaN ratios rank last.
pub fn rank_assets(ratios: &PerAssetStatistic) -> Vec<RankedAsset> {
    let mut entries: Vec<(&str, f64)> = ratios.iter().collect();
    entries.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (asset, ratio))| RankedAsset {
            rank: i + 1,
            asset: asset.to_string(),
            ratio,
        })
        .collect()
}
