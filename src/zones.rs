//! Document-frequency zone classification.
//!
//! Every term gets the weak percentile rank of its DF over the whole
//! vocabulary. The tails and the middle band become zones:
//!
//! | zone        | DF percentile rank |
//! |-------------|--------------------|
//! | Too Common  | `>= 90`            |
//! | Goldilocks  | `45 ..= 55`        |
//! | Too Rare    | `<= 10`            |
//!
//! Everything else is left out. Inside a zone, terms are ranked by TF-IDF
//! score (descending, then term ascending) and cut to `top_k`.
//!
//! When every term shares one DF (a single chunk, for instance) they all rank
//! at 100 and land in Too Common.
//!
//! Ties share the highest rank of their group, so the bottom of the
//! distribution is often empty. On long texts most terms occur in a single
//! chunk: if more than 10% of the vocabulary has df = 1, the lowest rank is
//! already above 10 and Too Rare stays empty. The same pile-up can push every
//! rank past the Goldilocks band. Use `min_df` to drop the df = 1 tail, or
//! shorter chunks to spread DFs out, when those zones matter.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::engine::{TermStats, TermStatsMap};
use crate::utils::stats::PercentileRank;

pub const TOO_COMMON_MIN_PERCENTILE: f64 = 90.0;
pub const TOO_RARE_MAX_PERCENTILE: f64 = 10.0;
pub const GOLDILOCKS_MIN_PERCENTILE: f64 = 45.0;
pub const GOLDILOCKS_MAX_PERCENTILE: f64 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    TooCommon,
    Goldilocks,
    TooRare,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::TooCommon, Zone::Goldilocks, Zone::TooRare];

    /// Zone of a DF percentile rank, `None` outside every band
    pub fn for_percentile(rank: f64) -> Option<Zone> {
        if rank >= TOO_COMMON_MIN_PERCENTILE {
            Some(Zone::TooCommon)
        } else if rank <= TOO_RARE_MAX_PERCENTILE {
            Some(Zone::TooRare)
        } else if (GOLDILOCKS_MIN_PERCENTILE..=GOLDILOCKS_MAX_PERCENTILE).contains(&rank) {
            Some(Zone::Goldilocks)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::TooCommon => "TOO COMMON",
            Zone::Goldilocks => "GOLDILOCKS",
            Zone::TooRare => "TOO RARE",
        }
    }

    /// Numeric label used in CSV output
    pub fn index(self) -> u8 {
        match self {
            Zone::TooCommon => 1,
            Zone::Goldilocks => 2,
            Zone::TooRare => 3,
        }
    }
}

/// One ranked term inside a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub term: String,
    pub score: f64,
    pub tf: u64,
    pub df: u64,
    pub idf: f64,
    pub df_percentile: f64,
}

impl ZoneEntry {
    fn new(term: &str, stats: &TermStats, df_percentile: f64) -> Self {
        Self {
            term: term.to_string(),
            score: stats.score,
            tf: stats.tf,
            df: stats.df,
            idf: stats.idf,
            df_percentile,
        }
    }
}

/// The three ranked zones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zones {
    pub too_common: Vec<ZoneEntry>,
    pub goldilocks: Vec<ZoneEntry>,
    pub too_rare: Vec<ZoneEntry>,
}

impl Zones {
    pub fn get(&self, zone: Zone) -> &[ZoneEntry] {
        match zone {
            Zone::TooCommon => &self.too_common,
            Zone::Goldilocks => &self.goldilocks,
            Zone::TooRare => &self.too_rare,
        }
    }

    fn get_mut(&mut self, zone: Zone) -> &mut Vec<ZoneEntry> {
        match zone {
            Zone::TooCommon => &mut self.too_common,
            Zone::Goldilocks => &mut self.goldilocks,
            Zone::TooRare => &mut self.too_rare,
        }
    }

    /// Zones in display order
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &[ZoneEntry])> {
        Zone::ALL.into_iter().map(move |zone| (zone, self.get(zone)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, entries)| entries.is_empty())
    }
}

/// DF percentile rank of every term in `stats`
pub fn df_percentiles(stats: &TermStatsMap) -> PercentileRank<u64> {
    PercentileRank::new(stats.values().map(|s| s.df))
}

/// Bucket terms into zones by DF percentile and rank them by score
///
/// `chunk_count` is the N the stats were computed over; an empty corpus
/// produces empty zones.
pub fn classify_zones(stats: &TermStatsMap, chunk_count: usize, top_k: usize) -> Zones {
    let mut zones = Zones::default();
    if chunk_count == 0 || stats.is_empty() {
        return zones;
    }
    if chunk_count == 1 {
        log::warn!("single-chunk corpus: every term shares one DF and lands in the too-common zone");
    }

    let ranks = df_percentiles(stats);
    for (term, term_stats) in stats {
        debug_assert!(term_stats.df as usize <= chunk_count);
        let rank = ranks.rank(term_stats.df);
        if let Some(zone) = Zone::for_percentile(rank) {
            zones.get_mut(zone).push(ZoneEntry::new(term, term_stats, rank));
        }
    }

    for zone in Zone::ALL {
        let entries = zones.get_mut(zone);
        entries.sort_by(by_score_desc);
        entries.truncate(top_k);
    }
    zones
}

/// Descending score, ascending term on ties
fn by_score_desc(a: &ZoneEntry, b: &ZoneEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.term.cmp(&b.term))
}
