//! Document diff orchestration, caching, and statistics.

use super::cache::{CacheStats, ResultCache};
use super::extract::SemanticExtractor;
use super::line::{self};
use super::result::DiffResult;
use super::semantic::{self, SemanticDiff};
use super::severity;
use super::state::{self, StateDiff};
use crate::config::{DiffConfig, DP_CELL_BUDGET};
use crate::error::{DiffError, DiffFailure, Result};
use crate::model::{Document, StateSnapshot};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use xxhash_rust::xxh3::Xxh3;

/// Snapshot of engine counters, returned by [`DiffEngine::stats`].
#[derive(Debug, Clone, Default)]
pub struct EngineStats {
    /// Full diff computations performed (cache misses).
    pub computations: u64,
    /// Document diffs served from the cache.
    pub cache_hits: u64,
    /// Rolling average time per full computation.
    pub avg_computation: Duration,
    /// Cache-level counters.
    pub cache: CacheStats,
}

impl EngineStats {
    /// Fraction of document diffs served from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.computations + self.cache_hits;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    computations: u64,
    cache_hits: u64,
    total_computation: Duration,
}

/// Diff engine for documents and state snapshots.
///
/// Synchronous and free of I/O: every operation runs to completion on
/// the calling thread. Cache and counters use interior locking, so a
/// shared engine (e.g. behind an `Arc`) stays consistent under
/// concurrent callers; at worst two threads compute the same miss
/// redundantly before one of them inserts.
pub struct DiffEngine {
    config: DiffConfig,
    extractor: SemanticExtractor,
    cache: ResultCache,
    counters: RwLock<Counters>,
}

impl DiffEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        // The default config passes validation by construction.
        Self::build(DiffConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: DiffConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DiffConfig) -> Self {
        let cache = ResultCache::new(config.cache_capacity);
        Self {
            config,
            extractor: SemanticExtractor::new(),
            cache,
            counters: RwLock::new(Counters::default()),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Invalidates the result cache: cached results were computed
    /// under the old normalization rules.
    pub fn set_config(&mut self, config: DiffConfig) -> Result<()> {
        config.validate()?;
        self.cache = ResultCache::new(config.cache_capacity);
        self.config = config;
        Ok(())
    }

    /// Compare two documents.
    ///
    /// Identical inputs short-circuit to an empty result. Otherwise
    /// the cache is consulted by a fingerprint of the normalized pair;
    /// on a miss the full pipeline runs (line diff, semantic
    /// extraction, semantic diff, severity) and the result is cached.
    ///
    /// # Errors
    ///
    /// `SizeLimitExceeded` when either document is over the configured
    /// line limit or the DP tables would exceed the cell budget; the
    /// O(m·n) computation is never started in that case. Internal
    /// computation failures do not error: they degrade into a result
    /// with `has_changes = true` and a populated error descriptor.
    pub fn diff_documents(&self, old: &Document, new: &Document) -> Result<DiffResult> {
        if old.content_hash() == new.content_hash() && old.lines() == new.lines() {
            trace!("identical documents, skipping comparison");
            return Ok(DiffResult::empty());
        }

        self.check_size(old)?;
        self.check_size(new)?;
        let cells = old.line_count().saturating_mul(new.line_count());
        if cells > DP_CELL_BUDGET {
            return Err(DiffError::size_limit(cells, DP_CELL_BUDGET, "dp-cells"));
        }

        let old_lines = self.normalize(old);
        let new_lines = self.normalize(new);
        let key = pair_fingerprint(&old_lines, &new_lines);

        if let Some(cached) = self.cache.get(key) {
            debug!(key, "document diff cache hit");
            let mut counters = self.counters.write().expect("counters lock poisoned");
            counters.cache_hits += 1;
            return Ok(cached);
        }

        let start = Instant::now();
        let result = match self.compute(&old_lines, &new_lines) {
            Ok(result) => result,
            Err(err) => {
                debug!(error = %err, "recovering internal failure into degraded result");
                DiffResult::degraded(DiffFailure::from(&err))
            }
        };
        let elapsed = start.elapsed();
        debug!(
            key,
            ?elapsed,
            changes = result.summary.total_changes,
            severity = ?result.severity,
            "document diff computed"
        );

        {
            let mut counters = self.counters.write().expect("counters lock poisoned");
            counters.computations += 1;
            counters.total_computation += elapsed;
        }
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    fn compute(&self, old: &[String], new: &[String]) -> Result<DiffResult> {
        let line_diff = line::diff_lines(old, new);
        if !line::verify_accounting(old.len(), new.len(), &line_diff) {
            return Err(DiffError::internal(
                "line-diff",
                "change list does not account for every input line",
            ));
        }

        let semantic = self.semantic_diff(old, new);
        let severity = severity::score(&line_diff, &semantic);
        Ok(DiffResult::from_parts(line_diff, semantic, severity))
    }

    fn semantic_diff(&self, old: &[String], new: &[String]) -> SemanticDiff {
        let old_elements = self.extractor.extract(old);
        let new_elements = self.extractor.extract(new);
        semantic::diff_elements(&old_elements, &new_elements)
    }

    /// Compare two optional state snapshots.
    ///
    /// Not cached: state diffs have no fingerprintable text form and
    /// are cheap relative to document diffs.
    #[must_use]
    pub fn diff_states(
        &self,
        old: Option<&StateSnapshot>,
        new: Option<&StateSnapshot>,
    ) -> StateDiff {
        state::diff_states(old, new)
    }

    /// Read-only snapshot of the engine counters.
    pub fn stats(&self) -> EngineStats {
        let counters = self.counters.read().expect("counters lock poisoned");
        let avg_computation = if counters.computations == 0 {
            Duration::ZERO
        } else {
            counters.total_computation / counters.computations as u32
        };
        EngineStats {
            computations: counters.computations,
            cache_hits: counters.cache_hits,
            avg_computation,
            cache: self.cache.stats(),
        }
    }

    /// Reset all statistics counters. Cached results are kept.
    pub fn reset_stats(&self) {
        *self.counters.write().expect("counters lock poisoned") = Counters::default();
        self.cache.reset_stats();
    }

    /// Number of cached document diff results.
    #[must_use]
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    fn check_size(&self, doc: &Document) -> Result<()> {
        let limit = self.config.max_document_size;
        if doc.line_count() > limit {
            return Err(DiffError::size_limit(doc.line_count(), limit, "lines"));
        }
        Ok(())
    }

    fn normalize(&self, doc: &Document) -> Vec<String> {
        doc.lines()
            .iter()
            .map(|line| self.config.normalize_line(line))
            .collect()
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprint a normalized document pair for cache keying.
///
/// Line and side boundaries both feed the digest, so swapping old and
/// new, or re-splitting line content, produces a different key.
fn pair_fingerprint(old: &[String], new: &[String]) -> u64 {
    let mut hasher = Xxh3::new();
    for line in old {
        hasher.update(line.as_bytes());
        hasher.update(&[0xff]);
    }
    hasher.update(&[0xfe]);
    for line in new {
        hasher.update(line.as_bytes());
        hasher.update(&[0xff]);
    }
    hasher.digest()
}
