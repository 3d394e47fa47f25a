//! Memoization of metrics snapshots.
//!
//! Aggregation is pure, so a snapshot stays valid for as long as the record set, the region
//! filter and the config are unchanged. Entries are keyed on a content hash of the record set
//! rather than on a TTL, and a new record set evicts every snapshot of the previous one.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::analytics::{aggregate_with_config, MetricsSnapshot};
use crate::config::DashboardConfig;
use crate::domain::IncidentRecord;
use crate::error::AppError;
use crate::filter::RegionFilter;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    records_hash: String,
    filter: RegionFilter,
    config: DashboardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, MetricsSnapshot>,
    hits: u64,
    misses: u64,
}

/// Thread-safe snapshot cache shared by concurrent filter computations.
#[derive(Default)]
pub struct SnapshotCache {
    state: Mutex<CacheState>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the cached snapshot for this input, computing and storing it on a miss.
    /// Failed aggregations are returned as-is and never cached.
    pub fn get_or_compute(
        &self,
        records: &[IncidentRecord],
        filter: &RegionFilter,
        config: &DashboardConfig,
    ) -> Result<MetricsSnapshot, AppError> {
        let key = CacheKey {
            records_hash: compute_records_fingerprint(records)?,
            filter: filter.clone(),
            config: config.clone(),
        };

        {
            let mut state = self.lock();
            if let Some(snapshot) = state.entries.get(&key).cloned() {
                state.hits += 1;
                debug!(region_filter = filter.as_str(), "snapshot cache hit");
                return Ok(snapshot);
            }
            state.misses += 1;
        }

        debug!(region_filter = filter.as_str(), "snapshot cache miss");
        let snapshot = aggregate_with_config(records, filter, config)?;
        let mut state = self.lock();
        // Only the current record set stays cached; older snapshots can never hit again.
        state
            .entries
            .retain(|k, _| k.records_hash == key.records_hash);
        state.entries.insert(key, snapshot.clone());
        Ok(snapshot)
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            hits: state.hits,
            misses: state.misses,
        }
    }
}

/// SHA256 over the canonical JSON of the record set, order-sensitive.
pub fn compute_records_fingerprint(records: &[IncidentRecord]) -> Result<String, AppError> {
    let bytes = serde_json::to_vec(records).map_err(|e| {
        AppError::new("CACHE_FINGERPRINT_FAILED", "Failed to serialize records for hashing")
            .with_details(e.to_string())
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
