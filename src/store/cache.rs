use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;

use super::{ResultStore, StoreError};
use crate::comparator::ComparisonReport;
use crate::types::constants::DEFAULT_CACHE_CAPACITY;

/// Bounded in-process history of comparisons per intersection.
///
/// Each intersection keeps at most `capacity` reports; recording one more drops the oldest.
pub struct SimulationCache {
    /// Maximum reports kept per intersection
    capacity: usize,
    /// Reports by intersection id, oldest at the front
    entries: Mutex<HashMap<String, VecDeque<ComparisonReport>>>,
}

impl SimulationCache {
    pub fn new(capacity: usize) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }
        Ok(Self { capacity, entries: Mutex::new(HashMap::new()) })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent report of an intersection
    pub async fn latest(&self, intersection_id: &str) -> Option<ComparisonReport> {
        let entries = self.entries.lock().await;
        entries.get(intersection_id).and_then(|history| history.back().cloned())
    }

    /// Ids of every intersection with at least one report, sorted
    pub async fn intersections(&self) -> Vec<String> {
        let entries = self.entries.lock().await;
        let mut ids: Vec<String> = entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn clear(&self, intersection_id: &str) {
        self.entries.lock().await.remove(intersection_id);
    }
}

impl Default for SimulationCache {
    fn default() -> Self {
        Self { capacity: DEFAULT_CACHE_CAPACITY, entries: Mutex::new(HashMap::new()) }
    }
}

#[async_trait]
impl ResultStore for SimulationCache {
    async fn record(&self, report: ComparisonReport) -> Result<(), StoreError> {
        if report.intersection_id.trim().is_empty() {
            return Err(StoreError::EmptyIntersectionId);
        }
        let mut entries = self.entries.lock().await;
        let history = entries.entry(report.intersection_id.clone()).or_default();
        history.push_back(report);
        while history.len() > self.capacity {
            history.pop_front();
        }
        Ok(())
    }

    async fn history(&self, intersection_id: &str) -> Result<Vec<ComparisonReport>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(intersection_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default())
    }
}
