use serde::{Deserialize, Serialize};

use super::Approach;

/// Whether a count window falls in a peak hour
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeakStatus {
    Peak,
    OffPeak,
}

/// One count window (typically 15 minutes) with its per-approach volumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriod {
    /// Window label, e.g. "07:00-07:15"
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    pub peak_status: PeakStatus,
    pub approaches: Vec<Approach>,
}

impl TimePeriod {
    pub fn total_volume(&self) -> u64 {
        self.approaches.iter().map(Approach::total_volume).sum()
    }

    pub fn is_peak(&self) -> bool {
        self.peak_status == PeakStatus::Peak
    }
}
