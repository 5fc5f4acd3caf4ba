//! Resampling run statistics.

use serde::{Deserialize, Serialize};

/// Row accounting for one resampling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResampleStats {
    /// Distinct group keys among usable rows.
    pub groups: usize,
    /// Output rows backed by an input row.
    pub observed: usize,
    /// Output rows inserted for years without an observation.
    pub synthesized: usize,
    /// Usable rows folded into an earlier row of the same group and year.
    pub collapsed: usize,
    /// Rows set aside for a missing date or group key.
    pub excluded: usize,
}

impl ResampleStats {
    /// Total rows in the resampled output.
    #[must_use]
    pub const fn output_rows(&self) -> usize {
        self.observed + self.synthesized
    }

    /// Usable input rows consumed by the run.
    #[must_use]
    pub const fn usable_rows(&self) -> usize {
        self.observed + self.collapsed
    }
}
