//! Rolling history buffers
//!
//! - `TrajectoryHistory`: per-tick diagnostic samples for plotting
//! - `TrackTrail`: recent ball positions for drawing a fading path
//!
//! Both are fixed length and zero-filled at creation; new data pushes the
//! oldest entry out.

use std::collections::VecDeque;

use glam::Vec3;

/// Samples kept per diagnostic series
pub const HISTORY_LENGTH: usize = 1000;

/// Positions kept in the track trail
pub const TRAIL_LENGTH: usize = 128;

/// One diagnostic sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistorySample {
    pub height: f32,
    pub horizontal: f32,
    pub energy_error: f32,
}

/// Sliding window of height, horizontal position and energy error
///
/// Reads are ordered oldest to newest.
#[derive(Debug, Clone)]
pub struct TrajectoryHistory {
    heights: VecDeque<f32>,
    horizontal: VecDeque<f32>,
    energy_errors: VecDeque<f32>,
}

impl Default for TrajectoryHistory {
    fn default() -> Self {
        Self::new(HISTORY_LENGTH)
    }
}

impl TrajectoryHistory {
    pub fn new(len: usize) -> Self {
        let zeros = || VecDeque::from(vec![0.0; len]);
        Self {
            heights: zeros(),
            horizontal: zeros(),
            energy_errors: zeros(),
        }
    }

    /// Drop the oldest sample of each series and append the new one
    pub fn push(&mut self, height: f32, horizontal: f32, energy_error: f32) {
        if self.heights.is_empty() {
            return;
        }
        for (series, value) in [
            (&mut self.heights, height),
            (&mut self.horizontal, horizontal),
            (&mut self.energy_errors, energy_error),
        ] {
            series.pop_front();
            series.push_back(value);
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn heights(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.heights.iter().copied()
    }

    pub fn horizontal(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.horizontal.iter().copied()
    }

    pub fn energy_errors(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.energy_errors.iter().copied()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<HistorySample> {
        Some(HistorySample {
            height: *self.heights.back()?,
            horizontal: *self.horizontal.back()?,
            energy_error: *self.energy_errors.back()?,
        })
    }

    /// Copy of all three series, for handing to a plotting layer
    pub fn to_vecs(&self) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        (
            self.heights().collect(),
            self.horizontal().collect(),
            self.energy_errors().collect(),
        )
    }
}

/// Fixed trail of past positions (index 0 = most recent)
#[derive(Debug, Clone)]
pub struct TrackTrail {
    slots: [Vec3; TRAIL_LENGTH],
}

impl Default for TrackTrail {
    fn default() -> Self {
        Self {
            slots: [Vec3::ZERO; TRAIL_LENGTH],
        }
    }
}

impl TrackTrail {
    /// Shift every slot back by one (the last falls off) and store `pos` in slot 0
    pub fn record(&mut self, pos: Vec3) {
        self.slots.copy_within(0..TRAIL_LENGTH - 1, 1);
        self.slots[0] = pos;
    }

    pub fn len(&self) -> usize {
        TRAIL_LENGTH
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.slots.get(index).copied()
    }

    /// Cosmetic radius for slot `index`, tapering toward the tail
    pub fn radius(&self, index: usize) -> f32 {
        TRAIL_LENGTH.saturating_sub(index) as f32 * 0.001
    }

    /// Raw bytes of the positions (x, y, z f32 triples) for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.slots.as_slice())
    }
}
