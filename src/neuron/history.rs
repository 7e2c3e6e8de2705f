//! Bounded spike history
//!
//! A ring buffer of spike timesteps sized to the longest firing-rate
//! window a neuron will be asked about. Long-running simulations stay
//! flat in memory; rate queries over windows beyond the buffer's horizon
//! saturate to what is recorded.

use std::collections::VecDeque;

/// Ring buffer of spike timesteps
#[derive(Clone, Debug, Default)]
pub struct SpikeHistory {
    times: VecDeque<u64>,
    capacity: usize,
}

impl SpikeHistory {
    /// Create a history holding at most `capacity` spike times.
    ///
    /// Capacity should cover the longest rate window in timesteps; a
    /// window of W ms at timestep dt needs W/dt entries in the worst
    /// case (one spike per step).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: VecDeque::with_capacity(capacity.min(4096)),
            capacity: capacity.max(1),
        }
    }

    /// Record a spike at the given timestep, evicting the oldest entry
    /// when full.
    pub fn record(&mut self, time_step: u64) {
        if self.times.len() == self.capacity {
            self.times.pop_front();
        }
        self.times.push_back(time_step);
    }

    /// Firing rate (Hz) over the trailing `window_ms` milliseconds.
    ///
    /// `now` is the current timestep counter; `dt_ms` converts steps to
    /// milliseconds. Returns 0.0 when no spikes are recorded.
    pub fn rate(&self, now: u64, window_ms: f32, dt_ms: f32) -> f32 {
        if self.times.is_empty() || window_ms <= 0.0 {
            return 0.0;
        }
        let window_steps = (window_ms / dt_ms) as u64;
        let cutoff = now.saturating_sub(window_steps);
        // Entries are monotonically increasing; count from the back.
        let recent = self.times.iter().rev().take_while(|&&t| t >= cutoff).count();
        recent as f32 / (window_ms / 1000.0)
    }

    /// Number of recorded spikes (bounded by capacity)
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when no spikes are recorded
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Forget all recorded spikes
    pub fn clear(&mut self) {
        self.times.clear();
    }
}
