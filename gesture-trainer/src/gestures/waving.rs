//! Wave detection from wrist x history
//!
//! Keeps the last few wrist x positions and counts how often the
//! horizontal direction flips. Owned by the match engine and cleared at
//! the start of every round.

use std::collections::VecDeque;

/// Number of wrist samples kept
pub const WAVE_HISTORY: usize = 15;

/// Samples required before a wave can be reported
pub const WAVE_MIN_SAMPLES: usize = 10;

/// Movements smaller than this are tracker jitter
pub const WAVE_NOISE_FLOOR: f32 = 0.01;

pub struct WaveTracker {
    history: VecDeque<f32>,
}

impl WaveTracker {
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(WAVE_HISTORY + 1),
        }
    }

    /// Record a wrist x position and report whether the hand is waving
    pub fn update(&mut self, wrist_x: f32, min_changes: u8) -> bool {
        self.history.push_back(wrist_x);
        if self.history.len() > WAVE_HISTORY {
            self.history.pop_front();
        }

        if self.history.len() < WAVE_MIN_SAMPLES {
            return false;
        }

        self.direction_changes() >= min_changes as usize
    }

    /// Sign flips between consecutive moves that clear the noise floor
    pub fn direction_changes(&self) -> usize {
        let mut changes = 0;
        let mut last_direction = 0i8;

        for (prev, next) in self.history.iter().zip(self.history.iter().skip(1)) {
            let diff = next - prev;
            let direction = if diff > WAVE_NOISE_FLOOR {
                1
            } else if diff < -WAVE_NOISE_FLOOR {
                -1
            } else {
                0
            };

            if direction != 0 {
                if last_direction != 0 && direction != last_direction {
                    changes += 1;
                }
                last_direction = direction;
            }
        }

        changes
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for WaveTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_minimum_samples() {
        let mut tracker = WaveTracker::new();
        let mut waved = false;
        for i in 0..WAVE_MIN_SAMPLES - 1 {
            waved = tracker.update(if i % 2 == 0 { 0.3 } else { 0.6 }, 1);
        }
        assert!(!waved);
    }

    #[test]
    fn side_to_side_motion_is_a_wave() {
        let mut tracker = WaveTracker::new();
        let mut waved = false;
        for i in 0..12 {
            waved = tracker.update(if (i / 2) % 2 == 0 { 0.3 } else { 0.6 }, 3);
        }
        assert!(waved);
        assert!(tracker.direction_changes() >= 3);
    }

    #[test]
    fn jitter_is_not_a_wave() {
        let mut tracker = WaveTracker::new();
        let mut waved = false;
        for i in 0..WAVE_HISTORY {
            waved = tracker.update(0.5 + if i % 2 == 0 { 0.004 } else { -0.004 }, 1);
        }
        assert!(!waved);
        assert_eq!(tracker.direction_changes(), 0);
    }

    #[test]
    fn history_is_bounded() {
        let mut tracker = WaveTracker::new();
        for i in 0..40 {
            tracker.update(i as f32 * 0.001, 1);
        }
        assert_eq!(tracker.len(), WAVE_HISTORY);
        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn one_sweep_satisfies_lenient_count() {
        let mut tracker = WaveTracker::new();
        let xs = [0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.5, 0.45, 0.4, 0.35];
        let waved = xs.iter().map(|x| tracker.update(*x, 1)).last().unwrap();
        assert!(waved);
        assert!(!tracker.update(0.3, 3));
    }
}
