//! Pacing configuration for animated runs.

use std::time::Duration;

/// Animation pacing for [`Solver`](crate::Solver) and
/// [`PathReconstructor`](crate::PathReconstructor).
///
/// Delays only slow the worker down so a viewer can follow along; they never
/// change results. Use [`SolverConfig::instant`] to run at full speed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Pause after each finalized cell, in milliseconds.
    pub step_delay_ms: u64,
    /// Pause between path-drawing frames. `None` derives it from
    /// `step_delay_ms` (half of it, at least 1 ms, or 0 when stepping is
    /// instant).
    pub path_delay_ms: Option<u64>,
    /// Roughly how many frames the path animation is split into.
    pub path_frames: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 5,
            path_delay_ms: None,
            path_frames: 10,
        }
    }
}

impl SolverConfig {
    /// No pacing at all.
    pub fn instant() -> Self {
        Self {
            step_delay_ms: 0,
            path_delay_ms: Some(0),
            ..Self::default()
        }
    }

    /// Builder: set the per-cell delay.
    pub fn with_step_delay(mut self, ms: u64) -> Self {
        self.step_delay_ms = ms;
        self
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn path_delay(&self) -> Duration {
        let ms = match self.path_delay_ms {
            Some(ms) => ms,
            None if self.step_delay_ms == 0 => 0,
            None => (self.step_delay_ms / 2).max(1),
        };
        Duration::from_millis(ms)
    }

    /// Emit a path frame every this many cells, for a path of `len` cells.
    pub fn path_stride(&self, len: usize) -> usize {
        (len / self.path_frames.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_delay_is_half_step() {
        let c = SolverConfig::default();
        assert_eq!(c.step_delay(), Duration::from_millis(5));
        assert_eq!(c.path_delay(), Duration::from_millis(2));
        assert_eq!(
            SolverConfig::default().with_step_delay(1).path_delay(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn instant_has_no_delays() {
        let c = SolverConfig::instant();
        assert!(c.step_delay().is_zero());
        assert!(c.path_delay().is_zero());
        let c = SolverConfig::default().with_step_delay(0);
        assert!(c.path_delay().is_zero());
    }

    #[test]
    fn path_stride() {
        let c = SolverConfig::default();
        assert_eq!(c.path_stride(0), 1);
        assert_eq!(c.path_stride(9), 1);
        assert_eq!(c.path_stride(35), 3);
        let c = SolverConfig {
            path_frames: 0,
            ..SolverConfig::default()
        };
        assert_eq!(c.path_stride(35), 35);
    }
}
