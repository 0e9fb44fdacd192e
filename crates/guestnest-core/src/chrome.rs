//! Navigation chrome display mode.
//!
//! Two-state hysteresis machine over scroll offsets. `ChromeModeController`
//! is the pure transition; `FrameCoalescer` limits evaluation to once per
//! rendered frame.

/// At or below this offset (in px) the chrome is always `Full`.
pub const TOP_RESET: i64 = 16;

/// Distance (in px) that must be scrolled past the last switch point to flip.
pub const HYST: i64 = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChromeMode {
    /// Expanded: categories and the full search bar.
    #[default]
    Full,
    /// Condensed: logo and the pill search only.
    Compact,
}

impl ChromeMode {
    pub fn is_compact(self) -> bool {
        self == ChromeMode::Compact
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeModeController {
    mode: ChromeMode,
    last_y: i64,
    last_switch_y: i64,
}

impl ChromeModeController {
    /// Starts in `Full` with both reference points at `initial_y`.
    pub fn new(initial_y: i64) -> Self {
        Self {
            mode: ChromeMode::Full,
            last_y: initial_y,
            last_switch_y: initial_y,
        }
    }

    pub fn mode(&self) -> ChromeMode {
        self.mode
    }

    pub fn last_y(&self) -> i64 {
        self.last_y
    }

    pub fn last_switch_y(&self) -> i64 {
        self.last_switch_y
    }

    /// Applies one scroll sample. Returns true if the mode changed.
    pub fn sample(&mut self, y: i64) -> bool {
        let before = self.mode;
        let going_down = y > self.last_y;

        if y <= TOP_RESET {
            self.mode = ChromeMode::Full;
            self.last_switch_y = y;
        } else if self.mode == ChromeMode::Full
            && going_down
            && y.saturating_sub(self.last_switch_y) > HYST
        {
            self.mode = ChromeMode::Compact;
            self.last_switch_y = y;
        } else if self.mode == ChromeMode::Compact
            && !going_down
            && self.last_switch_y.saturating_sub(y) > HYST
        {
            self.mode = ChromeMode::Full;
            self.last_switch_y = y;
        }

        self.last_y = y;
        self.mode != before
    }
}

impl Default for ChromeModeController {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Coalesces scroll events into at most one evaluation per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCoalescer {
    scheduled: bool,
    latest: Option<i64>,
}

impl FrameCoalescer {
    /// Records a scroll offset. Returns true when the caller must schedule a
    /// frame, false when one is already pending.
    pub fn record(&mut self, y: i64) -> bool {
        self.latest = Some(y);
        if self.scheduled {
            false
        } else {
            self.scheduled = true;
            true
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Runs the pending evaluation, if any, with the most recent offset.
    ///
    /// Returns `Some(changed)` when a sample was applied.
    pub fn flush(&mut self, controller: &mut ChromeModeController) -> Option<bool> {
        if !self.scheduled {
            return None;
        }
        self.scheduled = false;
        self.latest.take().map(|y| controller.sample(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(controller: &mut ChromeModeController, samples: &[i64]) -> Vec<ChromeMode> {
        samples
            .iter()
            .map(|&y| {
                controller.sample(y);
                controller.mode()
            })
            .collect()
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        let mut controller = ChromeModeController::new(i64::MIN);
        assert!(controller.sample(i64::MAX));
        assert_eq!(controller.mode(), ChromeMode::Compact);
        assert!(controller.sample(i64::MIN));
        assert_eq!(controller.mode(), ChromeMode::Full);
    }

    #[test]
    fn test_monotonic_scroll_flips_once_at_ninety() {
        let mut controller = ChromeModeController::new(0);
        let samples = [0, 20, 40, 60, 80, 90];
        let modes = run(&mut controller, &samples);

        let flips = modes.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(flips, 1);
        let first_compact = samples
            .iter()
            .zip(&modes)
            .find(|(_, m)| m.is_compact())
            .map(|(y, _)| *y);
        assert_eq!(first_compact, Some(90));
        assert_eq!(controller.last_switch_y(), 90);
    }

    #[test]
    fn test_exactly_hysteresis_does_not_flip() {
        let mut controller = ChromeModeController::new(0);
        run(&mut controller, &[40, 80]);
        assert_eq!(controller.mode(), ChromeMode::Full);
    }

    #[test]
    fn test_top_reset_forces_full() {
        let mut controller = ChromeModeController::new(0);
        run(&mut controller, &[50, 90]);
        assert_eq!(controller.mode(), ChromeMode::Compact);
        assert_eq!(controller.last_switch_y(), 90);

        assert!(controller.sample(5));
        assert_eq!(controller.mode(), ChromeMode::Full);
        assert_eq!(controller.last_switch_y(), 5);
    }

    #[test]
    fn test_top_reset_updates_switch_point_while_full() {
        let mut controller = ChromeModeController::new(0);
        assert!(!controller.sample(12));
        assert_eq!(controller.last_switch_y(), 12);
        assert_eq!(controller.mode(), ChromeMode::Full);
    }

    #[test]
    fn test_upward_scroll_beyond_band_restores_full() {
        let mut controller = ChromeModeController::new(0);
        run(&mut controller, &[200, 400]);
        assert_eq!(controller.mode(), ChromeMode::Compact);
        assert_eq!(controller.last_switch_y(), 200);

        run(&mut controller, &[500, 450]);
        assert_eq!(controller.mode(), ChromeMode::Compact);

        controller.sample(119);
        assert_eq!(controller.mode(), ChromeMode::Full);
        assert_eq!(controller.last_switch_y(), 119);
    }

    #[test]
    fn test_upward_movement_never_compacts() {
        let mut controller = ChromeModeController::new(1000);
        run(&mut controller, &[900, 700, 500, 300]);
        assert_eq!(controller.mode(), ChromeMode::Full);
    }

    #[test]
    fn test_small_jitter_does_not_toggle() {
        let mut controller = ChromeModeController::new(0);
        run(&mut controller, &[300]);
        assert!(controller.mode().is_compact());
        let modes = run(&mut controller, &[260, 300, 250, 310, 240]);
        assert!(modes.iter().all(|m| m.is_compact()));
    }

    #[test]
    fn test_full_whenever_latest_sample_near_top() {
        let sequences: [&[i64]; 3] = [&[500, 16], &[0, 200, 1000, 3], &[100, 90, 16]];
        for samples in sequences {
            let mut controller = ChromeModeController::new(0);
            run(&mut controller, samples);
            assert_eq!(controller.mode(), ChromeMode::Full, "{samples:?}");
        }
    }

    #[test]
    fn test_last_y_tracks_every_sample() {
        let mut controller = ChromeModeController::new(0);
        run(&mut controller, &[30, 20, 45]);
        assert_eq!(controller.last_y(), 45);
    }

    #[test]
    fn test_coalescer_schedules_once_per_frame() {
        let mut coalescer = FrameCoalescer::default();
        assert!(coalescer.record(10));
        assert!(!coalescer.record(50));
        assert!(!coalescer.record(200));
        assert!(coalescer.is_scheduled());

        let mut controller = ChromeModeController::new(0);
        assert_eq!(coalescer.flush(&mut controller), Some(true));
        assert_eq!(controller.last_y(), 200);
        assert_eq!(controller.mode(), ChromeMode::Compact);

        assert_eq!(coalescer.flush(&mut controller), None);
        assert!(coalescer.record(210));
    }

    #[test]
    fn test_coalesced_intermediate_samples_are_skipped() {
        let mut coalescer = FrameCoalescer::default();
        let mut controller = ChromeModeController::new(0);
        coalescer.record(300);
        coalescer.record(5);
        coalescer.flush(&mut controller);
        assert_eq!(controller.mode(), ChromeMode::Full);
        assert_eq!(controller.last_y(), 5);
    }
}
