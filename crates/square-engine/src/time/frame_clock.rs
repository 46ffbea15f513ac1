use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Wall-clock time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Each renderer owns its own clock so that multi-window applications do not
/// share delta-time state. The first tick measures from the moment the clock
/// was created (or last reset).
///
/// By default the delta is the raw wall-clock difference. Clamps can be set to
/// keep downstream systems stable after debugger pauses or long stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    clamps: Option<(Duration, Duration)>,
}

impl FrameClock {
    /// Creates an unclamped clock starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates an unclamped clock with an explicit baseline.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            frame_index: 0,
            clamps: None,
        }
    }

    /// Creates a clock with delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            clamps: Some((dt_min, dt_max)),
            ..Self::new()
        }
    }

    /// Replaces the clamps; `None` restores raw wall-clock deltas.
    pub fn set_clamps(&mut self, clamps: Option<(Duration, Duration)>) {
        if let Some((min, max)) = clamps {
            debug_assert!(min <= max);
        }
        self.clamps = clamps;
    }

    /// Resets the clock baseline.
    ///
    /// Useful when a renderer loads a new scene so the first frame does not
    /// include loading time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let mut dt = now.saturating_duration_since(self.last);

        if let Some((dt_min, dt_max)) = self.clamps {
            dt = dt.clamp(dt_min, dt_max);
        }

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_elapsed_wall_clock() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let ft = clock.tick_at(start + Duration::from_millis(40));

        assert!((ft.dt - 0.040).abs() < 1e-6);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn tick_measures_from_previous_tick() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick_at(start + Duration::from_millis(10));

        let ft = clock.tick_at(start + Duration::from_millis(25));

        assert!((ft.dt - 0.015).abs() < 1e-6);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn clamps_bound_the_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.set_clamps(Some((Duration::from_millis(1), Duration::from_millis(100))));

        let long = clock.tick_at(start + Duration::from_secs(3));
        let short = clock.tick_at(start + Duration::from_secs(3));

        assert!((long.dt - 0.1).abs() < 1e-6);
        assert!((short.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn going_backwards_saturates_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);

        let ft = clock.tick_at(start - Duration::from_millis(500));

        assert_eq!(ft.dt, 0.0);
    }
}
