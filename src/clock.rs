/// Longest step the simulation will take in one frame, in seconds.
/// A tab that was backgrounded for minutes resumes with one short step instead.
pub const MAX_FRAME_DT: f64 = 0.1;

/// Turns `requestAnimationFrame` timestamps (ms) into clamped frame deltas (s).
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Seconds since the previous tick. The first tick, a non-finite stamp, and
    /// a clock running backwards all yield 0.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.0), 0.0);
    }

    #[test]
    fn measures_elapsed_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        assert!((clock.tick(1016.0) - 0.016).abs() < 1e-12);
    }

    #[test]
    fn caps_long_pauses() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(60_000.0), MAX_FRAME_DT);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), 0.0);
        assert_eq!(clock.tick(f64::NAN), 0.0);
    }
}
