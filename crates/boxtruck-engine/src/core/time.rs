/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}

/// Repeating wall-clock timer, the engine's stand-in for `setInterval`.
///
/// Fed the same variable frame deltas as [`FixedTimestep`] but independent of
/// it: firings are counted in real time, not in simulation steps.
pub struct IntervalTimer {
    period: f32,
    elapsed: f32,
}

impl IntervalTimer {
    /// Most firings reported by one `accumulate` call. A long stall (hidden
    /// tab, debugger pause) drops the backlog instead of replaying it.
    pub const MAX_FIRES_PER_FRAME: u32 = 3;

    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Advance by `frame_dt` seconds. Returns how many times the timer fired.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.elapsed += frame_dt.max(0.0);
        let fires = (self.elapsed / self.period) as u32;
        if fires > Self::MAX_FIRES_PER_FRAME {
            self.elapsed %= self.period;
            return Self::MAX_FIRES_PER_FRAME;
        }
        self.elapsed -= fires as f32 * self.period;
        fires
    }
}
