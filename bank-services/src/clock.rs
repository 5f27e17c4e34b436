use std::time::Duration;

use tokio::time::Instant;

use crate::customer::Tick;

/// Roughly 30 years. Stands in for ticks too large to represent as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Converts between real time and simulation ticks.
///
/// Ticks are counted from the origin captured when the clock starts. Uses Tokio's clock, so
/// paused time in tests gives exact tick arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
    time_unit: Duration,
}

impl Clock {
    /// Start a clock now. `time_unit` must be non-zero.
    pub(crate) fn start(time_unit: Duration) -> Self {
        debug_assert!(!time_unit.is_zero(), "time unit should be validated");
        Self {
            origin: Instant::now(),
            time_unit,
        }
    }

    /// The real instant of tick zero.
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Real duration of one tick.
    pub fn time_unit(&self) -> Duration {
        self.time_unit
    }

    /// The current tick, rounded down.
    pub fn now(&self) -> Tick {
        self.tick_at(Instant::now())
    }

    /// The tick containing `instant`. Instants before the origin map to tick zero.
    pub fn tick_at(&self, instant: Instant) -> Tick {
        let elapsed = instant.saturating_duration_since(self.origin);
        let ticks = elapsed.as_nanos() / self.time_unit.as_nanos();
        Tick::try_from(ticks).unwrap_or(Tick::MAX)
    }

    /// Real duration of `ticks`.
    pub fn duration_of(&self, ticks: Tick) -> Duration {
        u32::try_from(ticks).map_or(Duration::MAX, |ticks| self.time_unit.saturating_mul(ticks))
    }

    /// The real instant at which `tick` begins.
    pub fn instant_of(&self, tick: Tick) -> Instant {
        self.origin
            .checked_add(self.duration_of(tick))
            .unwrap_or_else(|| self.origin + FAR_FUTURE)
    }
}
