use embedded_timers::clock::Clock;

/// 基于 `std::time::Instant` 的时钟，用于等待传感器就绪
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock {}

impl StdClock {
    pub fn new() -> Self {
        Self {}
    }
}

impl Clock for StdClock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn elapsed(&self, instant: Self::Instant) -> std::time::Duration {
        instant.elapsed()
    }
}
