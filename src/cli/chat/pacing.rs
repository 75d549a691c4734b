use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

/// Decides how long the "typing" indicator shows before each bot reply.
pub trait Pacing {
    fn next_delay(&mut self) -> Duration;
}

/// No delay at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Pacing for Immediate {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Uniform random delay in `[min, max]`, millisecond resolution.
#[derive(Debug)]
pub struct RandomPacing {
    min: Duration,
    max: Duration,
    rng: StdRng,
}

impl RandomPacing {
    pub fn new(min: Duration, max: Duration, rng: StdRng) -> Self {
        Self { min, max, rng }
    }
}

impl Pacing for RandomPacing {
    fn next_delay(&mut self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(min_ms..=max_ms))
    }
}
