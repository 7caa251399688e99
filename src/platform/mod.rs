//! Platform abstraction layer
//!
//! Handles the pieces that touch the outside world:
//! - Input polling (one `TickInput` per tick)
//! - Frame-rate limiting for the fixed tick loop

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::sim::TickInput;

/// Something that can be polled once per tick for held buttons
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// No keyboard attached: nothing is ever held
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> TickInput {
        TickInput::default()
    }
}

/// Replays a fixed sequence of inputs, then reports nothing held
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.queue.pop_front().unwrap_or_default()
    }
}

/// Caps the loop at a fixed tick rate by sleeping out the rest of each tick
#[derive(Debug)]
pub struct FrameLimiter {
    period: Duration,
    next: Instant,
}

impl FrameLimiter {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the current tick's time slot has passed
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        // A late tick doesn't earn catch-up ticks
        self.next = self.next.max(now) + self.period;
    }
}
