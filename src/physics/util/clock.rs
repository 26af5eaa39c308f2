use std::time::Duration;

use bevy::ecs::system::Resource;

/// A clock for physics objects, counting fixed simulation ticks.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SimClock {
    elapsed: Duration,
    last_delta: Duration,
    tick: u64,
}

impl SimClock {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance by one fixed step of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let delta = Duration::from_secs_f32(dt);
        self.elapsed += delta;
        self.last_delta = delta;
        self.tick += 1;
    }
}
