use std::collections::HashMap;
use std::time::{ Duration, Instant };

pub const APPEAR_DURATION: Duration = Duration::from_millis(500);

/// Remembers which freshly appended messages are still playing their
/// appear animation. Purely presentational.
#[derive(Debug, Default)]
pub struct AnimationTracker {
    started: HashMap<String, Instant>,
}

impl AnimationTracker {
    pub fn observe(&mut self, id: &str, now: Instant) {
        self.prune(now);
        self.started.insert(id.to_string(), now);
    }

    pub fn is_animating(&self, id: &str, now: Instant) -> bool {
        self.started
            .get(id)
            .map(|start| now.saturating_duration_since(*start) < APPEAR_DURATION)
            .unwrap_or(false)
    }

    pub fn prune(&mut self, now: Instant) {
        self.started.retain(|_, start| now.saturating_duration_since(*start) < APPEAR_DURATION);
    }

    pub fn active(&self) -> usize {
        self.started.len()
    }

    pub fn clear(&mut self) {
        self.started.clear();
    }
}
