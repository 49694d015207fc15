//! Event id generation.

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{EventsConfig, IdStrategy};
use crate::record::DisasterEvent;

/// Chooses ids for newly reported disaster events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventIdGenerator {
    strategy: IdStrategy,
    range: u32,
}

impl Default for EventIdGenerator {
    fn default() -> Self {
        Self::from_config(&EventsConfig::default())
    }
}

impl EventIdGenerator {
    /// Build a generator from the events configuration.
    #[must_use]
    pub fn from_config(config: &EventsConfig) -> Self {
        Self {
            strategy: config.id_strategy,
            range: config.id_range.max(1),
        }
    }

    /// Pick an id not used by any of `existing`.
    ///
    /// The random strategy draws uniformly from `[0, range)` and re-draws on
    /// collision. Once every id in the range is taken it falls back to one
    /// past the largest id in use.
    #[must_use]
    pub fn next_id(&self, existing: &[DisasterEvent]) -> i64 {
        match self.strategy {
            IdStrategy::Sequential => Self::after_max(existing),
            IdStrategy::Random => self.random_unused(existing),
        }
    }

    fn after_max(existing: &[DisasterEvent]) -> i64 {
        existing
            .iter()
            .map(|event| event.event_id)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    fn random_unused(&self, existing: &[DisasterEvent]) -> i64 {
        let used: HashSet<i64> = existing
            .iter()
            .map(|event| event.event_id)
            .filter(|id| (0..i64::from(self.range)).contains(id))
            .collect();

        if used.len() >= usize::try_from(self.range).unwrap_or(usize::MAX) {
            warn!(range = self.range, "event id range exhausted, using next free id");
            return Self::after_max(existing);
        }

        loop {
            let id = self.draw();
            if !used.contains(&id) {
                return id;
            }
            debug!(id, "event id collision, drawing again");
        }
    }

    fn draw(&self) -> i64 {
        let value = Uuid::new_v4().as_u128() % u128::from(self.range);
        u32::try_from(value).map_or(0, i64::from)
    }
}
