//! Buffered health changes awaiting the next world update.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// A signed health change aimed at one entity.
///
/// Negative amounts are damage and are reduced by armor; positive amounts
/// heal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Entity receiving the change.
    pub target: EntityId,
    /// Signed health delta.
    pub amount: i32,
}

/// Queue of [`DamageEvent`]s drained once per update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DamageInbox {
    events: Vec<DamageEvent>,
}

impl DamageInbox {
    /// Queues one event.
    pub fn push(&mut self, event: DamageEvent) {
        self.events.push(event);
    }

    /// Queues events in iteration order.
    pub fn extend<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = DamageEvent>,
    {
        self.events.extend(events);
    }

    /// Removes and yields every queued event in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, DamageEvent> {
        self.events.drain(..)
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_event(target: u64, amount: i32) -> DamageEvent {
        DamageEvent {
            target: EntityId(target),
            amount,
        }
    }

    #[rstest]
    fn push_appends_single_event() {
        let mut inbox = DamageInbox::default();
        let event = sample_event(1, -10);
        assert!(inbox.is_empty());
        inbox.push(event);
        assert_eq!(inbox.len(), 1);
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(drained, vec![event]);
        assert!(inbox.is_empty());
    }

    #[rstest]
    fn extend_preserves_order() {
        let mut inbox = DamageInbox::default();
        let first = sample_event(1, -5);
        let second = sample_event(2, 7);
        inbox.extend(vec![first, second]);
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(drained, vec![first, second]);
        assert!(inbox.is_empty());
    }
}
