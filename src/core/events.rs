//! Application event queue.
//!
//! Pages emit events while rendering; the app drains the queue once per
//! frame in `update()` and reacts (status notices, cross-page refreshes).
//! Deferred processing keeps mutation handling out of the egui closures.

use std::sync::{Arc, Mutex};

use log::warn;

/// Queue size guard; the UI drains every frame so hitting this means a bug.
const MAX_QUEUE_SIZE: usize = 256;

/// Events flowing from pages to the application shell.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Transient status-line notice ("Blog added").
    Notify(String),
    /// A store mutated the given storage key.
    StoreChanged { key: &'static str },
}

/// Cloneable FIFO event queue shared between the app and its pages.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Arc<Mutex<Vec<AppEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next frame's drain.
    pub fn emit(&self, event: AppEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict = queue.len() / 2;
            warn!("Event queue full ({} events), evicting oldest {}", queue.len(), evict);
            queue.drain(0..evict);
        }
        queue.push(event);
    }

    /// Take all queued events, in emission order.
    pub fn poll(&self) -> Vec<AppEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_returns_events_in_emission_order() {
        let bus = EventBus::new();
        bus.emit(AppEvent::Notify("one".into()));
        bus.emit(AppEvent::StoreChanged { key: "blogs" });
        bus.emit(AppEvent::Notify("two".into()));

        let events = bus.poll();
        assert_eq!(
            events,
            vec![
                AppEvent::Notify("one".into()),
                AppEvent::StoreChanged { key: "blogs" },
                AppEvent::Notify("two".into()),
            ]
        );
    }

    #[test]
    fn test_queue_empty_after_poll() {
        let bus = EventBus::new();
        bus.emit(AppEvent::Notify("x".into()));
        assert_eq!(bus.poll().len(), 1);
        assert!(bus.is_empty());
        assert_eq!(bus.poll().len(), 0);
    }

    #[test]
    fn test_overflow_evicts_oldest_half() {
        let bus = EventBus::new();
        for i in 0..MAX_QUEUE_SIZE + 1 {
            bus.emit(AppEvent::Notify(format!("{}", i)));
        }
        let events = bus.poll();
        assert!(events.len() <= MAX_QUEUE_SIZE / 2 + 1);
        // The newest event survived eviction
        assert_eq!(events.last(), Some(&AppEvent::Notify(format!("{}", MAX_QUEUE_SIZE))));
    }
}
