// src/events/bus/event_bus.rs
//
// In-process publish/subscribe for domain events.
//
// Handlers run synchronously on the emitting task, in subscription order.
// Every emission is recorded in a bounded log that tests and diagnostics
// read back.

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::events::types::DomainEvent;

/// Oldest entries are dropped past this many emissions
pub const EVENT_LOG_CAPACITY: usize = 512;

type Subscriber = Box<dyn Fn(&dyn Any) + Send + Sync>;

#[derive(Default)]
struct Inner {
    subscribers: RwLock<HashMap<TypeId, Vec<Subscriber>>>,
    log: RwLock<VecDeque<EventLogEntry>>,
}

/// Shared event bus. Clones publish to and subscribe on the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Inner>,
}

/// One recorded emission
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogEntry {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Subscribers that saw the event
    pub delivered_to: usize,
}

// Subscribers never run while a write guard is held, so a poisoned lock
// still holds consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future event of type `E`.
    ///
    /// ```ignore
    /// bus.subscribe::<SessionEnded, _>(|event| {
    ///     log::info!("session ended: {:?}", event.reason);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Box::new(move |any: &dyn Any| match any.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => log::error!(
                "subscriber for {} received a different event type",
                std::any::type_name::<E>()
            ),
        });

        write(&self.inner.subscribers)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(subscriber);
    }

    /// Record `event` and deliver it to its subscribers.
    ///
    /// A panicking subscriber is logged; the rest still receive the event.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let subscribers = read(&self.inner.subscribers);
        let targets = subscribers
            .get(&TypeId::of::<E>())
            .map(Vec::as_slice)
            .unwrap_or_default();

        log::debug!(
            "event {} ({}) -> {} subscriber(s)",
            event.event_type(),
            event.event_id(),
            targets.len()
        );
        self.record(EventLogEntry {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            delivered_to: targets.len(),
        });

        for (position, subscriber) in targets.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| subscriber(&event as &dyn Any)));
            if outcome.is_err() {
                log::error!(
                    "subscriber #{} panicked while handling {}",
                    position,
                    event.event_type()
                );
            }
        }
    }

    fn record(&self, entry: EventLogEntry) {
        let mut log = write(&self.inner.log);
        if log.len() == EVENT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(entry);
    }

    /// Recorded emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        read(&self.inner.log).iter().cloned().collect()
    }

    /// How many recorded emissions have the given event type name
    pub fn emitted_count(&self, event_type: &str) -> usize {
        read(&self.inner.log)
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .count()
    }

    pub fn clear_event_log(&self) {
        write(&self.inner.log).clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        read(&self.inner.subscribers)
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationId, ApplicationStatus, CandidateId, JobId, Role};
    use crate::events::types::{
        ApplicationStatusChanged, ApplicationSubmitted, SessionEndReason, SessionEnded,
        SessionStarted,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn submitted() -> ApplicationSubmitted {
        ApplicationSubmitted::new(
            ApplicationId::new("a1"),
            CandidateId::new("c1"),
            JobId::new("j1"),
        )
    }

    #[test]
    fn test_subscriber_receives_event_fields() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);

        bus.subscribe::<ApplicationSubmitted, _>(move |event| {
            *sink.lock().unwrap() = Some(event.job_id.clone());
        });
        bus.emit(submitted());

        assert_eq!(*seen.lock().unwrap(), Some(JobId::new("j1")));
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 1..=3 {
            let order = Arc::clone(&order);
            bus.subscribe::<SessionEnded, _>(move |_| order.lock().unwrap().push(n));
        }
        bus.emit(SessionEnded::new(SessionEndReason::Logout));

        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_log_records_type_and_delivery() {
        let bus = EventBus::new();
        bus.subscribe::<ApplicationStatusChanged, _>(|_| {});

        bus.emit(submitted());
        bus.emit(ApplicationStatusChanged::new(
            ApplicationId::new("a1"),
            ApplicationStatus::Applied,
            ApplicationStatus::Interviewing,
            Role::Company,
        ));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "ApplicationSubmitted");
        assert_eq!(log[0].delivered_to, 0);
        assert_eq!(log[1].event_type, "ApplicationStatusChanged");
        assert_eq!(log[1].delivered_to, 1);
        assert_eq!(bus.emitted_count("ApplicationSubmitted"), 1);

        bus.clear_event_log();
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_log_is_bounded() {
        let bus = EventBus::new();
        for _ in 0..EVENT_LOG_CAPACITY + 10 {
            bus.emit(SessionEnded::new(SessionEndReason::Unauthorized));
        }
        bus.emit(submitted());

        let log = bus.get_event_log();
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);
        assert_eq!(log.last().map(|e| e.event_type), Some("ApplicationSubmitted"));
    }

    #[test]
    fn test_subscriber_count_is_per_type() {
        let bus = EventBus::new();
        bus.subscribe::<SessionStarted, _>(|_| {});
        bus.subscribe::<SessionStarted, _>(|_| {});

        assert_eq!(bus.subscriber_count::<SessionStarted>(), 2);
        assert_eq!(bus.subscriber_count::<SessionEnded>(), 0);
    }

    #[test]
    fn test_panicking_subscriber_does_not_stop_delivery() {
        let bus = EventBus::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<ApplicationSubmitted, _>(|_| panic!("subscriber failure"));
        let counter = Arc::clone(&delivered);
        bus.subscribe::<ApplicationSubmitted, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(submitted());
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_subscribers_and_log() {
        let bus = EventBus::new();
        let clone = bus.clone();
        clone.subscribe::<SessionStarted, _>(|_| {});
        clone.emit(SessionStarted::new(Role::Admin, "root".to_string()));

        assert_eq!(bus.subscriber_count::<SessionStarted>(), 1);
        assert_eq!(bus.emitted_count("SessionStarted"), 1);
    }
}
