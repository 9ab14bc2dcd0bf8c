#![forbid(unsafe_code)]

//! Walkthrough notifications.
//!
//! Subscribers register a callback with [`EventHub::subscribe`] and keep
//! the returned [`Subscription`] alive for as long as they want events.
//! The hub holds only weak references, so dropping the guard unsubscribes;
//! dead entries are pruned on the next emit.
//!
//! Callbacks run synchronously, in registration order, after the state
//! change they describe has been applied.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use coachmark_core::Step;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The finish control on the last step.
    Completed,
    /// An explicit skip request from the host.
    Skipped,
    /// The card's dismiss control.
    Dismissed,
}

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkthroughEvent {
    /// The visible step changed (including the first step on `start`).
    StepChanged {
        /// 0-based index of the new step.
        index: usize,
        step: Step,
    },
    /// The session ended. Emitted once per session.
    Finished { reason: FinishReason },
}

type CallbackRc = Rc<dyn Fn(&WalkthroughEvent)>;
type CallbackWeak = Weak<dyn Fn(&WalkthroughEvent)>;

/// Fan-out point for [`WalkthroughEvent`]s.
#[derive(Default)]
pub struct EventHub {
    subscribers: RefCell<Vec<CallbackWeak>>,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; it stays registered while the guard lives.
    pub fn subscribe(&self, callback: impl Fn(&WalkthroughEvent) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    /// Registered subscribers, including dead ones not yet pruned.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Deliver `event` to every live subscriber.
    ///
    /// The subscriber list is not borrowed while callbacks run, so a
    /// callback may subscribe further listeners (they see the next event).
    pub fn emit(&self, event: &WalkthroughEvent) {
        let callbacks: Vec<CallbackRc> = {
            let mut subs = self.subscribers.borrow_mut();
            subs.retain(|w| w.strong_count() > 0);
            subs.iter().filter_map(|w| w.upgrade()).collect()
        };
        for cb in &callbacks {
            cb(event);
        }
    }
}

/// RAII guard for a subscriber callback.
pub struct Subscription {
    _guard: CallbackRc,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn finished() -> WalkthroughEvent {
        WalkthroughEvent::Finished {
            reason: FinishReason::Completed,
        }
    }

    #[test]
    fn delivers_in_registration_order() {
        let hub = EventHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l1 = Rc::clone(&log);
        let l2 = Rc::clone(&log);
        let _a = hub.subscribe(move |_| l1.borrow_mut().push(1));
        let _b = hub.subscribe(move |_| l2.borrow_mut().push(2));
        hub.emit(&finished());
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let hub = EventHub::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = hub.subscribe(move |_| h.set(h.get() + 1));
        hub.emit(&finished());
        drop(sub);
        hub.emit(&finished());
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.subscriber_count(), 0, "pruned on emit");
    }

    #[test]
    fn subscribe_during_emit_is_allowed() {
        let hub = Rc::new(EventHub::new());
        let late: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hub2 = Rc::clone(&hub);
        let late2 = Rc::clone(&late);
        let _sub = hub.subscribe(move |_| {
            if late2.borrow().is_none() {
                *late2.borrow_mut() = Some(hub2.subscribe(|_| {}));
            }
        });
        hub.emit(&finished());
        assert_eq!(hub.subscriber_count(), 2);
    }
}
