//! Named-event registry with synchronous, registration-ordered callback fan-out.

use std::collections::HashMap;
use std::fmt;

use tracing::{instrument, trace};

/// Subscriber callback stored by the registry.
type Subscriber<P> = Box<dyn Fn(&P)>;

/// Registry mapping event names to an ordered sequence of subscribers.
///
/// Each registry instance carries one payload type `P` (default `()` for
/// pure signals); heterogeneous payloads are expressed as an enum or tuple.
/// Subscribers for an event are invoked synchronously and in registration
/// order, every one receiving the same payload reference. The registry never
/// removes or reorders subscribers: there is no unsubscribe operation and
/// growth is monotonic.
///
/// The registry performs no isolation between subscribers: a panic inside
/// one callback unwinds through [`emit`] and aborts delivery to the
/// remaining subscribers of that emission. Callers that need isolation must
/// guard inside each callback themselves.
///
/// Subscribers are plain `Fn` trait objects without `Send`/`Sync` bounds, so
/// the registry is single-threaded by construction: not safe for concurrent
/// mutation, nor for any other cross-thread use. Stateful subscribers
/// capture their state via interior mutability (`Rc<RefCell<..>>`, `Cell`).
/// Subscribers cannot register further subscribers on the registry that is
/// invoking them: [`on`] needs `&mut self` while [`emit`] holds `&self`.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use inproc::EventRegistry;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let log = Rc::clone(&seen);
///
/// let mut registry: EventRegistry<String> = EventRegistry::new();
/// registry.on("greeting", move |payload: &String| {
///     log.borrow_mut().push(payload.clone());
/// });
/// registry.emit("greeting", &"hello".to_string());
///
/// assert_eq!(*seen.borrow(), vec!["hello".to_string()]);
/// ```
///
/// [`on`]: EventRegistry::on
/// [`emit`]: EventRegistry::emit
pub struct EventRegistry<P = ()> {
    /// Ordered subscriber sequences keyed by event name. An entry exists
    /// only once the event has at least one subscriber.
    channels: HashMap<String, Vec<Subscriber<P>>>,
}

impl<P> Default for EventRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EventRegistry<P> {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    /// Appends `callback` to the subscriber sequence for `event`, creating
    /// the sequence on first registration.
    ///
    /// Always succeeds. Registering the same logic twice stores it twice and
    /// invokes it once per registration; no deduplication is performed.
    #[instrument(level = "trace", skip_all)]
    pub fn on<F>(&mut self, event: impl Into<String>, callback: F)
    where
        F: Fn(&P) + 'static,
    {
        let event = event.into();
        trace!(%event, "registering subscriber");
        self.channels.entry(event).or_default().push(Box::new(callback));
    }

    /// Invokes every subscriber registered for `event`, in registration
    /// order, passing the same `payload` reference to each.
    ///
    /// Emitting an event nobody subscribed to is a silent no-op: nothing is
    /// invoked and no entry is created for the event.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by a subscriber; later subscribers of
    /// that emission are not invoked.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn emit(&self, event: &str, payload: &P) {
        let subscribers = match self.channels.get(event) {
            Some(subscribers) => subscribers,
            None => {
                trace!("no subscribers registered, emit is a no-op");
                return;
            }
        };
        trace!(subscribers = subscribers.len(), "dispatching");
        for callback in subscribers {
            callback(payload);
        }
    }

    /// Number of subscribers registered for `event`, 0 if there are none.
    #[instrument(level = "trace", skip(self))]
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.channels.get(event).map_or(0, Vec::len)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn has_subscribers(&self, event: &str) -> bool {
        self.subscriber_count(event) > 0
    }

    /// Number of distinct event names with at least one subscriber.
    #[instrument(level = "trace", skip(self))]
    pub fn event_count(&self) -> usize {
        self.channels.len()
    }

    /// Event names with their subscriber counts, sorted by name. HashMap
    /// iteration order is not stable, so rendering and Debug go through
    /// this.
    pub(crate) fn sorted_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .channels
            .iter()
            .map(|(event, subscribers)| (event.as_str(), subscribers.len()))
            .collect();
        counts.sort();
        counts
    }
}

// Subscriber closures are not Debug; show per-event counts.
impl<P> fmt::Debug for EventRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("subscribers", &self.sorted_counts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entry_until_first_registration() {
        let registry: EventRegistry<()> = EventRegistry::new();
        assert_eq!(registry.event_count(), 0);
        assert!(!registry.has_subscribers("anything"));

        registry.emit("anything", &());
        assert_eq!(registry.event_count(), 0);
    }

    #[test]
    fn test_counts_track_registrations() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        registry.on("tick", |_| {});
        registry.on("tick", |_| {});
        registry.on("tock", |_| {});

        assert_eq!(registry.subscriber_count("tick"), 2);
        assert_eq!(registry.subscriber_count("tock"), 1);
        assert_eq!(registry.subscriber_count("missing"), 0);
        assert_eq!(registry.event_count(), 2);
    }

    #[test]
    fn test_debug_output_is_sorted() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        registry.on("b", |_| {});
        registry.on("a", |_| {});
        registry.on("a", |_| {});

        let rendered = format!("{registry:?}");
        assert_eq!(
            rendered,
            "EventRegistry { subscribers: [(\"a\", 2), (\"b\", 1)] }"
        );
    }
}
