//=========================================================================
// Event Bus
//=========================================================================
//
// Decoupled publish/dispatch between input, UI widgets and scenes.
//
// Architecture:
//   publish(event, false, _) ──→ queue ──→ update(sink) ──→ subscribers
//   publish(event, true, Some(target)) ──→ directed ──→ dispatch_directed(sink)
//
// The bus does not own its receivers. Delivery goes through an
// `EventSink` (the scene stack), which is handed in at dispatch time.
//
// Pattern: publish → update (drain FIFO) → next tick
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::event::{Event, EventTarget};
use crate::core::scene::SceneKey;

//=== EventSink ===========================================================

/// Resolves bus targets to handlers.
///
/// Implementors receive `&mut EventBus` so handlers may publish further
/// events while being delivered to.
pub trait EventSink<K: SceneKey> {
    fn deliver(&mut self, target: EventTarget<K>, event: &Event, bus: &mut EventBus<K>);
}

//=== EventBus ============================================================

/// FIFO event queue with ordered subscribers and a directed fast path.
///
/// Undirected events reach every subscriber in subscription order on the
/// next `update()`. Events published while `update()` is draining land in
/// a fresh queue and wait for the following call, so a handler that
/// republishes cannot grow the current drain pass.
pub struct EventBus<K: SceneKey> {
    subscribers: Vec<EventTarget<K>>,
    queue: Vec<(Option<EventTarget<K>>, Event)>,
    directed: VecDeque<(EventTarget<K>, Event)>,
}

impl<K: SceneKey> EventBus<K> {
    /// Creates an empty bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            queue: Vec::new(),
            directed: VecDeque::new(),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers a listener. Returns `false` if it was already registered.
    pub fn subscribe(&mut self, target: EventTarget<K>) -> bool {
        if self.subscribers.contains(&target) {
            warn!("{:?} is already subscribed", target);
            return false;
        }

        debug!("Subscribed {:?}", target);
        self.subscribers.push(target);
        true
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, target: EventTarget<K>) -> bool {
        match self.subscribers.iter().position(|&t| t == target) {
            Some(pos) => {
                debug!("Unsubscribed {:?}", target);
                self.subscribers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns true if `target` is currently subscribed.
    pub fn is_subscribed(&self, target: EventTarget<K>) -> bool {
        self.subscribers.contains(&target)
    }

    /// Subscribers in dispatch order.
    pub fn subscribers(&self) -> &[EventTarget<K>] {
        &self.subscribers
    }

    //--- Publishing -------------------------------------------------------

    /// Publishes an event.
    ///
    /// With `immediate` and a `target`, the event bypasses the queue and is
    /// handed to that target alone on the next `dispatch_directed` (which
    /// the scene stack runs as soon as the publishing handler returns).
    /// Everything else is queued for the next `update()`.
    ///
    /// A target that is not subscribed turns the call into a no-op: the
    /// receiving scene may already have been torn down.
    pub fn publish(&mut self, event: Event, immediate: bool, target: Option<EventTarget<K>>) {
        if let Some(target) = target {
            if !self.is_subscribed(target) {
                debug!("Dropping {:?}: no listener registered as {:?}", event, target);
                return;
            }
        }

        match (immediate, target) {
            (true, Some(target)) => self.directed.push_back((target, event)),
            (_, target) => self.queue.push((target, event)),
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Drains the queue in FIFO order and returns the number of queued
    /// events drained.
    ///
    /// Directed events still waiting from outside a handler go first.
    /// Each undirected event goes to the subscribers registered at the
    /// moment it is delivered, in subscription order. Directed events
    /// raised by a handler are flushed before the next queued event.
    pub fn update(&mut self, sink: &mut dyn EventSink<K>) -> usize {
        self.dispatch_directed(sink);

        let pending = std::mem::take(&mut self.queue);

        for (target, event) in &pending {
            match target {
                Some(target) => {
                    if self.is_subscribed(*target) {
                        sink.deliver(*target, event, self);
                    } else {
                        debug!("{:?} unsubscribed before {:?} was delivered", target, event);
                    }
                }
                None => {
                    let receivers = self.subscribers.clone();
                    for receiver in receivers {
                        sink.deliver(receiver, event, self);
                    }
                }
            }

            self.dispatch_directed(sink);
        }

        if !pending.is_empty() {
            trace!("Event bus drained {} events", pending.len());
        }

        pending.len()
    }

    /// Delivers pending directed events synchronously.
    pub fn dispatch_directed(&mut self, sink: &mut dyn EventSink<K>) {
        while let Some((target, event)) = self.directed.pop_front() {
            if self.is_subscribed(target) {
                sink.deliver(target, &event, self);
            } else {
                debug!("{:?} unsubscribed before {:?} was delivered", target, event);
            }
        }
    }

    //--- Query API --------------------------------------------------------

    /// Number of events waiting for the next `update()`.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of directed events waiting for `dispatch_directed`.
    pub fn pending_directed(&self) -> usize {
        self.directed.len()
    }
}

impl<K: SceneKey> Default for EventBus<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::ActionId;
    use crate::core::input::KeyCode;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
    }

    impl SceneKey for TestScene {}

    //--- Recording Sink ---------------------------------------------------

    #[derive(Default)]
    struct Recorder {
        log: Vec<(EventTarget<TestScene>, Event)>,
        republish: Option<Event>,
        direct_on_back: bool,
    }

    impl EventSink<TestScene> for Recorder {
        fn deliver(
            &mut self,
            target: EventTarget<TestScene>,
            event: &Event,
            bus: &mut EventBus<TestScene>,
        ) {
            self.log.push((target, *event));

            if let Some(next) = self.republish.take() {
                bus.publish(next, false, None);
            }

            if self.direct_on_back && *event == Event::key_pressed(KeyCode::Escape) {
                bus.publish(Event::Back, true, Some(EventTarget::Scene(TestScene::B)));
            }
        }
    }

    fn bus_with(targets: &[EventTarget<TestScene>]) -> EventBus<TestScene> {
        let mut bus = EventBus::new();
        for &t in targets {
            bus.subscribe(t);
        }
        bus
    }

    //--- Subscription Tests -----------------------------------------------

    #[test]
    fn new_bus_is_empty() {
        let bus = EventBus::<TestScene>::new();
        assert!(bus.subscribers().is_empty());
        assert_eq!(bus.pending(), 0);
        assert_eq!(bus.pending_directed(), 0);
    }

    #[test]
    fn duplicate_subscription_is_rejected() {
        let mut bus = EventBus::<TestScene>::new();
        assert!(bus.subscribe(EventTarget::Stack));
        assert!(!bus.subscribe(EventTarget::Stack));
        assert_eq!(bus.subscribers().len(), 1);
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let mut bus = bus_with(&[EventTarget::Stack]);
        assert!(bus.unsubscribe(EventTarget::Stack));
        assert!(!bus.unsubscribe(EventTarget::Stack));
        assert!(!bus.is_subscribed(EventTarget::Stack));
    }

    //--- Queued Delivery --------------------------------------------------

    #[test]
    fn queued_events_wait_for_update() {
        let mut bus = bus_with(&[EventTarget::Stack]);
        let mut sink = Recorder::default();

        bus.publish(Event::UiAction(ActionId(1)), false, None);
        assert_eq!(bus.pending(), 1);
        assert!(sink.log.is_empty());

        assert_eq!(bus.update(&mut sink), 1);
        assert_eq!(sink.log, vec![(EventTarget::Stack, Event::UiAction(ActionId(1)))]);
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn delivery_is_fifo_then_subscription_order() {
        let mut bus = bus_with(&[EventTarget::Scene(TestScene::B), EventTarget::Stack]);
        let mut sink = Recorder::default();

        bus.publish(Event::UiAction(ActionId(1)), false, None);
        bus.publish(Event::UiAction(ActionId(2)), false, None);
        bus.update(&mut sink);

        assert_eq!(
            sink.log,
            vec![
                (EventTarget::Scene(TestScene::B), Event::UiAction(ActionId(1))),
                (EventTarget::Stack, Event::UiAction(ActionId(1))),
                (EventTarget::Scene(TestScene::B), Event::UiAction(ActionId(2))),
                (EventTarget::Stack, Event::UiAction(ActionId(2))),
            ]
        );
    }

    #[test]
    fn queued_targeted_event_reaches_only_its_target() {
        let mut bus = bus_with(&[EventTarget::Stack, EventTarget::Scene(TestScene::A)]);
        let mut sink = Recorder::default();

        bus.publish(Event::Back, false, Some(EventTarget::Scene(TestScene::A)));
        bus.update(&mut sink);

        assert_eq!(sink.log, vec![(EventTarget::Scene(TestScene::A), Event::Back)]);
    }

    #[test]
    fn events_published_during_update_are_deferred() {
        let mut bus = bus_with(&[EventTarget::Stack]);
        let mut sink = Recorder {
            republish: Some(Event::UiAction(ActionId(9))),
            ..Default::default()
        };

        bus.publish(Event::UiAction(ActionId(1)), false, None);
        assert_eq!(bus.update(&mut sink), 1);
        assert_eq!(sink.log.len(), 1);
        assert_eq!(bus.pending(), 1);

        assert_eq!(bus.update(&mut sink), 1);
        assert_eq!(sink.log[1], (EventTarget::Stack, Event::UiAction(ActionId(9))));
    }

    //--- Directed Delivery ------------------------------------------------

    #[test]
    fn directed_event_bypasses_queue() {
        let mut bus = bus_with(&[EventTarget::Stack, EventTarget::Scene(TestScene::A)]);
        let mut sink = Recorder::default();

        bus.publish(Event::Back, true, Some(EventTarget::Scene(TestScene::A)));
        assert_eq!(bus.pending(), 0);
        assert_eq!(bus.pending_directed(), 1);

        bus.dispatch_directed(&mut sink);
        assert_eq!(sink.log, vec![(EventTarget::Scene(TestScene::A), Event::Back)]);
    }

    #[test]
    fn update_flushes_directed_event_with_empty_queue() {
        let mut bus = bus_with(&[EventTarget::Stack]);
        let mut sink = Recorder::default();

        bus.publish(Event::Back, true, Some(EventTarget::Stack));
        assert_eq!(bus.update(&mut sink), 0);

        assert_eq!(sink.log, vec![(EventTarget::Stack, Event::Back)]);
        assert_eq!(bus.pending_directed(), 0);
    }

    #[test]
    fn directed_event_precedes_queued_events_on_update() {
        let mut bus = bus_with(&[EventTarget::Stack]);
        let mut sink = Recorder::default();

        bus.publish(Event::key_pressed(KeyCode::Space), false, None);
        bus.publish(Event::Back, true, Some(EventTarget::Stack));
        assert_eq!(bus.update(&mut sink), 1);

        assert_eq!(
            sink.log,
            vec![
                (EventTarget::Stack, Event::Back),
                (EventTarget::Stack, Event::key_pressed(KeyCode::Space)),
            ]
        );
    }

    #[test]
    fn directed_event_raised_by_handler_is_delivered_in_same_pass() {
        let mut bus = bus_with(&[EventTarget::Stack, EventTarget::Scene(TestScene::B)]);
        let mut sink = Recorder {
            direct_on_back: true,
            ..Default::default()
        };

        bus.publish(Event::key_pressed(KeyCode::Escape), false, Some(EventTarget::Stack));
        bus.update(&mut sink);

        assert_eq!(
            sink.log,
            vec![
                (EventTarget::Stack, Event::key_pressed(KeyCode::Escape)),
                (EventTarget::Scene(TestScene::B), Event::Back),
            ]
        );
    }

    #[test]
    fn directed_publish_to_unregistered_target_is_noop() {
        let mut bus = bus_with(&[EventTarget::Stack]);
        let mut sink = Recorder::default();

        bus.publish(Event::Back, true, Some(EventTarget::Scene(TestScene::B)));
        assert_eq!(bus.pending_directed(), 0);

        assert_eq!(bus.update(&mut sink), 0);
        bus.dispatch_directed(&mut sink);
        assert!(sink.log.is_empty());
    }

    #[test]
    fn update_on_empty_bus_is_noop() {
        let mut bus = EventBus::<TestScene>::new();
        let mut sink = Recorder::default();
        assert_eq!(bus.update(&mut sink), 0);
        assert!(sink.log.is_empty());
    }
}
