use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::data::linelist::LineList;
use crate::data::model::LayerId;
use crate::window::container::PlotContainer;
use crate::window::roi::Roi;
use crate::window::WindowId;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// Discriminant used for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    AddedPlot,
    RemovedPlot,
    SelectedPlot,
    UpdatedRoi,
    AddedLinelist,
}

/// Payload of an `UpdatedRoi` event: either one general ROI or the whole
/// measurement triplet.
#[derive(Debug, Clone)]
pub enum RoiUpdate {
    Single(Roi),
    Measurement(Vec<Roi>),
}

/// Events exchanged between sub-windows and other panels. Cross-window
/// coordination happens only through these, never through shared state.
#[derive(Debug, Clone)]
pub enum Event {
    /// A layer was plotted. `container` is `None` when the triggering action
    /// raced ahead of data loading; receivers ignore that case.
    AddedPlot {
        container: Option<PlotContainer>,
        window: WindowId,
    },
    /// A layer's plot was removed. `window: None` addresses every window.
    RemovedPlot {
        layer: LayerId,
        window: Option<WindowId>,
    },
    SelectedPlot {
        layer: LayerId,
    },
    UpdatedRoi(RoiUpdate),
    AddedLinelist {
        linelist: LineList,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::AddedPlot { .. } => EventKind::AddedPlot,
            Event::RemovedPlot { .. } => EventKind::RemovedPlot,
            Event::SelectedPlot { .. } => EventKind::SelectedPlot,
            Event::UpdatedRoi(_) => EventKind::UpdatedRoi,
            Event::AddedLinelist { .. } => EventKind::AddedLinelist,
        }
    }
}

// ---------------------------------------------------------------------------
// Event bus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Mailbox = Rc<RefCell<VecDeque<Event>>>;

struct SubscriberEntry {
    id: SubscriberId,
    kinds: Vec<EventKind>,
    mailbox: Mailbox,
}

/// A handle to a subscriber's FIFO mailbox. Events are delivered in publish
/// order; the subscriber drains its mailbox when it is ready to handle them.
pub struct Subscription {
    id: SubscriberId,
    mailbox: Mailbox,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Take all pending events, oldest first.
    pub fn drain(&self) -> Vec<Event> {
        self.mailbox.borrow_mut().drain(..).collect()
    }
}

/// Single-threaded publish/subscribe dispatcher. Subscribers register for a
/// set of event kinds and receive matching events in their own mailbox, in
/// subscription order. Teardown is explicit via `unsubscribe`.
pub struct EventBus {
    subscribers: Vec<SubscriberEntry>,
    next_id: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn subscribe(&mut self, kinds: &[EventKind]) -> Subscription {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let mailbox: Mailbox = Rc::new(RefCell::new(VecDeque::new()));
        self.subscribers.push(SubscriberEntry {
            id,
            kinds: kinds.to_vec(),
            mailbox: Rc::clone(&mailbox),
        });

        Subscription { id, mailbox }
    }

    /// Remove a subscriber. Pending events in its mailbox are dropped with
    /// it; unsubscribing an unknown id is a no-op.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|s| s.id != id);
    }

    /// Deliver an event to every subscriber registered for its kind.
    pub fn publish(&mut self, event: Event) {
        let kind = event.kind();
        for sub in &self.subscribers {
            if sub.kinds.contains(&kind) {
                sub.mailbox.borrow_mut().push_back(event.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Layer, LayerId};
    use crate::units::{DispersionUnit, FluxUnit};

    fn layer_id() -> LayerId {
        Layer::new(
            "t",
            vec![1.0],
            vec![1.0],
            None,
            DispersionUnit::Angstrom,
            FluxUnit::ErgPerSCm2Angstrom,
        )
        .id
    }

    #[test]
    fn events_arrive_in_publish_order() {
        let mut bus = EventBus::new();
        let sub = bus.subscribe(&[EventKind::SelectedPlot]);

        let a = layer_id();
        let b = layer_id();
        bus.publish(Event::SelectedPlot { layer: a });
        bus.publish(Event::SelectedPlot { layer: b });

        let events = sub.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::SelectedPlot { layer } if layer == a));
        assert!(matches!(events[1], Event::SelectedPlot { layer } if layer == b));
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn subscription_filters_by_kind() {
        let mut bus = EventBus::new();
        let sub = bus.subscribe(&[EventKind::RemovedPlot]);

        bus.publish(Event::SelectedPlot { layer: layer_id() });
        assert!(sub.drain().is_empty());

        bus.publish(Event::RemovedPlot {
            layer: layer_id(),
            window: None,
        });
        assert_eq!(sub.drain().len(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let sub = bus.subscribe(&[EventKind::SelectedPlot]);
        bus.unsubscribe(sub.id());

        bus.publish(Event::SelectedPlot { layer: layer_id() });
        assert!(sub.drain().is_empty());
    }
}
