//! Touch source: per-frame contacts plus edge-triggered gesture notifications
//!
//! Consumers hold a [`Subscription`] for as long as they want notifications.
//! The source only keeps weak references to subscriber inboxes, so dropping
//! the subscription is the deregistration.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use super::contacts::{normalize_screen_position, ContactPoint, ContactSet};
use crate::foundation::math::{Vec2, Vec3};

/// Notification fired when the active contact count changes to 1 or 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    /// Active count just became exactly one
    OneContactStarted,
    /// Active count just became exactly two
    TwoContactStarted,
}

impl GestureEvent {
    /// Event to publish for a count change, if any
    pub const fn for_transition(previous: usize, current: usize) -> Option<Self> {
        if previous == current {
            return None;
        }
        match current {
            1 => Some(Self::OneContactStarted),
            2 => Some(Self::TwoContactStarted),
            _ => None,
        }
    }
}

type Inbox = RefCell<VecDeque<GestureEvent>>;

/// Scoped registration with a touch source
///
/// Events queue up in the subscription's inbox until drained. Dropping it
/// stops delivery.
#[derive(Debug)]
pub struct Subscription {
    inbox: Rc<Inbox>,
}

impl Subscription {
    /// Take all pending events, oldest first
    pub fn drain(&self) -> Vec<GestureEvent> {
        self.inbox.borrow_mut().drain(..).collect()
    }

    /// Number of events waiting to be drained
    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}

/// Fan-out list of subscriber inboxes
#[derive(Debug, Default)]
pub struct SubscriberList {
    inboxes: Vec<Weak<Inbox>>,
}

impl SubscriberList {
    /// Register a new subscriber
    pub fn subscribe(&mut self) -> Subscription {
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        self.inboxes.push(Rc::downgrade(&inbox));
        Subscription { inbox }
    }

    /// Deliver an event to every live subscriber, pruning dropped ones
    pub fn publish(&mut self, event: GestureEvent) {
        self.inboxes.retain(|weak| match weak.upgrade() {
            Some(inbox) => {
                inbox.borrow_mut().push_back(event);
                true
            }
            None => false,
        });
    }

    /// Number of subscribers still alive
    pub fn live_count(&self) -> usize {
        self.inboxes.iter().filter(|weak| weak.strong_count() > 0).count()
    }
}

/// Input collaborator consumed by the transform driver
pub trait TouchSource {
    /// Contacts active this frame
    fn contacts(&self) -> &ContactSet;

    /// Register for gesture-start notifications
    fn subscribe(&mut self) -> Subscription;

    /// Number of contacts active this frame
    fn active_contact_count(&self) -> usize {
        self.contacts().len()
    }
}

/// Shared handle to a touch source
pub type SharedTouchSource = Rc<RefCell<dyn TouchSource>>;

/// Stock touch source fed with raw pixel positions once per frame
#[derive(Debug)]
pub struct TouchInput {
    screen_size: Vec2,
    contacts: ContactSet,
    subscribers: SubscriberList,
    debug_contacts: bool,
}

impl TouchInput {
    /// Create a touch source for a screen of the given pixel size
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_size: Vec2::new(screen_width, screen_height),
            contacts: ContactSet::new(),
            subscribers: SubscriberList::default(),
            debug_contacts: false,
        }
    }

    /// Trace-log every normalized contact on update
    pub fn with_debug_contacts(mut self, enabled: bool) -> Self {
        self.debug_contacts = enabled;
        self
    }

    /// Whether contacts are trace-logged on update
    pub const fn debug_contacts(&self) -> bool {
        self.debug_contacts
    }

    /// Update screen dimensions (call when the window resizes)
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_size = Vec2::new(width, height);
    }

    /// Width over height, zero for a degenerate screen
    pub fn aspect_ratio(&self) -> f32 {
        if self.screen_size.y > 0.0 {
            self.screen_size.x / self.screen_size.y
        } else {
            0.0
        }
    }

    /// Replace this frame's contacts with raw pixel positions
    pub fn update(&mut self, pixels: &[Vec2]) {
        let screen_size = self.screen_size;
        self.replace_contacts(pixels.iter().map(|p| normalize_screen_position(*p, screen_size)));
    }

    /// Replace this frame's contacts with already-normalized positions
    pub fn update_normalized(&mut self, points: &[Vec3]) {
        self.replace_contacts(points.iter().copied());
    }

    /// Number of subscribers still registered
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.live_count()
    }

    fn replace_contacts(&mut self, points: impl Iterator<Item = Vec3>) {
        let previous = self.contacts.len();

        self.contacts.clear();
        for point in points {
            self.contacts.push(ContactPoint::new(point.x, point.y));
        }

        if self.debug_contacts {
            for (i, contact) in self.contacts.points().iter().enumerate() {
                log::trace!("F {} [ x = {:.2} | y = {:.2} ]", i, contact.0.x, contact.0.y);
            }
            if !self.contacts.is_empty() {
                let centroid = self.contacts.centroid();
                log::trace!("C [ x = {:.2} | y = {:.2} ]", centroid.x, centroid.y);
            }
        }

        if let Some(event) = GestureEvent::for_transition(previous, self.contacts.len()) {
            log::debug!("Contact count {} -> {}: {:?}", previous, self.contacts.len(), event);
            self.subscribers.publish(event);
        }
    }
}

impl TouchSource for TouchInput {
    fn contacts(&self) -> &ContactSet {
        &self.contacts
    }

    fn subscribe(&mut self) -> Subscription {
        self.subscribers.subscribe()
    }
}
