//! Touch input: normalized contacts and gesture-start notifications

pub mod contacts;
pub mod touch_source;

pub use contacts::{compute_centroid, normalize_screen_position, ContactPoint, ContactSet};
pub use touch_source::{
    GestureEvent, SharedTouchSource, SubscriberList, Subscription, TouchInput, TouchSource,
};
