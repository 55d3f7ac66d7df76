//! Event propagation status for key handlers.
//!
//! Key events go to the focused form field first; whatever it leaves
//! unconsumed falls through to the global bindings.

/// Whether a handler used a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was handled and must not be propagated further.
    Consumed,
    /// The event should be passed to the next handler.
    NotConsumed,
}
