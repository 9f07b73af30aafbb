//! Identity lifecycle events.
//!
//! Sign-in and sign-out publish events on an in-process broadcast hub so
//! interested components can react without any ambient "current user"
//! global. Subscribers that lag simply miss events; nothing blocks the
//! publisher.

use tokio::sync::broadcast;

use crate::domain::user::UserId;

/// Default buffered capacity of the event channel.
const DEFAULT_CAPACITY: usize = 16;

/// A change to the authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityEvent {
    SignedIn { user_id: UserId },
    SignedOut { user_id: UserId },
}

/// Broadcast hub for [`IdentityEvent`]s.
#[derive(Debug, Clone)]
pub struct IdentityEvents {
    sender: broadcast::Sender<IdentityEvent>,
}

impl IdentityEvents {
    /// Create a hub with the default capacity.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { sender }
    }

    /// Subscribe to future identity changes.
    pub fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: IdentityEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for IdentityEvents {
    fn default() -> Self {
        Self::new()
    }
}
