//! Shared kernel for the synchronization layer: identity scoping, the store
//! error taxonomy, change notification plumbing and the event output port.

pub mod error;
pub mod events;
pub mod identity;
pub mod notify;

pub use error::StoreError;
pub use events::EventPublisher;
pub use identity::{IdentityProvider, Scope, StaticIdentity, GUEST_SCOPE};
pub use notify::ChangeNotifier;
