pub mod aggregate;
pub mod events;
pub mod ports;
pub mod projection;
pub mod projector;

pub use aggregate::ProfileAggregate;
pub use events::ProfileDomainEvent;
pub use ports::{ProfileStore, SessionPort, StoredProfile};
pub use projection::ProfileProjection;
pub use projector::ProfileProjector;
