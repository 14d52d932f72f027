pub mod aggregate;
pub mod ports;
pub mod projector;
pub mod write;

pub use aggregate::AuthAggregate;
pub use ports::CredentialsPort;
pub use projector::AuthProjector;
pub use write::UserLogin;
