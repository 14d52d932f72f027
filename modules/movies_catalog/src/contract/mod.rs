pub mod model;

pub use synckit::StoreError;
