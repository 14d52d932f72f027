pub mod favorite;
pub mod movie;
pub mod remote_key;
