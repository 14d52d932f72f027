pub mod document_repo;
pub mod http_store;
pub mod mapper;
pub mod memory;
