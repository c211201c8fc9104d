pub mod memory;
pub mod s3_store;

pub use memory::MemoryStore;
pub use s3_store::S3Store;
