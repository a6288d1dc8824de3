mod oss_store;

pub use oss_store::OssBlobStore;
