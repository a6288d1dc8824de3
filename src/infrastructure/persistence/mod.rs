mod jsonl_record_store;

pub use jsonl_record_store::JsonlRecordStore;
