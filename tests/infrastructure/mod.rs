mod jsonl_record_store_test;
mod qwen_auditor_test;
