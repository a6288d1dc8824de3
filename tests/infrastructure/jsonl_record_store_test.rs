use chairside::application::ports::{RecordStore, RecordStoreError};
use chairside::domain::{ConsultationRecord, ConsultationReport};
use chairside::infrastructure::persistence::JsonlRecordStore;

fn sample_record(patient: &str) -> ConsultationRecord {
    let report = ConsultationReport {
        summary: "患者咨询种植牙".to_string(),
        customer_intent: "中".to_string(),
        sales_score: 66,
        pain_points: "怕痛".to_string(),
        good_points: "耐心解答".to_string(),
        bad_points: "未留联系方式".to_string(),
        next_step: "一周后回访".to_string(),
    };
    ConsultationRecord::new("王医生", patient, "否", report, "【说话人 0】: 您好")
}

#[tokio::test]
async fn given_appended_records_when_loading_then_round_trip_in_append_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = JsonlRecordStore::new(dir.path().join("consultations.jsonl")).unwrap();

    store.append(&sample_record("患者A")).await.unwrap();
    store.append(&sample_record("患者B")).await.unwrap();

    let records = store.load_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].patient, "患者A");
    assert_eq!(records[1].patient, "患者B");
    assert_eq!(records[0].report.sales_score, 66);
    assert_eq!(records[0].dialogue, "【说话人 0】: 您好");
}

#[tokio::test]
async fn given_missing_file_when_loading_then_empty_list() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = JsonlRecordStore::new(dir.path().join("consultations.jsonl")).unwrap();

    let records = store.load_all().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn given_nested_path_when_creating_store_then_parent_directories_are_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("data").join("db").join("consultations.jsonl");
    let store = JsonlRecordStore::new(&path).unwrap();

    store.append(&sample_record("患者A")).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn given_one_record_per_line_when_appending_then_file_is_line_delimited() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("consultations.jsonl");
    let store = JsonlRecordStore::new(&path).unwrap();

    store.append(&sample_record("患者A")).await.unwrap();
    store.append(&sample_record("患者B")).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[tokio::test]
async fn given_corrupt_line_when_loading_then_malformed_error_names_the_line() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("consultations.jsonl");
    let store = JsonlRecordStore::new(&path).unwrap();

    store.append(&sample_record("患者A")).await.unwrap();
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("not json\n");
    std::fs::write(&path, content).unwrap();

    let result = store.load_all().await;

    match result {
        Err(RecordStoreError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected Malformed, got {:?}", other),
    }
}
