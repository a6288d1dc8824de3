use chairside::domain::{
    DialogueTranscript, DiarizedSegment, NO_CONTENT_SENTINEL, RawTranscriptPayload,
};

fn payload(json: &str) -> RawTranscriptPayload {
    serde_json::from_str(json).unwrap()
}

#[test]
fn given_consecutive_same_speaker_segments_when_reconstructing_then_merged_into_one_turn() {
    let payload = payload(
        r#"{
            "transcripts": [{
                "sentences": [
                    {"speaker_id": 0, "text": "您好"},
                    {"speaker_id": 0, "text": "请问"},
                    {"speaker_id": 1, "text": "疼"}
                ]
            }]
        }"#,
    );

    let dialogue = DialogueTranscript::reconstruct(&payload);

    assert_eq!(dialogue.turns().len(), 2);
    assert_eq!(
        dialogue.render(),
        "【说话人 0】: 您好请问\n\n【说话人 1】: 疼"
    );
}

#[test]
fn given_segments_when_merging_then_no_separator_is_injected_inside_a_turn() {
    let segments = vec![
        DiarizedSegment {
            speaker_id: 3,
            text: "先拍".to_string(),
        },
        DiarizedSegment {
            speaker_id: 3,
            text: "个片子".to_string(),
        },
    ];

    let dialogue = DialogueTranscript::from_segments(segments);

    assert_eq!(dialogue.render(), "【说话人 3】: 先拍个片子");
}

#[test]
fn given_speaker_changes_when_reconstructing_then_turn_count_is_boundaries_plus_one() {
    // Four speaker-change boundaries in the run structure 0,0,1,0,2,2.
    let segments = [0u32, 0, 1, 0, 2, 2]
        .iter()
        .map(|&id| DiarizedSegment {
            speaker_id: id,
            text: "x".to_string(),
        })
        .collect();

    let dialogue = DialogueTranscript::from_segments(segments);

    assert_eq!(dialogue.turns().len(), 4);
    let speakers: Vec<u32> = dialogue.turns().iter().map(|t| t.speaker_id).collect();
    assert_eq!(speakers, vec![0, 1, 0, 2]);
}

#[test]
fn given_results_shape_when_transcripts_absent_then_sentences_still_found() {
    let payload = payload(
        r#"{
            "results": [{
                "sentences": [
                    {"speaker_id": 0, "text": "早上好"},
                    {"speaker_id": 1, "text": "早"}
                ]
            }]
        }"#,
    );

    let dialogue = DialogueTranscript::reconstruct(&payload);

    assert_eq!(dialogue.render(), "【说话人 0】: 早上好\n\n【说话人 1】: 早");
}

#[test]
fn given_both_shapes_when_reconstructing_then_transcripts_take_precedence() {
    let payload = payload(
        r#"{
            "transcripts": [{"sentences": [{"speaker_id": 0, "text": "来自transcripts"}]}],
            "results": [{"sentences": [{"speaker_id": 1, "text": "来自results"}]}]
        }"#,
    );

    let dialogue = DialogueTranscript::reconstruct(&payload);

    assert_eq!(dialogue.render(), "【说话人 0】: 来自transcripts");
}

#[test]
fn given_empty_sentences_with_top_level_text_then_text_returned_verbatim() {
    let payload = payload(
        r#"{"transcripts": [{"sentences": [], "text": "今天聊了种植牙的方案"}]}"#,
    );

    let dialogue = DialogueTranscript::reconstruct(&payload);

    assert_eq!(dialogue, DialogueTranscript::Plain("今天聊了种植牙的方案".to_string()));
    assert_eq!(dialogue.render(), "今天聊了种植牙的方案");
}

#[test]
fn given_no_sentences_and_no_text_then_sentinel_returned_not_empty_string() {
    let empty = payload(r#"{}"#);
    let blank_sections = payload(r#"{"transcripts": [{"sentences": []}], "results": []}"#);

    for p in [empty, blank_sections] {
        let dialogue = DialogueTranscript::reconstruct(&p);
        assert_eq!(dialogue, DialogueTranscript::NoneRecognized);
        assert_eq!(dialogue.render(), NO_CONTENT_SENTINEL);
        assert!(!dialogue.render().is_empty());
    }
}

#[test]
fn given_blank_fallback_text_when_reconstructing_then_treated_as_absent() {
    let payload = payload(r#"{"transcripts": [{"sentences": [], "text": "   "}]}"#);

    let dialogue = DialogueTranscript::reconstruct(&payload);

    assert_eq!(dialogue, DialogueTranscript::NoneRecognized);
}
