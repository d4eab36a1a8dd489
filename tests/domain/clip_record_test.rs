use chrono::Utc;

use klippa::domain::{ClipId, ClipRecord};

fn record() -> ClipRecord {
    ClipRecord {
        clip_id: ClipId::new(),
        stream_id: "abc123".to_string(),
        title: "intro".to_string(),
        start_time: "00:00:10".to_string(),
        end_time: "00:00:25".to_string(),
        duration: 14.85,
        url: "https://storage.googleapis.com/clips/x.mp3".to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn given_clip_record_when_serialized_then_uses_wire_field_names() {
    let record = record();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(
        json["clip_id"].as_str().unwrap(),
        record.clip_id.to_string()
    );
    assert_eq!(json["stream_id"], "abc123");
    assert_eq!(json["title"], "intro");
    assert_eq!(json["start_time"], "00:00:10");
    assert_eq!(json["end_time"], "00:00:25");
    assert_eq!(json["duration"].as_f64().unwrap(), 14.85);
    assert!(json["url"].as_str().unwrap().ends_with(".mp3"));
    // RFC 3339 timestamp
    assert!(json["created_at"].as_str().unwrap().contains('T'));
}

#[test]
fn given_serialized_record_when_fields_are_missing_then_decoding_fails() {
    let err = serde_json::from_str::<ClipRecord>(r#"{"clip_id":"not-even-a-uuid"}"#);
    assert!(err.is_err());
}
