use chrono::{TimeZone, Utc};
use pipeline_trace_studio::normalizer::{normalize, offset_seconds};
use pipeline_trace_studio::parser::CandidateEvent;
use pipeline_trace_studio::utils::NormalizeError;

fn event_at(channel: &str, count: u64, millis: i64) -> CandidateEvent {
    CandidateEvent {
        channel: channel.to_string(),
        count,
        time: Utc.timestamp_millis_opt(1_700_000_000_000 + millis).unwrap(),
    }
}

#[test]
fn test_run_start_is_minimum_not_first() {
    let stream = normalize(vec![
        event_at("reconstruct", 1, 5_000),
        event_at("crop", 1, 0),
        event_at("serialize", 1, 9_000),
    ])
    .unwrap();

    assert_eq!(stream.run_start, stream.events[1].time);
    assert_eq!(stream.run_end, stream.events[2].time);
    assert_eq!(stream.events[0].offset_secs, 5.0);
}

#[test]
fn test_all_offsets_non_negative() {
    let stream = normalize(vec![
        event_at("crop", 3, 2_500),
        event_at("crop", 4, 100),
        event_at("rss", 1024, 7_250),
    ])
    .unwrap();

    assert!(stream.events.iter().all(|e| e.offset_secs >= 0.0));
    assert_eq!(stream.events[2].offset_secs, 7.15);
}

#[test]
fn test_ties_keep_input_order() {
    // Three events at the same instant: order must match the log
    let stream = normalize(vec![
        event_at("serialize", 1, 1_000),
        event_at("crop", 2, 1_000),
        event_at("serialize", 3, 1_000),
    ])
    .unwrap();

    let counts: Vec<u64> = stream.events.iter().map(|e| e.count).collect();
    assert_eq!(counts, vec![1, 2, 3]);
    assert!(stream.events.iter().all(|e| e.offset_secs == 0.0));
}

#[test]
fn test_empty_candidates_is_distinct_condition() {
    let result = normalize(Vec::new());
    assert!(matches!(result, Err(NormalizeError::EmptyRun)));
}

#[test]
fn test_single_event_run_has_zero_duration() {
    let stream = normalize(vec![event_at("crop", 1, 0)]).unwrap();
    assert_eq!(stream.run_start, stream.run_end);
    assert_eq!(stream.events[0].offset_secs, 0.0);
}

#[test]
fn test_offset_seconds_precision() {
    let start = Utc.timestamp_opt(0, 0).unwrap();
    let t = Utc.timestamp_opt(1, 500_250_000).unwrap();
    assert_eq!(offset_seconds(start, t), 1.50025);
}
