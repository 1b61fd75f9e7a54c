use chrono::{TimeZone, Utc};
use pipeline_trace_studio::aggregator::{build_run, calculate_summary, ChannelClassifier, Run};
use pipeline_trace_studio::normalizer::normalize;
use pipeline_trace_studio::parser::{CandidateEvent, ChannelClass};

fn event_at(channel: &str, count: u64, secs: i64) -> CandidateEvent {
    CandidateEvent {
        channel: channel.to_string(),
        count,
        time: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
    }
}

fn build(candidates: Vec<CandidateEvent>) -> Run {
    build_run(normalize(candidates).unwrap(), &ChannelClassifier::new())
}

#[test]
fn test_channels_in_first_seen_order() {
    let run = build(vec![
        event_at("serialize", 1, 2),
        event_at("crop", 1, 0),
        event_at("heap", 512, 1),
        event_at("crop", 2, 3),
    ]);

    let names: Vec<&str> = run.channels().map(|s| s.channel.as_str()).collect();
    assert_eq!(names, vec!["serialize", "crop", "heap"]);
}

#[test]
fn test_series_preserve_per_channel_order() {
    // Out-of-order timestamps within one channel are kept in log order
    let run = build(vec![
        event_at("crop", 1, 4),
        event_at("crop", 2, 1),
        event_at("crop", 3, 6),
    ]);

    let crop = run.channel("crop").unwrap();
    let counts: Vec<u64> = crop.points.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![1, 2, 3]);
    let offsets: Vec<f64> = crop.points.iter().map(|p| p.offset_secs).collect();
    assert_eq!(offsets, vec![3.0, 0.0, 5.0]);
}

#[test]
fn test_series_length_matches_event_count() {
    let run = build(vec![
        event_at("crop", 1, 0),
        event_at("reconstruct", 1, 1),
        event_at("crop", 2, 2),
        event_at("sort", 1, 3),
        event_at("crop", 3, 4),
    ]);

    assert_eq!(run.channel("crop").unwrap().len(), 3);
    assert_eq!(run.channel("reconstruct").unwrap().len(), 1);
    assert_eq!(run.channel("sort").unwrap().len(), 1);
    assert_eq!(run.event_count(), 5);
}

#[test]
fn test_classification_law() {
    let run = build(vec![
        event_at("crop", 1, 0),
        event_at("heap", 4096, 0),
        event_at("rss", 8192, 1),
        event_at("reconstruct", 1, 1),
    ]);

    let production: Vec<&str> = run
        .production_channels()
        .map(|s| s.channel.as_str())
        .collect();
    let resource: Vec<&str> = run
        .resource_channels()
        .map(|s| s.channel.as_str())
        .collect();

    assert_eq!(production, vec!["crop", "reconstruct"]);
    assert_eq!(resource, vec!["heap", "rss"]);

    // A memory sample never lands in a production series, even when
    // offsets coincide with a stage counter
    let heap = run.channel("heap").unwrap();
    assert_eq!(heap.class, ChannelClass::ResourceUsage);
    assert_eq!(heap.points[0].count, 4096);
    assert_eq!(run.channel("crop").unwrap().len(), 1);
}

#[test]
fn test_classifier_extension_reroutes_channel() {
    let classifier = ChannelClassifier::new().with_resource_channel("vram");
    let run = build_run(
        normalize(vec![event_at("vram", 1024, 0)]).unwrap(),
        &classifier,
    );

    assert_eq!(run.resource_channels().count(), 1);
    assert_eq!(run.production_channels().count(), 0);
}

#[test]
fn test_run_is_deterministic() {
    let candidates = || {
        vec![
            event_at("crop", 1, 0),
            event_at("heap", 100, 1),
            event_at("crop", 2, 2),
        ]
    };

    let a = build(candidates());
    let b = build(candidates());

    assert_eq!(a.run_start, b.run_start);
    assert_eq!(a.run_end, b.run_end);
    let points = |run: &Run| {
        run.channels()
            .flat_map(|s| s.points.iter().copied())
            .collect::<Vec<_>>()
    };
    assert_eq!(points(&a), points(&b));
}

#[test]
fn test_summary_statistics() {
    let run = build(vec![
        event_at("crop", 5, 0),
        event_at("heap", 900, 1),
        event_at("heap", 400, 9),
        event_at("crop", 12, 10),
    ]);

    let summary = calculate_summary(&run);

    assert_eq!(summary.total_duration_secs, 10.0);
    assert_eq!(summary.channel_count, 2);
    assert_eq!(summary.event_count, 4);

    let heap = summary
        .channels
        .iter()
        .find(|c| c.channel == "heap")
        .unwrap();
    assert_eq!(heap.peak_count, 900);
    assert_eq!(heap.final_count, 400);
    assert_eq!(heap.first_offset_secs, 1.0);
    assert_eq!(heap.last_offset_secs, 9.0);
}
