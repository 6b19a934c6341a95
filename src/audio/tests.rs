use super::types::{BYTES_PER_SAMPLE, SAMPLE_RATE, duration_to_length, length_to_duration};
use std::time::Duration;

#[test]
fn one_second_is_sample_rate_times_frame_size() {
    assert_eq!(
        duration_to_length(Duration::from_secs(1)),
        SAMPLE_RATE * BYTES_PER_SAMPLE
    );
}

#[test]
fn length_round_trips_whole_seconds() {
    let d = Duration::from_secs(180);
    assert_eq!(length_to_duration(duration_to_length(d)), d);
}

#[test]
fn length_conversion_truncates_partial_frames() {
    assert_eq!(length_to_duration(0), Duration::ZERO);
    assert!(length_to_duration(duration_to_length(Duration::from_millis(1500))) <= Duration::from_millis(1500));
}
