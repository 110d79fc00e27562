//! Property-based tests using proptest
//!
//! Tests that verify properties hold for arbitrary inputs.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use std::collections::HashMap;
use syncthing_stats::collectors::connection::connection_lines;
use syncthing_stats::collectors::device::device_lines;
use syncthing_stats::collectors::{is_after_epoch, seconds_since_epoch};
use syncthing_stats::line_protocol::{escape_tag_value, FieldValue, Line};
use syncthing_stats::syncthing::types::{ConnectionStat, Connections, DeviceStat};

proptest! {
    #[test]
    fn test_escaped_tag_never_contains_bare_space(value in "\\PC*") {
        // Given: Any printable string
        // When: Escaping it as a tag value
        let escaped = escape_tag_value(&value);

        // Then: Every space is preceded by a backslash
        let bytes = escaped.as_bytes();
        for (idx, byte) in bytes.iter().enumerate() {
            if *byte == b' ' {
                prop_assert!(idx > 0 && bytes[idx - 1] == b'\\');
            }
        }
        // And: Removing the escapes gives the original back
        prop_assert_eq!(escaped.replace("\\ ", " "), value.clone());
    }

    #[test]
    fn test_tag_without_spaces_is_unchanged(value in "[^ ]*") {
        prop_assert_eq!(escape_tag_value(&value), value);
    }

    #[test]
    fn test_record_is_a_single_line(label in "[a-zA-Z0-9 _.-]{0,30}", n in any::<i64>()) {
        // Given: A record with an arbitrary label and counter
        let line = Line::new("syncthing_folder")
            .tag("folder_label", &label)
            .field("errors", n);

        // When: Rendering it
        let rendered = line.to_string();

        // Then: Measurement/tags and fields are split by exactly one unescaped space
        prop_assert!(!rendered.contains('\n'));
        let unescaped_spaces = rendered.replace("\\ ", "").matches(' ').count();
        prop_assert_eq!(unescaped_spaces, 1);
        let expected_suffix = format!(" errors={}", n);
        prop_assert!(rendered.ends_with(&expected_suffix));
    }

    #[test]
    fn test_integer_fields_have_no_suffix(n in any::<i64>()) {
        prop_assert_eq!(FieldValue::Integer(n).to_string(), n.to_string());
    }

    #[test]
    fn test_connection_emitted_iff_after_epoch(
        secs in -5_000_000_000i64..5_000_000_000i64,
        nanos in 0u32..1_000_000_000u32
    ) {
        // Given: One peer with an arbitrary `at`
        let at = DateTime::<Utc>::from_timestamp(secs, nanos).unwrap();
        let mut connections = Connections::default();
        connections.connections.insert(
            "PEER".to_string(),
            ConnectionStat { at, ..Default::default() },
        );

        // When: Building connection records
        let lines = connection_lines(&connections);

        // Then: The peer record exists exactly when `at` is after the epoch
        let after_epoch = secs > 0 || (secs == 0 && nanos > 0);
        prop_assert_eq!(is_after_epoch(&at), after_epoch);
        prop_assert_eq!(lines.len(), if after_epoch { 2 } else { 1 });
        prop_assert_eq!(
            lines[0].field_value("number_of_connections"),
            Some(FieldValue::Integer(1))
        );
    }

    #[test]
    fn test_device_last_seen_is_seconds_since_epoch(
        secs in 1i64..4_000_000_000i64,
        millis in 0u32..1000u32
    ) {
        // Given: A device seen at an arbitrary instant after the epoch
        let last_seen = DateTime::<Utc>::from_timestamp(secs, millis * 1_000_000).unwrap();
        let stats = HashMap::from([(
            "DEV".to_string(),
            DeviceStat { last_seen, last_connection_duration_s: 1.0 },
        )]);

        // When: Building device records
        let lines = device_lines(&stats, &HashMap::new());

        // Then: last_seen equals the elapsed seconds
        let expected = secs as f64 + f64::from(millis) / 1000.0;
        prop_assert_eq!(lines.len(), 2);
        match lines[1].field_value("last_seen") {
            Some(FieldValue::Float(v)) => prop_assert!((v - expected).abs() < 1e-6),
            other => prop_assert!(false, "unexpected last_seen {:?}", other),
        }
        prop_assert!((seconds_since_epoch(&last_seen) - expected).abs() < 1e-6);
    }
}
