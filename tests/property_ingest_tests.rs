use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use sensor_chart::ingest::{parse_csv_text, tokenize};

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("S".to_owned()),
        "[a-d]{1,3}",
    ]
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1_000.0f64..1_000.0).prop_map(|value| value.to_string()),
        Just(String::new()),
        Just("n/a".to_owned()),
        "[a-z ]{0,6}",
    ]
}

fn row_strategy() -> impl Strategy<Value = (String, f64, Vec<String>)> {
    (
        token_strategy(),
        -10_000.0f64..10_000.0,
        prop::collection::vec(value_strategy(), 0..5),
    )
}

fn render_csv(rows: &[(String, f64, Vec<String>)]) -> String {
    let mut text = String::new();
    for (token, tick, values) in rows {
        text.push_str(token);
        text.push(',');
        text.push_str(&tick.to_string());
        for value in values {
            text.push(',');
            text.push_str(value);
        }
        text.push('\n');
    }
    text
}

proptest! {
    #[test]
    fn distinct_sensor_count_matches_distinct_tokens(
        rows in prop::collection::vec(row_strategy(), 0..40)
    ) {
        let data = parse_csv_text(&render_csv(&rows));
        let expected: BTreeSet<&str> = rows
            .iter()
            .map(|(token, _, _)| token.as_str())
            .filter(|token| !token.is_empty())
            .collect();

        prop_assert_eq!(data.len(), expected.len());
        if let Some(syslog) = data.get("S") {
            prop_assert!(syslog.is_message());
        }
        for sensor in data.sensors().filter(|sensor| sensor.token() != "S") {
            prop_assert!(!sensor.is_message());
        }
    }

    #[test]
    fn reading_count_matches_rows_with_value_at_dimension(
        rows in prop::collection::vec(row_strategy(), 0..40)
    ) {
        let data = parse_csv_text(&render_csv(&rows));

        let mut expected: HashMap<(&str, usize), usize> = HashMap::new();
        for (token, _, values) in rows.iter().filter(|(token, _, _)| !token.is_empty()) {
            for dim in 0..values.len() {
                *expected.entry((token.as_str(), dim)).or_default() += 1;
            }
        }

        for sensor in data.sensors() {
            for signal in sensor.signals() {
                let want = expected
                    .get(&(sensor.token(), signal.dim()))
                    .copied()
                    .unwrap_or(0);
                prop_assert_eq!(signal.len(), want);
            }
        }
    }

    #[test]
    fn tokenizing_same_text_twice_is_identical(
        rows in prop::collection::vec(row_strategy(), 0..40)
    ) {
        let text = render_csv(&rows);
        let first: Vec<_> = tokenize(&text).collect();
        let second: Vec<_> = tokenize(&text).collect();

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(&a.token, &b.token);
            prop_assert_eq!(a.tick.to_bits(), b.tick.to_bits());
            prop_assert_eq!(&a.dimensions, &b.dimensions);
        }
    }

    #[test]
    fn extents_bound_every_tick_and_numeric_value(
        rows in prop::collection::vec(row_strategy(), 1..40)
    ) {
        let data = parse_csv_text(&render_csv(&rows));
        for signal in data.signals().filter(|signal| !signal.is_empty()) {
            let extents = signal.extents().expect("finite ticks are generated");
            for reading in signal.readings() {
                prop_assert!(extents.x_min <= reading.tick && reading.tick <= extents.x_max);
                // Infinite values never enter extents.
                if let Some(value) = reading.value.as_number().filter(|v| v.is_finite()) {
                    prop_assert!(extents.y_min <= value && value <= extents.y_max);
                }
            }
        }
    }
}
