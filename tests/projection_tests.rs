use proptest::prelude::*;
use sensor_chart::api::{DisplaySignals, project_display_signals};
use sensor_chart::ingest::parse_csv_text;

const LOG: &str = "acc,1,1,2,3\ngyro,1,4\nS,1,boot\nacc,2,5,6,7\n";

fn names(display: &DisplaySignals) -> Vec<String> {
    let data = parse_csv_text(LOG);
    project_display_signals(&data, display)
        .into_iter()
        .map(|signal| signal.name().to_owned())
        .collect()
}

#[test]
fn all_selects_every_signal_in_data_order() {
    let data = parse_csv_text(LOG);
    let display = DisplaySignals::all(&data);
    assert_eq!(
        names(&display),
        vec!["acc--0", "acc--1", "acc--2", "gyro--0", "S--0"]
    );
}

#[test]
fn leading_selects_whole_sensors_up_to_the_limit() {
    let data = parse_csv_text(LOG);
    let display = DisplaySignals::leading(&data, 2);
    assert_eq!(
        names(&display),
        vec!["acc--0", "acc--1", "acc--2", "gyro--0"]
    );
    assert_eq!(DisplaySignals::leading(&data, 4), DisplaySignals::all(&data));
}

#[test]
fn selection_order_does_not_reorder_output() {
    let display = DisplaySignals::new()
        .with("S", 0, true)
        .with("acc", 2, true)
        .with("acc", 0, true);
    assert_eq!(names(&display), vec!["acc--0", "acc--2", "S--0"]);
}

#[test]
fn false_and_unknown_entries_are_hidden() {
    let display = DisplaySignals::new()
        .with("acc", 1, false)
        .with("gyro", 7, true)
        .with("nope", 0, true);
    assert!(names(&display).is_empty());
}

#[test]
fn clearing_a_sensor_hides_all_its_dimensions() {
    let data = parse_csv_text(LOG);
    let mut display = DisplaySignals::all(&data);
    display.clear_sensor("acc");
    assert_eq!(names(&display), vec!["gyro--0", "S--0"]);
}

proptest! {
    #[test]
    fn projection_is_a_stable_subsequence_of_visible_signals(
        flags in prop::collection::vec(any::<bool>(), 5)
    ) {
        let data = parse_csv_text(LOG);
        let all: Vec<_> = data.signals().collect();

        let mut display = DisplaySignals::new();
        for (signal, visible) in all.iter().zip(&flags) {
            display.set(signal.sensor(), signal.dim(), *visible);
        }

        let projected = project_display_signals(&data, &display);
        let expected: Vec<&str> = all
            .iter()
            .zip(&flags)
            .filter(|(_, visible)| **visible)
            .map(|(signal, _)| signal.name())
            .collect();
        let actual: Vec<&str> = projected.iter().map(|signal| signal.name()).collect();
        prop_assert_eq!(actual, expected);
    }
}
