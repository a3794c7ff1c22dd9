use approx::assert_abs_diff_eq;
use sensor_chart::ChartError;
use sensor_chart::api::{
    AxisSide, ChartConfig, DisplaySignals, ExtentsPolicy, ScaleSession, SessionState,
    project_display_signals,
};
use sensor_chart::core::{Margins, Viewport};
use sensor_chart::ingest::{Data, parse_csv_text};
use sensor_chart::interaction::ZoomTransform;

// Default margins leave a 1000 x 500 plot area.
const VIEWPORT: Viewport = Viewport {
    width: 1090,
    height: 560,
};

const LOG: &str = "A,0,0\nA,100,50\nB,0,-10\nB,200,10\nS,50,boot\nC,10,1\n";

fn setup_all(data: &Data, config: &ChartConfig) -> Result<ScaleSession, ChartError> {
    let display = DisplaySignals::all(data);
    let signals = project_display_signals(data, &display);
    ScaleSession::setup(VIEWPORT, config, data, &signals)
}

fn assert_domain(actual: (f64, f64), expected: (f64, f64)) {
    assert_abs_diff_eq!(actual.0, expected.0, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.1, expected.1, epsilon = 1e-9);
}

#[test]
fn first_signal_defines_shared_and_per_sensor_domains() {
    let data = parse_csv_text(LOG);
    let session = setup_all(&data, &ChartConfig::default()).expect("setup");

    assert_domain(session.initial_x_scale().domain(), (0.0, 100.0));
    assert_domain(session.initial_x_scale().range(), (0.0, 1000.0));

    let a = session.y_scale("A").expect("A scale");
    assert_domain(a.domain(), (0.0, 50.0));
    assert_domain(a.range(), (500.0, 0.0));
    assert_domain(session.y_scale("B").expect("B").domain(), (-10.0, 10.0));
    assert_domain(session.y_scale("S").expect("S").domain(), (0.0, 0.0));
    assert_domain(session.y_scale("C").expect("C").domain(), (1.0, 1.0));

    let keys: Vec<&str> = session.y_scales().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A", "B", "S", "C"]);
}

#[test]
fn union_policy_widens_horizontal_domain() {
    let data = parse_csv_text(LOG);
    let config = ChartConfig::default().with_extents_policy(ExtentsPolicy::Union);
    let session = setup_all(&data, &config).expect("setup");
    assert_domain(session.initial_x_scale().domain(), (0.0, 200.0));
}

#[test]
fn domains_cover_every_dimension_of_a_sensor() {
    let data = parse_csv_text("A,0,0,0\nA,10,1,100\n");
    let session = setup_all(&data, &ChartConfig::default()).expect("setup");
    assert_domain(session.y_scale("A").expect("A").domain(), (0.0, 100.0));
    let (_, y) = session.map_point("A", 10.0, 100.0).expect("A--1 point");
    assert_abs_diff_eq!(y, 0.0, epsilon = 1e-9);

    // Only the second dimension displayed: both domains still span the
    // whole sensor.
    let data = parse_csv_text("A,0,1\nA,10,2,7\nA,30,3\n");
    let display = DisplaySignals::new().with("A", 1, true);
    let signals = project_display_signals(&data, &display);
    let session =
        ScaleSession::setup(VIEWPORT, &ChartConfig::default(), &data, &signals).expect("setup");
    assert_domain(session.initial_x_scale().domain(), (0.0, 30.0));
    assert_domain(session.y_scale("A").expect("A").domain(), (1.0, 7.0));
}

#[test]
fn axes_alternate_left_right_right_left() {
    let data = parse_csv_text(LOG);
    let session = setup_all(&data, &ChartConfig::default()).expect("setup");

    let sides: Vec<AxisSide> = session.axes().iter().map(|axis| axis.side).collect();
    assert_eq!(
        sides,
        vec![AxisSide::Left, AxisSide::Right, AxisSide::Right, AxisSide::Left]
    );
    let orientations: Vec<AxisSide> = session.axes().iter().map(|axis| axis.orientation).collect();
    assert_eq!(
        orientations,
        vec![AxisSide::Left, AxisSide::Right, AxisSide::Left, AxisSide::Right]
    );
    assert_eq!(session.axis_side("S"), Some(AxisSide::Right));
    assert_eq!(session.axis_side("missing"), None);
}

#[test]
fn initial_zoom_shows_first_half_of_domain() {
    let data = parse_csv_text(LOG);
    let session = setup_all(&data, &ChartConfig::default()).expect("setup");

    let transform = session.transform();
    assert_abs_diff_eq!(transform.k, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(transform.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(transform.y, -250.0, epsilon = 1e-9);
    assert_domain(session.x_scale().domain(), (0.0, 50.0));
    assert_eq!(session.state(), SessionState::Configured);
}

#[test]
fn identity_initial_zoom_keeps_full_domain() {
    let data = parse_csv_text(LOG);
    let config = ChartConfig::default().with_initial_zoom(1.0, Some(0.0));
    let session = setup_all(&data, &config).expect("setup");
    assert_eq!(session.transform(), ZoomTransform::IDENTITY);
    assert_domain(session.x_scale().domain(), (0.0, 100.0));
}

#[test]
fn more_than_four_sensors_are_rejected() {
    let data = parse_csv_text("A,1,1\nB,1,1\nC,1,1\nD,1,1\nE,1,1\n");
    let err = setup_all(&data, &ChartConfig::default()).expect_err("five sensors");
    assert!(matches!(err, ChartError::TooManySensors { count: 5, max: 4 }));
}

#[test]
fn max_axes_limits_sensor_count() {
    let data = parse_csv_text("A,1,1\nB,1,1\nC,1,1\n");
    let config = ChartConfig {
        max_axes: 2,
        ..ChartConfig::default()
    };
    let err = setup_all(&data, &config).expect_err("three sensors");
    assert!(matches!(err, ChartError::TooManySensors { count: 3, max: 2 }));
}

#[test]
fn empty_selection_and_tiny_viewport_are_errors() {
    let data = parse_csv_text(LOG);
    let err =
        ScaleSession::setup(VIEWPORT, &ChartConfig::default(), &data, &[]).expect_err("empty");
    assert!(matches!(err, ChartError::NoDisplayedSignals));

    let display = DisplaySignals::all(&data);
    let signals = project_display_signals(&data, &display);
    let err = ScaleSession::setup(
        Viewport::new(80, 50),
        &ChartConfig::default(),
        &data,
        &signals,
    )
    .expect_err("margins exceed viewport");
    assert!(matches!(err, ChartError::InvalidViewport { width: 80, height: 50 }));
}

#[test]
fn custom_margins_shrink_the_plot_area() {
    let data = parse_csv_text(LOG);
    let config = ChartConfig::default().with_margins(Margins {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    });
    let session = setup_all(&data, &config).expect("setup");
    assert_abs_diff_eq!(session.plot().width, 1090.0);
    assert_abs_diff_eq!(session.plot().height, 560.0);
}

#[test]
fn points_map_through_zoomed_x_and_sensor_y() {
    let data = parse_csv_text(LOG);
    let session = setup_all(&data, &ChartConfig::default()).expect("setup");

    let (x, y) = session.map_point("A", 25.0, 25.0).expect("A point");
    assert_abs_diff_eq!(x, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(y, 250.0, epsilon = 1e-9);

    // Message sensors sit at mid-height on their degenerate domain.
    let (_, y) = session.map_point("S", 50.0, 0.0).expect("S point");
    assert_abs_diff_eq!(y, 250.0, epsilon = 1e-9);
    assert!(session.map_point("Z", 0.0, 0.0).is_none());
}

#[test]
fn line_path_follows_readings_and_breaks_on_nan() {
    let data = parse_csv_text("A,0,0\nA,100,50\n");
    let session = setup_all(&data, &ChartConfig::default()).expect("setup");
    let signal = data.get("A").and_then(|s| s.signal(0)).expect("A--0");

    let path = session.line_path(signal).expect("path");
    assert_eq!(path.runs.len(), 1);
    assert_abs_diff_eq!(path.runs[0][0].x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(path.runs[0][0].y, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(path.runs[0][1].x, 2000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(path.runs[0][1].y, 0.0, epsilon = 1e-9);

    let gappy = parse_csv_text("A,0,1\nA,1,x\nA,2,3\n");
    let session = setup_all(&gappy, &ChartConfig::default()).expect("setup");
    let signal = gappy.get("A").and_then(|s| s.signal(0)).expect("A--0");
    let path = session.line_path(signal).expect("path");
    assert_eq!(path.runs.len(), 2);
    assert_eq!(path.point_count(), 2);
}

#[test]
fn wheel_zoom_is_anchored_and_rescaled_from_initial_domain() {
    let data = parse_csv_text(LOG);
    let mut session = setup_all(&data, &ChartConfig::default()).expect("setup");

    // 2^(500 * 0.002) doubles the scale factor around the plot centre.
    let applied = session.wheel(-500.0, [500.0, 250.0]).expect("wheel");
    assert_abs_diff_eq!(applied.k, 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(applied.x, -500.0, epsilon = 1e-9);
    assert_domain(session.x_scale().domain(), (12.5, 37.5));
    assert_eq!(session.state(), SessionState::Interactive);

    let applied = session.wheel(5_000.0, [500.0, 250.0]).expect("wheel out");
    assert_abs_diff_eq!(applied.k, 1.0, epsilon = 1e-12);
    assert_domain(session.x_scale().domain(), (0.0, 100.0));
}

#[test]
fn host_transform_is_clamped_and_constrained() {
    let data = parse_csv_text(LOG);
    let mut session = setup_all(&data, &ChartConfig::default()).expect("setup");

    let applied = session
        .apply_zoom(ZoomTransform::new(100.0, 0.0, 0.0))
        .expect("zoom");
    assert_abs_diff_eq!(applied.k, 50.0, epsilon = 1e-12);
    assert_domain(session.x_scale().domain(), (0.0, 2.0));

    let err = session
        .apply_zoom(ZoomTransform::new(f64::NAN, 0.0, 0.0))
        .expect_err("nan scale");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn drag_pans_within_translate_extent() {
    let data = parse_csv_text(LOG);
    let mut session = setup_all(&data, &ChartConfig::default()).expect("setup");

    // Already at the left edge: panning further right is clamped.
    let applied = session.drag(100.0, 0.0).expect("drag right");
    assert_abs_diff_eq!(applied.x, 0.0, epsilon = 1e-9);

    let applied = session.drag(-100.0, 0.0).expect("drag left");
    assert_abs_diff_eq!(applied.x, -100.0, epsilon = 1e-9);
    assert_domain(session.x_scale().domain(), (5.0, 55.0));
}
