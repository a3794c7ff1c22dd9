use approx::assert_abs_diff_eq;
use sensor_chart::core::LinearScale;
use sensor_chart::interaction::{ZoomBehavior, ZoomTransform};

fn behavior() -> ZoomBehavior {
    ZoomBehavior::new(1000.0, 500.0, (1.0, 50.0)).expect("zoom behavior")
}

#[test]
fn transform_inverts_and_translates_in_plot_space() {
    let transform = ZoomTransform::new(2.0, 100.0, -50.0);
    assert_abs_diff_eq!(transform.apply_x(10.0), 120.0);
    assert_abs_diff_eq!(transform.invert_x(120.0), 10.0);
    assert_eq!(transform.invert([100.0, -50.0]), [0.0, 0.0]);

    let moved = transform.translate(10.0, 5.0);
    assert_eq!(moved, ZoomTransform::new(2.0, 120.0, -40.0));
    assert_eq!(transform.scale(3.0).k, 6.0);
}

#[test]
fn rescale_x_maps_range_back_through_transform() {
    let base = LinearScale::new((0.0, 100.0), (0.0, 1000.0)).expect("scale");
    let rescaled = ZoomTransform::new(4.0, -1000.0, 0.0)
        .rescale_x(base)
        .expect("rescale");
    let (start, end) = rescaled.domain();
    assert_abs_diff_eq!(start, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 50.0, epsilon = 1e-9);
    assert_eq!(rescaled.range(), base.range());
}

#[test]
fn scale_to_keeps_viewport_centre_fixed() {
    let mut zoom = behavior();
    let applied = zoom.scale_to(2.0).expect("scale_to");
    assert_eq!(applied, ZoomTransform::new(2.0, -500.0, -250.0));
}

#[test]
fn translate_by_is_constrained_to_extent() {
    let mut zoom = behavior();
    zoom.scale_to(2.0).expect("scale_to");
    let applied = zoom.translate_by(1000.0, 0.0).expect("translate");
    assert_abs_diff_eq!(applied.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(applied.y, -250.0, epsilon = 1e-9);

    let applied = zoom.translate_by(-10_000.0, 0.0).expect("translate");
    // The right edge of the content meets the right edge of the viewport.
    assert_abs_diff_eq!(applied.x, -1000.0, epsilon = 1e-9);
}

#[test]
fn scale_is_clamped_to_extent() {
    let mut zoom = behavior();
    assert_abs_diff_eq!(zoom.scale_by(0.1).expect("zoom out").k, 1.0);
    assert_abs_diff_eq!(zoom.scale_to(75.0).expect("zoom in").k, 50.0);
    assert_eq!(zoom.scale_extent(), (1.0, 50.0));
}

#[test]
fn wheel_uses_exponential_step() {
    let mut zoom = behavior();
    let applied = zoom.wheel(-100.0, [0.0, 0.0]).expect("wheel");
    assert_abs_diff_eq!(applied.k, 2f64.powf(0.2), epsilon = 1e-12);
    assert_abs_diff_eq!(applied.x, 0.0, epsilon = 1e-9);

    let mut fast = behavior().with_wheel_step(0.01).expect("step");
    let applied = fast.wheel(-100.0, [0.0, 0.0]).expect("wheel");
    assert_abs_diff_eq!(applied.k, 2.0, epsilon = 1e-12);
}

#[test]
fn scale_by_at_keeps_anchor_under_pointer() {
    let mut zoom = behavior();
    let before = zoom.transform().invert([250.0, 100.0]);
    zoom.scale_by_at(3.0, [250.0, 100.0]).expect("zoom");
    let after = zoom.transform().invert([250.0, 100.0]);
    assert_abs_diff_eq!(before[0], after[0], epsilon = 1e-9);
    assert_abs_diff_eq!(before[1], after[1], epsilon = 1e-9);
}

#[test]
fn drag_converts_pixels_to_plot_units() {
    let mut zoom = behavior();
    zoom.scale_to(4.0).expect("scale_to");
    let start = zoom.transform();
    let applied = zoom.drag(40.0, 0.0).expect("drag");
    assert_abs_diff_eq!(applied.x - start.x, 40.0, epsilon = 1e-9);
}

#[test]
fn invalid_inputs_are_rejected() {
    assert!(ZoomBehavior::new(0.0, 500.0, (1.0, 50.0)).is_err());
    assert!(ZoomBehavior::new(1000.0, 500.0, (5.0, 1.0)).is_err());
    assert!(behavior().with_wheel_step(0.0).is_err());

    let mut zoom = behavior();
    assert!(zoom.scale_to(-1.0).is_err());
    assert!(zoom.wheel(f64::INFINITY, [0.0, 0.0]).is_err());
    assert!(zoom.translate_by(f64::NAN, 0.0).is_err());
    assert_eq!(zoom.transform(), ZoomTransform::IDENTITY);
}
