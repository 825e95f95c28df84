use super::*;

fn apply(m: Affine, x: f64, y: f64) -> Point {
    m * Point::new(x, y)
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn translate_and_scale_compose_left_to_right() {
    let m = parse_transform("translate(10, 5) scale(2)").unwrap();
    assert!(close(apply(m, 1.0, 1.0), Point::new(12.0, 7.0)));

    let m = parse_transform("translate(3)").unwrap();
    assert!(close(apply(m, 0.0, 0.0), Point::new(3.0, 0.0)));
}

#[test]
fn rotate_about_center() {
    let m = parse_transform("rotate(90 10 10)").unwrap();
    assert!(close(apply(m, 20.0, 10.0), Point::new(10.0, 20.0)));
}

#[test]
fn matrix_maps_coefficients_directly() {
    let m = parse_transform("matrix(1 0 0 1 7 -3)").unwrap();
    assert!(close(apply(m, 1.0, 1.0), Point::new(8.0, -2.0)));
}

#[test]
fn malformed_lists_are_rejected() {
    assert!(parse_transform("translate(1,2").is_none());
    assert!(parse_transform("wobble(3)").is_none());
    assert!(parse_transform("scale(a)").is_none());
    assert!(parse_transform("rotate(1 2)").is_none());
    assert_eq!(parse_transform("   "), Some(Affine::IDENTITY));
}
