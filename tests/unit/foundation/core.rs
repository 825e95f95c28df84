use super::*;

#[test]
fn hex_formatting_drops_opaque_alpha() {
    assert_eq!(Rgba8::rgb(255, 0, 128).to_hex(), "#ff0080");
    assert_eq!(
        Rgba8 {
            r: 1,
            g: 2,
            b: 3,
            a: 4
        }
        .to_hex(),
        "#01020304"
    );
    assert_eq!(Rgba8::transparent().a, 0);
}

#[test]
fn distance_to_rect_is_zero_inside_and_euclidean_outside() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(distance_to_rect(Point::new(5.0, 5.0), r), 0.0);
    assert_eq!(distance_to_rect(Point::new(15.0, 5.0), r), 5.0);
    assert!((distance_to_rect(Point::new(13.0, 14.0), r) - 5.0).abs() < 1e-12);
}
