use super::*;
use kurbo::Shape;

#[test]
fn absolute_and_relative_lines_normalize_to_absolute() {
    let p = parse_path_data("M20,10 L120,10 l0 30 h-10 V5");
    assert!(!p.malformed);
    assert_eq!(
        p.commands,
        vec![
            PathCommand::MoveTo(Point::new(20.0, 10.0)),
            PathCommand::LineTo(Point::new(120.0, 10.0)),
            PathCommand::LineTo(Point::new(120.0, 40.0)),
            PathCommand::LineTo(Point::new(110.0, 40.0)),
            PathCommand::LineTo(Point::new(110.0, 5.0)),
        ]
    );
}

#[test]
fn implicit_repetition_after_moveto_is_lineto() {
    let p = parse_path_data("m1 1 2 2 3-3");
    assert!(!p.malformed);
    assert_eq!(
        p.commands,
        vec![
            PathCommand::MoveTo(Point::new(1.0, 1.0)),
            PathCommand::LineTo(Point::new(3.0, 3.0)),
            PathCommand::LineTo(Point::new(6.0, 0.0)),
        ]
    );
}

#[test]
fn compact_numbers_and_exponents() {
    let p = parse_path_data("M.5.5L1e1-2.5e0");
    assert!(!p.malformed);
    assert_eq!(
        p.commands,
        vec![
            PathCommand::MoveTo(Point::new(0.5, 0.5)),
            PathCommand::LineTo(Point::new(10.0, -2.5)),
        ]
    );
}

#[test]
fn smooth_curves_reflect_previous_control_point() {
    let p = parse_path_data("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
    assert!(!p.malformed);
    assert_eq!(
        p.commands[2],
        PathCommand::CubicTo(
            Point::new(10.0, -10.0),
            Point::new(20.0, -10.0),
            Point::new(20.0, 0.0)
        )
    );

    let p = parse_path_data("M0 0 Q5 5 10 0 T20 0");
    assert_eq!(
        p.commands[2],
        PathCommand::QuadTo(Point::new(15.0, -5.0), Point::new(20.0, 0.0))
    );
}

#[test]
fn arcs_accept_compact_flags() {
    let p = parse_path_data("M0 0 a5 5 0 0110 0");
    assert!(!p.malformed);
    assert_eq!(
        p.commands[1],
        PathCommand::ArcTo {
            radii: Vec2::new(5.0, 5.0),
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
            to: Point::new(10.0, 0.0),
        }
    );
    let bb = to_bez_path(&p.commands).bounding_box();
    assert!(bb.width() > 9.0);
}

#[test]
fn malformed_data_keeps_prefix() {
    let p = parse_path_data("M0 0 L10 10 L oops");
    assert!(p.malformed);
    assert_eq!(p.commands.len(), 2);

    let p = parse_path_data("10 10");
    assert!(p.malformed);
    assert!(p.commands.is_empty());

    let p = parse_path_data("");
    assert!(!p.malformed);
    assert!(p.commands.is_empty());
}

#[test]
fn close_returns_to_subpath_start() {
    let p = parse_path_data("M5 5 l10 0 z l0 10");
    assert_eq!(p.commands[3], PathCommand::LineTo(Point::new(5.0, 15.0)));
}
