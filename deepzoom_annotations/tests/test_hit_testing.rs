use deepzoom_annotations::core::math::vec2;
use deepzoom_annotations::geometry::{
    Circle, Ellipse, Geometry, Line, Path, Point, Rect, SubPath,
};
use deepzoom_annotations::polygon_geom;

#[test]
fn rect_containment_is_edge_inclusive() {
    let rect = Geometry::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));

    assert!(rect.contains_point(vec2(5.0, 5.0)));
    assert!(rect.contains_point(vec2(0.0, 0.0)));
    assert!(rect.contains_point(vec2(10.0, 10.0)));
    assert!(!rect.contains_point(vec2(10.1, 5.0)));
    assert!(!rect.contains_point(vec2(-0.1, 5.0)));
}

#[test]
fn convex_polygon_containment() {
    let polygon = polygon_geom![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];

    assert!(polygon.contains_point(vec2(5.0, 5.0)));
    assert!(polygon.contains_point(vec2(9.0, 9.0)));
    assert!(!polygon.contains_point(vec2(15.0, 5.0)));
    assert!(!polygon.contains_point(vec2(5.0, -1.0)));
}

#[test]
fn concave_polygon_containment() {
    // a "U": the notch between the arms is outside
    let polygon = polygon_geom![
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (7.0, 10.0),
        (7.0, 3.0),
        (3.0, 3.0),
        (3.0, 10.0),
        (0.0, 10.0),
    ];

    assert!(polygon.contains_point(vec2(1.5, 5.0)));
    assert!(polygon.contains_point(vec2(8.5, 5.0)));
    assert!(polygon.contains_point(vec2(5.0, 1.5)));
    assert!(!polygon.contains_point(vec2(5.0, 5.0)));
    assert!(!polygon.contains_point(vec2(5.0, 11.0)));
}

#[test]
fn self_intersecting_polygon_containment() {
    // bowtie: both lobes count as inside under the non-zero fill rule
    let polygon = polygon_geom![(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)];

    assert!(polygon.contains_point(vec2(2.0, 5.0)));
    assert!(polygon.contains_point(vec2(8.0, 5.0)));
    assert!(!polygon.contains_point(vec2(5.0, 2.0)));
    assert!(!polygon.contains_point(vec2(5.0, 8.0)));
}

#[test]
fn degenerate_polygon_has_no_interior() {
    let polygon = polygon_geom![(0.0, 0.0), (10.0, 0.0)];
    assert!(!polygon.contains_point(vec2(5.0, 0.0)));
}

#[test]
fn circle_containment_is_boundary_inclusive() {
    let circle = Geometry::Circle(Circle::new(vec2(5.0, 5.0), 2.0));

    assert!(circle.contains_point(vec2(5.0, 5.0)));
    assert!(circle.contains_point(vec2(7.0, 5.0)));
    assert!(!circle.contains_point(vec2(7.1, 5.0)));
    assert!(!circle.contains_point(vec2(7.0, 7.0)));
}

#[test]
fn ellipse_containment_uses_quadratic_form() {
    let ellipse = Geometry::Ellipse(Ellipse::new(vec2(5.0, 5.0), 4.0, 2.0));

    assert!(ellipse.contains_point(vec2(5.0, 5.0)));
    assert!(ellipse.contains_point(vec2(9.0, 5.0)));
    assert!(ellipse.contains_point(vec2(8.0, 6.0)));
    assert!(!ellipse.contains_point(vec2(5.0, 7.1)));
    assert!(!ellipse.contains_point(vec2(9.0, 6.0)));
}

#[test]
fn degenerate_ellipse_has_no_interior() {
    let ellipse = Geometry::Ellipse(Ellipse::new(vec2(5.0, 5.0), 0.0, 2.0));

    assert!(!ellipse.contains_point(vec2(5.0, 5.0)));
    assert!(!ellipse.contains_point(vec2(6.0, 5.0)));
}

#[test]
fn path_hit_tests_each_subpath_as_closed_ring() {
    let path = Geometry::Path(Path::new(vec![
        SubPath::new(
            vec![vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)],
            true,
        ),
        SubPath::new(
            vec![
                vec2(20.0, 20.0),
                vec2(30.0, 20.0),
                vec2(30.0, 30.0),
                vec2(20.0, 30.0),
            ],
            false,
        ),
    ]));

    assert!(path.contains_point(vec2(5.0, 5.0)));
    // the open sub-path still closes for hit purposes
    assert!(path.contains_point(vec2(25.0, 25.0)));
    assert!(!path.contains_point(vec2(15.0, 15.0)));
}

#[test]
fn points_and_lines_have_no_interior() {
    let point = Geometry::Point(Point::new(5.0, 5.0));
    let line = Geometry::Line(Line::new(vec2(0.0, 0.0), vec2(10.0, 10.0)));

    assert!(!point.contains_point(vec2(5.0, 5.0)));
    assert!(!line.contains_point(vec2(5.0, 5.0)));
}
