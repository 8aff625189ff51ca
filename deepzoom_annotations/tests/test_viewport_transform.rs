use deepzoom_annotations::assert_fuzzy_eq;
use deepzoom_annotations::core::math::{vec2, BoundingBox};
use deepzoom_annotations::core::traits::FuzzyEq;
use deepzoom_annotations::geometry::{
    Circle, Ellipse, Geometry, Line, Path, Point, Polygon, Rect, SubPath,
};
use deepzoom_annotations::transform::{ViewerState, ViewportTransform};
use deepzoom_annotations::TransformError;

fn transform(extent: BoundingBox<f64>, scale: f64) -> ViewportTransform<f64> {
    ViewportTransform::new(extent, scale).unwrap()
}

#[test]
fn image_point_maps_to_viewport_and_back() {
    let tx = transform(BoundingBox::new(100.0, 100.0, 200.0, 200.0), 2.0);

    let viewport = tx.point_to_viewport(vec2(150.0, 150.0));
    assert_fuzzy_eq!(viewport, vec2(100.0, 100.0));

    let image = tx.point_to_image(viewport);
    assert_fuzzy_eq!(image, vec2(150.0, 150.0));
}

#[test]
fn rect_geometry_maps_to_viewport() {
    let tx = transform(BoundingBox::new(100.0, 100.0, 200.0, 200.0), 2.0);
    let rect = Geometry::Rect(Rect::new(150.0, 150.0, 10.0, 10.0));

    match tx.to_viewport_space(&rect) {
        Geometry::Rect(projected) => {
            assert_fuzzy_eq!(projected.x, 100.0);
            assert_fuzzy_eq!(projected.y, 100.0);
            assert_fuzzy_eq!(projected.width, 20.0);
            assert_fuzzy_eq!(projected.height, 20.0);
        }
        other => panic!("expected rect, got {:?}", other),
    }
}

#[test]
fn round_trip_is_identity_for_every_kind() {
    let tx = transform(BoundingBox::new(50.0, 75.0, 800.0, 600.0), 1.5);

    let shapes = [
        Geometry::Rect(Rect::new(100.0, 100.0, 40.0, 30.0)),
        Geometry::Point(Point::new(120.5, 130.25)),
        Geometry::Polygon(Polygon::new(vec![
            vec2(100.0, 100.0),
            vec2(140.0, 100.0),
            vec2(140.0, 130.0),
        ])),
        Geometry::Circle(Circle::new(vec2(120.0, 115.0), 12.5)),
        Geometry::Ellipse(Ellipse::new(vec2(120.0, 115.0), 12.5, 7.25)),
        Geometry::Path(Path::new(vec![
            SubPath::new(vec![vec2(100.0, 100.0), vec2(110.0, 100.0), vec2(110.0, 110.0)], true),
            SubPath::new(vec![vec2(200.0, 200.0), vec2(210.0, 205.0)], false),
        ])),
        Geometry::Line(Line::new(vec2(100.0, 100.0), vec2(180.0, 140.0))),
    ];

    for shape in &shapes {
        let there_and_back = tx.to_image_space(&tx.to_viewport_space(shape));
        assert!(
            shape.fuzzy_eq_eps(&there_and_back, 1e-9),
            "round trip changed {:?}",
            shape.kind()
        );
    }
}

#[test]
fn degenerate_point_survives_the_transform() {
    let tx = transform(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 4.0);
    let point = Geometry::Point(Point::new(5.0, 5.0));

    match tx.to_viewport_space(&point) {
        Geometry::Point(projected) => {
            assert_fuzzy_eq!(projected.x, 20.0);
            assert_fuzzy_eq!(projected.y, 20.0);
        }
        other => panic!("expected point, got {:?}", other),
    }

    let back = tx.to_image_space(&tx.to_viewport_space(&point));
    assert!(point.fuzzy_eq(&back));
}

#[test]
fn rejects_degenerate_scale() {
    let extent = BoundingBox::new(0.0, 0.0, 100.0, 100.0);

    for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = ViewportTransform::new(extent, scale);
        assert!(
            matches!(result, Err(TransformError::InvalidScale { .. })),
            "scale {} should be rejected",
            scale
        );
    }
}

#[test]
fn rejects_malformed_extent() {
    let result = ViewportTransform::new(BoundingBox::new(100.0, 0.0, 0.0, 100.0), 1.0);
    assert!(matches!(result, Err(TransformError::InvalidExtent { .. })));
}

struct FakeViewer {
    zoom: f64,
}

impl ViewerState<f64> for FakeViewer {
    fn container_size(&self) -> (f64, f64) {
        (1000.0, 800.0)
    }

    fn current_zoom(&self) -> f64 {
        self.zoom
    }

    fn content_scale_factor(&self) -> f64 {
        4000.0
    }

    fn viewport_bounds_in_image_space(&self) -> BoundingBox<f64> {
        BoundingBox::new(200.0, 300.0, 1200.0, 1100.0)
    }
}

#[test]
fn from_viewer_derives_scale_and_extent() {
    let tx = ViewportTransform::from_viewer(&FakeViewer { zoom: 2.0 }).unwrap();

    // scale = zoom * container width / content scale factor
    assert_fuzzy_eq!(tx.scale(), 0.5);
    assert!(tx
        .extent()
        .fuzzy_eq(BoundingBox::new(200.0, 300.0, 1200.0, 1100.0)));
}

#[test]
fn from_viewer_fails_before_layout() {
    // zoom of zero models a viewer that has not been laid out yet
    let result = ViewportTransform::from_viewer(&FakeViewer { zoom: 0.0 });
    assert!(matches!(result, Err(TransformError::InvalidScale { .. })));
}
