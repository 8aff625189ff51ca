use deepzoom_annotations::geometry::{Geometry, GeometryKind};
use deepzoom_annotations::selector::{FragmentSelector, FragmentUnit, Selector};
use deepzoom_annotations::store::ImageContext;
use deepzoom_annotations::SelectorError;

fn image() -> ImageContext {
    ImageContext::new(1000, 800, "http://example.com/image.jpg")
}

#[test]
fn parse_pixel_fragment() {
    let fragment: FragmentSelector = FragmentSelector::parse("xywh=pixel:10,20,30,40").unwrap();
    assert_eq!(fragment.x, 10.0);
    assert_eq!(fragment.y, 20.0);
    assert_eq!(fragment.w, 30.0);
    assert_eq!(fragment.h, 40.0);
    assert_eq!(fragment.unit, FragmentUnit::Pixel);
}

#[test]
fn parse_fragment_without_unit_defaults_to_pixel() {
    let fragment: FragmentSelector = FragmentSelector::parse("xywh=10,20,30,40").unwrap();
    assert_eq!(fragment.unit, FragmentUnit::Pixel);
    assert_eq!(fragment.w, 30.0);
}

#[test]
fn percent_fragment_resolves_against_image_size() {
    let selector = Selector::<f64>::parse_fragment("xywh=percent:10,10,50,25").unwrap();
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Rect(rect) => {
            assert_eq!(rect.x, 100.0);
            assert_eq!(rect.y, 80.0);
            assert_eq!(rect.width, 500.0);
            assert_eq!(rect.height, 200.0);
        }
        other => panic!("expected rect, got {:?}", other),
    }
}

#[test]
fn degenerate_fragment_decodes_to_point() {
    let selector = Selector::<f64>::parse_fragment("xywh=pixel:5,5,0,0").unwrap();
    let geometry = selector.decode(&image()).unwrap();

    assert!(geometry.rendered_as_point());
    assert_eq!(geometry.kind(), GeometryKind::Point);

    // re-encoding preserves the degenerate form
    let encoded = Selector::from_geometry(&geometry);
    assert_eq!(encoded.value(), "xywh=pixel:5,5,0,0");
}

#[test]
fn fragment_rejects_malformed_values() {
    for value in [
        "10,20,30,40",
        "xywh=pixel:10,20,30",
        "xywh=pixel:10,20,30,40,50",
        "xywh=pixel:10,20,thirty,40",
        "xywh=pixel:-10,20,30,40",
        "xywh=pixel:10,20,30,inf",
        "xywh=",
    ] {
        let result = FragmentSelector::<f64>::parse(value);
        assert!(
            matches!(result, Err(SelectorError::MalformedFragment { .. })),
            "expected malformed fragment for '{}'",
            value
        );
    }
}

#[test]
fn fragment_round_trips_through_wire_value() {
    let original = "xywh=pixel:10,20,30,40";
    let fragment: FragmentSelector = FragmentSelector::parse(original).unwrap();
    assert_eq!(fragment.to_value(), original);
}

#[test]
fn svg_polygon_decodes() {
    let selector = Selector::<f64>::svg(r#"<svg><polygon points="0,0 10,0 10,10" /></svg>"#);
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Polygon(polygon) => {
            assert_eq!(polygon.vertex_count(), 3);
            assert_eq!(polygon.vertices[1].x, 10.0);
            assert_eq!(polygon.vertices[1].y, 0.0);
        }
        other => panic!("expected polygon, got {:?}", other),
    }
}

#[test]
fn svg_shape_without_wrapper_decodes() {
    let selector = Selector::<f64>::svg(r#"<circle cx="5" cy="6" r="2" />"#);
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Circle(circle) => {
            assert_eq!(circle.center.x, 5.0);
            assert_eq!(circle.center.y, 6.0);
            assert_eq!(circle.radius, 2.0);
        }
        other => panic!("expected circle, got {:?}", other),
    }
}

#[test]
fn svg_ellipse_decodes() {
    let selector = Selector::<f64>::svg(r#"<svg><ellipse cx="5" cy="5" rx="2" ry="3" /></svg>"#);
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Ellipse(ellipse) => {
            assert_eq!(ellipse.radius_x, 2.0);
            assert_eq!(ellipse.radius_y, 3.0);
        }
        other => panic!("expected ellipse, got {:?}", other),
    }
}

#[test]
fn svg_line_decodes() {
    let selector = Selector::<f64>::svg(r#"<svg><line x1="0" y1="0" x2="10" y2="5" /></svg>"#);
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Line(line) => {
            assert_eq!(line.end.x, 10.0);
            assert_eq!(line.end.y, 5.0);
        }
        other => panic!("expected line, got {:?}", other),
    }
}

#[test]
fn svg_path_decodes_multiple_subpaths() {
    let selector = Selector::<f64>::svg(
        r#"<svg><path d="M 0 0 L 10 0 L 10 10 Z M 20 20 L 30 20 L 30 30 Z" /></svg>"#,
    );
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Path(path) => {
            assert_eq!(path.subpaths.len(), 2);
            assert!(path.subpaths.iter().all(|subpath| subpath.closed));
            assert_eq!(path.subpaths[0].vertices.len(), 3);
            assert_eq!(path.subpaths[1].vertices[0].x, 20.0);
        }
        other => panic!("expected path, got {:?}", other),
    }
}

#[test]
fn svg_path_relative_commands_resolve() {
    let selector = Selector::<f64>::svg(r#"<svg><path d="m 10 10 l 5 0 l 0 5 z" /></svg>"#);
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Path(path) => {
            assert_eq!(path.subpaths.len(), 1);
            let vertices = &path.subpaths[0].vertices;
            assert_eq!(vertices.len(), 3);
            assert_eq!(vertices[1].x, 15.0);
            assert_eq!(vertices[1].y, 10.0);
            assert_eq!(vertices[2].x, 15.0);
            assert_eq!(vertices[2].y, 15.0);
        }
        other => panic!("expected path, got {:?}", other),
    }
}

#[test]
fn svg_path_curves_flatten_to_endpoints() {
    let selector = Selector::<f64>::svg(r#"<svg><path d="M 0 0 C 1 5 9 5 10 0 Z" /></svg>"#);
    let geometry = selector.decode(&image()).unwrap();

    match geometry {
        Geometry::Path(path) => {
            let vertices = &path.subpaths[0].vertices;
            assert_eq!(vertices.len(), 2);
            assert_eq!(vertices[1].x, 10.0);
            assert_eq!(vertices[1].y, 0.0);
        }
        other => panic!("expected path, got {:?}", other),
    }
}

#[test]
fn svg_path_arc_command_is_unsupported() {
    let selector = Selector::<f64>::svg(r#"<svg><path d="M 0 0 A 5 5 0 0 1 10 0" /></svg>"#);
    let result = selector.decode(&image());

    assert!(matches!(
        result,
        Err(SelectorError::UnsupportedPathCommand { command: 'A' })
    ));
}

#[test]
fn svg_rect_is_unsupported_kind() {
    let selector =
        Selector::<f64>::svg(r#"<svg><rect x="0" y="0" width="5" height="5" /></svg>"#);
    let result = selector.decode(&image());

    match result {
        Err(SelectorError::UnsupportedKind { kind }) => assert_eq!(kind, "rect"),
        other => panic!("expected unsupported kind, got {:?}", other),
    }
}

#[test]
fn svg_rejects_malformed_content() {
    // empty wrapper
    let result = Selector::<f64>::svg("<svg></svg>").decode(&image());
    assert!(matches!(result, Err(SelectorError::MalformedSvg { .. })));

    // missing attribute
    let result = Selector::<f64>::svg(r#"<svg><circle cx="5" cy="5" /></svg>"#).decode(&image());
    assert!(matches!(result, Err(SelectorError::MalformedSvg { .. })));

    // odd number of polygon coordinates
    let result =
        Selector::<f64>::svg(r#"<svg><polygon points="0,0 10" /></svg>"#).decode(&image());
    assert!(matches!(result, Err(SelectorError::MalformedSvg { .. })));

    // not xml at all
    let result = Selector::<f64>::svg("not markup").decode(&image());
    assert!(matches!(result, Err(SelectorError::Xml(_))));
}

#[test]
fn canonical_wire_values_round_trip_exactly() {
    for value in [
        r#"<svg><polygon points="0,0 10,0 10,10" /></svg>"#,
        r#"<svg><circle cx="5" cy="5" r="1" /></svg>"#,
        r#"<svg><ellipse cx="5" cy="5" rx="2" ry="3" /></svg>"#,
        r#"<svg><path d="M 0 0 L 10 0 L 10 10 Z" /></svg>"#,
        r#"<svg><line x1="0" y1="0" x2="10" y2="5" /></svg>"#,
    ] {
        let geometry = Selector::<f64>::svg(value).decode(&image()).unwrap();
        let encoded = Selector::from_geometry(&geometry);
        assert_eq!(encoded.value(), value);
    }
}

#[test]
fn geometry_round_trips_through_encode_and_decode() {
    let wire_values = [
        "xywh=pixel:10.5,20.25,30,40",
        "xywh=pixel:5,5,0,0",
        r#"<svg><polygon points="0.5,0.5 10.25,0 10,10.75" /></svg>"#,
        r#"<svg><circle cx="5.5" cy="5.5" r="1.25" /></svg>"#,
        r#"<svg><ellipse cx="5" cy="5" rx="2.5" ry="3.5" /></svg>"#,
        r#"<svg><path d="M 0 0 L 10.5 0 L 10.5 10.5 Z M 20 20 L 30 20" /></svg>"#,
        r#"<svg><line x1="0.5" y1="0" x2="10" y2="5.5" /></svg>"#,
    ];

    for value in wire_values {
        let selector = if value.starts_with("xywh=") {
            Selector::<f64>::parse_fragment(value).unwrap()
        } else {
            Selector::<f64>::svg(value)
        };
        let decoded = selector.decode(&image()).unwrap();
        let re_decoded = Selector::from_geometry(&decoded).decode(&image()).unwrap();
        assert!(
            decoded.fuzzy_eq(&re_decoded),
            "round trip changed geometry for '{}'",
            value
        );
    }
}
