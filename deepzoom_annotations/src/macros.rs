/// Macro used for test assertions on fuzzy comparable values.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Construct a polygon [Geometry](crate::geometry::Geometry) from a list of
/// `(x, y)` vertex tuples.
///
/// # Examples
///
/// ```
/// # use deepzoom_annotations::polygon_geom;
/// # use deepzoom_annotations::geometry::Geometry;
/// let polygon = polygon_geom![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// assert!(matches!(polygon, Geometry::Polygon(_)));
/// ```
#[macro_export]
macro_rules! polygon_geom {
    ($( $v:expr ),* $(,)?) => {{
        $crate::geometry::Geometry::Polygon($crate::geometry::Polygon::new(vec![
            $( $crate::core::math::vec2($v.0, $v.1) ),*
        ]))
    }};
}
