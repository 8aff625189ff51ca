use crate::core::math::{vec2, Vector2};
use crate::core::traits::Real;
use crate::error::SelectorError;
use crate::geometry::{Circle, Ellipse, Geometry, Line, Path, Polygon, SubPath};
use roxmltree::{Document, Node};
use std::fmt::Write as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vector selector carrying a single-element SVG markup fragment.
///
/// The markup is kept verbatim as the wire value; shape content is parsed
/// and validated when the selector is decoded.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgSelector {
    pub value: String,
}

impl SvgSelector {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        SvgSelector {
            value: value.into(),
        }
    }
}

/// Parse a vector selector value into geometry.
///
/// The shape element may sit directly at the root or inside an `<svg>`
/// wrapper. Tags outside the supported set (including `rect`, which is
/// persisted as a fragment selector instead) fail with
/// [SelectorError::UnsupportedKind].
pub(crate) fn decode<T>(value: &str) -> Result<Geometry<T>, SelectorError>
where
    T: Real,
{
    let document = Document::parse(value)?;
    let root = document.root_element();
    let shape = if root.has_tag_name("svg") {
        root.children()
            .find(|node| node.is_element())
            .ok_or_else(|| SelectorError::malformed_svg("no shape element inside <svg> wrapper"))?
    } else {
        root
    };

    match shape.tag_name().name() {
        "polygon" => decode_polygon(&shape),
        "circle" => Ok(Geometry::Circle(Circle::new(
            vec2(number_attr(&shape, "cx")?, number_attr(&shape, "cy")?),
            number_attr(&shape, "r")?,
        ))),
        "ellipse" => Ok(Geometry::Ellipse(Ellipse::new(
            vec2(number_attr(&shape, "cx")?, number_attr(&shape, "cy")?),
            number_attr(&shape, "rx")?,
            number_attr(&shape, "ry")?,
        ))),
        "path" => {
            let data = require_attr(&shape, "d")?;
            Ok(Geometry::Path(Path::new(parse_path_data(data)?)))
        }
        "line" => Ok(Geometry::Line(Line::new(
            vec2(number_attr(&shape, "x1")?, number_attr(&shape, "y1")?),
            vec2(number_attr(&shape, "x2")?, number_attr(&shape, "y2")?),
        ))),
        other => Err(SelectorError::UnsupportedKind {
            kind: other.to_string(),
        }),
    }
}

fn decode_polygon<T>(shape: &Node<'_, '_>) -> Result<Geometry<T>, SelectorError>
where
    T: Real,
{
    let points = require_attr(shape, "points")?;
    let mut numbers = Vec::new();
    for token in points.split([',', ' ', '\t', '\n', '\r']) {
        if token.is_empty() {
            continue;
        }
        numbers.push(parse_number::<T>(token).ok_or_else(|| {
            SelectorError::malformed_svg(format!("invalid number '{token}' in polygon points"))
        })?);
    }
    if numbers.is_empty() || numbers.len() % 2 != 0 {
        return Err(SelectorError::malformed_svg(
            "polygon points must hold a non-empty, even list of numbers",
        ));
    }

    let vertices = numbers
        .chunks_exact(2)
        .map(|pair| vec2(pair[0], pair[1]))
        .collect();
    Ok(Geometry::Polygon(Polygon::new(vertices)))
}

fn require_attr<'a>(node: &'a Node<'_, '_>, name: &str) -> Result<&'a str, SelectorError> {
    node.attribute(name).ok_or_else(|| {
        SelectorError::malformed_svg(format!(
            "<{}> missing attribute '{}'",
            node.tag_name().name(),
            name
        ))
    })
}

fn number_attr<T>(node: &Node<'_, '_>, name: &str) -> Result<T, SelectorError>
where
    T: Real,
{
    let raw = require_attr(node, name)?;
    parse_number(raw).ok_or_else(|| {
        SelectorError::malformed_svg(format!("invalid number '{raw}' in attribute '{name}'"))
    })
}

fn parse_number<T>(raw: &str) -> Option<T>
where
    T: Real,
{
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    T::from(value)
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(data: &str) -> Result<Vec<Token>, SelectorError> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
            continue;
        }
        if c.is_ascii_alphabetic() {
            tokens.push(Token::Command(c));
            i += 1;
            continue;
        }

        // number: [+-]? digits [. digits] [eE [+-]? digits]
        let start = i;
        if c == '+' || c == '-' {
            i += 1;
        }
        let mut seen_digit = false;
        let mut seen_dot = false;
        while i < bytes.len() {
            let ch = bytes[i] as char;
            if ch.is_ascii_digit() {
                seen_digit = true;
                i += 1;
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                i += 1;
            } else {
                break;
            }
        }
        if seen_digit && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            let exponent_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > exponent_start {
                i = j;
            }
        }
        if !seen_digit {
            return Err(SelectorError::malformed_svg(format!(
                "path data: unexpected character '{c}'"
            )));
        }

        let value = data[start..i]
            .parse::<f64>()
            .map_err(|_| SelectorError::malformed_svg("path data: invalid number"))?;
        tokens.push(Token::Number(value));
    }

    Ok(tokens)
}

fn take_numbers(
    tokens: &[Token],
    pos: &mut usize,
    count: usize,
) -> Result<Vec<f64>, SelectorError> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        match tokens.get(*pos) {
            Some(Token::Number(value)) => {
                out.push(*value);
                *pos += 1;
            }
            _ => {
                return Err(SelectorError::malformed_svg(
                    "path data: missing coordinates after command",
                ))
            }
        }
    }
    Ok(out)
}

/// Parse SVG path data into flattened sub-paths.
///
/// `M/L/H/V/Z` (and their relative forms) resolve exactly. Curve commands
/// with explicit endpoints (`C/S/Q/T`) are flattened to straight segments to
/// their endpoints; control points are dropped. Elliptical arcs carry no
/// explicit endpoint geometry this crate resolves, so `A/a` fails with
/// [SelectorError::UnsupportedPathCommand].
pub(crate) fn parse_path_data<T>(data: &str) -> Result<Vec<SubPath<T>>, SelectorError>
where
    T: Real,
{
    let tokens = tokenize(data)?;
    let mut subpaths: Vec<SubPath<T>> = Vec::new();
    let mut current: Vec<Vector2<T>> = Vec::new();
    let mut cursor = Vector2::<f64>::zero();
    let mut subpath_start = Vector2::<f64>::zero();
    let mut command: Option<char> = None;
    let mut pos = 0;

    let to_vertex = |p: Vector2<f64>| -> Result<Vector2<T>, SelectorError> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(SelectorError::malformed_svg(
                "path data: non-finite coordinate",
            ));
        }
        Ok(vec2(
            T::from(p.x)
                .ok_or_else(|| SelectorError::malformed_svg("path data: coordinate out of range"))?,
            T::from(p.y)
                .ok_or_else(|| SelectorError::malformed_svg("path data: coordinate out of range"))?,
        ))
    };

    while pos < tokens.len() {
        if let Token::Command(c) = tokens[pos] {
            pos += 1;
            if c == 'Z' || c == 'z' {
                if !current.is_empty() {
                    subpaths.push(SubPath::new(std::mem::take(&mut current), true));
                    // closing returns the pen to the sub-path start
                    cursor = subpath_start;
                }
                command = None;
                continue;
            }
            if c == 'A' || c == 'a' {
                return Err(SelectorError::UnsupportedPathCommand { command: c });
            }
            command = Some(c);
        }

        let c = command.ok_or_else(|| {
            SelectorError::malformed_svg("path data: coordinates before any command")
        })?;
        let relative = c.is_ascii_lowercase();
        let upper = c.to_ascii_uppercase();

        let endpoint = match upper {
            'M' | 'L' | 'T' => {
                let n = take_numbers(&tokens, &mut pos, 2)?;
                resolve(cursor, n[0], n[1], relative)
            }
            'H' => {
                let n = take_numbers(&tokens, &mut pos, 1)?;
                if relative {
                    vec2(cursor.x + n[0], cursor.y)
                } else {
                    vec2(n[0], cursor.y)
                }
            }
            'V' => {
                let n = take_numbers(&tokens, &mut pos, 1)?;
                if relative {
                    vec2(cursor.x, cursor.y + n[0])
                } else {
                    vec2(cursor.x, n[0])
                }
            }
            // curves flatten to their endpoints (last coordinate pair)
            'C' => {
                let n = take_numbers(&tokens, &mut pos, 6)?;
                resolve(cursor, n[4], n[5], relative)
            }
            'S' | 'Q' => {
                let n = take_numbers(&tokens, &mut pos, 4)?;
                resolve(cursor, n[2], n[3], relative)
            }
            _ => return Err(SelectorError::UnsupportedPathCommand { command: c }),
        };

        if upper == 'M' {
            if !current.is_empty() {
                subpaths.push(SubPath::new(std::mem::take(&mut current), false));
            }
            current.push(to_vertex(endpoint)?);
            subpath_start = endpoint;
            // subsequent coordinate pairs of a moveto are implicit linetos
            command = Some(if relative { 'l' } else { 'L' });
        } else {
            if current.is_empty() {
                // drawing resumed after a close; continue from the cursor
                current.push(to_vertex(cursor)?);
            }
            current.push(to_vertex(endpoint)?);
        }
        cursor = endpoint;
    }

    if !current.is_empty() {
        subpaths.push(SubPath::new(current, false));
    }
    if subpaths.is_empty() {
        return Err(SelectorError::malformed_svg("path data: no segments"));
    }

    Ok(subpaths)
}

#[inline]
fn resolve(cursor: Vector2<f64>, x: f64, y: f64, relative: bool) -> Vector2<f64> {
    if relative {
        vec2(cursor.x + x, cursor.y + y)
    } else {
        vec2(x, y)
    }
}

pub(crate) fn encode_polygon<T>(polygon: &Polygon<T>) -> String
where
    T: Real,
{
    let mut points = String::new();
    for (i, vertex) in polygon.vertices.iter().enumerate() {
        if i > 0 {
            points.push(' ');
        }
        let _ = write!(points, "{},{}", vertex.x, vertex.y);
    }
    format!("<svg><polygon points=\"{points}\" /></svg>")
}

pub(crate) fn encode_circle<T>(circle: &Circle<T>) -> String
where
    T: Real,
{
    format!(
        "<svg><circle cx=\"{}\" cy=\"{}\" r=\"{}\" /></svg>",
        circle.center.x, circle.center.y, circle.radius
    )
}

pub(crate) fn encode_ellipse<T>(ellipse: &Ellipse<T>) -> String
where
    T: Real,
{
    format!(
        "<svg><ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" /></svg>",
        ellipse.center.x, ellipse.center.y, ellipse.radius_x, ellipse.radius_y
    )
}

pub(crate) fn encode_path<T>(path: &Path<T>) -> String
where
    T: Real,
{
    let mut data = String::new();
    for subpath in &path.subpaths {
        for (i, vertex) in subpath.vertices.iter().enumerate() {
            if !data.is_empty() {
                data.push(' ');
            }
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(data, "{} {} {}", command, vertex.x, vertex.y);
        }
        if subpath.closed {
            data.push_str(" Z");
        }
    }
    format!("<svg><path d=\"{data}\" /></svg>")
}

pub(crate) fn encode_line<T>(line: &Line<T>) -> String
where
    T: Real,
{
    format!(
        "<svg><line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" /></svg>",
        line.start.x, line.start.y, line.end.x, line.end.y
    )
}
