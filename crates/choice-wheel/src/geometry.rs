//! Angle and SVG path arithmetic.
//!
//! Angles are in degrees, with 0° pointing "up" (north) and increasing
//! clockwise. Coordinates are in SVG user space, where y grows downward.

/// A point in SVG user space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The point on the circle of `radius` around `(cx, cy)` at `angle_deg`.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> Point {
    let angle_rad = (angle_deg - 90.0).to_radians();
    Point {
        x: cx + radius * angle_rad.cos(),
        y: cy + radius * angle_rad.sin(),
    }
}

/// Whether an arc from `start_deg` to `end_deg` needs SVG's large-arc flag.
pub fn is_large_arc(start_deg: f64, end_deg: f64) -> bool {
    end_deg - start_deg > 180.0
}

/// A closed circular sector covering `[start_deg, end_deg]` clockwise.
///
/// The arc is drawn from the point at `end_deg` back to the point at
/// `start_deg` with sweep flag 0, which in y-down space traces the wedge.
pub fn describe_arc_path(cx: f64, cy: f64, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let start = polar_to_cartesian(cx, cy, radius, end_deg);
    let end = polar_to_cartesian(cx, cy, radius, start_deg);
    let large_arc = if is_large_arc(start_deg, end_deg) {
        "1"
    } else {
        "0"
    };
    format!(
        "M {cx} {cy} L {} {} A {radius} {radius} 0 {large_arc} 0 {} {} Z",
        fmt_coord(start.x),
        fmt_coord(start.y),
        fmt_coord(end.x),
        fmt_coord(end.y),
    )
}

/// An SVG `transform` that places a centered label `radius` out from
/// `(cx, cy)` along `angle_deg`, reading outward along that angle.
///
/// The translation is applied first, placing the label at 90°, then the
/// rotation about the center swings it to `angle_deg`.
pub fn describe_rotated_text_transform(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> String {
    format!(
        "rotate({}, {cx}, {cy}) translate({}, {cy})",
        fmt_coord(angle_deg - 90.0),
        fmt_coord(radius + cx),
    )
}

/// Rounds away float noise (`1e-14`, `-0`) so paths stay short and stable.
fn fmt_coord(v: f64) -> f64 {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
