//! Small vector kernels and closest-point queries on `[f64; 3]` coordinates.
//!
//! Segment and triangle queries return the closest point itself, so callers
//! compare distances against a tolerance with the same arithmetic everywhere.
//! At the segment endpoints the exact vertex coordinates are returned (not
//! `a + t * (b - a)`), which keeps exact vertex matches exact at zero tolerance.

pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(sub(a, b))
}

/// Midpoint of `a` and `b`.
#[inline]
pub fn midpoint(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    scale(add(a, b), 0.5)
}

/// Projection of `p` onto the segment `[a, b]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProjection {
    /// Projection parameter clamped to `[0, 1]`.
    pub t: f64,
    /// Projection parameter onto the infinite line through `a` and `b`.
    pub raw_t: f64,
    /// Closest point of the segment to `p`.
    pub closest: [f64; 3],
    /// Distance from `p` to `closest`.
    pub distance: f64,
}

/// Project `p` onto segment `[a, b]`, clamping to the endpoints.
///
/// A zero-length segment degenerates to the point `a`.
pub fn project_onto_segment(p: [f64; 3], a: [f64; 3], b: [f64; 3]) -> SegmentProjection {
    let ab = sub(b, a);
    let len2 = dot(ab, ab);
    let raw_t = if len2 > 0.0 { dot(sub(p, a), ab) / len2 } else { 0.0 };
    let (t, closest) = if raw_t <= 0.0 {
        (0.0, a)
    } else if raw_t >= 1.0 {
        (1.0, b)
    } else {
        (raw_t, add(a, scale(ab, raw_t)))
    };
    SegmentProjection {
        t,
        raw_t,
        closest,
        distance: distance(p, closest),
    }
}

/// Closest point to `p` on the (filled) triangle `abc`.
///
/// Region-based evaluation after Ericson, "Real-Time Collision Detection",
/// section 5.1.5; degenerate triangles fall back to the closest edge.
pub fn closest_point_on_triangle(p: [f64; 3], a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> [f64; 3] {
    let ab = sub(b, a);
    let ac = sub(c, a);
    if norm(cross(ab, ac)) == 0.0 {
        return [
            project_onto_segment(p, a, b),
            project_onto_segment(p, b, c),
            project_onto_segment(p, c, a),
        ]
        .into_iter()
        .min_by(|l, r| l.distance.total_cmp(&r.distance))
        .map(|proj| proj.closest)
        .unwrap_or(a);
    }

    let ap = sub(p, a);
    let d1 = dot(ab, ap);
    let d2 = dot(ac, ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = sub(p, b);
    let d3 = dot(ab, bp);
    let d4 = dot(ac, bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return add(a, scale(ab, d1 / (d1 - d3)));
    }

    let cp = sub(p, c);
    let d5 = dot(ab, cp);
    let d6 = dot(ac, cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return add(a, scale(ac, d2 / (d2 - d6)));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return add(b, scale(sub(c, b), w));
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    add(a, add(scale(ab, v), scale(ac, w)))
}

/// Distance from `p` to the filled triangle `abc`.
pub fn distance_to_triangle(p: [f64; 3], a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    distance(p, closest_point_on_triangle(p, a, b, c))
}

/// Distance in the xy-plane from `p` to the triangle `abc` projected onto it.
///
/// Returns `0.0` when the projection of `p` lies inside the projected triangle.
pub fn planar_distance_to_triangle(p: [f64; 3], a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let flat = |q: [f64; 3]| [q[0], q[1], 0.0];
    distance_to_triangle(flat(p), flat(a), flat(b), flat(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn segment_projection_interior_and_clamped() {
        let a = [0.0, 0.0, 0.0];
        let b = [4.0, 0.0, 0.0];
        let mid = project_onto_segment([1.0, 2.0, 0.0], a, b);
        assert!(approx(mid.t, 0.25));
        assert!(approx(mid.distance, 2.0));

        let before = project_onto_segment([-3.0, 4.0, 0.0], a, b);
        assert_eq!(before.t, 0.0);
        assert!(approx(before.raw_t, -0.75));
        assert_eq!(before.closest, a);
        assert!(approx(before.distance, 5.0));

        let after = project_onto_segment([5.0, 0.0, 0.0], a, b);
        assert_eq!(after.t, 1.0);
        assert!(approx(after.raw_t, 1.25));
        assert_eq!(after.closest, b);
    }

    #[test]
    fn segment_endpoint_is_exact() {
        let a = [0.1, 0.7, 0.3];
        let b = [0.3, 0.9, 1.1];
        let proj = project_onto_segment(b, a, b);
        assert_eq!(proj.distance, 0.0);
        let proj = project_onto_segment(a, a, b);
        assert_eq!(proj.distance, 0.0);
    }

    #[test]
    fn zero_length_segment_is_a_point() {
        let a = [1.0, 1.0, 1.0];
        let proj = project_onto_segment([1.0, 1.0, 2.0], a, a);
        assert_eq!(proj.t, 0.0);
        assert!(approx(proj.distance, 1.0));
    }

    #[test]
    fn triangle_regions() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [0.0, 1.0, 0.0];
        assert!(approx(distance_to_triangle([0.25, 0.25, 2.0], a, b, c), 2.0));
        assert!(approx(distance_to_triangle([-1.0, -1.0, 0.0], a, b, c), 2f64.sqrt()));
        assert!(approx(distance_to_triangle([0.5, -1.0, 0.0], a, b, c), 1.0));
        assert!(approx(
            distance_to_triangle([1.0, 1.0, 0.0], a, b, c),
            0.5 * 2f64.sqrt()
        ));
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 5.0];
        let c = [0.0, 1.0, -5.0];
        assert_eq!(planar_distance_to_triangle([0.2, 0.2, 100.0], a, b, c), 0.0);
        assert!(approx(planar_distance_to_triangle([2.0, 0.0, 0.0], a, b, c), 1.0));
    }

    #[test]
    fn degenerate_triangle_uses_edges() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [2.0, 0.0, 0.0];
        assert!(approx(distance_to_triangle([1.5, 1.0, 0.0], a, b, c), 1.0));
    }
}
