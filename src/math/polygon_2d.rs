use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Signed distance from `p` to a simple closed polygon, negative inside.
///
/// Works for either winding. Zero-length edges are tolerated.
#[must_use]
pub fn signed_distance_2d(points: &[Point2], p: &Point2) -> f64 {
    let n = points.len();
    if n == 0 {
        return f64::INFINITY;
    }
    let mut d2 = (p - points[0]).norm_squared();
    let mut sign = 1.0;
    let mut j = n - 1;
    for i in 0..n {
        let vi = points[i];
        let vj = points[j];
        let e: Vector2 = vj - vi;
        let w: Vector2 = p - vi;
        let ee = e.norm_squared();
        let b = if ee < TOLERANCE {
            w
        } else {
            w - e * (w.dot(&e) / ee).clamp(0.0, 1.0)
        };
        d2 = d2.min(b.norm_squared());

        // Crossing-number parity for the inside test.
        let c0 = p.y >= vi.y;
        let c1 = p.y < vj.y;
        let c2 = e.x * w.y > e.y * w.x;
        if (c0 && c1 && c2) || (!c0 && !c1 && !c2) {
            sign = -sign;
        }
        j = i;
    }
    sign * d2.sqrt()
}

/// Volume swept by revolving a closed (ρ, z) polygon one full turn about the
/// z axis (Pappus). Points must satisfy ρ ≥ 0.
#[must_use]
pub fn revolved_volume(profile: &[Point2]) -> f64 {
    let n = profile.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = profile[i];
        let b = profile[(i + 1) % n];
        sum += (a.x * b.y - b.x * a.y) * (a.x + b.x);
    }
    (std::f64::consts::PI / 3.0 * sum).abs()
}

/// Lengths of the closed polygon's edges, skipping zero-length ones.
#[must_use]
pub fn edge_lengths(points: &[Point2]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| (points[(i + 1) % n] - points[i]).norm())
        .filter(|len| *len > TOLERANCE)
        .collect()
}

/// Axis-aligned bounds of the polygon as `(min, max)`.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> (Point2, Point2) {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for pt in points {
        min.x = min.x.min(pt.x);
        min.y = min.y.min(pt.y);
        max.x = max.x.max(pt.x);
        max.y = max.y.max(pt.y);
    }
    (min, max)
}
