//! Luma/chroma weighted colour distance.
//!
//! Colours are compared in YUV rather than RGB: the eye is far more
//! sensitive to brightness than to hue, and U/V are scaled down relative
//! to Y.

use crate::color::{Color, LUMA_BLUE, LUMA_GREEN, LUMA_RED};

const U_SCALE: f64 = 0.492;
const V_SCALE: f64 = 0.877;

fn yuv(c: Color) -> (f64, f64, f64) {
    let r = f64::from(c.r);
    let g = f64::from(c.g);
    let b = f64::from(c.b);
    let y = LUMA_RED * r + LUMA_GREEN * g + LUMA_BLUE * b;
    (y, U_SCALE * (b - y), V_SCALE * (r - y))
}

/// Squared YUV distance between two colours. Alpha is ignored.
#[must_use]
pub fn distance(a: Color, b: Color) -> f64 {
    let (y1, u1, v1) = yuv(a);
    let (y2, u2, v2) = yuv(b);
    let dy = y1 - y2;
    let du = u1 - u2;
    let dv = v1 - v2;
    dy * dy + du * du + dv * dv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_colours_have_zero_distance() {
        let c = Color::rgb(12, 200, 99);
        assert!(distance(c, c).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Color::rgb(255, 0, 0);
        let b = Color::rgb(0, 0, 255);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn black_to_white_is_pure_luma() {
        // Greys have U = V = 0, so only dY contributes.
        let d = distance(Color::BLACK, Color::WHITE);
        assert!((d - 255.0 * 255.0).abs() < 1e-6);
    }

    #[test]
    fn weighting_differs_from_euclidean_rgb() {
        // Equal RGB steps in green and blue are not equally distant.
        let base = Color::rgb(0, 0, 0);
        let green = Color::rgb(0, 64, 0);
        let blue = Color::rgb(0, 0, 64);
        assert!(distance(base, green) > distance(base, blue));
    }

    #[test]
    fn alpha_does_not_contribute() {
        let a = Color::rgba(1, 2, 3, 0);
        let b = Color::rgba(1, 2, 3, 255);
        assert!(distance(a, b).abs() < f64::EPSILON);
    }
}
