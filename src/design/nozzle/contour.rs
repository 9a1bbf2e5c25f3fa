//! Bore contour of the nozzle in the (z, r) half-plane.

use crate::error::{GeometryError, Result};
use crate::math::lerp;
use crate::math::profile::AxialProfile;

use super::NozzleParams;

/// Fractions of the divergent span where intermediate contour points sit.
const DIVERGENT_STATIONS: [f64; 2] = [0.35, 0.7];

/// Five bore points from inlet to exit.
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleContour {
    points: [(f64, f64); 5],
    length: f64,
}

impl NozzleContour {
    /// Index of the throat point.
    pub const THROAT: usize = 1;

    /// Lays out the contour.
    ///
    /// The throat sits where the convergent and divergent lengths implied
    /// by the two half-angles split the nozzle length.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive throat radius or length, an exit
    /// not wider than the throat, or half-angles outside (0, 90).
    pub fn new(params: &NozzleParams) -> std::result::Result<Self, GeometryError> {
        let r_t = params.throat_radius();
        let r_e = params.exit_radius();
        let length = params.nozzle_length;
        check_range("throat radius", r_t, 0.0, f64::INFINITY)?;
        check_range("exit radius", r_e, r_t, f64::INFINITY)?;
        check_range("nozzle length", length, 0.0, f64::INFINITY)?;
        check_range("convergent angle", params.convergent_angle, 0.0, 90.0)?;
        check_range("divergent angle", params.divergent_angle, 0.0, 90.0)?;

        let conv = r_t / params.convergent_angle.to_radians().tan();
        let div = (r_e - r_t) / params.divergent_angle.to_radians().tan();
        let z_t = length * conv / (conv + div);
        let [a, b] = DIVERGENT_STATIONS;
        Ok(Self {
            points: [
                (0.0, r_e),
                (z_t, r_t),
                (lerp(z_t, length, a), lerp(r_t, r_e, a)),
                (lerp(z_t, length, b), lerp(r_t, r_e, b)),
                (length, r_e),
            ],
            length,
        })
    }

    /// Contour points as `(z, r)`.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64); 5] {
        &self.points
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn throat(&self) -> (f64, f64) {
        self.points[Self::THROAT]
    }

    /// Bore radius along the axis, linear between contour points.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour points do not advance along z.
    pub fn bore_profile(&self) -> Result<AxialProfile> {
        let breakpoints: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|(z, r)| (z / self.length, *r))
            .collect();
        AxialProfile::through_points(self.length, &breakpoints)
    }

    /// Largest bore radius over `[z0, z1]`.
    #[must_use]
    pub fn max_bore(&self, z0: f64, z1: f64) -> f64 {
        let at = |z: f64| {
            let z = z.clamp(0.0, self.length);
            self.points
                .windows(2)
                .find(|w| z <= w[1].0)
                .map_or(self.points[4].1, |w| {
                    let span = w[1].0 - w[0].0;
                    let t = if span > 0.0 { (z - w[0].0) / span } else { 1.0 };
                    lerp(w[0].1, w[1].1, t)
                })
        };
        self.points
            .iter()
            .filter(|(z, _)| *z > z0 && *z < z1)
            .map(|(_, r)| *r)
            .fold(at(z0).max(at(z1)), f64::max)
    }

    /// Consecutive contour segments as `(start, end)` point pairs.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Whether segment `index` starts or ends at the throat.
    #[must_use]
    pub fn touches_throat(index: usize) -> bool {
        index + 1 == Self::THROAT || index == Self::THROAT
    }
}

fn check_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<(), GeometryError> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_contour_layout() {
        let contour = NozzleContour::new(&NozzleParams::default()).unwrap();
        let conv = 25.0;
        let div = 50.0 / 15.0_f64.to_radians().tan();
        let z_t = 200.0 * conv / (conv + div);
        let (z, r) = contour.throat();
        assert_relative_eq!(z, z_t, epsilon = 1e-9);
        assert_eq!(r, 25.0);
        assert_eq!(contour.points()[0], (0.0, 75.0));
        assert_eq!(contour.points()[4], (200.0, 75.0));
        assert_relative_eq!(contour.points()[2].1, 42.5, epsilon = 1e-12);
    }

    #[test]
    fn bore_profile_passes_through_points() {
        let contour = NozzleContour::new(&NozzleParams::default()).unwrap();
        let bore = contour.bore_profile().unwrap();
        for (z, r) in contour.points() {
            assert_relative_eq!(bore.at(*z), *r, epsilon = 1e-9);
        }
        assert_eq!(bore.at(-10.0), 75.0);
        assert_eq!(bore.at(210.0), 75.0);
    }

    #[test]
    fn max_bore_includes_interior_points() {
        let contour = NozzleContour::new(&NozzleParams::default()).unwrap();
        let (z_t, r_t) = contour.throat();
        assert_eq!(contour.max_bore(-5.0, 0.0), 75.0);
        assert_eq!(contour.max_bore(0.0, 200.0), 75.0);
        assert!(contour.max_bore(z_t - 1.0, z_t + 1.0) > r_t);
    }

    #[test]
    fn throat_segments() {
        assert!(NozzleContour::touches_throat(0));
        assert!(NozzleContour::touches_throat(1));
        assert!(!NozzleContour::touches_throat(2));
        assert!(!NozzleContour::touches_throat(3));
    }

    #[test]
    fn zero_throat_is_rejected() {
        let params = NozzleParams {
            throat_diameter: 0.0,
            ..NozzleParams::default()
        };
        let err = NozzleContour::new(&params).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::ParameterOutOfRange { parameter: "throat radius", .. }
        ));
    }

    #[test]
    fn right_angle_is_rejected() {
        let params = NozzleParams {
            divergent_angle: 90.0,
            ..NozzleParams::default()
        };
        assert!(NozzleContour::new(&params).is_err());
    }
}
