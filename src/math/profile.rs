//! Piecewise-linear scalar profiles along a normalized axis.

use serde::{Deserialize, Serialize};

use super::lerp;
use crate::error::{GeometryError, Result};

/// One linear piece of an [`AxialProfile`], covering `[previous end, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Normalized position where this span ends.
    pub end: f64,
    /// Value at the start of the span.
    pub from: f64,
    /// Value at the end of the span.
    pub to: f64,
}

impl Span {
    /// Creates a span ending at normalized position `end`.
    #[must_use]
    pub fn new(end: f64, from: f64, to: f64) -> Self {
        Self { end, from, to }
    }
}

/// A scalar quantity interpolated along an axis of length `length`.
///
/// Positions are normalized to `t = x / length` and clamped to `[0, 1]`.
/// Adjacent spans need not agree at their shared breakpoint, so step
/// changes (e.g. wall thickness across the throat) are representable.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialProfile {
    length: f64,
    spans: Vec<Span>,
}

impl AxialProfile {
    /// Builds a profile from spans ordered by their end position.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is not positive, no spans are given,
    /// span ends are not strictly increasing in `(0, 1]`, or the last span
    /// does not end at 1.
    pub fn from_spans(length: f64, spans: Vec<Span>) -> Result<Self> {
        if !(length > 0.0 && length.is_finite()) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "profile length",
                value: length,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        let Some(last) = spans.last() else {
            return Err(GeometryError::Degenerate("profile has no spans".into()).into());
        };
        if (last.end - 1.0).abs() > f64::EPSILON {
            return Err(GeometryError::Degenerate("last profile span must end at 1".into()).into());
        }
        let mut start = 0.0;
        for span in &spans {
            if span.end <= start {
                return Err(GeometryError::Degenerate(format!(
                    "profile span ending at {} does not advance past {start}",
                    span.end
                ))
                .into());
            }
            start = span.end;
        }
        Ok(Self { length, spans })
    }

    /// Builds a continuous profile through `(t, value)` breakpoints.
    ///
    /// The first breakpoint must sit at `t = 0` and the last at `t = 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two breakpoints are given or their
    /// positions are not strictly increasing from 0 to 1.
    pub fn through_points(length: f64, points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 || points[0].0.abs() > f64::EPSILON {
            return Err(GeometryError::Degenerate(
                "profile needs at least two breakpoints starting at t = 0".into(),
            )
            .into());
        }
        let spans = points
            .windows(2)
            .map(|w| Span::new(w[1].0, w[0].1, w[1].1))
            .collect();
        Self::from_spans(length, spans)
    }

    /// Axis length the profile is normalized against.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Value at the start of the axis (`t = 0`).
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.spans.first().map_or(0.0, |s| s.from)
    }

    /// Value at the end of the axis (`t = 1`).
    #[must_use]
    pub fn end_value(&self) -> f64 {
        self.spans.last().map_or(0.0, |s| s.to)
    }

    /// Evaluates the profile at axial position `x`.
    ///
    /// NaN positions evaluate as the axis start.
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        let t = if x.is_nan() {
            0.0
        } else {
            (x / self.length).clamp(0.0, 1.0)
        };
        self.at_normalized(t)
    }

    /// Evaluates the profile at normalized position `t` (already in `[0, 1]`).
    #[must_use]
    pub fn at_normalized(&self, t: f64) -> f64 {
        let mut start = 0.0;
        for span in &self.spans {
            if t < span.end {
                return lerp(span.from, span.to, (t - start) / (span.end - start));
            }
            start = span.end;
        }
        self.end_value()
    }

    /// Integrates `1 / value` over the axis with Simpson's rule.
    ///
    /// Used for counting helix turns from a pitch profile.
    #[must_use]
    pub fn integrate_reciprocal(&self, samples: usize) -> f64 {
        let n = (samples.max(2) + 1) & !1;
        #[allow(clippy::cast_precision_loss)]
        let h = self.length / n as f64;
        let mut sum = 0.0;
        for i in 0..=n {
            #[allow(clippy::cast_precision_loss)]
            let value = self.at(i as f64 * h);
            let weight = if i == 0 || i == n {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            sum += weight / value;
        }
        sum * h / 3.0
    }
}
