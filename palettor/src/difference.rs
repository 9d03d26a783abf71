//! Color difference functions used to compare [`Hcl`] points

use crate::Hcl;

/// Color difference/distance between two perceptual points
///
/// Implementations must be symmetric, non-negative,
/// and return `0.0` only when both points are identical.
pub trait ColorDifference {
	/// Squared color difference
	fn squared_distance(x: Hcl, y: Hcl) -> f32;
}

/// Regular Euclidean Distance over the hue, chroma, and luminance components
///
/// Hue is treated as a plain number here, so hues of `1.0` and `359.0` are far apart.
/// Within a converged cluster hues tend to be close together,
/// so this is usually good enough and is the default.
pub struct EuclideanDistance;

impl ColorDifference for EuclideanDistance {
	fn squared_distance(x: Hcl, y: Hcl) -> f32 {
		let dh = x.h - y.h;
		let dc = x.c - y.c;
		let dl = x.l - y.l;
		dh * dh + dc * dc + dl * dl
	}
}

/// Euclidean Distance where the hue difference is taken around the color wheel
///
/// The hue difference is the shorter of the two arcs between the hues, so it is at most `180.0`.
pub struct CircularHueDistance;

impl ColorDifference for CircularHueDistance {
	fn squared_distance(x: Hcl, y: Hcl) -> f32 {
		let dh = (x.h - y.h).abs();
		let dh = f32::min(dh, 360.0 - dh);
		let dc = x.c - y.c;
		let dl = x.l - y.l;
		dh * dh + dc * dc + dl * dl
	}
}

/// The color difference function to use during clustering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
	/// See [`EuclideanDistance`]
	#[default]
	Euclidean,
	/// See [`CircularHueDistance`]
	CircularHue,
}

impl DistanceMetric {
	/// Squared color difference using this metric
	#[must_use]
	pub fn squared_distance(self, x: Hcl, y: Hcl) -> f32 {
		match self {
			Self::Euclidean => EuclideanDistance::squared_distance(x, y),
			Self::CircularHue => CircularHueDistance::squared_distance(x, y),
		}
	}
}
