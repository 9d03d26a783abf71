//! Conversion between Srgb colors and the hue-chroma-luminance points used for clustering

use crate::Error;
use palette::{Clamp, FromColor, LinSrgb, Oklab, Srgb, Srgba};

/// Colors with a chroma below this are treated as grays and given a hue of `0.0`
///
/// Without this, rounding noise in near-gray colors would produce an arbitrary hue,
/// which then dominates the euclidean distance to other grays.
const GRAY_CHROMA: f32 = 1e-4;

/// A color in the cylindrical form of the Oklab color space
///
/// The fields are only reachable through [`Hcl::new`] and the getters,
/// so the hue is always kept in the range `0.0..360.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
	/// Hue in degrees, in the range `0.0..360.0`
	pub(crate) h: f32,
	/// Chroma, `0.0` for grays
	pub(crate) c: f32,
	/// Luminance, in the range `0.0..=1.0` for colors converted from Srgb
	pub(crate) l: f32,
}

impl Hcl {
	/// Create a new point, wrapping the hue into `0.0..360.0`
	#[must_use]
	pub fn new(h: f32, c: f32, l: f32) -> Self {
		Self { h: normalize_degrees(h), c, l }
	}

	/// Hue in degrees, in the range `0.0..360.0`
	#[must_use]
	pub fn hue(self) -> f32 {
		self.h
	}

	/// Chroma, `0.0` for grays
	#[must_use]
	pub fn chroma(self) -> f32 {
		self.c
	}

	/// Luminance, in the range `0.0..=1.0` for colors converted from Srgb
	#[must_use]
	pub fn luminance(self) -> f32 {
		self.l
	}

	/// Convert an Srgb color into a perceptual point.
	///
	/// The alpha channel does not affect the result, but a fully transparent color
	/// has no meaningful color to speak of and is rejected.
	///
	/// # Errors
	/// Returns [`Error::DegenerateColor`] if the alpha channel is zero.
	pub fn from_color(color: Srgba<u8>) -> Result<Self, Error> {
		if color.alpha == 0 {
			return Err(Error::DegenerateColor {
				index: 0,
				red: color.red,
				green: color.green,
				blue: color.blue,
			});
		}

		Ok(Self::from(color.color))
	}

	/// Convert back into an Srgb color, clamping colors outside the Srgb gamut.
	#[must_use]
	pub fn to_color(self) -> Srgb<u8> {
		let (sin, cos) = self.h.to_radians().sin_cos();
		let oklab = Oklab::new(self.l, self.c * cos, self.c * sin);
		LinSrgb::from_color(oklab).clamp().into_encoding()
	}
}

impl From<Srgb<u8>> for Hcl {
	fn from(color: Srgb<u8>) -> Self {
		let linear: LinSrgb = color.into_linear();
		let Oklab { l, a, b } = Oklab::from_color(linear);

		let c = (a * a + b * b).sqrt();
		let h = if c < GRAY_CHROMA { 0.0 } else { b.atan2(a).to_degrees() };

		Self::new(h, c, l)
	}
}

/// Wrap an angle in degrees into `0.0..360.0`
pub(crate) fn normalize_degrees(degrees: f32) -> f32 {
	let wrapped = degrees.rem_euclid(360.0);
	// tiny negative angles can round up to exactly 360.0
	if wrapped >= 360.0 {
		0.0
	} else {
		wrapped
	}
}
