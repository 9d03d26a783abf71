//! Extract a weighted color palette by performing k-means clustering in a hue-chroma-luminance color space.
//!
//! # Examples
//!
//! ## Read an image file and get 5 colors.
//!
//! ```no_run
//! let image = image::open("some image").unwrap();
//! let colors = palettor::colors_from_image(&image);
//! let palette = palettor::extract_palette(5, 100, &colors).unwrap();
//!
//! for entry in palette.entries() {
//!     println!("{:?} {:.1}%", entry.color, entry.weight * 100.0);
//! }
//! ```
//!
//! ## Reproducible results with a different distance metric.
//!
//! ```
//! use palette::{Srgb, Srgba};
//! use palettor::{DistanceMetric, Options};
//!
//! let colors = [Srgba::new(0, 0, 0, 255), Srgba::new(255, 255, 255, 255)];
//! let result = Options::new(2, 100)
//!     .with_metric(DistanceMetric::CircularHue)
//!     .with_seed(42)
//!     .extract(&colors)
//!     .unwrap();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.weight(Srgb::new(0, 0, 0)), 0.5);
//! ```
//!
//! # Arguments
//!
//! ## K
//!
//! This is the (maximum) number of colors to find.
//!
//! There must be at least `k` input colors.
//! If the input has fewer than `k` distinct colors,
//! then some clusters will collapse into one and the palette will have fewer than `k` colors.
//!
//! ## Max Iterations
//!
//! This is the maximum number of k-means iterations to run.
//!
//! k-means stops early once the centroids no longer change.
//! If it does not, the palette is still returned but [`Palette::converged`] will be `false`.
//! In that case, a higher iteration cap or a different seed may give a better palette.
//!
//! ## Metric
//!
//! The [`DistanceMetric`] used to compare colors.
//! The default, [`DistanceMetric::Euclidean`], treats hue as a plain number,
//! while [`DistanceMetric::CircularHue`] measures hue differences around the color wheel.
//!
//! ## Seed
//!
//! This is the value used to seed the random number generator which is used to choose the initial centroids.
//! Without a seed, the generator is seeded from the operating system.
//! Any other [`rand::Rng`] can be supplied through [`Options::extract_with_rng`].

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unreadable_literal)]

use palette::Srgba;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;
use std::collections::HashMap;
use tracing::debug;

mod difference;
mod error;
mod hcl;
mod kmeans;
mod output;
#[cfg(feature = "image")]
mod sample;

pub use difference::{CircularHueDistance, ColorDifference, DistanceMetric, EuclideanDistance};
pub use error::Error;
pub use hcl::Hcl;
pub use output::{Entry, Palette};
#[cfg(feature = "image")]
pub use sample::colors_from_image;

/// Parameters for palette extraction
///
/// See the crate documentation for information on each parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// The maximum number of palette colors
	pub k: usize,
	/// The maximum number of k-means iterations
	pub max_iterations: u32,
	/// The color difference function used during clustering
	pub metric: DistanceMetric,
	/// Seed for choosing the initial centroids, or `None` to seed from the operating system
	pub seed: Option<u64>,
}

impl Options {
	/// Create options with the default metric and no seed
	#[must_use]
	pub fn new(k: usize, max_iterations: u32) -> Self {
		Self {
			k,
			max_iterations,
			metric: DistanceMetric::default(),
			seed: None,
		}
	}

	/// Change the color difference function
	#[must_use]
	pub fn with_metric(self, metric: DistanceMetric) -> Self {
		Self { metric, ..self }
	}

	/// Use a fixed seed for reproducible results
	#[must_use]
	pub fn with_seed(self, seed: u64) -> Self {
		Self { seed: Some(seed), ..self }
	}

	/// Extract a palette from the given colors.
	///
	/// # Errors
	/// Returns [`Error::InsufficientColors`] if `k` or `max_iterations` is zero or if there are fewer than `k` colors.
	/// Returns [`Error::DegenerateColor`] if any color has an alpha of zero.
	pub fn extract(&self, colors: &[Srgba<u8>]) -> Result<Palette, Error> {
		let mut rng = match self.seed {
			Some(seed) => Xoroshiro128PlusPlus::seed_from_u64(seed),
			None => Xoroshiro128PlusPlus::from_entropy(),
		};

		self.extract_with_rng(colors, &mut rng)
	}

	/// Extract a palette from the given colors, choosing the initial centroids using `rng`.
	///
	/// The seed in these options is ignored.
	///
	/// # Errors
	/// See [`Options::extract`].
	pub fn extract_with_rng(&self, colors: &[Srgba<u8>], rng: &mut impl Rng) -> Result<Palette, Error> {
		let Self { k, max_iterations, metric, .. } = *self;

		if k == 0 || max_iterations == 0 || colors.len() < k {
			return Err(Error::InsufficientColors { colors: colors.len(), k, max_iterations });
		}

		let points = perceptual_points(colors)?;

		debug!(colors = colors.len(), k, max_iterations, ?metric, "extracting palette");

		let result = match metric {
			DistanceMetric::Euclidean => kmeans::run::<EuclideanDistance>(&points, k, max_iterations, rng),
			DistanceMetric::CircularHue => kmeans::run::<CircularHueDistance>(&points, k, max_iterations, rng),
		};

		Ok(Palette::from_kmeans(result))
	}
}

/// Extract a palette of at most `k` colors from the given colors.
///
/// Uses the default [`DistanceMetric`] and a random seed.
/// See the crate documentation for information on each argument.
///
/// # Errors
/// See [`Options::extract`].
pub fn extract_palette(k: usize, max_iterations: u32, colors: &[Srgba<u8>]) -> Result<Palette, Error> {
	Options::new(k, max_iterations).extract(colors)
}

/// Converts each color to a perceptual point, failing on the first fully transparent color.
fn perceptual_points(colors: &[Srgba<u8>]) -> Result<Vec<Hcl>, Error> {
	// Converting to Hcl is expensive and images often repeat colors.

	// Packed Srgb -> converted point
	let mut memo: HashMap<u32, Hcl> = HashMap::new();

	colors
		.iter()
		.enumerate()
		.map(|(index, &color)| {
			let key = color.color.into_u32::<palette::rgb::channels::Rgba>();
			if let Some(point) = memo.get(&key).copied().filter(|_| color.alpha != 0) {
				return Ok(point);
			}

			let point = Hcl::from_color(color).map_err(|e| e.at_index(index))?;
			memo.insert(key, point);
			Ok(point)
		})
		.collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use palette::Srgb;

	fn srgba(r: u8, g: u8, b: u8) -> Srgba<u8> {
		Srgba::new(r, g, b, u8::MAX)
	}

	#[test]
	fn rejects_bad_parameters() {
		let colors = [srgba(0, 0, 0), srgba(255, 255, 255), srgba(255, 0, 0)];

		for (k, max_iterations) in [(0, 10), (2, 0), (4, 10)] {
			assert_eq!(
				Options::new(k, max_iterations).with_seed(0).extract(&colors),
				Err(Error::InsufficientColors { colors: 3, k, max_iterations })
			);
		}
	}

	#[test]
	fn transparent_color_reports_index() {
		let colors = [srgba(0, 0, 0), srgba(0, 0, 0), Srgba::new(0, 0, 0, 0), srgba(9, 9, 9)];

		assert_eq!(
			Options::new(2, 10).with_seed(0).extract(&colors),
			Err(Error::DegenerateColor { index: 2, red: 0, green: 0, blue: 0 })
		);
	}

	#[test]
	fn memoized_points_match_direct_conversion() {
		let colors = [srgba(10, 20, 30), srgba(200, 100, 0), srgba(10, 20, 30), Srgba::new(200, 100, 0, 7)];
		let points = perceptual_points(&colors).unwrap();

		for (&color, point) in colors.iter().zip(points) {
			assert_eq!(point, Hcl::from(color.color));
		}
	}

	#[test]
	fn options_builders() {
		let options = Options::new(3, 20).with_metric(DistanceMetric::CircularHue).with_seed(5);
		assert_eq!(
			options,
			Options {
				k: 3,
				max_iterations: 20,
				metric: DistanceMetric::CircularHue,
				seed: Some(5),
			}
		);
	}

	#[test]
	fn seeded_extraction_is_reproducible() {
		let colors = (0..=u8::MAX)
			.step_by(3)
			.map(|v| srgba(v, v.wrapping_mul(7), u8::MAX - v))
			.collect::<Vec<_>>();

		let options = Options::new(6, 50).with_seed(123);
		assert_eq!(options.extract(&colors), options.extract(&colors));
	}

	#[test]
	#[allow(clippy::float_cmp)]
	fn black_and_white_split_evenly() {
		let palette = extract_palette(2, 100, &[srgba(0, 0, 0), srgba(255, 255, 255)]).unwrap();

		assert_eq!(palette.len(), 2);
		assert_eq!(palette.weight(Srgb::new(0, 0, 0)), 0.5);
		assert_eq!(palette.weight(Srgb::new(255, 255, 255)), 0.5);
		assert!(palette.converged());
	}
}
