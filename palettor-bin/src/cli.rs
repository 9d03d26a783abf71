//! Specifies the CLI and handles arg parsing

use clap::{Parser, ValueEnum};
use palettor::DistanceMetric;
use std::path::PathBuf;

/// Supported output formats for the final colors
#[derive(Copy, Clone, ValueEnum)]
pub enum FormatOutput {
	/// sRGB hexcode
	Hex,
	/// sRGB (r,g,b) triple
	Rgb,
	/// Whitespace with true color background
	Swatch,
}

/// Ways to colorize the output text
#[derive(Copy, Clone, ValueEnum)]
pub enum ColorizeOutput {
	/// Foreground
	Fg,
	/// Background
	Bg,
}

/// Color difference functions used for clustering
#[derive(Copy, Clone, ValueEnum)]
pub enum MetricOption {
	/// Plain euclidean distance over hue, chroma, and luminance
	Euclidean,
	/// Euclidean distance with hue differences measured around the color wheel
	CircularHue,
}

impl From<MetricOption> for DistanceMetric {
	fn from(metric: MetricOption) -> Self {
		match metric {
			MetricOption::Euclidean => DistanceMetric::Euclidean,
			MetricOption::CircularHue => DistanceMetric::CircularHue,
		}
	}
}

/// Extract a weighted color palette from an image by performing k-means clustering
/// in a hue-chroma-luminance color space.
///
/// Colors are printed in order of ascending weight, i.e. the fraction of the image each color represents.
#[derive(Parser)]
#[command(version)]
pub struct Options {
	/// The path to the input image
	pub image: PathBuf,

	/// The format to print the colors in
	#[arg(short, long, default_value = "hex")]
	pub output: FormatOutput,

	/// Color the foreground or background for each printed color
	#[arg(short, long)]
	pub colorize: Option<ColorizeOutput>,

	/// Print the colors in order of descending weight
	#[arg(short, long)]
	pub reverse: bool,

	/// The (maximum) number of colors to find
	///
	/// The palette may have fewer colors if the image does not have enough distinct colors.
	#[arg(short, default_value_t = 5)]
	pub k: usize,

	/// The maximum number of k-means iterations
	///
	/// You can use the --verbose option to see how many iterations were run
	/// and whether k-means converged before reaching this limit.
	#[arg(short = 'i', long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
	pub max_iterations: u32,

	/// The color difference function to use
	#[arg(short, long, default_value = "euclidean")]
	pub metric: MetricOption,

	/// The maximum image size, in number of pixels, before a thumbnail is created
	///
	/// Every pixel is a data point for k-means, so large images can take a while.
	/// A value of 0 disables thumbnails.
	#[arg(short = 'p', long, default_value_t = 65536)]
	pub max_pixels: u32,

	/// The seed value used for the random number generator
	///
	/// A random seed is used if none is provided.
	#[arg(long)]
	pub seed: Option<u64>,

	/// Print additional information, such as the number of k-means iterations
	#[arg(long)]
	pub verbose: bool,
}

impl Options {
	/// The library options corresponding to these arguments
	pub fn extraction(&self) -> palettor::Options {
		let options = palettor::Options::new(self.k, self.max_iterations).with_metric(self.metric.into());
		match self.seed {
			Some(seed) => options.with_seed(seed),
			None => options,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn verify_cli() {
		Options::command().debug_assert();
	}

	#[test]
	fn defaults() {
		let options = Options::parse_from(["palettor", "image.png"]);
		let extraction = options.extraction();

		assert_eq!(extraction.k, 5);
		assert_eq!(extraction.max_iterations, 100);
		assert_eq!(extraction.metric, DistanceMetric::Euclidean);
		assert_eq!(extraction.seed, None);
	}

	#[test]
	fn extraction_options() {
		let options = Options::parse_from([
			"palettor",
			"image.png",
			"-k",
			"8",
			"--max-iterations",
			"20",
			"--metric",
			"circular-hue",
			"--seed",
			"3",
		]);

		assert_eq!(
			options.extraction(),
			palettor::Options::new(8, 20).with_metric(DistanceMetric::CircularHue).with_seed(3)
		);
	}

	#[test]
	fn zero_iterations_rejected() {
		assert!(Options::try_parse_from(["palettor", "image.png", "-i", "0"]).is_err());
	}
}
