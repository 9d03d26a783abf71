//! Extract a weighted color palette from an image by performing k-means clustering
//! in a hue-chroma-luminance color space.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
	clippy::pedantic,
	clippy::cargo,
	clippy::use_debug,
	clippy::dbg_macro,
	clippy::todo,
	clippy::unimplemented,
	clippy::unwrap_used,
	clippy::unwrap_in_result,
	clippy::unneeded_field_pattern,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::unnecessary_self_imports,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::string_slice,
	missing_docs,
	clippy::missing_docs_in_private_items,
	rustdoc::all,
	clippy::float_cmp_const,
	clippy::lossy_float_literal
)]
#![allow(clippy::doc_markdown, clippy::module_name_repetitions, clippy::missing_panics_doc)]

mod cli;

#[allow(clippy::wildcard_imports)]
use cli::*;

use std::{
	fmt::{self, Display},
	path::Path,
	process::ExitCode,
	time::Instant,
};

use clap::Parser;
use colored::Colorize;
use image::{DynamicImage, GenericImageView};
use palette::{Srgb, Srgba};
use palettor::{Entry, Palette};
use tracing::{info, warn, Level};

/// Record the running time of a function and log the elapsed time
macro_rules! time {
	($name: literal, $func_call: expr) => {{
		let start = Instant::now();
		let result = $func_call;
		info!("{} took {}ms", $name, start.elapsed().as_millis());
		result
	}};
}

/// Error cases for generating a palette from an image file
#[derive(Debug)]
enum AppError {
	/// Failed to read or decode the image file
	ImageLoad(image::ImageError),
	/// The image colors could not be clustered
	Palette(palettor::Error),
}

impl Display for AppError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			AppError::ImageLoad(e) => write!(f, "Failed to load the image file: {e}"),
			AppError::Palette(e) => write!(f, "Failed to generate a palette: {e}"),
		}
	}
}

impl From<palettor::Error> for AppError {
	fn from(e: palettor::Error) -> Self {
		AppError::Palette(e)
	}
}

fn main() -> ExitCode {
	let options = Options::parse();

	init_logging(options.verbose);

	// Returning Result<_> uses Debug printing instead of Display
	if let Err(e) = generate_and_print_palette(&options) {
		eprintln!("{e}");
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

/// Log to stderr, including timings and k-means progress if `verbose`
fn init_logging(verbose: bool) {
	tracing_subscriber::fmt()
		.with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

/// Load an image, generate its palette, and print the result using the given options
fn generate_and_print_palette(options: &Options) -> Result<(), AppError> {
	// Input
	let img = time!("Image loading", load_image(&options.image))?;
	let img = generate_thumbnail(img, options.max_pixels);
	let colors = time!("Sampling", opaque_colors(&img));

	// Processing
	let palette = time!("Palette extraction", options.extraction().extract(&colors))?;

	info!(
		colors = palette.len(),
		iterations = palette.iterations(),
		converged = palette.converged(),
		"generated palette"
	);

	if !palette.converged() {
		warn!(
			"k-means stopped after {} iterations without converging, consider a higher --max-iterations",
			palette.iterations()
		);
	}

	// Output
	for line in palette_lines(&palette, options) {
		println!("{line}");
	}

	Ok(())
}

/// Load the image at the given path
fn load_image(path: &Path) -> Result<DynamicImage, AppError> {
	image::open(path).map_err(AppError::ImageLoad)
}

/// Create a thumbnail with at most `max_pixels` pixels if the image has more than `max_pixels` pixels
///
/// A `max_pixels` of `0` leaves the image as is.
fn generate_thumbnail(image: DynamicImage, max_pixels: u32) -> DynamicImage {
	// The number of pixels should be < u64::MAX, since image dimensions are (u32, u32)
	let (width, height) = image.dimensions();
	let pixels = u64::from(width) * u64::from(height);
	if max_pixels == 0 || pixels <= u64::from(max_pixels) {
		info!("Skipping image thumbnail since pixels was below max pixels");

		image
	} else {
		// (u64 as f64) only gives innaccurate results for very large u64
		// I.e, only when pixels is in the order of quintillions
		#[allow(clippy::cast_precision_loss)]
		let scale = (f64::from(max_pixels) / pixels as f64).sqrt();

		// multiplying by a positive factor < 1
		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		let (thumb_width, thumb_height) = (
			(f64::from(width) * scale) as u32,
			(f64::from(height) * scale) as u32,
		);

		info!("Creating a thumbnail with dimensions {thumb_width}x{thumb_height}");

		time!("Image thumbnail", image.thumbnail(thumb_width, thumb_height))
	}
}

/// Returns the image colors, skipping fully transparent pixels
fn opaque_colors(image: &DynamicImage) -> Vec<Srgba<u8>> {
	let mut colors = palettor::colors_from_image(image);
	let total = colors.len();
	colors.retain(|color| color.alpha != 0);

	if colors.len() < total {
		info!("Skipped {} fully transparent pixels", total - colors.len());
	}

	colors
}

/// Format each palette entry as a line of text based off the provided options
fn palette_lines(palette: &Palette, options: &Options) -> Vec<String> {
	let mut entries = palette.entries().to_vec();
	if options.reverse {
		entries.reverse();
	}

	entries
		.into_iter()
		.map(|Entry { color, weight }| format!("{} {:.2}%", format_color(color, options), weight * 100.0))
		.collect()
}

/// Format and colorize a color
fn format_color(color: Srgb<u8>, options: &Options) -> String {
	let text = match options.output {
		FormatOutput::Hex => format!("{color:X}"),
		FormatOutput::Rgb => format!("({},{},{})", color.red, color.green, color.blue),
		FormatOutput::Swatch => {
			return "   "
				.on_truecolor(color.red, color.green, color.blue)
				.to_string()
		},
	};

	match options.colorize {
		Some(ColorizeOutput::Fg) => text
			.truecolor(color.red, color.green, color.blue)
			.to_string(),
		Some(ColorizeOutput::Bg) => text
			.on_truecolor(color.red, color.green, color.blue)
			.to_string(),
		None => text,
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use image::{Rgba, RgbaImage};

	fn test_image(width: u32, height: u32) -> DynamicImage {
		#[allow(clippy::cast_possible_truncation)]
		let image = RgbaImage::from_fn(width, height, |x, y| {
			Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, u8::MAX])
		});
		DynamicImage::ImageRgba8(image)
	}

	fn options(args: &[&str]) -> Options {
		Options::parse_from(["palettor", "image.png"].iter().chain(args).copied())
	}

	#[test]
	fn thumbnail_has_at_most_max_pixels() {
		let img = test_image(400, 300);

		for max_pixels in [10_000, 12_345, 50_000, 119_999] {
			let thumb = generate_thumbnail(img.clone(), max_pixels);
			let pixels = thumb.width() * thumb.height();
			assert!(pixels <= max_pixels, "{pixels} > {max_pixels}");
		}
	}

	#[test]
	fn no_thumbnail_when_small_or_disabled() {
		let img = test_image(40, 30);
		assert_eq!(generate_thumbnail(img.clone(), 1200).dimensions(), (40, 30));
		assert_eq!(generate_thumbnail(img, 0).dimensions(), (40, 30));
	}

	#[test]
	fn transparent_pixels_are_skipped() {
		let image = RgbaImage::from_fn(4, 1, |x, _| Rgba([9, 9, 9, if x % 2 == 0 { 0 } else { 200 }]));
		let colors = opaque_colors(&DynamicImage::ImageRgba8(image));
		assert_eq!(colors, [Srgba::new(9, 9, 9, 200), Srgba::new(9, 9, 9, 200)]);
	}

	#[test]
	fn color_formats() {
		let color = Srgb::new(255, 8, 64);
		assert_eq!(format_color(color, &options(&[])), "FF0840");
		assert_eq!(format_color(color, &options(&["-o", "rgb"])), "(255,8,64)");
	}

	#[test]
	fn lines_follow_weight_order() {
		let colors = [
			Srgba::new(0, 0, 0, 255),
			Srgba::new(0, 0, 0, 255),
			Srgba::new(0, 0, 0, 255),
			Srgba::new(255, 255, 255, 255),
		];

		// both initial centroids can land on black, which collapses into a single color
		let palette = (0..64)
			.map(|seed| palettor::Options::new(2, 100).with_seed(seed).extract(&colors).unwrap())
			.find(|palette| palette.len() == 2)
			.unwrap();

		assert_eq!(palette_lines(&palette, &options(&[])), ["FFFFFF 25.00%", "000000 75.00%"]);
		assert_eq!(palette_lines(&palette, &options(&["-r"])), ["000000 75.00%", "FFFFFF 25.00%"]);
	}

	#[test]
	fn end_to_end_on_generated_image() {
		let img = generate_thumbnail(test_image(300, 200), 4096);
		let colors = opaque_colors(&img);
		let palette = options(&["-k", "6", "--seed", "1"]).extraction().extract(&colors).unwrap();

		assert!(!palette.is_empty() && palette.len() <= 6);
		assert_eq!(palette_lines(&palette, &options(&[])).len(), palette.len());
	}
}
