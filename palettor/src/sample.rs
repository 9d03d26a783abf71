//! Sampling colors from decoded images

use image::DynamicImage;
use palette::Srgba;

/// Returns every pixel of the image as an Srgba color, in row-major order.
///
/// Images without an alpha channel give fully opaque colors.
#[must_use]
pub fn colors_from_image(image: &DynamicImage) -> Vec<Srgba<u8>> {
	let pixels = image.to_rgba8();
	palette::cast::from_component_slice::<Srgba<u8>>(pixels.as_raw()).to_vec()
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::{Rgb, RgbImage, Rgba, RgbaImage};

	#[test]
	fn opaque_image() {
		let image = RgbImage::from_fn(2, 2, |x, y| if x == y { Rgb([0, 0, 0]) } else { Rgb([10, 20, 30]) });
		let colors = colors_from_image(&DynamicImage::ImageRgb8(image));

		assert_eq!(
			colors,
			[
				Srgba::new(0, 0, 0, 255),
				Srgba::new(10, 20, 30, 255),
				Srgba::new(10, 20, 30, 255),
				Srgba::new(0, 0, 0, 255),
			]
		);
	}

	#[test]
	#[allow(clippy::cast_possible_truncation)]
	fn alpha_is_kept() {
		let image = RgbaImage::from_fn(3, 1, |x, _| Rgba([1, 2, 3, x as u8]));
		let colors = colors_from_image(&DynamicImage::ImageRgba8(image));

		assert_eq!(colors.iter().map(|c| c.alpha).collect::<Vec<_>>(), [0, 1, 2]);
	}
}
