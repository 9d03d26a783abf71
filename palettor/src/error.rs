//! Errors returned when extracting a palette

use thiserror::Error;

/// The ways palette extraction can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
	/// `k` or `max_iterations` was zero, or there were fewer colors than `k`
	#[error("cannot cluster {colors} colors into {k} colors within {max_iterations} iterations")]
	InsufficientColors {
		/// Number of provided colors
		colors: usize,
		/// Requested number of palette colors
		k: usize,
		/// Requested maximum number of iterations
		max_iterations: u32,
	},
	/// A color had an alpha of zero, so it has no meaningful color
	#[error("color #{red:02x}{green:02x}{blue:02x} at index {index} is fully transparent")]
	DegenerateColor {
		/// Position of the color in the input
		index: usize,
		/// Red channel of the color
		red: u8,
		/// Green channel of the color
		green: u8,
		/// Blue channel of the color
		blue: u8,
	},
}

impl Error {
	/// Record the input position of a degenerate color
	pub(crate) fn at_index(self, index: usize) -> Self {
		match self {
			Self::DegenerateColor { red, green, blue, .. } => Self::DegenerateColor { index, red, green, blue },
			Self::InsufficientColors { .. } => self,
		}
	}
}
