//! The final palette returned from clustering

use crate::kmeans::KmeansResult;
use palette::Srgb;

/// A palette color and the fraction of the input colors it represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
	/// The palette color
	pub color: Srgb<u8>,
	/// Fraction of input colors assigned to this color, in the range `0.0..=1.0`
	pub weight: f64,
}

/// A set of distinct colors with weights summing to `1.0`
///
/// A palette cannot be modified after it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
	/// Entries sorted by ascending weight
	entries: Vec<Entry>,
	/// Number of elapsed k-means iterations
	iterations: u32,
	/// Whether k-means converged before the maximum number of iterations
	converged: bool,
}

impl Palette {
	/// Create a palette from entries, merging entries that share the same color.
	pub(crate) fn from_entries(entries: impl IntoIterator<Item = Entry>, iterations: u32, converged: bool) -> Self {
		let mut merged: Vec<Entry> = Vec::new();
		for entry in entries {
			match merged.iter_mut().find(|e| e.color == entry.color) {
				Some(existing) => existing.weight += entry.weight,
				None => merged.push(entry),
			}
		}

		// stable, so ties keep their original order
		merged.sort_by(|x, y| f64::total_cmp(&x.weight, &y.weight));

		Self { entries: merged, iterations, converged }
	}

	/// Convert each centroid back to Srgb and weight it by the size of its cluster.
	pub(crate) fn from_kmeans(result: KmeansResult) -> Self {
		let KmeansResult { centroids, counts, iterations, converged } = result;

		#[allow(clippy::cast_precision_loss)]
		let total = counts.iter().sum::<usize>() as f64;

		#[allow(clippy::cast_precision_loss)]
		let entries = centroids.into_iter().zip(counts).map(|(centroid, n)| Entry {
			color: centroid.to_color(),
			weight: n as f64 / total,
		});

		Self::from_entries(entries, iterations, converged)
	}

	/// Returns the number of colors in the palette
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether the palette has no colors
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the weight of the given color, or `0.0` if the color is not in the palette
	#[must_use]
	pub fn weight(&self, color: Srgb<u8>) -> f64 {
		self.entries
			.iter()
			.find(|entry| entry.color == color)
			.map_or(0.0, |entry| entry.weight)
	}

	/// Returns an iterator over the palette colors
	pub fn colors(&self) -> impl ExactSizeIterator<Item = Srgb<u8>> + '_ {
		self.entries.iter().map(|entry| entry.color)
	}

	/// Returns the palette entries sorted by ascending weight.
	///
	/// Entries with equal weights are in a fixed but otherwise unspecified order.
	#[must_use]
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Returns the number of k-means iterations that were run
	#[must_use]
	pub fn iterations(&self) -> u32 {
		self.iterations
	}

	/// Returns whether k-means converged before the maximum number of iterations.
	///
	/// A palette from k-means that did not converge is still valid,
	/// but more iterations or a different seed may give a better one.
	#[must_use]
	pub fn converged(&self) -> bool {
		self.converged
	}
}
