//! Provides the implementation for k-means where each centroid is an observed point

use crate::{ColorDifference, Hcl};
use rand::Rng;
use tracing::{debug, trace};

/// Result from running k-means
#[derive(Debug, Clone)]
pub(crate) struct KmeansResult {
	/// Final centroid colors, each one is a member of its own cluster
	pub centroids: Vec<Hcl>,
	/// Number of points assigned to each centroid, never zero
	pub counts: Vec<usize>,
	/// Number of elapsed iterations
	pub iterations: u32,
	/// Whether the centroids stopped changing before reaching the maximum number of iterations
	pub converged: bool,
}

/// Compute the average of the given points.
///
/// Chroma and luminance are averaged normally, while hue uses a circular mean
/// so that hues on either side of `0.0` average to a hue near `0.0` and not near `180.0`.
///
/// `points` should be non-empty.
pub(crate) fn mean(points: &[Hcl]) -> Hcl {
	debug_assert!(!points.is_empty());

	// Sums may need greater precision, but the average can fall back down to a reduced precision
	let (mut sin, mut cos, mut c, mut l) = (0.0, 0.0, 0.0, 0.0);
	for point in points {
		let (s, co) = f64::from(point.h).to_radians().sin_cos();
		sin += s;
		cos += co;
		c += f64::from(point.c);
		l += f64::from(point.l);
	}

	#[allow(clippy::cast_precision_loss)]
	let n = points.len() as f64;

	#[allow(clippy::cast_possible_truncation)]
	Hcl::new(sin.atan2(cos).to_degrees() as f32, (c / n) as f32, (l / n) as f32)
}

/// Returns the index of the point in `haystack` closest to `needle`.
///
/// Ties go to the earliest point. `haystack` should be non-empty.
pub(crate) fn nearest_index<D: ColorDifference>(needle: Hcl, haystack: &[Hcl]) -> usize {
	debug_assert!(!haystack.is_empty());

	let mut min_dist = f32::INFINITY;
	let mut min_index = 0;
	for (i, &candidate) in haystack.iter().enumerate() {
		let dist = D::squared_distance(needle, candidate);
		if dist < min_dist {
			min_dist = dist;
			min_index = i;
		}
	}

	min_index
}

/// Returns the point in `haystack` closest to `needle`
pub(crate) fn nearest<D: ColorDifference>(needle: Hcl, haystack: &[Hcl]) -> Hcl {
	haystack[nearest_index::<D>(needle, haystack)]
}

/// Returns the member of `cluster` closest to the mean of `cluster`
pub(crate) fn find_centroid<D: ColorDifference>(cluster: &[Hcl]) -> Hcl {
	nearest::<D>(mean(cluster), cluster)
}

/// Choose `k` distinct points uniformly at random as the starting centroids
fn initial_centroids(k: usize, rng: &mut impl Rng, points: &[Hcl]) -> Vec<Hcl> {
	let indices = rand::seq::index::sample(rng, points.len(), k).into_vec();
	trace!(?indices, "chose initial centroids");
	indices.into_iter().map(|i| points[i]).collect()
}

/// For each point, assign it to its closest centroid
fn update_assignments<D: ColorDifference>(points: &[Hcl], centroids: &[Hcl], assignment: &mut [usize]) {
	for (&point, center) in points.iter().zip(assignment) {
		*center = nearest_index::<D>(point, centroids);
	}
}

/// Group the points by their assigned centroid
fn partition(points: &[Hcl], assignment: &[usize], k: usize) -> Vec<Vec<Hcl>> {
	let mut clusters = vec![Vec::new(); k];
	for (&point, &center) in points.iter().zip(assignment) {
		clusters[center].push(point);
	}
	clusters
}

/// Run k-means on the given points.
///
/// Each iteration reassigns every point to its closest centroid,
/// then replaces each centroid with the member of its cluster closest to the cluster mean.
/// Centroids that end up with no points are dropped,
/// so the result may have fewer than `k` centroids.
///
/// The returned centroids are the ones the final assignment was made against,
/// so each count always belongs to its centroid even if the maximum number of iterations was reached.
///
/// Requires `1 <= k <= points.len()` and `max_iter >= 1`.
pub(crate) fn run<D: ColorDifference>(
	points: &[Hcl],
	k: usize,
	max_iter: u32,
	rng: &mut impl Rng,
) -> KmeansResult {
	debug_assert!(k >= 1 && k <= points.len() && max_iter >= 1);

	let mut centroids = initial_centroids(k, rng, points);
	let mut assignment = vec![0; points.len()];

	let mut assigned = Vec::with_capacity(k);
	let mut counts = Vec::with_capacity(k);
	let mut iterations = 0;
	let mut converged = false;

	while iterations < max_iter && !converged {
		update_assignments::<D>(points, &centroids, &mut assignment);
		let clusters = partition(points, &assignment, centroids.len());

		assigned.clear();
		counts.clear();
		let mut next = Vec::with_capacity(centroids.len());
		converged = true;

		for (&centroid, cluster) in centroids.iter().zip(&clusters) {
			if cluster.is_empty() {
				continue;
			}

			let new_centroid = find_centroid::<D>(cluster);
			converged &= new_centroid == centroid;

			assigned.push(centroid);
			counts.push(cluster.len());
			next.push(new_centroid);
		}

		centroids = next;
		iterations += 1;

		debug!(iteration = iterations, centroids = centroids.len(), converged, "k-means iteration");
	}

	if !converged {
		debug!(max_iter, "k-means reached the maximum number of iterations without converging");
	}

	KmeansResult { centroids: assigned, counts, iterations, converged }
}
