use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use palette::Srgba;
use palettor::{DistanceMetric, Options};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;
use std::time::Duration;

fn random_colors(n: usize) -> Vec<Srgba<u8>> {
	let mut rng = Xoroshiro128PlusPlus::seed_from_u64(0);
	(0..n).map(|_| Srgba::new(rng.gen(), rng.gen(), rng.gen(), u8::MAX)).collect()
}

fn extract(c: &mut Criterion) {
	let mut group = c.benchmark_group("extract");
	group
		.sample_size(30)
		.noise_threshold(0.05)
		.sampling_mode(SamplingMode::Flat)
		.warm_up_time(Duration::from_millis(500))
		.measurement_time(Duration::from_secs(2));

	for n in [1_000, 10_000, 40_000] {
		let colors = random_colors(n);
		for (name, metric) in [("euclidean", DistanceMetric::Euclidean), ("circular hue", DistanceMetric::CircularHue)] {
			for k in [4, 8] {
				group.bench_with_input(BenchmarkId::new(format!("{name} k={k}"), n), &colors, |b, colors| {
					b.iter(|| {
						Options::new(black_box(k), black_box(100))
							.with_metric(metric)
							.with_seed(black_box(0))
							.extract(colors)
					});
				});
			}
		}
	}
}

criterion_group!(benches, extract);
criterion_main!(benches);
