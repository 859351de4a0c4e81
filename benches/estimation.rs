use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lbms_dict::config::EstimatorConfig;
use lbms_dict::{paginate, CompressionEstimator, Vocabulary};

fn bench_estimate(c: &mut Criterion) {
	let vocabulary = Vocabulary::from_words((0..100_000).map(|i| format!("word{}", i)));
	let config = EstimatorConfig::default().with_iterations(10_000);
	let estimator = CompressionEstimator::new(&vocabulary, config).unwrap();
	let mut group = c.benchmark_group("estimation");
	group.throughput(Throughput::Elements(10_000));
	group.bench_function("run_bin_20_words", |b| {
		b.iter(|| estimator.run_bin(20).unwrap());
	});
	group.finish();
}

fn bench_paginate(c: &mut Criterion) {
	let vocabulary = Vocabulary::from_words((0..333_333).map(|i| format!("word{}", i)));
	c.bench_function("paginate_65536", |b| {
		b.iter(|| paginate(&vocabulary, 65536).unwrap());
	});
}

criterion_group!(benches, bench_estimate, bench_paginate);
criterion_main!(benches);
