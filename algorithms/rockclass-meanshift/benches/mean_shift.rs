use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use linfa::traits::Fit;
use linfa::DatasetBase;
use ndarray::{concatenate, Array2, Axis};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;
use rockclass_meanshift::MeanShift;

fn mean_shift_bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(40);
    let sizes = vec![100, 525, 2000];

    let mut benchmark = c.benchmark_group("mean_shift");
    benchmark.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    for size in sizes {
        let low = Array2::random_using((size / 2, 2), Uniform::new(0., 0.4), &mut rng);
        let high = Array2::random_using((size - size / 2, 2), Uniform::new(0.6, 1.), &mut rng);
        let dataset = DatasetBase::from(concatenate![Axis(0), low, high]);
        benchmark.bench_function(BenchmarkId::new("flat_kernel", size), |bencher| {
            bencher.iter(|| {
                MeanShift::params(black_box(0.33))
                    .fit(&dataset)
                    .unwrap()
            });
        });
    }

    benchmark.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = mean_shift_bench
}
criterion_main!(benches);
