use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use imfilter_image::{Image, Kernel};
use imfilter_imgproc::filter::{apply_filter_with, FilterOptions};
use imfilter_imgproc::parallel::ExecutionStrategy;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Apply Filter");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 7, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_data = (0..width * height * 3).map(|v| (v % 256) as u8).collect();
            let image = Image::new([*width, *height].into(), 3, image_data).unwrap();

            let weight = 1.0 / (kernel_size * kernel_size) as f64;
            let kernel = Kernel::new(*kernel_size, vec![weight; kernel_size * kernel_size]).unwrap();

            for (name, strategy) in [
                ("apply_filter_serial", ExecutionStrategy::Serial),
                ("apply_filter_parallel_rows", ExecutionStrategy::ParallelRows),
            ] {
                let options = FilterOptions::new().with_strategy(strategy);
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &(&image, &kernel),
                    |b, i| b.iter(|| black_box(apply_filter_with(i.0, i.1, &options))),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
