use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use ezfft::{
    fft_complex_slices, fft_real_slices, ifft_complex_slices, CoordinateMapper, Options, PlanRigor,
};
use num_traits::Float;
use rand::{distributions::Standard, prelude::Distribution, thread_rng, Rng};
use utilities::rustfft::num_complex::Complex;
use utilities::rustfft::FftPlanner;

const SHAPES: &[&[usize]] = &[&[1 << 10], &[1 << 16], &[64, 64], &[256, 256], &[32, 32, 32]];

fn generate_numbers<T: Float>(n: usize) -> (Vec<T>, Vec<T>)
where
    Standard: Distribution<T>,
{
    let mut rng = thread_rng();

    let samples: Vec<T> = (&mut rng).sample_iter(Standard).take(2 * n).collect();

    let mut reals = vec![T::zero(); n];
    let mut imags = vec![T::zero(); n];

    for ((z_re, z_im), rand_chunk) in reals
        .iter_mut()
        .zip(imags.iter_mut())
        .zip(samples.chunks_exact(2))
    {
        *z_re = rand_chunk[0];
        *z_im = rand_chunk[1];
    }

    (reals, imags)
}

fn generate_complex_numbers<T: Float + Default>(n: usize) -> Vec<Complex<T>>
where
    Standard: Distribution<T>,
{
    let (reals, imags) = generate_numbers::<T>(n);
    reals
        .into_iter()
        .zip(imags)
        .map(|(re, im)| Complex::new(re, im))
        .collect()
}

fn label(shape: &[usize]) -> String {
    shape
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

fn benchmark_forward_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward f64");

    for &shape in SHAPES {
        let len = CoordinateMapper::new(shape).unwrap().element_count();
        group.throughput(Throughput::Elements(len as u64));
        let options = Options::default();

        group.bench_function(BenchmarkId::new("ezfft complex", label(shape)), |b| {
            b.iter_batched(
                || generate_numbers::<f64>(len),
                |(reals, imags)| {
                    let mut out_re = vec![0.0; len];
                    let mut out_im = vec![0.0; len];
                    fft_complex_slices(&reals, &imags, &mut out_re, &mut out_im, shape, &options)
                        .unwrap();
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("ezfft real", label(shape)), |b| {
            b.iter_batched(
                || generate_numbers::<f64>(len).0,
                |reals| {
                    let mut out_re = vec![0.0; len];
                    let mut out_im = vec![0.0; len];
                    fft_real_slices(&reals, &mut out_re, &mut out_im, shape, &options).unwrap();
                },
                BatchSize::SmallInput,
            );
        });

        if shape.len() == 1 {
            let mut planner = FftPlanner::<f64>::new();
            let fft = planner.plan_fft_forward(len);

            group.bench_function(BenchmarkId::new("RustFFT FFT Forward", label(shape)), |b| {
                b.iter_batched(
                    || generate_complex_numbers::<f64>(len),
                    |mut signal| {
                        fft.process(&mut signal);
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn benchmark_inverse_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Inverse f32");

    for &shape in SHAPES {
        let len = CoordinateMapper::new(shape).unwrap().element_count();
        group.throughput(Throughput::Elements(len as u64));

        for rigor in [PlanRigor::Estimate, PlanRigor::Measure] {
            let options = Options::default().with_rigor(rigor);
            let id = format!("ezfft {rigor:?}");

            group.bench_function(BenchmarkId::new(id, label(shape)), |b| {
                b.iter_batched(
                    || generate_numbers::<f32>(len),
                    |(reals, imags)| {
                        let mut out_re = vec![0.0; len];
                        let mut out_im = vec![0.0; len];
                        ifft_complex_slices(
                            &reals,
                            &imags,
                            &mut out_re,
                            &mut out_im,
                            shape,
                            &options,
                        )
                        .unwrap();
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, benchmark_forward_f64, benchmark_inverse_f32);
criterion_main!(benches);
