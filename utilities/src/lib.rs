// export rustfft to ezfft tests
pub extern crate rustfft;

use std::f64::consts::PI;

use rand::{distributions::Uniform, prelude::*};
use rustfft::num_traits::Float;

/// Asserts that two fp numbers are approximately equal.
///
/// # Panics
///
/// Panics if `actual` and `expected` are too far from each other
#[allow(dead_code)]
#[track_caller]
pub fn assert_float_closeness<T: Float + std::fmt::Display>(actual: T, expected: T, epsilon: T) {
    if (actual - expected).abs() >= epsilon {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (with epsilon {epsilon})",
        );
    }
}

/// Generate a random, complex, signal in the provided buffers
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`
pub fn gen_random_signal<T>(reals: &mut [T], imags: &mut [T])
where
    T: Float + rand::distributions::uniform::SampleUniform,
{
    assert_eq!(
        reals.len(),
        imags.len(),
        "Real and imaginary slices must be of equal length"
    );

    let mut rng = thread_rng();

    let uniform_dist = Uniform::new(T::from(-1.0).unwrap(), T::from(1.0).unwrap());
    for (real, imag) in reals.iter_mut().zip(imags.iter_mut()) {
        *real = uniform_dist.sample(&mut rng);
        *imag = uniform_dist.sample(&mut rng);
    }
}

/// Textbook O(n^2) discrete Fourier transform over row-major data with axis 0
/// varying fastest. `inverse` flips the exponent sign; no normalisation.
///
/// # Panics
///
/// Panics if either slice does not hold the product of `dimensions` elements.
pub fn naive_dft(
    reals: &[f64],
    imags: &[f64],
    dimensions: &[usize],
    inverse: bool,
) -> (Vec<f64>, Vec<f64>) {
    let n: usize = dimensions.iter().product();
    assert_eq!(reals.len(), n);
    assert_eq!(imags.len(), n);

    let sign = if inverse { 1.0 } else { -1.0 };
    let coordinates: Vec<Vec<usize>> = (0..n)
        .map(|mut index| {
            dimensions
                .iter()
                .map(|&d| {
                    let c = index % d;
                    index /= d;
                    c
                })
                .collect()
        })
        .collect();

    let mut out_re = vec![0.0; n];
    let mut out_im = vec![0.0; n];
    for (k, k_coords) in coordinates.iter().enumerate() {
        for (j, j_coords) in coordinates.iter().enumerate() {
            let phase: f64 = k_coords
                .iter()
                .zip(j_coords)
                .zip(dimensions)
                .map(|((&a, &b), &d)| ((a * b) % d) as f64 / d as f64)
                .sum();
            let (sin, cos) = (sign * 2.0 * PI * phase).sin_cos();
            out_re[k] += reals[j] * cos - imags[j] * sin;
            out_im[k] += reals[j] * sin + imags[j] * cos;
        }
    }
    (out_re, out_im)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_random_signal() {
        let big_n = 1 << 12;
        let mut reals: Vec<_> = vec![0.0; big_n];
        let mut imags: Vec<_> = vec![0.0; big_n];

        gen_random_signal::<f64>(&mut reals, &mut imags);

        assert!(reals
            .iter()
            .chain(imags.iter())
            .all(|x| (-1.0..1.0).contains(x)));
    }

    #[test]
    fn naive_dft_of_impulse_is_flat() {
        let dims = [3, 2];
        let mut reals = vec![0.0; 6];
        reals[0] = 1.0;
        let (re, im) = naive_dft(&reals, &[0.0; 6], &dims, false);
        for (r, i) in re.iter().zip(im.iter()) {
            assert_float_closeness(*r, 1.0, 1e-12);
            assert_float_closeness(*i, 0.0, 1e-12);
        }
    }

    #[test]
    fn naive_dft_matches_rustfft_in_one_dimension() {
        let n = 16;
        let mut reals = vec![0.0; n];
        let mut imags = vec![0.0; n];
        gen_random_signal(&mut reals, &mut imags);
        let (re, im) = naive_dft(&reals, &imags, &[n], false);

        let mut signal: Vec<_> = reals
            .iter()
            .zip(imags.iter())
            .map(|(&re, &im)| rustfft::num_complex::Complex::new(re, im))
            .collect();
        rustfft::FftPlanner::<f64>::new()
            .plan_fft_forward(n)
            .process(&mut signal);
        for (k, z) in signal.iter().enumerate() {
            assert_float_closeness(re[k], z.re, 1e-9);
            assert_float_closeness(im[k], z.im, 1e-9);
        }
    }
}
