//! Utility functions such as interleave/deinterleave
use bytemuck::{cast_slice, cast_slice_mut};
use num_complex::Complex;

use crate::precision::FftwFloat;

const CHUNK_SIZE: usize = 4;
const DOUBLE_CHUNK: usize = CHUNK_SIZE * 2;

// We don't multiversion for AVX-512 here and keep the chunk size below AVX-512
// because no gains showed up for it in benchmarks.
#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
/// Separates data like `[1, 2, 3, 4]` into `[1, 3]` and `[2, 4]`.
///
/// # Panics
///
/// Panics if either output is not exactly half as long as `input`.
pub(crate) fn deinterleave<T: Copy>(input: &[T], out_even: &mut [T], out_odd: &mut [T]) {
    assert_eq!(input.len(), out_even.len() * 2);
    assert_eq!(out_even.len(), out_odd.len());

    input
        .chunks_exact(DOUBLE_CHUNK)
        .zip(out_even.chunks_exact_mut(CHUNK_SIZE))
        .zip(out_odd.chunks_exact_mut(CHUNK_SIZE))
        .for_each(|((in_chunk, evens), odds)| {
            // fixed trip counts let the compiler unroll and vectorise this
            for i in 0..CHUNK_SIZE {
                evens[i] = in_chunk[2 * i];
                odds[i] = in_chunk[2 * i + 1];
            }
        });

    // Process the remainder, too small for the chunked loop
    let input_rem = input.chunks_exact(DOUBLE_CHUNK).remainder();
    let evens_rem = out_even.chunks_exact_mut(CHUNK_SIZE).into_remainder();
    let odds_rem = out_odd.chunks_exact_mut(CHUNK_SIZE).into_remainder();
    input_rem
        .chunks_exact(2)
        .zip(evens_rem.iter_mut())
        .zip(odds_rem.iter_mut())
        .for_each(|((inp, even), odd)| {
            *even = inp[0];
            *odd = inp[1];
        });
}

#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
/// Merges `[1, 3]` and `[2, 4]` into `[1, 2, 3, 4]`, the inverse of [`deinterleave`].
///
/// # Panics
///
/// Panics if `output` is not exactly twice as long as each input.
pub(crate) fn interleave<T: Copy>(evens: &[T], odds: &[T], output: &mut [T]) {
    assert_eq!(evens.len(), odds.len());
    assert_eq!(output.len(), evens.len() * 2);

    output
        .chunks_exact_mut(DOUBLE_CHUNK)
        .zip(evens.chunks_exact(CHUNK_SIZE))
        .zip(odds.chunks_exact(CHUNK_SIZE))
        .for_each(|((out_chunk, evens), odds)| {
            for i in 0..CHUNK_SIZE {
                out_chunk[2 * i] = evens[i];
                out_chunk[2 * i + 1] = odds[i];
            }
        });

    let evens_rem = evens.chunks_exact(CHUNK_SIZE).remainder();
    let odds_rem = odds.chunks_exact(CHUNK_SIZE).remainder();
    output
        .chunks_exact_mut(DOUBLE_CHUNK)
        .into_remainder()
        .chunks_exact_mut(2)
        .zip(evens_rem.iter())
        .zip(odds_rem.iter())
        .for_each(|((out, &even), &odd)| {
            out[0] = even;
            out[1] = odd;
        });
}

/// Splits a slice of [`Complex`] numbers into separate real and imaginary parts.
///
/// # Panics
///
/// Panics if `reals` or `imags` differs in length from `signal`.
pub(crate) fn split_complex<T: FftwFloat>(signal: &[Complex<T>], reals: &mut [T], imags: &mut [T]) {
    let flat: &[T] = cast_slice(signal);
    deinterleave(flat, reals, imags);
}

/// Combines separate real and imaginary parts into `signal`.
///
/// # Panics
///
/// Panics if `reals` or `imags` differs in length from `signal`.
pub(crate) fn combine_re_im<T: FftwFloat>(reals: &[T], imags: &[T], signal: &mut [Complex<T>]) {
    let flat: &mut [T] = cast_slice_mut(signal);
    interleave(reals, imags, flat);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen_test_vec(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    /// Slow but obviously correct implementation of deinterleaving,
    /// to be used in tests
    fn deinterleave_naive<T: Copy>(input: &[T]) -> (Vec<T>, Vec<T>) {
        input.chunks_exact(2).map(|c| (c[0], c[1])).unzip()
    }

    #[test]
    fn deinterleaving_correctness() {
        for len in [0, 2, 14, 16, 18, 126, 128, 130, 136, 100500] {
            let input = gen_test_vec(len);
            let (naive_a, naive_b) = deinterleave_naive(&input);
            let mut opt_a = vec![0; len / 2];
            let mut opt_b = vec![0; len / 2];
            deinterleave(&input, &mut opt_a, &mut opt_b);
            assert_eq!(naive_a, opt_a);
            assert_eq!(naive_b, opt_b);

            let mut merged = vec![usize::MAX; len];
            interleave(&opt_a, &opt_b, &mut merged);
            assert_eq!(merged, input);
        }
    }

    #[test]
    #[should_panic]
    fn deinterleave_rejects_odd_input() {
        let mut a = vec![0; 1];
        let mut b = vec![0; 1];
        deinterleave(&[1, 2, 3], &mut a, &mut b);
    }

    #[test]
    fn test_separate_and_combine_re_im() {
        let complex_vec: Vec<_> = vec![
            Complex::new(1.0, 2.0),
            Complex::new(3.0, 4.0),
            Complex::new(5.0, 6.0),
            Complex::new(7.0, 8.0),
            Complex::new(9.0, 10.0),
        ];

        let mut reals = vec![0.0f64; 5];
        let mut imags = vec![0.0f64; 5];
        split_complex(&complex_vec, &mut reals, &mut imags);
        assert_eq!(reals, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
        assert_eq!(imags, vec![2.0, 4.0, 6.0, 8.0, 10.0]);

        let mut recombined_vec = vec![Complex::new(0.0, 0.0); 5];
        combine_re_im(&reals, &imags, &mut recombined_vec);
        assert_eq!(complex_vec, recombined_vec);
    }
}
