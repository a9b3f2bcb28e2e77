//! High-level N-dimensional transforms over samplers, writers and split slices.
//!
//! Each call validates the dimensions, copies the input into native buffers in
//! row-major order, executes one FFTW transform and hands every result value to
//! the writer. Forward transforms use the negative exponent; inverse transforms
//! are unnormalised unless [`Options::normalize_inverse`] is set.
//!
//! ```
//! use ezfft::fft::fft_real;
//!
//! let dims = [4];
//! let mut spectrum = vec![(0.0, 0.0); 4];
//! fft_real(
//!     &|c: &[usize]| [1.0, 1.0, 1.0, 1.0][c[0]],
//!     &mut |v: f64, imaginary: bool, c: &[usize]| {
//!         if imaginary { spectrum[c[0]].1 = v } else { spectrum[c[0]].0 = v }
//!     },
//!     &dims,
//! )?;
//! assert!((spectrum[0].0 - 4.0).abs() < 1e-12);
//! # Ok::<(), ezfft::Error>(())
//! ```
use num_complex::Complex;

use crate::buffer::NativeBuffer;
use crate::coords::{increment_coordinates, linear_index_unchecked, CoordinateMapper};
use crate::driver::{execute_c2c, execute_r2c, half_spectrum_dimensions};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::planner::Direction;
use crate::precision::{Element, FftwFloat};
use crate::sampler::{ComplexSampler, ComplexWriter, RealSampler, RealWriter};
use crate::utils::{combine_re_im, split_complex};

/// Forward transform of real data, see [`fft_real_with_opts`].
pub fn fft_real<T, S, W>(sampler: &S, writer: &mut W, dimensions: &[usize]) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: RealSampler<T> + ?Sized,
    W: ComplexWriter<T> + ?Sized,
{
    fft_real_with_opts(sampler, writer, dimensions, &Options::default())
}

/// Forward transform of the real data provided by `sampler`.
///
/// The writer receives the full spectrum: the half FFTW computes plus the
/// redundant half reconstructed from Hermitian symmetry.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for invalid dimensions and passes on
/// FFTW failures.
pub fn fft_real_with_opts<T, S, W>(
    sampler: &S,
    writer: &mut W,
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: RealSampler<T> + ?Sized,
    W: ComplexWriter<T> + ?Sized,
{
    let mapper = CoordinateMapper::new(dimensions)?;
    let mut input = NativeBuffer::<T>::new(mapper.element_count())?;
    fill(input.as_mut_slice()?, dimensions, |c| sampler.value_at(c));

    let spectrum = real_spectrum(&mut input, dimensions, options)?;
    drain(&spectrum, dimensions, |z, c| {
        writer.set_value_at(z.re, false, c);
        writer.set_value_at(z.im, true, c);
    });
    Ok(())
}

/// Forward complex-to-complex transform, see [`fft_complex_with_opts`].
pub fn fft_complex<T, S, W>(sampler: &S, writer: &mut W, dimensions: &[usize]) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
    W: ComplexWriter<T> + ?Sized,
{
    fft_complex_with_opts(sampler, writer, dimensions, &Options::default())
}

/// Forward transform of the complex data provided by `sampler`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for invalid dimensions and passes on
/// FFTW failures.
pub fn fft_complex_with_opts<T, S, W>(
    sampler: &S,
    writer: &mut W,
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
    W: ComplexWriter<T> + ?Sized,
{
    let output = transform_sampled(sampler, dimensions, Direction::Forward, options)?;
    drain(output.as_slice()?, dimensions, |z, c| {
        writer.set_value_at(z.re, false, c);
        writer.set_value_at(z.im, true, c);
    });
    Ok(())
}

/// Inverse complex-to-complex transform, see [`ifft_complex_with_opts`].
pub fn ifft_complex<T, S, W>(sampler: &S, writer: &mut W, dimensions: &[usize]) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
    W: ComplexWriter<T> + ?Sized,
{
    ifft_complex_with_opts(sampler, writer, dimensions, &Options::default())
}

/// Inverse transform of the complex data provided by `sampler`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for invalid dimensions and passes on
/// FFTW failures.
pub fn ifft_complex_with_opts<T, S, W>(
    sampler: &S,
    writer: &mut W,
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
    W: ComplexWriter<T> + ?Sized,
{
    let output = transform_sampled(sampler, dimensions, Direction::Reverse, options)?;
    drain(output.as_slice()?, dimensions, |z, c| {
        writer.set_value_at(z.re, false, c);
        writer.set_value_at(z.im, true, c);
    });
    Ok(())
}

/// Inverse transform with real output, see [`ifft_real_with_opts`].
pub fn ifft_real<T, S, W>(sampler: &S, writer: &mut W, dimensions: &[usize]) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
    W: RealWriter<T> + ?Sized,
{
    ifft_real_with_opts(sampler, writer, dimensions, &Options::default())
}

/// Inverse transform of a full complex spectrum, keeping only the real part.
///
/// The input does not need to be Hermitian: the result is the real part of
/// the complex inverse transform, whatever the imaginary part would have been.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for invalid dimensions and passes on
/// FFTW failures.
pub fn ifft_real_with_opts<T, S, W>(
    sampler: &S,
    writer: &mut W,
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
    W: RealWriter<T> + ?Sized,
{
    let output = transform_sampled(sampler, dimensions, Direction::Reverse, options)?;
    drain(output.as_slice()?, dimensions, |z, c| writer.set_value_at(z.re, c));
    Ok(())
}

/// Forward transform of row-major real data into split real and imaginary
/// parts of the full spectrum.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if any slice does not hold exactly the
/// number of elements spanned by `dimensions`.
pub fn fft_real_slices<T>(
    input: &[T],
    out_reals: &mut [T],
    out_imags: &mut [T],
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = CoordinateMapper::new(dimensions)?.element_count();
    check_len(input.len(), n, "real input")?;
    check_len(out_reals.len(), n, "real output")?;
    check_len(out_imags.len(), n, "imaginary output")?;

    let mut buffer = NativeBuffer::from_slice(input)?;
    let spectrum = real_spectrum(&mut buffer, dimensions, options)?;
    split_complex(&spectrum, out_reals, out_imags);
    Ok(())
}

/// Forward transform of row-major complex data held as split parts.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if any slice does not hold exactly the
/// number of elements spanned by `dimensions`.
pub fn fft_complex_slices<T>(
    reals: &[T],
    imags: &[T],
    out_reals: &mut [T],
    out_imags: &mut [T],
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = CoordinateMapper::new(dimensions)?.element_count();
    check_len(out_reals.len(), n, "real output")?;
    check_len(out_imags.len(), n, "imaginary output")?;
    let output = transform_slices(reals, imags, dimensions, Direction::Forward, options)?;
    split_complex(output.as_slice()?, out_reals, out_imags);
    Ok(())
}

/// Inverse transform of row-major complex data held as split parts.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if any slice does not hold exactly the
/// number of elements spanned by `dimensions`.
pub fn ifft_complex_slices<T>(
    reals: &[T],
    imags: &[T],
    out_reals: &mut [T],
    out_imags: &mut [T],
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = CoordinateMapper::new(dimensions)?.element_count();
    check_len(out_reals.len(), n, "real output")?;
    check_len(out_imags.len(), n, "imaginary output")?;
    let output = transform_slices(reals, imags, dimensions, Direction::Reverse, options)?;
    split_complex(output.as_slice()?, out_reals, out_imags);
    Ok(())
}

/// Real part of the inverse transform of split complex data.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if any slice does not hold exactly the
/// number of elements spanned by `dimensions`.
pub fn ifft_real_slices<T>(
    reals: &[T],
    imags: &[T],
    output: &mut [T],
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = CoordinateMapper::new(dimensions)?.element_count();
    check_len(output.len(), n, "real output")?;
    let result = transform_slices(reals, imags, dimensions, Direction::Reverse, options)?;
    for (out, z) in output.iter_mut().zip(result.as_slice()?) {
        *out = z.re;
    }
    Ok(())
}

/// Runs r2c on `input` and expands the half spectrum to the full one.
fn real_spectrum<T>(
    input: &mut NativeBuffer<T>,
    dimensions: &[usize],
    options: &Options,
) -> Result<Vec<Complex<T>>>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let half_dims = half_spectrum_dimensions(dimensions)?;
    let mut half = NativeBuffer::<Complex<T>>::new(half_dims.iter().product())?;
    execute_r2c(input, &mut half, dimensions, options)?;
    Ok(expand_half_spectrum(half.as_slice()?, dimensions, &half_dims))
}

/// Rebuilds the full spectrum of real data from the first `d0 / 2 + 1` entries
/// along axis 0, using `X[k] = conj(X[(d - k) mod d])`.
fn expand_half_spectrum<T: FftwFloat>(
    half: &[Complex<T>],
    dimensions: &[usize],
    half_dims: &[usize],
) -> Vec<Complex<T>> {
    let n = dimensions.iter().product();
    let mut full = Vec::with_capacity(n);
    let mut mirrored = vec![0; dimensions.len()];
    let mut coords = vec![0; dimensions.len()];
    for _ in 0..n {
        if coords[0] < half_dims[0] {
            full.push(half[linear_index_unchecked(&coords, half_dims)]);
        } else {
            for ((m, &c), &d) in mirrored.iter_mut().zip(&coords).zip(dimensions) {
                *m = (d - c) % d;
            }
            full.push(half[linear_index_unchecked(&mirrored, half_dims)].conj());
        }
        increment_coordinates(&mut coords, dimensions);
    }
    full
}

/// Samples complex input and runs one c2c transform over it.
fn transform_sampled<T, S>(
    sampler: &S,
    dimensions: &[usize],
    direction: Direction,
    options: &Options,
) -> Result<NativeBuffer<Complex<T>>>
where
    T: FftwFloat,
    Complex<T>: Element,
    S: ComplexSampler<T> + ?Sized,
{
    let n = CoordinateMapper::new(dimensions)?.element_count();
    let mut input = NativeBuffer::<Complex<T>>::new(n)?;
    fill(input.as_mut_slice()?, dimensions, |c| {
        Complex::new(sampler.value_at(false, c), sampler.value_at(true, c))
    });
    let mut output = NativeBuffer::new(n)?;
    execute_c2c(&mut input, &mut output, dimensions, direction, options)?;
    Ok(output)
}

fn transform_slices<T>(
    reals: &[T],
    imags: &[T],
    dimensions: &[usize],
    direction: Direction,
    options: &Options,
) -> Result<NativeBuffer<Complex<T>>>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = CoordinateMapper::new(dimensions)?.element_count();
    check_len(reals.len(), n, "real input")?;
    check_len(imags.len(), n, "imaginary input")?;
    let mut input = NativeBuffer::<Complex<T>>::new(n)?;
    combine_re_im(reals, imags, input.as_mut_slice()?);
    let mut output = NativeBuffer::new(n)?;
    execute_c2c(&mut input, &mut output, dimensions, direction, options)?;
    Ok(output)
}

/// Fills `slots` in row-major order, stepping the coordinates in lockstep.
fn fill<T>(slots: &mut [T], dimensions: &[usize], mut value_at: impl FnMut(&[usize]) -> T) {
    let mut coords = vec![0; dimensions.len()];
    for slot in slots.iter_mut() {
        *slot = value_at(&coords);
        increment_coordinates(&mut coords, dimensions);
    }
}

/// Hands every value of `values` to `sink` along with its coordinates.
fn drain<T: Copy>(values: &[T], dimensions: &[usize], mut sink: impl FnMut(T, &[usize])) {
    let mut coords = vec![0; dimensions.len()];
    for &value in values {
        sink(value, &coords);
        increment_coordinates(&mut coords, dimensions);
    }
}

fn check_len(actual: usize, expected: usize, what: &str) -> Result<()> {
    if actual != expected {
        return Err(Error::invalid(format!(
            "{what} does not have the number of elements determined from dimensions, \
             should be {expected} but has {actual}"
        )));
    }
    Ok(())
}
