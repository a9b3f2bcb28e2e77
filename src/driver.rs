//! Executes FFTW transforms on [`NativeBuffer`]s.
//!
//! Buffers are laid out row-major with axis 0 fastest, matching
//! [`coords`](crate::coords). Real-to-complex and complex-to-real transforms
//! work on the half spectrum FFTW produces: axis 0 shrinks to `d0 / 2 + 1`
//! while every other axis keeps its extent.
use fftw::array::AlignedVec;
use fftw::plan::{C2CPlan, C2RPlan, R2CPlan};
use fftw::types::Flag;
use num_complex::Complex;

use crate::buffer::NativeBuffer;
use crate::coords::checked_element_count;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::planner::{plan_c2c, plan_c2r, plan_r2c, Direction};
use crate::precision::{Element, FftwFloat};

/// Dimensions of the half spectrum produced by a real-to-complex transform.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for invalid dimensions.
pub fn half_spectrum_dimensions(dimensions: &[usize]) -> Result<Vec<usize>> {
    checked_element_count(dimensions)?;
    let mut half = dimensions.to_vec();
    half[0] = dimensions[0] / 2 + 1;
    Ok(half)
}

/// Complex-to-complex transform of `input` into `output`.
///
/// The input is preserved. Inverse transforms are unnormalised unless
/// [`Options::normalize_inverse`] is set.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if either buffer does not hold exactly the number of
/// elements spanned by `dimensions`, [`Error::Released`] if a buffer was released.
pub fn execute_c2c<T>(
    input: &mut NativeBuffer<Complex<T>>,
    output: &mut NativeBuffer<Complex<T>>,
    dimensions: &[usize],
    direction: Direction,
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = checked_element_count(dimensions)?;
    require_len(input, n, "complex input")?;
    require_len(output, n, "complex output")?;
    let flag = options.rigor.flag() | Flag::PRESERVEINPUT;

    let (src, dst) = (input.as_mut_slice()?, output.as_mut_slice()?);
    let mut plan = if options.rigor.clobbers_arrays() {
        let mut scratch_in = AlignedVec::<Complex<T>>::new(n);
        let mut scratch_out = AlignedVec::<Complex<T>>::new(n);
        plan_c2c::<T>(dimensions, &mut scratch_in, &mut scratch_out, direction, flag)?
    } else {
        plan_c2c::<T>(dimensions, src, dst, direction, flag)?
    };
    log::trace!("executing c2c {direction:?} on {n} elements");
    plan.c2c(src, dst)?;

    if direction == Direction::Reverse && options.normalize_inverse {
        scale(dst, n);
    }
    Ok(())
}

/// Real-to-complex transform of `input` into the half spectrum `output`.
///
/// `output` must hold the element count of [`half_spectrum_dimensions`].
pub fn execute_r2c<T>(
    input: &mut NativeBuffer<T>,
    output: &mut NativeBuffer<Complex<T>>,
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = checked_element_count(dimensions)?;
    let half = checked_element_count(&half_spectrum_dimensions(dimensions)?)?;
    require_len(input, n, "real input")?;
    require_len(output, half, "half spectrum output")?;
    let flag = options.rigor.flag() | Flag::PRESERVEINPUT;

    let (src, dst) = (input.as_mut_slice()?, output.as_mut_slice()?);
    let mut plan = if options.rigor.clobbers_arrays() {
        let mut scratch_in = AlignedVec::<T>::new(n);
        let mut scratch_out = AlignedVec::<Complex<T>>::new(half);
        plan_r2c::<T>(dimensions, &mut scratch_in, &mut scratch_out, flag)?
    } else {
        plan_r2c::<T>(dimensions, src, dst, flag)?
    };
    log::trace!("executing r2c on {n} elements");
    plan.r2c(src, dst)?;
    Ok(())
}

/// Complex-to-real transform of the half spectrum `input` into `output`.
///
/// The half spectrum is assumed to stem from real data; FFTW uses it as scratch
/// space, so its contents are unspecified afterwards. The result is unnormalised
/// unless [`Options::normalize_inverse`] is set.
pub fn execute_c2r<T>(
    input: &mut NativeBuffer<Complex<T>>,
    output: &mut NativeBuffer<T>,
    dimensions: &[usize],
    options: &Options,
) -> Result<()>
where
    T: FftwFloat,
    Complex<T>: Element,
{
    let n = checked_element_count(dimensions)?;
    let half = checked_element_count(&half_spectrum_dimensions(dimensions)?)?;
    require_len(input, half, "half spectrum input")?;
    require_len(output, n, "real output")?;
    let flag = options.rigor.flag() | Flag::DESTROYINPUT;

    let (src, dst) = (input.as_mut_slice()?, output.as_mut_slice()?);
    let mut plan = if options.rigor.clobbers_arrays() {
        let mut scratch_in = AlignedVec::<Complex<T>>::new(half);
        let mut scratch_out = AlignedVec::<T>::new(n);
        plan_c2r::<T>(dimensions, &mut scratch_in, &mut scratch_out, flag)?
    } else {
        plan_c2r::<T>(dimensions, src, dst, flag)?
    };
    log::trace!("executing c2r on {n} elements");
    plan.c2r(src, dst)?;

    if options.normalize_inverse {
        let factor = T::one() / count_as::<T>(n);
        dst.iter_mut().for_each(|v| *v = *v * factor);
    }
    Ok(())
}

fn require_len<E: Element>(buffer: &NativeBuffer<E>, expected: usize, what: &str) -> Result<()> {
    if buffer.is_released() {
        return Err(Error::Released);
    }
    if buffer.len() != expected {
        return Err(Error::invalid(format!(
            "{what} does not have the number of elements determined from dimensions, \
             should be {expected} but has {}",
            buffer.len()
        )));
    }
    Ok(())
}

pub(crate) fn count_as<T: FftwFloat>(n: usize) -> T {
    <T as num_traits::NumCast>::from(n).unwrap_or_else(T::infinity)
}

pub(crate) fn scale<T: FftwFloat>(values: &mut [Complex<T>], n: usize) {
    let factor = T::one() / count_as::<T>(n);
    values.iter_mut().for_each(|v| *v = v.scale(factor));
}
