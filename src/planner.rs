//! The planner module wraps FFTW plan creation and destruction.
//!
//! FFTW's planner mutates global state and is not thread-safe, so every plan is
//! created and destroyed while holding a single process-wide lock. Executing a
//! plan does not take the lock, so transforms themselves run concurrently.
use std::ops::{Deref, DerefMut};

use fftw::plan::{C2CPlan, C2RPlan, R2CPlan};
use fftw::types::{Flag, Sign};
use num_complex::Complex;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

use crate::error::Result;
use crate::precision::FftwFloat;

static PLANNER_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Reverse is for running the Inverse Fast Fourier Transform (IFFT)
/// Forward is for running the regular FFT
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Negative exponent, `exp(-2 pi i jk / n)`
    Forward = 1,
    /// Positive exponent, `exp(+2 pi i jk / n)`. Not normalised.
    Reverse = -1,
}

impl Direction {
    pub(crate) fn sign(self) -> Sign {
        match self {
            Direction::Forward => Sign::Forward,
            Direction::Reverse => Sign::Backward,
        }
    }
}

/// Acquires the planner lock.
///
/// Only needed when calling FFTW planner routines directly rather than
/// through this module.
pub fn planner_lock() -> MutexGuard<'static, ()> {
    PLANNER_LOCK.lock()
}

/// An FFTW plan that is destroyed under the planner lock.
pub struct Planned<P> {
    plan: Option<P>,
}

impl<P> Deref for Planned<P> {
    type Target = P;

    fn deref(&self) -> &P {
        // only `None` while dropping
        self.plan.as_ref().expect("plan accessed after destruction")
    }
}

impl<P> DerefMut for Planned<P> {
    fn deref_mut(&mut self) -> &mut P {
        self.plan.as_mut().expect("plan accessed after destruction")
    }
}

impl<P> Drop for Planned<P> {
    fn drop(&mut self) {
        if let Some(plan) = self.plan.take() {
            let _guard = planner_lock();
            drop(plan);
        }
    }
}

/// FFTW wants C order (last axis fastest) while our axis 0 is the fastest one.
pub(crate) fn fftw_shape(dimensions: &[usize]) -> Vec<usize> {
    dimensions.iter().rev().copied().collect()
}

/// Plans a complex-to-complex transform over `dimensions`.
pub fn plan_c2c<T: FftwFloat>(
    dimensions: &[usize],
    input: &mut [Complex<T>],
    output: &mut [Complex<T>],
    direction: Direction,
    flag: Flag,
) -> Result<Planned<T::C2C>> {
    let shape = fftw_shape(dimensions);
    let _guard = planner_lock();
    log::debug!("planning c2c {direction:?} transform of dimensions {dimensions:?}");
    let plan = <T::C2C as C2CPlan>::new(&shape, input, output, direction.sign(), flag)?;
    Ok(Planned { plan: Some(plan) })
}

/// Plans a real-to-complex transform over `dimensions`.
///
/// `output` holds the half spectrum, see
/// [`half_spectrum_dimensions`](crate::driver::half_spectrum_dimensions).
pub fn plan_r2c<T: FftwFloat>(
    dimensions: &[usize],
    input: &mut [T],
    output: &mut [Complex<T>],
    flag: Flag,
) -> Result<Planned<T::R2C>> {
    let shape = fftw_shape(dimensions);
    let _guard = planner_lock();
    log::debug!("planning r2c transform of dimensions {dimensions:?}");
    let plan = <T::R2C as R2CPlan>::new(&shape, input, output, flag)?;
    Ok(Planned { plan: Some(plan) })
}

/// Plans a complex-to-real transform over `dimensions`, taking a half spectrum.
pub fn plan_c2r<T: FftwFloat>(
    dimensions: &[usize],
    input: &mut [Complex<T>],
    output: &mut [T],
    flag: Flag,
) -> Result<Planned<T::C2R>> {
    let shape = fftw_shape(dimensions);
    let _guard = planner_lock();
    log::debug!("planning c2r transform of dimensions {dimensions:?}");
    let plan = <T::C2R as C2RPlan>::new(&shape, input, output, flag)?;
    Ok(Planned { plan: Some(plan) })
}
