//! Element and precision traits tying `f32`/`f64` to the matching FFTW plans.
use std::fmt::Debug;

use fftw::array::AlignedAllocable;
use fftw::plan::{
    C2CPlan, C2CPlan32, C2CPlan64, C2RPlan, C2RPlan32, C2RPlan64, R2CPlan, R2CPlan32, R2CPlan64,
};
use num_complex::Complex;
use num_traits::{Float, Zero};

mod sealed {
    pub trait Sealed {}
}

/// A value that can live in a [`NativeBuffer`](crate::buffer::NativeBuffer).
///
/// Implemented for `f32`, `f64` and their complex counterparts.
pub trait Element:
    AlignedAllocable + Zero + Copy + Debug + PartialEq + Send + Sync + sealed::Sealed + 'static
{
}

/// A floating point precision supported by FFTW.
pub trait FftwFloat: Element + Float + bytemuck::Pod {
    /// Complex-to-complex plan of this precision.
    type C2C: C2CPlan<Complex = Complex<Self>>;
    /// Real-to-complex plan of this precision.
    type R2C: R2CPlan<Real = Self, Complex = Complex<Self>>;
    /// Complex-to-real plan of this precision.
    type C2R: C2RPlan<Real = Self, Complex = Complex<Self>>;
}

macro_rules! impl_precision {
    ($precision:ty, $c2c:ty, $r2c:ty, $c2r:ty) => {
        impl sealed::Sealed for $precision {}
        impl sealed::Sealed for Complex<$precision> {}
        impl Element for $precision {}
        impl Element for Complex<$precision> {}

        impl FftwFloat for $precision {
            type C2C = $c2c;
            type R2C = $r2c;
            type C2R = $c2r;
        }
    };
}

impl_precision!(f64, C2CPlan64, R2CPlan64, C2RPlan64);
impl_precision!(f32, C2CPlan32, R2CPlan32, C2RPlan32);
