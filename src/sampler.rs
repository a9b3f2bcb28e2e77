//! Samplers read input values per coordinate, writers store results per coordinate.
//!
//! Any closure with the right signature is a sampler or writer:
//!
//! ```
//! use ezfft::sampler::{ComplexWriter, RealSampler};
//!
//! let ramp = |coords: &[usize]| (coords[0] + 10 * coords[1]) as f64;
//! assert_eq!(ramp.value_at(&[3, 2]), 23.0);
//!
//! let mut stored = Vec::new();
//! let mut sink = |value: f64, imaginary: bool, coords: &[usize]| {
//!     stored.push((value, imaginary, coords.to_vec()))
//! };
//! sink.set_value_at(1.5, true, &[0]);
//! assert_eq!(stored, vec![(1.5, true, vec![0])]);
//! ```

/// Provides one real value per coordinate vector.
pub trait RealSampler<T> {
    fn value_at(&self, coordinates: &[usize]) -> T;

    /// Pairs this sampler (real part) with `imaginary` into a complex sampler.
    fn combine_with<I>(self, imaginary: I) -> Combined<Self, I>
    where
        Self: Sized,
        I: RealSampler<T>,
    {
        Combined {
            real: self,
            imaginary,
        }
    }
}

/// Provides the real and imaginary part per coordinate vector.
pub trait ComplexSampler<T> {
    fn value_at(&self, imaginary: bool, coordinates: &[usize]) -> T;

    /// A sampler that reports the real part as imaginary and vice versa.
    fn swapped(&self) -> Swapped<&Self> {
        Swapped(self)
    }

    /// A real sampler reading only one part of this sampler.
    fn part(&self, imaginary: bool) -> Part<&Self> {
        Part {
            inner: self,
            imaginary,
        }
    }
}

/// Stores one real value per coordinate vector.
pub trait RealWriter<T> {
    fn set_value_at(&mut self, value: T, coordinates: &[usize]);

    /// Pairs this writer (real part) with `imaginary` into a complex writer.
    fn combine_writer_with<I>(self, imaginary: I) -> Combined<Self, I>
    where
        Self: Sized,
        I: RealWriter<T>,
    {
        Combined {
            real: self,
            imaginary,
        }
    }
}

/// Stores the real and imaginary part per coordinate vector.
pub trait ComplexWriter<T> {
    fn set_value_at(&mut self, value: T, imaginary: bool, coordinates: &[usize]);

    /// A writer that stores real parts as imaginary and vice versa.
    fn swapped_mut(&mut self) -> Swapped<&mut Self> {
        Swapped(self)
    }

    /// A real writer storing into only one part of this writer.
    fn part_mut(&mut self, imaginary: bool) -> Part<&mut Self> {
        Part {
            inner: self,
            imaginary,
        }
    }
}

impl<T, F: Fn(&[usize]) -> T> RealSampler<T> for F {
    fn value_at(&self, coordinates: &[usize]) -> T {
        self(coordinates)
    }
}

impl<T, F: Fn(bool, &[usize]) -> T> ComplexSampler<T> for F {
    fn value_at(&self, imaginary: bool, coordinates: &[usize]) -> T {
        self(imaginary, coordinates)
    }
}

impl<T, F: FnMut(T, &[usize])> RealWriter<T> for F {
    fn set_value_at(&mut self, value: T, coordinates: &[usize]) {
        self(value, coordinates)
    }
}

impl<T, F: FnMut(T, bool, &[usize])> ComplexWriter<T> for F {
    fn set_value_at(&mut self, value: T, imaginary: bool, coordinates: &[usize]) {
        self(value, imaginary, coordinates)
    }
}

/// Two real samplers or writers acting as one complex sampler or writer.
#[derive(Debug, Clone)]
pub struct Combined<R, I> {
    pub real: R,
    pub imaginary: I,
}

impl<T, R: RealSampler<T>, I: RealSampler<T>> ComplexSampler<T> for Combined<R, I> {
    fn value_at(&self, imaginary: bool, coordinates: &[usize]) -> T {
        if imaginary {
            self.imaginary.value_at(coordinates)
        } else {
            self.real.value_at(coordinates)
        }
    }
}

impl<T, R: RealWriter<T>, I: RealWriter<T>> ComplexWriter<T> for Combined<R, I> {
    fn set_value_at(&mut self, value: T, imaginary: bool, coordinates: &[usize]) {
        if imaginary {
            self.imaginary.set_value_at(value, coordinates)
        } else {
            self.real.set_value_at(value, coordinates)
        }
    }
}

/// Complex sampler or writer with real and imaginary parts exchanged.
#[derive(Debug, Clone, Copy)]
pub struct Swapped<S>(pub S);

impl<T, S: ComplexSampler<T> + ?Sized> ComplexSampler<T> for Swapped<&S> {
    fn value_at(&self, imaginary: bool, coordinates: &[usize]) -> T {
        self.0.value_at(!imaginary, coordinates)
    }
}

impl<T, W: ComplexWriter<T> + ?Sized> ComplexWriter<T> for Swapped<&mut W> {
    fn set_value_at(&mut self, value: T, imaginary: bool, coordinates: &[usize]) {
        self.0.set_value_at(value, !imaginary, coordinates)
    }
}

/// One part of a complex sampler or writer, seen as a real one.
#[derive(Debug, Clone, Copy)]
pub struct Part<S> {
    inner: S,
    imaginary: bool,
}

impl<T, S: ComplexSampler<T> + ?Sized> RealSampler<T> for Part<&S> {
    fn value_at(&self, coordinates: &[usize]) -> T {
        self.inner.value_at(self.imaginary, coordinates)
    }
}

impl<T, W: ComplexWriter<T> + ?Sized> RealWriter<T> for Part<&mut W> {
    fn set_value_at(&mut self, value: T, coordinates: &[usize]) {
        self.inner.set_value_at(value, self.imaginary, coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complex_ramp(imaginary: bool, coords: &[usize]) -> f64 {
        let base = coords[0] as f64;
        if imaginary {
            -base
        } else {
            base
        }
    }

    #[test]
    fn combined_sampler_dispatches_by_part() {
        let re = |c: &[usize]| c[0] as f64;
        let im = |c: &[usize]| 100.0 + c[0] as f64;
        let complex = re.combine_with(im);
        assert_eq!(complex.value_at(false, &[3]), 3.0);
        assert_eq!(complex.value_at(true, &[3]), 103.0);
    }

    #[test]
    fn swapped_and_part_samplers() {
        let sampler = complex_ramp;
        assert_eq!(sampler.swapped().value_at(true, &[2]), 2.0);
        assert_eq!(sampler.swapped().value_at(false, &[2]), -2.0);
        assert_eq!(sampler.part(true).value_at(&[4]), -4.0);
        assert_eq!(sampler.part(false).value_at(&[4]), 4.0);
    }

    #[test]
    fn combined_writer_routes_parts() {
        let mut reals = vec![0.0; 3];
        let mut imags = vec![0.0; 3];
        {
            let mut writer = (|v: f64, c: &[usize]| reals[c[0]] = v)
                .combine_writer_with(|v: f64, c: &[usize]| imags[c[0]] = v);
            writer.set_value_at(1.0, false, &[0]);
            writer.set_value_at(2.0, true, &[2]);
            writer.swapped_mut().set_value_at(3.0, false, &[1]);
            writer.part_mut(false).set_value_at(4.0, &[1]);
        }
        assert_eq!(reals, vec![1.0, 4.0, 0.0]);
        assert_eq!(imags, vec![0.0, 3.0, 2.0]);
    }
}
