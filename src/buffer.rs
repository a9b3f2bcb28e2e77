//! Fixed-length native buffers allocated through FFTW.
//!
//! A [`NativeBuffer`] owns exactly one FFTW-aligned allocation. Offsets are
//! flat, 0-based positions; use [`coords`](crate::coords) to get there from
//! N-dimensional coordinates.
//!
//! The allocation is freed when the buffer is dropped, or earlier through
//! [`NativeBuffer::release`]. Once released, every access fails with
//! [`Error::Released`] instead of touching freed memory.
//!
//! ```
//! use ezfft::buffer::NativeBuffer;
//!
//! let mut buf = NativeBuffer::<f64>::new(4)?;
//! buf.fill(0.0)?;
//! buf.set_range(1, 2, 0, &[10.0, 20.0])?;
//! assert_eq!(buf.to_vec()?, vec![0.0, 10.0, 20.0, 0.0]);
//! # Ok::<(), ezfft::Error>(())
//! ```
use fftw::array::AlignedVec;

use crate::error::{Error, Result};
use crate::precision::Element;
use crate::runtime::runtime;

/// A fixed-length, FFTW-aligned array of `T`.
///
/// Not internally synchronised: share a single buffer between threads only
/// behind your own lock. Distinct buffers are fully independent.
pub struct NativeBuffer<T: Element> {
    data: Option<AlignedVec<T>>,
    len: usize,
}

impl<T: Element> NativeBuffer<T> {
    /// Allocates a zeroed buffer of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `len` is 0 or the allocation would
    /// exceed `isize::MAX` bytes.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::invalid("provided length is not positive"));
        }
        match len.checked_mul(std::mem::size_of::<T>()) {
            Some(bytes) if bytes <= isize::MAX as usize => {}
            _ => {
                return Err(Error::invalid(format!(
                    "cannot allocate {len} elements of {} bytes each",
                    std::mem::size_of::<T>()
                )))
            }
        }
        let rt = runtime();
        let data = AlignedVec::new(len);
        rt.note_allocation();
        Ok(Self {
            data: Some(data),
            len,
        })
    }

    /// Allocates a buffer holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Result<Self> {
        let mut buf = Self::new(values.len())?;
        buf.set_slice(0, values)?;
        Ok(buf)
    }

    /// Number of elements, fixed at construction.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the allocation has already been released.
    pub fn is_released(&self) -> bool {
        self.data.is_none()
    }

    /// Writes `value` at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `offset >= len`, [`Error::Released`] after release.
    pub fn set(&mut self, offset: usize, value: T) -> Result<()> {
        self.check_span(offset, 1)?;
        self.as_mut_slice()?[offset] = value;
        Ok(())
    }

    /// Copies all of `values` into the buffer starting at `offset`.
    pub fn set_slice(&mut self, offset: usize, values: &[T]) -> Result<()> {
        self.set_range(offset, values.len(), 0, values)
    }

    /// Copies `count` elements of `values`, starting at `source_offset`, into the
    /// buffer starting at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `values` holds fewer than
    /// `source_offset + count` elements, [`Error::IndexOutOfRange`] if the
    /// destination span exceeds the buffer.
    pub fn set_range(
        &mut self,
        offset: usize,
        count: usize,
        source_offset: usize,
        values: &[T],
    ) -> Result<()> {
        let source = source_span(values.len(), source_offset, count, "read", "argument")?;
        self.check_span(offset, count)?;
        self.as_mut_slice()?[offset..offset + count].copy_from_slice(&values[source]);
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) -> Result<()> {
        for slot in self.as_mut_slice()?.iter_mut() {
            *slot = value;
        }
        Ok(())
    }

    /// Reads the element at `offset`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `offset >= len`, [`Error::Released`] after release.
    pub fn get(&self, offset: usize) -> Result<T> {
        self.check_span(offset, 1)?;
        Ok(self.as_slice()?[offset])
    }

    /// Fills `destination` with the elements starting at `offset`.
    pub fn get_into(&self, offset: usize, destination: &mut [T]) -> Result<()> {
        self.get_range(offset, destination.len(), 0, destination)
    }

    /// Copies `count` elements starting at `offset` into `destination`, starting
    /// at `destination_offset`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `destination` is too short,
    /// [`Error::IndexOutOfRange`] if the source span exceeds the buffer.
    pub fn get_range(
        &self,
        offset: usize,
        count: usize,
        destination_offset: usize,
        destination: &mut [T],
    ) -> Result<()> {
        let target = source_span(
            destination.len(),
            destination_offset,
            count,
            "write",
            "destination",
        )?;
        self.check_span(offset, count)?;
        destination[target].copy_from_slice(&self.as_slice()?[offset..offset + count]);
        Ok(())
    }

    /// Copies the whole buffer into a new `Vec`.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        Ok(self.as_slice()?.to_vec())
    }

    /// Frees the allocation now.
    ///
    /// Returns `true` if this call freed it, `false` if it was already gone.
    /// Calling it again is harmless.
    pub fn release(&mut self) -> bool {
        self.free(true)
    }

    pub(crate) fn as_slice(&self) -> Result<&[T]> {
        self.data.as_deref().ok_or(Error::Released)
    }

    pub(crate) fn as_mut_slice(&mut self) -> Result<&mut [T]> {
        self.data.as_deref_mut().ok_or(Error::Released)
    }

    fn check_span(&self, offset: usize, count: usize) -> Result<()> {
        if self.data.is_none() {
            return Err(Error::Released);
        }
        match offset.checked_add(count) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(Error::IndexOutOfRange {
                offset,
                count,
                len: self.len,
            }),
        }
    }

    fn free(&mut self, explicit: bool) -> bool {
        match self.data.take() {
            Some(data) => {
                drop(data);
                runtime().note_release(explicit);
                true
            }
            None => false,
        }
    }
}

impl<T: Element> Drop for NativeBuffer<T> {
    fn drop(&mut self) {
        if self.free(false) {
            log::trace!("native buffer of length {} released on drop", self.len);
        }
    }
}

impl<T: Element> std::fmt::Debug for NativeBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("len", &self.len)
            .field("released", &self.is_released())
            .finish()
    }
}

/// Range `offset..offset + count` of a caller slice of length `len`.
fn source_span(
    len: usize,
    offset: usize,
    count: usize,
    verb: &str,
    what: &str,
) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(Error::invalid(format!(
            "cannot {verb} {count} values starting from {offset}, {what} slice is only of length {len}"
        ))),
    }
}
