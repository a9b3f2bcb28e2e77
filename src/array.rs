//! Plain Rust containers that can feed and receive transforms directly.
//!
//! [`RowMajorArray`] stores N-dimensional data in the same layout as the
//! native buffers, [`NestedArray2D`] wraps the common `Vec<Vec<T>>` shape.
//! Both are [`RealSampler`]s and [`RealWriter`]s, so either can be paired into
//! complex data with [`RealSampler::combine_with`].
use crate::coords::CoordinateMapper;
use crate::error::{Error, Result};
use crate::sampler::{RealSampler, RealWriter};

/// Owned N-dimensional array, row-major with axis 0 fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMajorArray<T> {
    data: Vec<T>,
    mapper: CoordinateMapper,
}

impl<T: Copy + Default> RowMajorArray<T> {
    /// Allocates an array of default values (zeros for floats).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid dimensions.
    pub fn new(dimensions: &[usize]) -> Result<Self> {
        let mapper = CoordinateMapper::new(dimensions)?;
        Ok(Self {
            data: vec![T::default(); mapper.element_count()],
            mapper,
        })
    }
}

impl<T: Copy> RowMajorArray<T> {
    /// Wraps `data` laid out row-major over `dimensions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the dimensions are invalid or
    /// `data` does not hold exactly the number of elements they span.
    pub fn from_vec(dimensions: &[usize], data: Vec<T>) -> Result<Self> {
        let mapper = CoordinateMapper::new(dimensions)?;
        if data.len() != mapper.element_count() {
            return Err(Error::invalid(format!(
                "data of length {} does not match dimensions {dimensions:?} spanning {} elements",
                data.len(),
                mapper.element_count()
            )));
        }
        Ok(Self { data, mapper })
    }

    pub fn dimensions(&self) -> &[usize] {
        self.mapper.dimensions()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Reads the value at `coordinates`.
    ///
    /// # Errors
    ///
    /// Fails like [`CoordinateMapper::linear_index`].
    pub fn get(&self, coordinates: &[usize]) -> Result<T> {
        Ok(self.data[self.mapper.linear_index(coordinates)?])
    }

    /// Writes `value` at `coordinates`.
    pub fn set(&mut self, coordinates: &[usize], value: T) -> Result<()> {
        let index = self.mapper.linear_index(coordinates)?;
        self.data[index] = value;
        Ok(())
    }
}

impl<T: Copy> RealSampler<T> for RowMajorArray<T> {
    fn value_at(&self, coordinates: &[usize]) -> T {
        self.data[self.mapper.linear_index_unchecked(coordinates)]
    }
}

impl<T: Copy> RealWriter<T> for RowMajorArray<T> {
    fn set_value_at(&mut self, value: T, coordinates: &[usize]) {
        let index = self.mapper.linear_index_unchecked(coordinates);
        self.data[index] = value;
    }
}

/// Two-dimensional data as nested vectors.
///
/// Coordinate 0 selects the outer vector and coordinate 1 the element inside it,
/// so the dimensions are `[rows.len(), rows[0].len()]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedArray2D<T> {
    rows: Vec<Vec<T>>,
}

impl<T: Copy + Default> NestedArray2D<T> {
    /// `outer` vectors of `inner` default values each.
    pub fn new(outer: usize, inner: usize) -> Result<Self> {
        Self::from_rows(vec![vec![T::default(); inner]; outer])
    }
}

impl<T: Copy> NestedArray2D<T> {
    /// Wraps `rows`, which must be non-empty and rectangular.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let inner = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || inner == 0 {
            return Err(Error::invalid("nested array needs at least one element"));
        }
        if let Some(i) = rows.iter().position(|row| row.len() != inner) {
            return Err(Error::invalid(format!(
                "nested array is not rectangular: row {i} has {} elements, expected {inner}",
                rows[i].len()
            )));
        }
        Ok(Self { rows })
    }

    pub fn dimensions(&self) -> [usize; 2] {
        [self.rows.len(), self.rows[0].len()]
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.rows
    }
}

impl<T: Copy> RealSampler<T> for NestedArray2D<T> {
    fn value_at(&self, coordinates: &[usize]) -> T {
        self.rows[coordinates[0]][coordinates[1]]
    }
}

impl<T: Copy> RealWriter<T> for NestedArray2D<T> {
    fn set_value_at(&mut self, value: T, coordinates: &[usize]) {
        self.rows[coordinates[0]][coordinates[1]] = value;
    }
}
