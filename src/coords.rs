//! Mapping between N-dimensional coordinates and flat row-major offsets.
//!
//! Axis 0 varies fastest: for dimensions `[16, 8, 4]` the coordinates `[3, 0, 2]`
//! live at offset `3 + 0 * 16 + 2 * 16 * 8 = 259`.
//!
//! Enumerating a coordinate space follows the odometer idiom:
//!
//! ```
//! use ezfft::coords::{increment_coordinates, is_terminal, linear_index_unchecked};
//!
//! let dims = [5, 2];
//! let mut coords = vec![0; dims.len()];
//! let mut visited = Vec::new();
//! while !is_terminal(&coords, &dims) {
//!     visited.push(linear_index_unchecked(&coords, &dims));
//!     increment_coordinates(&mut coords, &dims);
//! }
//! assert_eq!(visited, (0..10).collect::<Vec<_>>());
//! assert_eq!(coords, [0, 2]);
//! ```
use crate::error::{Error, Result};

/// Number of elements in the space spanned by `dimensions`.
///
/// Returns 0 for an empty dimension vector. No validation is performed, see
/// [`checked_element_count`] for the validating variant.
pub fn element_count(dimensions: &[usize]) -> usize {
    if dimensions.is_empty() {
        return 0;
    }
    dimensions.iter().product()
}

/// Validates `dimensions` and returns the number of elements they span.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the dimensions are empty, contain a zero
/// extent, or the element count does not fit into `usize`.
pub fn checked_element_count(dimensions: &[usize]) -> Result<usize> {
    validate_dimensions(dimensions)?;
    dimensions.iter().try_fold(1usize, |acc, &d| {
        acc.checked_mul(d).ok_or_else(|| {
            Error::invalid(format!(
                "number of elements for dimensions {dimensions:?} overflows usize"
            ))
        })
    })
}

/// Checks that there is at least one dimension and that every extent is positive.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the first offending axis.
pub fn validate_dimensions(dimensions: &[usize]) -> Result<()> {
    if dimensions.is_empty() {
        return Err(Error::invalid(
            "provided dimensions are empty, need to pass at least one",
        ));
    }
    match dimensions.iter().position(|&d| d == 0) {
        Some(axis) => Err(Error::invalid(format!(
            "all dimensions need to be positive, but dimension number {axis} is {}",
            dimensions[axis]
        ))),
        None => Ok(()),
    }
}

/// Row-major offset of `coordinates`, with every component checked.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the two vectors differ in length and
/// [`Error::IndexOutOfRange`] if a component is not below its extent.
pub fn linear_index(coordinates: &[usize], dimensions: &[usize]) -> Result<usize> {
    if coordinates.len() != dimensions.len() {
        return Err(Error::invalid(format!(
            "got {} coordinates for {} dimensions",
            coordinates.len(),
            dimensions.len()
        )));
    }
    if let Some((&c, &d)) = coordinates
        .iter()
        .zip(dimensions.iter())
        .find(|&(&c, &d)| c >= d)
    {
        return Err(Error::IndexOutOfRange {
            offset: c,
            count: 1,
            len: d,
        });
    }
    Ok(linear_index_unchecked(coordinates, dimensions))
}

/// Row-major offset of `coordinates` without range checks.
///
/// This is the hot path used while filling and draining buffers. The caller
/// guarantees that both slices have the same length and that every component is
/// below its extent; otherwise the result is meaningless (it is still only ever
/// used to index safe slices). Debug builds assert the contract.
#[inline]
pub fn linear_index_unchecked(coordinates: &[usize], dimensions: &[usize]) -> usize {
    debug_assert_eq!(coordinates.len(), dimensions.len());
    let mut index = 0;
    let mut stride = 1;
    for (&c, &d) in coordinates.iter().zip(dimensions.iter()) {
        debug_assert!(c < d, "coordinate {c} out of range for extent {d}");
        index += c * stride;
        stride *= d;
    }
    index
}

/// Advances `coordinates` by one step in row-major order.
///
/// Axis 0 is incremented first; an axis that reaches its extent wraps to 0 and
/// carries into the next one. The last axis never wraps: once it overflows it
/// stays equal to its extent, which is the terminal state checked by
/// [`is_terminal`].
///
/// For dimensions `[2, 2, 2, 2]` this counts like a 4-bit binary number.
///
/// # Panics
///
/// Panics if `coordinates` is shorter than `dimensions`.
pub fn increment_coordinates(coordinates: &mut [usize], dimensions: &[usize]) {
    debug_assert_eq!(coordinates.len(), dimensions.len());
    let Some(last) = dimensions.len().checked_sub(1) else {
        return;
    };
    for axis in 0..=last {
        coordinates[axis] += 1;
        if coordinates[axis] < dimensions[axis] {
            return;
        }
        if axis == last {
            coordinates[axis] = dimensions[axis];
        } else {
            coordinates[axis] = 0;
        }
    }
}

/// Whether `coordinates` is the terminal state of an enumeration over `dimensions`.
#[inline]
pub fn is_terminal(coordinates: &[usize], dimensions: &[usize]) -> bool {
    match (coordinates.last(), dimensions.last()) {
        (Some(c), Some(d)) => c >= d,
        _ => true,
    }
}

/// Inverse of [`linear_index`]: the coordinates stored at `index`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for invalid dimensions and
/// [`Error::IndexOutOfRange`] if `index` is not below the element count.
pub fn coordinates_from_index(index: usize, dimensions: &[usize]) -> Result<Vec<usize>> {
    let len = checked_element_count(dimensions)?;
    if index >= len {
        return Err(Error::IndexOutOfRange {
            offset: index,
            count: 1,
            len,
        });
    }
    let mut rest = index;
    Ok(dimensions
        .iter()
        .map(|&d| {
            let c = rest % d;
            rest /= d;
            c
        })
        .collect())
}

/// A validated dimension vector with precomputed strides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateMapper {
    dimensions: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
}

impl CoordinateMapper {
    /// Binds a mapper to `dimensions`.
    ///
    /// # Errors
    ///
    /// Fails like [`checked_element_count`].
    pub fn new(dimensions: &[usize]) -> Result<Self> {
        let len = checked_element_count(dimensions)?;
        let strides = dimensions
            .iter()
            .scan(1, |stride, &d| {
                let current = *stride;
                *stride *= d;
                Some(current)
            })
            .collect();
        Ok(Self {
            dimensions: dimensions.to_vec(),
            strides,
            len,
        })
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn element_count(&self) -> usize {
        self.len
    }

    /// Checked offset of `coordinates`, see [`linear_index`].
    pub fn linear_index(&self, coordinates: &[usize]) -> Result<usize> {
        linear_index(coordinates, &self.dimensions)
    }

    /// Unchecked offset of `coordinates`, see [`linear_index_unchecked`].
    #[inline]
    pub fn linear_index_unchecked(&self, coordinates: &[usize]) -> usize {
        debug_assert_eq!(coordinates.len(), self.strides.len());
        coordinates
            .iter()
            .zip(self.strides.iter())
            .map(|(c, s)| c * s)
            .sum()
    }

    pub fn coordinates_from_index(&self, index: usize) -> Result<Vec<usize>> {
        coordinates_from_index(index, &self.dimensions)
    }

    pub fn increment(&self, coordinates: &mut [usize]) {
        increment_coordinates(coordinates, &self.dimensions)
    }

    pub fn is_terminal(&self, coordinates: &[usize]) -> bool {
        is_terminal(coordinates, &self.dimensions)
    }

    /// Iterates over every coordinate vector in row-major order.
    pub fn coordinates(&self) -> Coordinates<'_> {
        Coordinates {
            dimensions: &self.dimensions,
            current: vec![0; self.dimensions.len()],
        }
    }
}

/// Iterator over a coordinate space, see [`CoordinateMapper::coordinates`].
#[derive(Debug, Clone)]
pub struct Coordinates<'a> {
    dimensions: &'a [usize],
    current: Vec<usize>,
}

impl Iterator for Coordinates<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if is_terminal(&self.current, self.dimensions) {
            return None;
        }
        let item = self.current.clone();
        increment_coordinates(&mut self.current, self.dimensions);
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_count_of_empty_is_zero() {
        assert_eq!(element_count(&[]), 0);
        assert_eq!(element_count(&[16, 8, 4]), 512);
    }

    #[test]
    fn validation_reports_offending_axis() {
        let err = validate_dimensions(&[4, 0, 2]).unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("dimension number 1"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            validate_dimensions(&[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(validate_dimensions(&[1]).is_ok());
    }

    #[test]
    fn checked_element_count_detects_overflow() {
        assert!(matches!(
            checked_element_count(&[usize::MAX, 2]),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(checked_element_count(&[3, 7]).unwrap(), 21);
    }

    #[test]
    fn linear_index_of_5x2() {
        let dims = [5, 2];
        assert_eq!(linear_index(&[3, 0], &dims).unwrap(), 3);
        assert_eq!(linear_index(&[0, 1], &dims).unwrap(), 5);
        assert_eq!(linear_index(&[4, 1], &dims).unwrap(), 9);
        assert_eq!(linear_index(&[3, 0, 2], &[16, 8, 4]).unwrap(), 259);
    }

    #[test]
    fn checked_linear_index_rejects_bad_coordinates() {
        assert!(matches!(
            linear_index(&[5, 0], &[5, 2]),
            Err(Error::IndexOutOfRange { offset: 5, len: 5, .. })
        ));
        assert!(matches!(
            linear_index(&[1], &[5, 2]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn increment_5x2_reaches_terminal_after_ten_steps() {
        let dims = [5, 2];
        let mut coords = [0, 0];
        for _ in 0..9 {
            increment_coordinates(&mut coords, &dims);
        }
        assert_eq!(coords, [4, 1]);
        assert!(!is_terminal(&coords, &dims));

        increment_coordinates(&mut coords, &dims);
        assert_eq!(coords, [0, 2]);
        assert!(is_terminal(&coords, &dims));
    }

    #[test]
    fn increment_counts_like_binary() {
        let dims = [2, 2, 2, 2];
        let mut coords = [0; 4];
        for n in 0..16usize {
            let bits: Vec<usize> = (0..4).map(|b| (n >> b) & 1).collect();
            assert_eq!(coords.to_vec(), bits);
            increment_coordinates(&mut coords, &dims);
        }
        assert_eq!(coords, [0, 0, 0, 2]);
    }

    #[test]
    #[should_panic]
    fn increment_with_short_coordinates_panics() {
        let mut coords = [1];
        increment_coordinates(&mut coords, &[2, 2]);
    }

    #[test]
    fn single_dimension_clamps_at_extent() {
        let mut coords = [2];
        increment_coordinates(&mut coords, &[3]);
        assert_eq!(coords, [3]);
    }

    #[test]
    fn mapper_strides_and_inverse() {
        let mapper = CoordinateMapper::new(&[16, 8, 4]).unwrap();
        assert_eq!(mapper.strides(), &[1, 16, 128]);
        assert_eq!(mapper.element_count(), 512);
        assert_eq!(mapper.coordinates_from_index(259).unwrap(), vec![3, 0, 2]);
        assert_eq!(mapper.linear_index_unchecked(&[3, 0, 2]), 259);
        assert!(matches!(
            mapper.coordinates_from_index(512),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn mapper_rejects_invalid_dimensions() {
        assert!(CoordinateMapper::new(&[]).is_err());
        assert!(CoordinateMapper::new(&[3, 0]).is_err());
    }

    #[test]
    fn coordinates_iterator_visits_row_major_order() {
        let mapper = CoordinateMapper::new(&[3, 2]).unwrap();
        let all: Vec<Vec<usize>> = mapper.coordinates().collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![1, 0],
                vec![2, 0],
                vec![0, 1],
                vec![1, 1],
                vec![2, 1]
            ]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn dims_strategy() -> impl Strategy<Value = Vec<usize>> {
            prop::collection::vec(1usize..6, 1..=4)
        }

        proptest! {
            #[test]
            fn enumeration_yields_consecutive_indices(dims in dims_strategy()) {
                let n = element_count(&dims);
                let mut coords = vec![0; dims.len()];
                let mut expected = 0;
                while !is_terminal(&coords, &dims) {
                    prop_assert_eq!(linear_index(&coords, &dims).unwrap(), expected);
                    expected += 1;
                    increment_coordinates(&mut coords, &dims);
                }
                prop_assert_eq!(expected, n);
                prop_assert_eq!(coords[dims.len() - 1], dims[dims.len() - 1]);
            }

            #[test]
            fn linear_index_is_injective(dims in dims_strategy()) {
                let mapper = CoordinateMapper::new(&dims).unwrap();
                let mut seen = vec![false; mapper.element_count()];
                for coords in mapper.coordinates() {
                    let index = mapper.linear_index(&coords).unwrap();
                    prop_assert!(index < seen.len());
                    prop_assert!(!seen[index]);
                    seen[index] = true;
                }
                prop_assert!(seen.iter().all(|&s| s));
            }

            #[test]
            fn inverse_mapping_round_trips(dims in dims_strategy(), seed in any::<usize>()) {
                let n = element_count(&dims);
                let index = seed % n;
                let coords = coordinates_from_index(index, &dims).unwrap();
                prop_assert_eq!(linear_index(&coords, &dims).unwrap(), index);
            }
        }
    }
}
