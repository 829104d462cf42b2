//! Fixed-length vectors of arbitrary-precision numbers.

use std::ops::{Index, IndexMut};

use crate::traits::BigFloat;
use crate::types::{NumberError, Precision, RoundingMode};

/// Ordered sequence of numbers: a point in the domain or a residual in the
/// codomain of a nonlinear system.
///
/// The length is fixed once constructed. Element-wise operations assume both
/// operands have the same length; callers are responsible for checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    /// Number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the vector has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterator over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the vector and return its components.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T: BigFloat> Vector<T> {
    /// Vector of `len` zeros at `precision`.
    pub fn zeros(len: usize, precision: Precision) -> Self {
        Self {
            data: vec![T::zero(precision); len],
        }
    }

    /// Parse each decimal string at `precision`.
    ///
    /// # Example
    ///
    /// ```
    /// use mpsolve_core::math::linalg::Vector;
    /// use mpsolve_core::types::{MpFloat, Precision, RoundingMode};
    ///
    /// let p = Precision::new(128).unwrap();
    /// let guess: Vector<MpFloat> = Vector::parse(&["1.5", "1.5"], p, RoundingMode::Nearest).unwrap();
    /// assert_eq!(guess.to_f64_vec(), vec![1.5, 1.5]);
    /// ```
    pub fn parse<S: AsRef<str>>(
        values: &[S],
        precision: Precision,
        rounding: RoundingMode,
    ) -> Result<Self, NumberError> {
        values
            .iter()
            .map(|s| T::parse(s.as_ref(), precision, rounding))
            .collect()
    }

    /// Convert machine floats at `precision`.
    pub fn from_f64s(
        values: &[f64],
        precision: Precision,
        rounding: RoundingMode,
    ) -> Result<Self, NumberError> {
        values
            .iter()
            .map(|&v| T::from_f64(v, precision, rounding))
            .collect()
    }

    /// Component-wise `self + rhs`, each sum rounded.
    pub fn add(&self, rhs: &Self, rounding: RoundingMode) -> Self {
        debug_assert_eq!(self.len(), rhs.len());
        self.iter().zip(rhs.iter()).map(|(a, b)| a.add(b, rounding)).collect()
    }

    /// Component-wise `self - rhs`, each difference rounded.
    pub fn sub(&self, rhs: &Self, rounding: RoundingMode) -> Self {
        debug_assert_eq!(self.len(), rhs.len());
        self.iter().zip(rhs.iter()).map(|(a, b)| a.sub(b, rounding)).collect()
    }

    /// Exact component-wise negation.
    pub fn neg(&self) -> Self {
        self.iter().map(BigFloat::neg).collect()
    }

    /// Inner product, accumulated left to right with each operation rounded.
    pub fn dot(&self, rhs: &Self, rounding: RoundingMode) -> T {
        debug_assert_eq!(self.len(), rhs.len());
        let precision = self.precision().unwrap_or_default();
        self.iter()
            .zip(rhs.iter())
            .fold(T::zero(precision), |acc, (a, b)| {
                acc.add(&a.mul(b, rounding), rounding)
            })
    }

    /// Euclidean norm `sqrt(sum x_i^2)` at the precision of the components.
    ///
    /// # Errors
    ///
    /// Propagates the square-root error of the backend; a sum of squares is
    /// never negative, so this only fails for a misbehaving backend.
    pub fn euclidean_norm(&self, rounding: RoundingMode) -> Result<T, NumberError> {
        self.dot(self, rounding).sqrt(rounding)
    }

    /// Precision of the first component, or `None` for an empty vector.
    pub fn precision(&self) -> Option<Precision> {
        self.data.first().map(BigFloat::precision)
    }

    /// First component precision that differs from `expected`, if any.
    pub fn find_precision_mismatch(&self, expected: Precision) -> Option<Precision> {
        self.iter()
            .map(BigFloat::precision)
            .find(|&p| p != expected)
    }

    /// Nearest machine floats, for reporting.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter().map(BigFloat::to_f64).collect()
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}
