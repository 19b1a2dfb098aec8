//! Fixed-length per-node value vectors.
//!
//! Every physical quantity handled by the kernel is a `NodeBatch`: one value per
//! evaluation node, in the port's documented unit. Nodes never interact, so
//! batches can be sliced and concatenated freely.

use core::ops::{Deref, Index, IndexMut};

use crate::numeric::Real;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeBatch<T = Real>(Vec<T>);

impl<T> NodeBatch<T> {
    pub fn from_vec(values: Vec<T>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Clone> NodeBatch<T> {
    pub fn filled(len: usize, value: T) -> Self {
        Self(vec![value; len])
    }

    /// Append another batch, used to stitch chunked evaluations back together.
    pub fn extend_from(&mut self, other: &NodeBatch<T>) {
        self.0.extend_from_slice(&other.0);
    }
}

impl NodeBatch<Real> {
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }
}

impl<T> Deref for NodeBatch<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> Index<usize> for NodeBatch<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T> IndexMut<usize> for NodeBatch<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T> From<Vec<T>> for NodeBatch<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T: Clone> From<&[T]> for NodeBatch<T> {
    fn from(values: &[T]) -> Self {
        Self(values.to_vec())
    }
}

impl<T> FromIterator<T> for NodeBatch<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a NodeBatch<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_and_index() {
        let b = NodeBatch::filled(3, 2.5);
        assert_eq!(b.len(), 3);
        assert_eq!(b[1], 2.5);
        assert_eq!(b.as_slice(), &[2.5, 2.5, 2.5]);
    }

    #[test]
    fn extend_stitches_chunks() {
        let mut a: NodeBatch = vec![1.0, 2.0].into();
        let b: NodeBatch = vec![3.0].into();
        a.extend_from(&b);
        assert_eq!(a.into_vec(), vec![1.0, 2.0, 3.0]);
    }
}
