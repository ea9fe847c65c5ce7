//! Fixed-universe vertex masks and normalised vertex pairs.
//!
//! Every graph in this crate has at most [`MAX_ORDER`](crate::MAX_ORDER)
//! vertices, so a set of vertices fits in one `u64`.

use std::fmt;

/// Returns a mask with the lowest `n` bits set.
#[inline]
pub(crate) const fn low_bits(n: usize) -> u64 {
    if n >= 64 { u64::MAX } else { (1_u64 << n) - 1 }
}

/// Returns the single-bit mask for vertex `v`.
#[inline]
pub(crate) const fn bit(v: usize) -> u64 {
    1_u64 << v
}

/// A set of vertices drawn from the universe `0..universe`.
///
/// In the toughness test a `VertexSet` marks the *retained* vertices; the
/// complement is the candidate cut.
///
/// # Examples
/// ```
/// use hamtough_core::VertexSet;
///
/// let set = VertexSet::from_vertices(5, [0, 3]);
/// assert_eq!(set.count(), 2);
/// assert!(set.contains(3));
/// assert_eq!(set.complement().iter().collect::<Vec<_>>(), vec![1, 2, 4]);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct VertexSet {
    bits: u64,
    universe: usize,
}

impl VertexSet {
    /// Creates the empty set over `0..universe`.
    #[must_use]
    pub const fn empty(universe: usize) -> Self {
        Self { bits: 0, universe }
    }

    /// Creates the set containing every vertex of `0..universe`.
    #[must_use]
    pub const fn full(universe: usize) -> Self {
        Self {
            bits: low_bits(universe),
            universe,
        }
    }

    /// Creates a set from raw bits, discarding bits outside the universe.
    #[must_use]
    pub const fn from_bits(universe: usize, bits: u64) -> Self {
        Self {
            bits: bits & low_bits(universe),
            universe,
        }
    }

    /// Creates a set from an iterator of vertices. Vertices outside the
    /// universe are ignored.
    #[must_use]
    pub fn from_vertices<I>(universe: usize, vertices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::empty(universe);
        for v in vertices {
            set.insert(v);
        }
        set
    }

    /// Number of vertices in the set.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` when the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns whether `v` is a member.
    #[must_use]
    pub const fn contains(&self, v: usize) -> bool {
        v < self.universe && self.bits & bit(v) != 0
    }

    /// Adds `v` to the set. Returns `false` when `v` lies outside the universe.
    pub fn insert(&mut self, v: usize) -> bool {
        if v >= self.universe {
            return false;
        }
        self.bits |= bit(v);
        true
    }

    /// Removes `v` from the set.
    pub fn remove(&mut self, v: usize) {
        if v < self.universe {
            self.bits &= !bit(v);
        }
    }

    /// The vertices of the universe not in this set.
    #[must_use]
    pub const fn complement(&self) -> Self {
        Self {
            bits: !self.bits & low_bits(self.universe),
            universe: self.universe,
        }
    }

    /// Iterates over members in ascending order.
    pub fn iter(&self) -> VertexIter {
        VertexIter { bits: self.bits }
    }

    /// Raw membership bits.
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Size of the universe the set is drawn from.
    #[must_use]
    pub const fn universe(&self) -> usize {
        self.universe
    }
}

impl IntoIterator for VertexSet {
    type Item = usize;
    type IntoIter = VertexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, v) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}

/// Ascending iterator over the members of a [`VertexSet`].
#[derive(Clone, Debug)]
pub struct VertexIter {
    bits: u64,
}

impl Iterator for VertexIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let v = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for VertexIter {}

/// An unordered vertex pair normalised so that `low() < high()`.
///
/// # Examples
/// ```
/// use hamtough_core::VertexPair;
///
/// let pair = VertexPair::new(4, 1);
/// assert_eq!((pair.low(), pair.high()), (1, 4));
/// assert_eq!(pair, VertexPair::new(1, 4));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct VertexPair {
    low: usize,
    high: usize,
}

impl VertexPair {
    /// Normalises `(a, b)` into a pair.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "a vertex pair needs two distinct endpoints");
        if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn low(&self) -> usize {
        self.low
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn high(&self) -> usize {
        self.high
    }

    /// Iterates over every pair `p1 < p2` of `0..order` in lexicographic order.
    pub fn all(order: usize) -> impl Iterator<Item = Self> {
        (0..order).flat_map(move |low| (low + 1..order).map(move |high| Self { low, high }))
    }
}

impl fmt::Display for VertexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.low, self.high)
    }
}
