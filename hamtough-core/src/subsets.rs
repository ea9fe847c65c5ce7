//! Retained-set catalogs for the toughness test.
//!
//! A catalog holds, for one graph order, every vertex mask of each configured
//! size. Catalogs are built once per order and shared read-only afterwards.

use crate::{
    MAX_ORDER,
    error::{HamtoughError, Result},
    vertex_set::VertexSet,
};

/// Returns every mask over `0..order` with exactly `size` members.
///
/// Masks are produced in lexicographic order of their member indices, so for
/// `order = 4, size = 2` the sequence is `{0,1} {0,2} {0,3} {1,2} {1,3} {2,3}`.
/// `size > order` yields nothing, `size == 0` yields the empty mask, and
/// orders above [`MAX_ORDER`] yield nothing.
///
/// # Examples
/// ```
/// use hamtough_core::generate_subsets;
///
/// let masks = generate_subsets(4, 2);
/// assert_eq!(masks.len(), 6);
/// assert_eq!(masks[0].iter().collect::<Vec<_>>(), vec![0, 1]);
/// assert_eq!(masks[5].iter().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[must_use]
pub fn generate_subsets(order: usize, size: usize) -> Vec<VertexSet> {
    if size > order || order > MAX_ORDER {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..size).collect();
    let mut masks = Vec::new();
    loop {
        masks.push(VertexSet::from_vertices(order, indices.iter().copied()));
        let Some(pos) = (0..size).rev().find(|&i| indices[i] < order - size + i) else {
            break;
        };
        indices[pos] += 1;
        for next in (pos + 1)..size {
            indices[next] = indices[next - 1] + 1;
        }
    }
    masks
}

/// Retained-set sizes that suffice to decide toughness below 2 for the
/// supported orders.
///
/// # Errors
/// Returns [`HamtoughError::UnsupportedOrder`] for orders outside `5..=12`.
///
/// # Examples
/// ```
/// use hamtough_core::chosen_sizes;
///
/// assert_eq!(chosen_sizes(8)?, &[3, 5, 7]);
/// assert!(chosen_sizes(13).is_err());
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
pub fn chosen_sizes(order: usize) -> Result<&'static [usize]> {
    let sizes: &'static [usize] = match order {
        5 => &[2, 4],
        6 => &[3, 5],
        7 => &[4, 6],
        8 => &[3, 5, 7],
        9 => &[4, 6, 8],
        10 => &[5, 7, 9],
        11 => &[4, 6, 8, 10],
        12 => &[5, 7, 9, 11],
        _ => return Err(HamtoughError::UnsupportedOrder { order }),
    };
    Ok(sizes)
}

/// All masks of one retained-set size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    size: usize,
    masks: Vec<VertexSet>,
}

impl CatalogEntry {
    /// Number of retained vertices in each mask.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The masks, in [`generate_subsets`] order.
    #[must_use]
    pub fn masks(&self) -> &[VertexSet] {
        &self.masks
    }
}

/// Per-order list of retained-set masks grouped by size.
///
/// # Examples
/// ```
/// use hamtough_core::SubsetCatalog;
///
/// let catalog = SubsetCatalog::tuned(6)?;
/// let sizes: Vec<_> = catalog.entries().iter().map(|e| e.size()).collect();
/// assert_eq!(sizes, vec![3, 5]);
/// assert_eq!(catalog.mask_count(), 20 + 6);
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsetCatalog {
    order: usize,
    entries: Vec<CatalogEntry>,
}

impl SubsetCatalog {
    /// Catalog of the tuned sizes from [`chosen_sizes`].
    ///
    /// # Errors
    /// Returns [`HamtoughError::UnsupportedOrder`] when no table entry exists.
    pub fn tuned(order: usize) -> Result<Self> {
        let sizes = chosen_sizes(order)?;
        Self::with_sizes(order, sizes.iter().copied())
    }

    /// Catalog of every size in `2..order`.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderOutOfRange`] above [`MAX_ORDER`].
    pub fn exhaustive(order: usize) -> Result<Self> {
        Self::with_sizes(order, 2..order)
    }

    /// Catalog of an explicit list of sizes, kept in the given order. Sizes
    /// larger than `order` contribute empty entries.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderOutOfRange`] above [`MAX_ORDER`].
    pub fn with_sizes<I>(order: usize, sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        if order > MAX_ORDER {
            return Err(HamtoughError::OrderOutOfRange {
                order,
                max: MAX_ORDER,
            });
        }
        let entries = sizes
            .into_iter()
            .map(|size| CatalogEntry {
                size,
                masks: generate_subsets(order, size),
            })
            .collect();
        Ok(Self { order, entries })
    }

    /// Graph order the masks are drawn for.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Entries in scan order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Total number of masks across every entry.
    #[must_use]
    pub fn mask_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.masks.len()).sum()
    }

    /// Iterates over every mask in scan order.
    pub fn masks(&self) -> impl Iterator<Item = VertexSet> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| entry.masks.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::rstest;

    use super::*;

    fn binomial(n: usize, k: usize) -> usize {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn generate_subsets_is_exhaustive_for_small_orders() {
        for order in 0..=12 {
            for size in 0..=order {
                let masks = generate_subsets(order, size);
                assert_eq!(masks.len(), binomial(order, size), "C({order}, {size})");
                let unique: BTreeSet<u64> = masks.iter().map(VertexSet::bits).collect();
                assert_eq!(unique.len(), masks.len());
                assert!(masks.iter().all(|mask| mask.count() == size));
                let members: Vec<Vec<usize>> =
                    masks.iter().map(|mask| mask.iter().collect()).collect();
                assert!(members.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }

    #[rstest]
    #[case(3, 4)]
    #[case(0, 1)]
    fn generate_subsets_beyond_order_is_empty(#[case] order: usize, #[case] size: usize) {
        assert!(generate_subsets(order, size).is_empty());
    }

    #[test]
    fn zero_size_yields_the_empty_mask() {
        let masks = generate_subsets(5, 0);
        assert_eq!(masks, vec![VertexSet::empty(5)]);
    }

    #[rstest]
    #[case(5, &[2, 4])]
    #[case(9, &[4, 6, 8])]
    #[case(12, &[5, 7, 9, 11])]
    fn chosen_sizes_reads_the_table(#[case] order: usize, #[case] expected: &[usize]) {
        assert_eq!(chosen_sizes(order).expect("order is tabled"), expected);
    }

    #[rstest]
    #[case(4)]
    #[case(13)]
    fn chosen_sizes_rejects_untabled_orders(#[case] order: usize) {
        assert_eq!(
            chosen_sizes(order),
            Err(HamtoughError::UnsupportedOrder { order })
        );
        assert!(SubsetCatalog::tuned(order).is_err());
    }

    #[test]
    fn exhaustive_catalog_covers_two_to_order_minus_one() {
        let catalog = SubsetCatalog::exhaustive(6).expect("order 6 fits");
        let sizes: Vec<_> = catalog.entries().iter().map(CatalogEntry::size).collect();
        assert_eq!(sizes, vec![2, 3, 4, 5]);
        assert_eq!(catalog.mask_count(), 15 + 20 + 15 + 6);
        assert_eq!(catalog.masks().count(), catalog.mask_count());
    }

    #[test]
    fn with_sizes_rejects_oversized_orders() {
        let err = SubsetCatalog::with_sizes(MAX_ORDER + 1, [2]).expect_err("order 63 too large");
        assert_eq!(err.code().as_str(), "HAMTOUGH_ORDER_OUT_OF_RANGE");
    }
}
