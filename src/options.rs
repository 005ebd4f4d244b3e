//! Mesh generation options

use crate::{MeshError, Result};

/// Mesh generation options
///
/// ```
/// use hermite_mesh::Options;
///
/// let options = Options::default()
///     .use_cross_derivatives(true)
///     .elements_count(2, 1, 3);
/// assert_eq!(options.number_of_nodes(), 3 * 2 * 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Cross derivatives (`d2/ds1ds2`, `d2/ds1ds3`, `d2/ds2ds3`, `d3/ds1ds2ds3`) are nodal parameters
    pub use_cross_derivatives: bool,
    /// Number of elements along xi1, xi2 and xi3
    pub elements_count: [usize; 3],
}
impl Default for Options {
    fn default() -> Self {
        Self {
            use_cross_derivatives: false,
            elements_count: [1; 3],
        }
    }
}
impl Options {
    /// Sets whether the nodes carry cross derivatives
    pub fn use_cross_derivatives(self, use_cross_derivatives: bool) -> Self {
        Self {
            use_cross_derivatives,
            ..self
        }
    }
    /// Sets the number of elements along xi1, xi2 and xi3
    pub fn elements_count(self, n1: usize, n2: usize, n3: usize) -> Self {
        Self {
            elements_count: [n1, n2, n3],
            ..self
        }
    }
    /// Number of quantities (value and derivatives) per node and per coordinate
    pub fn quantities_count(&self) -> usize {
        if self.use_cross_derivatives {
            8
        } else {
            4
        }
    }
    /// Length of a node parameters record
    pub fn record_len(&self) -> usize {
        3 * self.quantities_count()
    }
    /// Number of nodes of the grid
    ///
    /// Saturates at `usize::MAX`
    pub fn number_of_nodes(&self) -> usize {
        self.checked_number_of_nodes().unwrap_or(usize::MAX)
    }
    fn checked_number_of_nodes(&self) -> Option<usize> {
        self.elements_count
            .iter()
            .try_fold(1usize, |a, n| n.checked_add(1).and_then(|n| a.checked_mul(n)))
    }
    /// Number of elements of the grid
    ///
    /// Saturates at `usize::MAX`
    pub fn number_of_elements(&self) -> usize {
        self.elements_count
            .iter()
            .fold(1usize, |a, &n| a.saturating_mul(n))
    }
    /// Checks that there is at least one element along each direction
    /// and that the node identifiers fit in `u32`
    pub fn validate(&self) -> Result<()> {
        let too_many_nodes = self
            .checked_number_of_nodes()
            .map_or(true, |n| n > u32::MAX as usize);
        if self.elements_count.contains(&0) || too_many_nodes {
            Err(MeshError::ElementsCount(self.elements_count))
        } else {
            Ok(())
        }
    }
}
