//! Element field templates
//!
//! An element field template maps each tricubic Hermite basis function to a sum of terms,
//! each term being a nodal parameter of one of the element local nodes.
//! A function with zero terms does not contribute to the interpolation.

use crate::{
    basis::{TricubicHermiteBasis, FUNCTIONS_COUNT, NODES_COUNT, SLOTS_COUNT},
    Mesh, MeshError, Result, ValueLabel,
};
use std::collections::HashSet;

/// Mapping of a function term to a local node parameter
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    /// 0-based local node index
    pub local_node: usize,
    pub label: ValueLabel,
}

/// Element field template
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFieldTemplate {
    basis: TricubicHermiteBasis,
    functions: Vec<Vec<Option<Term>>>,
}
impl ElementFieldTemplate {
    /// Creates the template with a 1:1 mapping of the basis functions to the node parameters
    pub fn new(basis: TricubicHermiteBasis) -> Self {
        let functions = (0..basis.number_of_functions())
            .map(|f| {
                let (local_node, slot) = basis.function_node_slot(f);
                vec![ValueLabel::from_slot(slot).map(|label| Term { local_node, label })]
            })
            .collect();
        Self { basis, functions }
    }
    pub fn basis(&self) -> &TricubicHermiteBasis {
        &self.basis
    }
    pub fn number_of_functions(&self) -> usize {
        self.functions.len()
    }
    fn function_mut(&mut self, function: usize) -> Result<&mut Vec<Option<Term>>> {
        function
            .checked_sub(1)
            .and_then(|f| self.functions.get_mut(f))
            .ok_or_else(|| {
                MeshError::TemplateValidation(format!("function #{function} out of range"))
            })
    }
    /// Gets the number of terms of a function (1-based)
    pub fn function_number_of_terms(&self, function: usize) -> Option<usize> {
        function
            .checked_sub(1)
            .and_then(|f| self.functions.get(f))
            .map(|terms| terms.len())
    }
    /// Sets the number of terms of a function (1-based)
    ///
    /// New terms are unset and must be given a node parameter with [`set_term_node_parameter`](Self::set_term_node_parameter)
    pub fn set_function_number_of_terms(
        &mut self,
        function: usize,
        count: usize,
    ) -> Result<&mut Self> {
        self.function_mut(function)?.resize(count, None);
        Ok(self)
    }
    /// Maps a function term (both 1-based) to the parameter of a local node (0-based)
    pub fn set_term_node_parameter(
        &mut self,
        function: usize,
        term: usize,
        local_node: usize,
        label: ValueLabel,
    ) -> Result<&mut Self> {
        let terms = self.function_mut(function)?;
        let slot = term
            .checked_sub(1)
            .and_then(|t| terms.get_mut(t))
            .ok_or_else(|| {
                MeshError::TemplateValidation(format!(
                    "term #{term} out of range for function #{function}"
                ))
            })?;
        *slot = Some(Term { local_node, label });
        Ok(self)
    }
    /// Returns the mapped terms of a function (1-based)
    pub fn function_terms(&self, function: usize) -> Vec<Term> {
        function
            .checked_sub(1)
            .and_then(|f| self.functions.get(f))
            .map(|terms| terms.iter().flatten().copied().collect())
            .unwrap_or_default()
    }
    /// Iterates over the functions (0-based) and their terms
    pub fn terms(&self) -> impl Iterator<Item = (usize, &Term)> {
        self.functions
            .iter()
            .enumerate()
            .flat_map(|(f, terms)| terms.iter().flatten().map(move |term| (f, term)))
    }
    /// Gets the total number of active terms
    pub fn number_of_active_terms(&self) -> usize {
        self.terms().count()
    }
    /// Returns the 1-based slots, within the 8 functions of a local node, that have terms
    pub fn active_slots(&self, local_node: usize) -> Vec<usize> {
        (0..SLOTS_COUNT)
            .filter(|slot| {
                self.functions
                    .get(local_node * SLOTS_COUNT + slot)
                    .map_or(false, |terms| !terms.is_empty())
            })
            .map(|slot| slot + 1)
            .collect()
    }
    /// Checks that the template is a well-formed mapping of the basis functions to the node parameters
    pub fn validate(&self) -> Result<()> {
        if self.functions.len() != self.basis.number_of_functions() {
            return Err(MeshError::TemplateValidation(format!(
                "{} functions for a {} functions basis",
                self.functions.len(),
                self.basis.number_of_functions()
            )));
        }
        let mut mapped_nodes = [false; NODES_COUNT];
        for (f, terms) in self.functions.iter().enumerate() {
            let mut parameters = HashSet::new();
            for (t, term) in terms.iter().enumerate() {
                let Some(term) = term else {
                    return Err(MeshError::TemplateValidation(format!(
                        "function #{} term #{} is not mapped",
                        f + 1,
                        t + 1
                    )));
                };
                if term.local_node >= NODES_COUNT {
                    return Err(MeshError::TemplateValidation(format!(
                        "function #{} term #{} refers to local node #{}",
                        f + 1,
                        t + 1,
                        term.local_node + 1
                    )));
                }
                if !parameters.insert((term.local_node, term.label)) {
                    return Err(MeshError::TemplateValidation(format!(
                        "function #{} maps local node #{} {} twice",
                        f + 1,
                        term.local_node + 1,
                        term.label
                    )));
                }
                mapped_nodes[term.local_node] = true;
            }
        }
        if let Some(n) = mapped_nodes.iter().position(|mapped| !mapped) {
            return Err(MeshError::TemplateValidation(format!(
                "local node #{} has no parameter",
                n + 1
            )));
        }
        Ok(())
    }
}

/// Factory of element field templates for a 3-D mesh using a tricubic Hermite basis
#[derive(Debug, Clone)]
pub struct EftTricubicHermite {
    use_cross_derivatives: bool,
    basis: TricubicHermiteBasis,
}
impl EftTricubicHermite {
    /// Creates the factory for the given mesh, failing if the mesh is not 3-D
    pub fn new(mesh: &Mesh, use_cross_derivatives: bool) -> Result<Self> {
        let basis = TricubicHermiteBasis;
        if mesh.dimension() != basis.dimension() {
            return Err(MeshError::Dimension {
                expected: basis.dimension(),
                found: mesh.dimension(),
            });
        }
        Ok(Self {
            use_cross_derivatives,
            basis,
        })
    }
    /// Creates the basic template with 1:1 mappings to node derivatives, with or without cross derivatives
    pub fn build_basic(&self) -> Result<ElementFieldTemplate> {
        if !self.use_cross_derivatives {
            return self.build_no_cross_derivatives();
        }
        let eft = ElementFieldTemplate::new(self.basis);
        eft.validate()?;
        Ok(eft)
    }
    /// Creates the basic template with 1:1 mappings to node derivatives, without cross derivatives
    pub fn build_no_cross_derivatives(&self) -> Result<ElementFieldTemplate> {
        let mut eft = ElementFieldTemplate::new(self.basis);
        for n in 0..NODES_COUNT {
            for slot in [4, 6, 7, 8] {
                eft.set_function_number_of_terms(n * SLOTS_COUNT + slot, 0)?;
            }
        }
        eft.validate()?;
        log::debug!(
            "tricubic Hermite template without cross derivatives: {}/{} terms",
            eft.number_of_active_terms(),
            FUNCTIONS_COUNT
        );
        Ok(eft)
    }
}
