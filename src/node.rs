//! Nodes and node value labels

use crate::{MeshError, Result};
use nalgebra::Vector3;
use std::fmt;

macro_rules! value_labels {
    ($($name:expr, $variant:ident),+) => {
        /// Nodal value and derivative labels
        ///
        /// The declaration order is the order of the 8 tricubic Hermite basis functions of a local node
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(non_camel_case_types)]
        pub enum ValueLabel {
            $($variant),+
        }
        impl ValueLabel {
            /// All the labels in slot order
            pub const ALL: [ValueLabel; 8] = [$(ValueLabel::$variant),+];
            /// Label name in EX files
            pub fn name(&self) -> &'static str {
                match self {
                    $(ValueLabel::$variant => $name),+
                }
            }
        }
    };
}
value_labels! {
    "value", Value,
    "d/ds1", D_DS1,
    "d/ds2", D_DS2,
    "d2/ds1ds2", D2_DS1DS2,
    "d/ds3", D_DS3,
    "d2/ds1ds3", D2_DS1DS3,
    "d2/ds2ds3", D2_DS2DS3,
    "d3/ds1ds2ds3", D3_DS1DS2DS3
}

impl ValueLabel {
    /// Labels of the value and first derivatives
    pub const FIRST_ORDER: [ValueLabel; 4] = [
        ValueLabel::Value,
        ValueLabel::D_DS1,
        ValueLabel::D_DS2,
        ValueLabel::D_DS3,
    ];
    /// Returns the label of a 0-based slot
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }
    /// Returns the 0-based slot of the label
    pub fn slot(&self) -> usize {
        *self as usize
    }
    /// Returns `true` for mixed partial derivatives
    pub fn is_cross_derivative(&self) -> bool {
        self.slot().count_ones() > 1
    }
}
impl fmt::Display for ValueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node template
///
/// Declares which values the `coordinates` field carries at a node
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTemplate {
    labels: [bool; 8],
}
impl NodeTemplate {
    /// Creates an empty node template
    pub fn new() -> Self {
        Default::default()
    }
    /// Creates the template of a tricubic Hermite node, with or without cross derivatives
    pub fn tricubic_hermite(use_cross_derivatives: bool) -> Self {
        let mut template = Self::new();
        for label in ValueLabel::ALL {
            if use_cross_derivatives || !label.is_cross_derivative() {
                template.define(label);
            }
        }
        template
    }
    /// Adds a value label to the template
    pub fn define(&mut self, label: ValueLabel) -> &mut Self {
        self.labels[label.slot()] = true;
        self
    }
    pub fn is_defined(&self, label: ValueLabel) -> bool {
        self.labels[label.slot()]
    }
    /// Iterates over the defined labels in slot order
    pub fn labels(&self) -> impl Iterator<Item = ValueLabel> + '_ {
        ValueLabel::ALL
            .into_iter()
            .filter(|label| self.is_defined(*label))
    }
}

/// Mesh node
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    identifier: u32,
    values: [Option<Vector3<f64>>; 8],
}
impl Node {
    /// Creates a node with the labels of the template set to zero
    pub fn new(identifier: u32, template: &NodeTemplate) -> Self {
        let mut values = [None; 8];
        template
            .labels()
            .for_each(|label| values[label.slot()] = Some(Vector3::zeros()));
        Self { identifier, values }
    }
    pub fn identifier(&self) -> u32 {
        self.identifier
    }
    /// Returns the node parameters for the given label
    pub fn parameters(&self, label: ValueLabel) -> Option<&Vector3<f64>> {
        self.values[label.slot()].as_ref()
    }
    /// Sets the node parameters of a label defined by the node template
    pub fn set_parameters(&mut self, label: ValueLabel, parameters: Vector3<f64>) -> Result<()> {
        self.values[label.slot()]
            .as_mut()
            .map(|values| *values = parameters)
            .ok_or(MeshError::UndefinedValueLabel {
                node: self.identifier,
                label,
            })
    }
    /// Iterates over the defined labels and their parameters
    pub fn iter(&self) -> impl Iterator<Item = (ValueLabel, &Vector3<f64>)> {
        ValueLabel::ALL
            .iter()
            .zip(self.values.iter())
            .filter_map(|(label, values)| values.as_ref().map(|v| (*label, v)))
    }
}
