//! Tricubic Hermite mesh generator
//!
//! The generator collects the node parameters from raw records, one record per node,
//! and builds the mesh of a regular grid of hexahedra.
//!
//! A record holds the `x`, `y` and `z` quantities one after the other:
//!  - without cross derivatives: `[x, x_ds1, x_ds2, x_ds3, y, ..., z, ..., z_ds3]` (12 values)
//!  - with cross derivatives: `[x, x_ds1, x_ds2, x_ds3, x_ds12, x_ds13, x_ds23, x_ds123, y, ...]` (24 values)

use crate::{EftTricubicHermite, Mesh, MeshError, NodeTemplate, Options, Result, ValueLabel};
use nalgebra::Vector3;
use std::{collections::BTreeMap, path::Path};

/// Order of the quantities of one coordinate in a node record
const RECORD_QUANTITIES: [ValueLabel; 8] = [
    ValueLabel::Value,
    ValueLabel::D_DS1,
    ValueLabel::D_DS2,
    ValueLabel::D_DS3,
    ValueLabel::D2_DS1DS2,
    ValueLabel::D2_DS1DS3,
    ValueLabel::D2_DS2DS3,
    ValueLabel::D3_DS1DS2DS3,
];

/// Node parameters
///
/// For each quantity, the `[x,y,z]` components of all the nodes one after the other
#[derive(Debug, Clone, Default)]
pub struct NodeParameters {
    quantities: BTreeMap<ValueLabel, Vec<f64>>,
}
impl NodeParameters {
    /// Creates empty sequences for the quantities of the given layout
    pub fn new(use_cross_derivatives: bool) -> Self {
        let n = if use_cross_derivatives { 8 } else { 4 };
        Self {
            quantities: RECORD_QUANTITIES[..n]
                .iter()
                .map(|label| (*label, vec![]))
                .collect(),
        }
    }
    /// Appends the parameters of a node record
    ///
    /// The record length must be 3 times the number of quantities
    fn push(&mut self, record: &[f64]) {
        let n = self.quantities.len();
        for (q, label) in RECORD_QUANTITIES[..n].iter().enumerate() {
            if let Some(values) = self.quantities.get_mut(label) {
                values.extend((0..3).map(|c| record[c * n + q]));
            }
        }
    }
    /// Number of quantities per node and per coordinate
    pub fn quantities_count(&self) -> usize {
        self.quantities.len()
    }
    /// Returns the sequence of a quantity
    pub fn quantity(&self, label: ValueLabel) -> Option<&[f64]> {
        self.quantities.get(&label).map(|values| values.as_slice())
    }
    /// Number of nodes
    pub fn number_of_nodes(&self) -> usize {
        self.quantity(ValueLabel::Value)
            .map_or(0, |values| values.len() / 3)
    }
    /// Returns the parameters of the node with the 0-based index `n`
    pub fn node(&self, n: usize) -> impl Iterator<Item = (ValueLabel, Vector3<f64>)> + '_ {
        self.quantities
            .iter()
            .filter_map(move |(label, values)| {
                values
                    .get(n * 3..n * 3 + 3)
                    .map(|xyz| (*label, Vector3::from_column_slice(xyz)))
            })
    }
}

/// Tricubic Hermite hexahedral mesh generator
#[derive(Debug, Clone)]
pub struct MeshGenerator {
    options: Options,
    parameters: NodeParameters,
    mesh: Option<Mesh>,
}
impl Default for MeshGenerator {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
impl MeshGenerator {
    /// Creates a generator with the given options
    pub fn new(options: Options) -> Self {
        Self {
            options,
            parameters: NodeParameters::new(options.use_cross_derivatives),
            mesh: None,
        }
    }
    pub fn options(&self) -> &Options {
        &self.options
    }
    pub fn node_parameters(&self) -> &NodeParameters {
        &self.parameters
    }
    /// Returns the mesh built by the last successful call to [`generate`](Self::generate)
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }
    /// Loads node parameters from records
    ///
    /// All the records are checked before any is loaded;
    /// loaded records are appended to the records of previous calls
    pub fn load_node_parameters<R: AsRef<[f64]>>(
        &mut self,
        records: &[R],
    ) -> Result<&mut Self> {
        let expected = self.options.record_len();
        if let Some((record, found)) = records
            .iter()
            .map(|r| r.as_ref().len())
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(MeshError::RecordLayout {
                record,
                expected,
                found,
            });
        }
        records
            .iter()
            .for_each(|record| self.parameters.push(record.as_ref()));
        log::info!(
            "loaded {} node records ({} nodes)",
            records.len(),
            self.parameters.number_of_nodes()
        );
        Ok(self)
    }
    /// Builds the mesh
    ///
    /// The grid and the number of nodes are checked first, then nodes, elements and
    /// faces are created in a single change region.
    /// On failure the previously generated mesh, if any, is kept.
    pub fn generate(&mut self) -> Result<&Mesh> {
        self.options.validate()?;
        let expected = self.options.number_of_nodes();
        let found = self.parameters.number_of_nodes();
        if found != expected {
            return Err(MeshError::NodeCountMismatch { expected, found });
        }
        let Options {
            use_cross_derivatives,
            elements_count: [n1, n2, n3],
        } = self.options;
        let parameters = &self.parameters;

        let mut mesh = Mesh::new(3);
        mesh.change(|mesh| {
            let eft = EftTricubicHermite::new(mesh, use_cross_derivatives)?.build_basic()?;
            let eft = mesh.add_field_template(eft)?;
            let element_template = mesh.create_element_template(eft)?;
            let node_template = NodeTemplate::tricubic_hermite(use_cross_derivatives);

            for n in 0..found {
                let node = mesh.create_node(n as u32 + 1, &node_template)?;
                for (label, xyz) in parameters.node(n) {
                    node.set_parameters(label, xyz)?;
                }
            }
            log::info!("created {} nodes", mesh.number_of_nodes());

            let no2 = n1 as u32 + 1;
            let no3 = (n2 as u32 + 1) * no2;
            let mut element_identifier = 1;
            for e3 in 0..n3 as u32 {
                for e2 in 0..n2 as u32 {
                    for e1 in 0..n1 as u32 {
                        let bni = e3 * no3 + e2 * no2 + e1 + 1;
                        let node_identifiers = [
                            bni,
                            bni + 1,
                            bni + no2,
                            bni + no2 + 1,
                            bni + no3,
                            bni + no3 + 1,
                            bni + no2 + no3,
                            bni + no2 + no3 + 1,
                        ];
                        mesh.create_element(
                            element_identifier,
                            &element_template,
                            node_identifiers,
                        )?;
                        element_identifier += 1;
                    }
                }
            }
            log::info!("created {} elements", mesh.number_of_elements());

            mesh.define_all_faces()
        })?;
        Ok(self.mesh.insert(mesh))
    }
    /// Writes the generated mesh to an EX file
    pub fn write<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        let mesh = self.mesh.as_ref().ok_or(MeshError::NotGenerated)?;
        crate::io::write_ex_file(mesh, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize, len: usize) -> Vec<f64> {
        (0..len).map(|i| (100 * n + i) as f64).collect()
    }

    #[test]
    fn record_layout() {
        let mut generator = MeshGenerator::default();
        generator
            .load_node_parameters(&[record(0, 12), record(1, 12)])
            .unwrap();
        let parameters = generator.node_parameters();
        assert_eq!(parameters.quantities_count(), 4);
        assert_eq!(
            parameters.quantity(ValueLabel::Value).unwrap(),
            &[0., 4., 8., 100., 104., 108.]
        );
        assert_eq!(
            parameters.quantity(ValueLabel::D_DS3).unwrap(),
            &[3., 7., 11., 103., 107., 111.]
        );
        assert!(parameters.quantity(ValueLabel::D2_DS1DS2).is_none());
    }

    #[test]
    fn cross_derivatives_record_layout() {
        let mut generator = MeshGenerator::new(Options::default().use_cross_derivatives(true));
        generator.load_node_parameters(&[record(0, 24)]).unwrap();
        let parameters = generator.node_parameters();
        assert_eq!(parameters.quantities_count(), 8);
        assert_eq!(
            parameters.quantity(ValueLabel::D_DS3).unwrap(),
            &[3., 11., 19.]
        );
        assert_eq!(
            parameters.quantity(ValueLabel::D2_DS1DS2).unwrap(),
            &[4., 12., 20.]
        );
        assert_eq!(
            parameters.quantity(ValueLabel::D3_DS1DS2DS3).unwrap(),
            &[7., 15., 23.]
        );
    }

    #[test]
    fn wrong_record_length() {
        let mut generator = MeshGenerator::default();
        let err = generator
            .load_node_parameters(&[record(0, 12), record(1, 24)])
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::RecordLayout {
                record: 1,
                expected: 12,
                found: 24
            }
        ));
        assert_eq!(generator.node_parameters().number_of_nodes(), 0);
    }

    #[test]
    fn node_count_mismatch() {
        let mut generator = MeshGenerator::new(Options::default().elements_count(2, 1, 1));
        let records: Vec<_> = (0..8).map(|n| record(n, 12)).collect();
        generator.load_node_parameters(&records).unwrap();
        assert!(matches!(
            generator.generate(),
            Err(MeshError::NodeCountMismatch {
                expected: 12,
                found: 8
            })
        ));
        assert!(generator.mesh().is_none());
        assert!(matches!(
            generator.write("never.exf"),
            Err(MeshError::NotGenerated)
        ));
    }

    #[test]
    fn empty_grid() {
        let mut generator = MeshGenerator::new(Options::default().elements_count(0, 1, 1));
        assert!(matches!(
            generator.generate(),
            Err(MeshError::ElementsCount([0, 1, 1]))
        ));
    }
}
