//! Mesh nodes and elements store
//!
//! Nodes, elements, faces and lines are kept in identifier order, identifiers being dense and 1-based:
//! the item with identifier `i` is at index `i-1`.

use crate::{
    element::{Element, ElementTemplate, Face, Line, ShapeType, CUBE_FACES, CUBE_LINES},
    ElementFieldTemplate, MeshError, Node, NodeTemplate, Result, ValueLabel,
};
use nalgebra::{Matrix3, Point3, Vector3};
use std::{collections::BTreeMap, fmt};

/// Mesh with a 3-component `coordinates` field
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    dimension: usize,
    nodes: Vec<Node>,
    elements: Vec<Element>,
    faces: Vec<Face>,
    lines: Vec<Line>,
    efts: Vec<ElementFieldTemplate>,
    #[cfg_attr(feature = "serde", serde(skip))]
    change_level: usize,
}

fn next_identifier(kind: &'static str, len: usize, identifier: u32) -> Result<()> {
    let expected = len as u32 + 1;
    if identifier == expected {
        Ok(())
    } else {
        Err(MeshError::Identifier {
            kind,
            expected,
            found: identifier,
        })
    }
}

impl Mesh {
    /// Creates an empty mesh of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }
    pub fn dimension(&self) -> usize {
        self.dimension
    }
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn number_of_elements(&self) -> usize {
        self.elements.len()
    }
    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }
    pub fn number_of_lines(&self) -> usize {
        self.lines.len()
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
    pub fn field_templates(&self) -> &[ElementFieldTemplate] {
        &self.efts
    }
    /// Returns the node with the given identifier
    pub fn node(&self, identifier: u32) -> Option<&Node> {
        identifier
            .checked_sub(1)
            .and_then(|i| self.nodes.get(i as usize))
    }
    /// Returns the element with the given identifier
    pub fn element(&self, identifier: u32) -> Option<&Element> {
        identifier
            .checked_sub(1)
            .and_then(|i| self.elements.get(i as usize))
    }
    /// Creates a node with the next identifier
    pub fn create_node(&mut self, identifier: u32, template: &NodeTemplate) -> Result<&mut Node> {
        next_identifier("node", self.nodes.len(), identifier)?;
        let i = self.nodes.len();
        self.nodes.push(Node::new(identifier, template));
        Ok(&mut self.nodes[i])
    }
    /// Sets the `coordinates` parameters of a node
    pub fn set_node_parameters(
        &mut self,
        identifier: u32,
        label: ValueLabel,
        parameters: Vector3<f64>,
    ) -> Result<()> {
        identifier
            .checked_sub(1)
            .and_then(|i| self.nodes.get_mut(i as usize))
            .ok_or(MeshError::UnknownNode(identifier))?
            .set_parameters(label, parameters)
    }
    /// Validates and registers an element field template, returning its index
    pub fn add_field_template(&mut self, eft: ElementFieldTemplate) -> Result<usize> {
        eft.validate()?;
        self.efts.push(eft);
        Ok(self.efts.len() - 1)
    }
    /// Creates a cube element template for a registered element field template
    pub fn create_element_template(&self, eft: usize) -> Result<ElementTemplate> {
        if eft >= self.efts.len() {
            return Err(MeshError::UnknownTemplate(eft));
        }
        Ok(ElementTemplate {
            shape: ShapeType::Cube,
            eft,
        })
    }
    /// Creates an element with the next identifier
    ///
    /// Outside a change region the node identifiers are checked immediately,
    /// inside one they are checked when the region ends
    pub fn create_element(
        &mut self,
        identifier: u32,
        template: &ElementTemplate,
        nodes: [u32; 8],
    ) -> Result<&Element> {
        next_identifier("element", self.elements.len(), identifier)?;
        if template.eft >= self.efts.len() {
            return Err(MeshError::UnknownTemplate(template.eft));
        }
        let element = Element::new(identifier, template, nodes);
        if self.change_level == 0 {
            self.check_element(&element)?;
        }
        let i = self.elements.len();
        self.elements.push(element);
        Ok(&self.elements[i])
    }
    fn check_element(&self, element: &Element) -> Result<()> {
        if let Some(&node) = element.nodes.iter().find(|&&n| self.node(n).is_none()) {
            return Err(MeshError::InvalidNode {
                element: element.identifier,
                node,
            });
        }
        let mut nodes = element.nodes;
        nodes.sort_unstable();
        match nodes.windows(2).find(|pair| pair[0] == pair[1]) {
            Some(pair) => Err(MeshError::RepeatedNode {
                element: element.identifier,
                node: pair[0],
            }),
            None => Ok(()),
        }
    }
    /// Checks that all the elements refer to 8 distinct existing nodes
    pub fn check_consistency(&self) -> Result<()> {
        self.elements
            .iter()
            .try_for_each(|element| self.check_element(element))
    }
    /// Returns `true` inside a change region
    pub fn is_changing(&self) -> bool {
        self.change_level > 0
    }
    /// Applies a bulk edit to the mesh
    ///
    /// Consistency checks are deferred until the outermost change region ends
    pub fn change<F, T>(&mut self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.change_level += 1;
        log::debug!("begin mesh change (level {})", self.change_level);
        let result = edit(self);
        self.change_level -= 1;
        log::debug!("end mesh change (level {})", self.change_level);
        let value = result?;
        if self.change_level == 0 {
            self.check_consistency()?;
        }
        Ok(value)
    }
    /// Defines the faces and the lines of all the elements
    ///
    /// Faces and lines shared by neighbouring elements are created once
    pub fn define_all_faces(&mut self) -> Result<()> {
        let mut faces: Vec<Face> = vec![];
        let mut lines: Vec<Line> = vec![];
        let mut face_ids: BTreeMap<[u32; 4], u32> = BTreeMap::new();
        let mut line_ids: BTreeMap<[u32; 2], u32> = BTreeMap::new();
        let mut line_id = |nodes: [u32; 2], lines: &mut Vec<Line>| {
            let mut key = nodes;
            key.sort_unstable();
            *line_ids.entry(key).or_insert_with(|| {
                let identifier = lines.len() as u32 + 1;
                lines.push(Line { identifier, nodes });
                identifier
            })
        };
        for element in self.elements.iter_mut() {
            let mut element_faces = [0u32; 6];
            for (i, face) in CUBE_FACES.into_iter().enumerate() {
                let nodes = face.map(|n| element.nodes[n]);
                let mut key = nodes;
                key.sort_unstable();
                element_faces[i] = match face_ids.get(&key) {
                    Some(&identifier) => identifier,
                    None => {
                        let [a, b, c, d] = nodes;
                        let face_lines = [[a, b], [c, d], [a, c], [b, d]]
                            .map(|line| line_id(line, &mut lines));
                        let identifier = faces.len() as u32 + 1;
                        faces.push(Face {
                            identifier,
                            nodes,
                            lines: face_lines,
                        });
                        face_ids.insert(key, identifier);
                        identifier
                    }
                };
            }
            let element_lines =
                CUBE_LINES.map(|line| line_id(line.map(|n| element.nodes[n]), &mut lines));
            element.faces = Some(element_faces);
            element.lines = Some(element_lines);
        }
        log::info!("defined {} faces and {} lines", faces.len(), lines.len());
        self.faces = faces;
        self.lines = lines;
        Ok(())
    }
    fn element_field(
        &self,
        identifier: u32,
        xi: &Point3<f64>,
    ) -> Result<(&Element, &ElementFieldTemplate)> {
        if xi.iter().any(|x| !(0f64..=1f64).contains(x)) {
            return Err(MeshError::Xi([xi.x, xi.y, xi.z]));
        }
        let element = self
            .element(identifier)
            .ok_or(MeshError::UnknownElement(identifier))?;
        let eft = self
            .efts
            .get(element.eft)
            .ok_or(MeshError::UnknownTemplate(element.eft))?;
        Ok((element, eft))
    }
    fn parameters(
        &self,
        element: &Element,
        local_node: usize,
        label: ValueLabel,
    ) -> Result<&Vector3<f64>> {
        let node = element.nodes[local_node];
        self.node(node)
            .ok_or(MeshError::InvalidNode {
                element: element.identifier,
                node,
            })?
            .parameters(label)
            .ok_or(MeshError::UndefinedValueLabel { node, label })
    }
    /// Interpolates the `coordinates` field at the element coordinates `xi`
    pub fn evaluate(&self, element: u32, xi: &Point3<f64>) -> Result<Point3<f64>> {
        let (element, eft) = self.element_field(element, xi)?;
        let phi = eft.basis().evaluate(xi);
        let mut x = Vector3::zeros();
        for (f, term) in eft.terms() {
            x += self.parameters(element, term.local_node, term.label)? * phi[f];
        }
        Ok(Point3::from(x))
    }
    /// Interpolates the derivatives of the `coordinates` field with respect to `xi`
    ///
    /// Column `j` of the returned matrix is `dx/dxi_j`
    pub fn evaluate_derivatives(&self, element: u32, xi: &Point3<f64>) -> Result<Matrix3<f64>> {
        let (element, eft) = self.element_field(element, xi)?;
        let dphi = eft.basis().evaluate_derivatives(xi);
        let mut jacobian = Matrix3::zeros();
        for (f, term) in eft.terms() {
            let parameters = self.parameters(element, term.local_node, term.label)?;
            jacobian += parameters * dphi[f].transpose();
        }
        Ok(jacobian)
    }
}
impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}-D mesh", self.dimension)?;
        writeln!(f, "  - # of nodes: {}", self.number_of_nodes())?;
        writeln!(f, "  - # of elements: {}", self.number_of_elements())?;
        writeln!(f, "  - # of faces: {}", self.number_of_faces())?;
        write!(f, "  - # of lines: {}", self.number_of_lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EftTricubicHermite;

    fn unit_cube(use_cross_derivatives: bool) -> Mesh {
        let mut mesh = Mesh::new(3);
        let eft = EftTricubicHermite::new(&mesh, use_cross_derivatives)
            .unwrap()
            .build_basic()
            .unwrap();
        let eft = mesh.add_field_template(eft).unwrap();
        let template = NodeTemplate::tricubic_hermite(use_cross_derivatives);
        for n in 0..8u32 {
            let xyz = crate::basis::node_xi(n as usize);
            let node = mesh.create_node(n + 1, &template).unwrap();
            node.set_parameters(ValueLabel::Value, xyz.coords).unwrap();
            node.set_parameters(ValueLabel::D_DS1, Vector3::x()).unwrap();
            node.set_parameters(ValueLabel::D_DS2, Vector3::y()).unwrap();
            node.set_parameters(ValueLabel::D_DS3, Vector3::z()).unwrap();
        }
        let template = mesh.create_element_template(eft).unwrap();
        mesh.create_element(1, &template, [1, 2, 3, 4, 5, 6, 7, 8])
            .unwrap();
        mesh
    }

    #[test]
    fn trilinear_cube() {
        for use_cross_derivatives in [false, true] {
            let mesh = unit_cube(use_cross_derivatives);
            let xi = Point3::new(0.25, 0.5, 0.8);
            let x = mesh.evaluate(1, &xi).unwrap();
            assert!((x - xi).norm() < 1e-12);
            let jacobian = mesh.evaluate_derivatives(1, &xi).unwrap();
            assert!((jacobian - Matrix3::identity()).norm() < 1e-12);
        }
    }

    #[test]
    fn outside_element() {
        let mesh = unit_cube(false);
        assert!(matches!(
            mesh.evaluate(1, &Point3::new(0., 1.5, 0.)),
            Err(MeshError::Xi(_))
        ));
        assert!(matches!(
            mesh.evaluate(2, &Point3::origin()),
            Err(MeshError::UnknownElement(2))
        ));
    }

    #[test]
    fn dense_identifiers() {
        let mut mesh = Mesh::new(3);
        let template = NodeTemplate::tricubic_hermite(false);
        mesh.create_node(1, &template).unwrap();
        assert!(matches!(
            mesh.create_node(3, &template),
            Err(MeshError::Identifier {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn deferred_checks() {
        let mut mesh = unit_cube(false);
        let template = mesh.create_element_template(0).unwrap();
        assert!(matches!(
            mesh.create_element(2, &template, [1, 2, 3, 4, 5, 6, 7, 9]),
            Err(MeshError::InvalidNode {
                element: 2,
                node: 9
            })
        ));
        let result = mesh.change(|mesh| {
            mesh.create_element(2, &template, [1, 2, 3, 4, 5, 6, 7, 9])?;
            assert!(mesh.is_changing());
            Ok(())
        });
        assert!(matches!(
            result,
            Err(MeshError::InvalidNode {
                element: 2,
                node: 9
            })
        ));
        assert!(!mesh.is_changing());
    }

    #[test]
    fn repeated_nodes() {
        let mut mesh = unit_cube(false);
        let template = mesh.create_element_template(0).unwrap();
        assert!(matches!(
            mesh.create_element(2, &template, [1; 8]),
            Err(MeshError::RepeatedNode {
                element: 2,
                node: 1
            })
        ));
        assert_eq!(mesh.number_of_elements(), 1);
        let result = mesh.change(|mesh| {
            mesh.create_element(2, &template, [1, 2, 3, 4, 5, 6, 8, 8])?;
            Ok(())
        });
        assert!(matches!(
            result,
            Err(MeshError::RepeatedNode {
                element: 2,
                node: 8
            })
        ));
    }

    #[test]
    fn single_element_faces() {
        let mut mesh = unit_cube(false);
        mesh.define_all_faces().unwrap();
        assert_eq!(mesh.number_of_faces(), 6);
        assert_eq!(mesh.number_of_lines(), 12);
        let element = mesh.element(1).unwrap();
        assert_eq!(element.faces(), Some(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(mesh.faces()[4].nodes, [1, 2, 3, 4]);
    }
}
