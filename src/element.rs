//! Hexahedral elements and their faces and lines

/// Element shape
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeType {
    #[default]
    Cube,
}

/// Local nodes of the 6 faces of a cube: xi1=0, xi1=1, xi2=0, xi2=1, xi3=0, xi3=1
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 2, 4, 6],
    [1, 3, 5, 7],
    [0, 1, 4, 5],
    [2, 3, 6, 7],
    [0, 1, 2, 3],
    [4, 5, 6, 7],
];
/// Local nodes of the 12 lines of a cube, 4 along xi1, 4 along xi2 and 4 along xi3
pub const CUBE_LINES: [[usize; 2]; 12] = [
    [0, 1],
    [2, 3],
    [4, 5],
    [6, 7],
    [0, 2],
    [1, 3],
    [4, 6],
    [5, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Element template
///
/// The shape of the elements and the element field template (index in the mesh) of the `coordinates` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTemplate {
    pub shape: ShapeType,
    pub eft: usize,
}

/// Hexahedral element
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) identifier: u32,
    pub(crate) shape: ShapeType,
    pub(crate) eft: usize,
    pub(crate) nodes: [u32; 8],
    pub(crate) faces: Option<[u32; 6]>,
    pub(crate) lines: Option<[u32; 12]>,
}
impl Element {
    pub(crate) fn new(identifier: u32, template: &ElementTemplate, nodes: [u32; 8]) -> Self {
        Self {
            identifier,
            shape: template.shape,
            eft: template.eft,
            nodes,
            faces: None,
            lines: None,
        }
    }
    pub fn identifier(&self) -> u32 {
        self.identifier
    }
    pub fn shape(&self) -> ShapeType {
        self.shape
    }
    /// Index of the element field template in the mesh
    pub fn eft(&self) -> usize {
        self.eft
    }
    /// Node identifiers in local node order
    pub fn nodes(&self) -> &[u32; 8] {
        &self.nodes
    }
    /// Face identifiers, once faces are defined
    pub fn faces(&self) -> Option<&[u32; 6]> {
        self.faces.as_ref()
    }
    /// Line identifiers, once faces are defined
    pub fn lines(&self) -> Option<&[u32; 12]> {
        self.lines.as_ref()
    }
    /// Node identifiers of the face `i`
    pub fn face_nodes(&self, i: usize) -> [u32; 4] {
        CUBE_FACES[i].map(|n| self.nodes[n])
    }
    /// Node identifiers of the line `i`
    pub fn line_nodes(&self, i: usize) -> [u32; 2] {
        CUBE_LINES[i].map(|n| self.nodes[n])
    }
}

/// Quadrilateral face shared by up to 2 elements
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub identifier: u32,
    pub nodes: [u32; 4],
    pub lines: [u32; 4],
}

/// Line shared by the faces around it
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub identifier: u32,
    pub nodes: [u32; 2],
}
