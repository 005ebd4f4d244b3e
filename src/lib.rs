//! # Tricubic Hermite hexahedral meshes
//!
//! Builds a regular `n1 x n2 x n3` hexahedral mesh whose `coordinates` field is
//! interpolated with a tricubic Hermite basis from per-node values and derivatives.
//!
//! ```no_run
//! use hermite_mesh::{MeshGenerator, Options};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = hermite_mesh::io::read_records(std::fs::File::open("data/cube.csv")?)?;
//!     let mut generator = MeshGenerator::new(Options::default().elements_count(1, 1, 1));
//!     generator.load_node_parameters(&records)?;
//!     let mesh = generator.generate()?;
//!     println!("{mesh}");
//!     generator.write("test_cube.exf")?;
//!     Ok(())
//! }
//! ```

pub mod basis;
pub use basis::TricubicHermiteBasis;

pub mod node;
pub use node::{Node, NodeTemplate, ValueLabel};

pub mod template;
pub use template::{EftTricubicHermite, ElementFieldTemplate};

pub mod element;
pub use element::{Element, ElementTemplate, Face, Line};

pub mod mesh;
pub use mesh::Mesh;

pub mod options;
pub use options::Options;

pub mod generator;
pub use generator::{MeshGenerator, NodeParameters};

pub mod io;
#[cfg(feature = "serde")]
pub use io::ToPickle;

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("expected a {expected}-D mesh, found {found}-D")]
    Dimension { expected: usize, found: usize },
    #[error("element field template failed to validate: {0}")]
    TemplateValidation(String),
    #[error("node record #{record} has {found} values, expected {expected}")]
    RecordLayout {
        record: usize,
        expected: usize,
        found: usize,
    },
    #[error("{found} nodes supplied, the grid requires {expected}")]
    NodeCountMismatch { expected: usize, found: usize },
    #[error("invalid number of elements {0:?}")]
    ElementsCount([usize; 3]),
    #[error("{kind} identifiers must be dense: expected #{expected}, found #{found}")]
    Identifier {
        kind: &'static str,
        expected: u32,
        found: u32,
    },
    #[error("element #{element} references unknown node #{node}")]
    InvalidNode { element: u32, node: u32 },
    #[error("element #{element} references node #{node} more than once")]
    RepeatedNode { element: u32, node: u32 },
    #[error("node #{node} has no {label} value")]
    UndefinedValueLabel { node: u32, label: ValueLabel },
    #[error("unknown node #{0}")]
    UnknownNode(u32),
    #[error("unknown element #{0}")]
    UnknownElement(u32),
    #[error("unknown element field template #{0}")]
    UnknownTemplate(usize),
    #[error("element coordinates {0:?} outside the unit cube")]
    Xi([f64; 3]),
    #[error("mesh has not been generated")]
    NotGenerated,
    #[error("failed to write mesh file")]
    Io(#[from] std::io::Error),
    #[error("failed to read node records")]
    Csv(#[from] csv::Error),
    #[error("failed to parse node value {0:?}")]
    ParseFloat(String),
    #[cfg(feature = "serde")]
    #[error("failed to write pickle file")]
    Pickle(#[from] serde_pickle::Error),
}

pub type Result<T> = std::result::Result<T, MeshError>;
