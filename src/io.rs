//! Mesh input/output
//!
//! Node records are read from CSV files and meshes are written in the EX (version 2) text format.

use crate::{
    basis::{NODES_COUNT, SLOTS_COUNT},
    ElementFieldTemplate, Mesh, MeshError, Result,
};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

/// Name of the coordinate field
pub const COORDINATES: &str = "coordinates";
const COMPONENTS: [&str; 3] = ["x", "y", "z"];

/// Reads node records, one per row, from a CSV source without header
///
/// Rows starting with `#` are skipped; rows may have different lengths.
/// Trailing empty cells are ignored, any other empty cell is an error.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    reader
        .records()
        .map(|record| -> Result<Vec<f64>> {
            let record = record?;
            let mut values: Vec<&str> = record.iter().collect();
            while values.last().map_or(false, |value| value.is_empty()) {
                values.pop();
            }
            values
                .into_iter()
                .map(|value| {
                    value
                        .parse::<f64>()
                        .map_err(|_| MeshError::ParseFloat(value.to_string()))
                })
                .collect()
        })
        .collect()
}

/// Formats a real number as `%.15e` with a 2-digit exponent
fn real(x: f64) -> String {
    let s = format!("{:.15e}", x);
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |digits| ("-", digits));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

fn coordinates_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "#Fields=1")?;
    writeln!(
        writer,
        "1) {COORDINATES}, coordinate, rectangular cartesian, real, #Components=3"
    )
}

/// Labels of the functions of a local node block, `zero` for functions without terms
fn value_labels(eft: &ElementFieldTemplate, local_node: usize) -> Vec<String> {
    (1..=SLOTS_COUNT)
        .map(|slot| {
            let terms = eft.function_terms(local_node * SLOTS_COUNT + slot);
            if terms.is_empty() {
                "zero".to_string()
            } else {
                terms
                    .iter()
                    .map(|term| term.label.name())
                    .collect::<Vec<_>>()
                    .join("+")
            }
        })
        .collect()
}

/// Writes the mesh in the EX format
pub fn write_ex<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "EX Version: 2")?;
    writeln!(writer, "Region: /")?;

    writeln!(writer, "!#nodeset nodes")?;
    let mut node_header: Option<Vec<&str>> = None;
    for node in mesh.nodes() {
        let labels: Vec<&str> = node.iter().map(|(label, _)| label.name()).collect();
        if node_header.as_ref() != Some(&labels) {
            writeln!(writer, "Shape. Dimension=0")?;
            coordinates_header(writer)?;
            for component in COMPONENTS {
                writeln!(
                    writer,
                    " {component}. #Values={} ({})",
                    labels.len(),
                    labels.join(",")
                )?;
            }
            node_header = Some(labels);
        }
        writeln!(writer, "Node: {}", node.identifier())?;
        for c in 0..3 {
            let values: Vec<String> = node.iter().map(|(_, xyz)| real(xyz[c])).collect();
            writeln!(writer, " {}", values.join(" "))?;
        }
    }

    if !mesh.lines().is_empty() {
        writeln!(writer, "!#mesh mesh1d, dimension=1, nodeset=nodes")?;
        writeln!(writer, "Shape. Dimension=1, line")?;
        writeln!(writer, "#Scale factor sets=0")?;
        writeln!(writer, "#Nodes=0")?;
        writeln!(writer, "#Fields=0")?;
        for line in mesh.lines() {
            writeln!(writer, "Element: {}", line.identifier)?;
        }
    }
    if !mesh.faces().is_empty() {
        writeln!(
            writer,
            "!#mesh mesh2d, dimension=2, face mesh=mesh1d, nodeset=nodes"
        )?;
        writeln!(writer, "Shape. Dimension=2, line*line")?;
        writeln!(writer, "#Scale factor sets=0")?;
        writeln!(writer, "#Nodes=0")?;
        writeln!(writer, "#Fields=0")?;
        for face in mesh.faces() {
            writeln!(writer, "Element: {}", face.identifier)?;
            writeln!(writer, " Faces:")?;
            writeln!(writer, " {}", join(&face.lines))?;
        }
    }

    let face_mesh = if mesh.faces().is_empty() {
        ""
    } else {
        " face mesh=mesh2d,"
    };
    writeln!(
        writer,
        "!#mesh mesh3d, dimension={},{face_mesh} nodeset=nodes",
        mesh.dimension()
    )?;
    let mut eft_header: Option<usize> = None;
    for element in mesh.elements() {
        if eft_header != Some(element.eft()) {
            let eft = mesh
                .field_templates()
                .get(element.eft())
                .ok_or(MeshError::UnknownTemplate(element.eft()))?;
            writeln!(writer, "Shape. Dimension=3, line*line*line")?;
            writeln!(writer, "#Scale factor sets=0")?;
            writeln!(writer, "#Nodes={NODES_COUNT}")?;
            coordinates_header(writer)?;
            for component in COMPONENTS {
                writeln!(
                    writer,
                    " {component}. c.Hermite*c.Hermite*c.Hermite, no modify, standard node based."
                )?;
                writeln!(writer, "  #Nodes={NODES_COUNT}")?;
                for n in 0..NODES_COUNT {
                    let labels = value_labels(eft, n);
                    writeln!(writer, "  {}. #Values={}", n + 1, labels.len())?;
                    writeln!(writer, "   Value labels= {}", labels.join(" "))?;
                }
            }
            eft_header = Some(element.eft());
        }
        writeln!(writer, "Element: {}", element.identifier())?;
        if let Some(faces) = element.faces() {
            writeln!(writer, " Faces:")?;
            writeln!(writer, " {}", join(faces))?;
        }
        writeln!(writer, " Nodes:")?;
        writeln!(writer, " {}", join(element.nodes()))?;
    }
    Ok(())
}

fn join(identifiers: &[u32]) -> String {
    identifiers
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the mesh in an EX file
pub fn write_ex_file<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    log::info!("writing mesh to {path:?}");
    let mut writer = BufWriter::new(File::create(path)?);
    write_ex(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(feature = "serde")]
pub trait ToPickle {
    fn to_pickle<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}
#[cfg(feature = "serde")]
impl ToPickle for Mesh {
    fn to_pickle<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut f = File::create(path)?;
        serde_pickle::to_writer(&mut f, &self, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_like_exponent() {
        assert_eq!(real(-0.2289980638815949), "-2.289980638815949e-01");
        assert_eq!(real(1.106901862910595), "1.106901862910595e+00");
        assert_eq!(real(0.), "0.000000000000000e+00");
        assert_eq!(real(1.5e120), "1.500000000000000e+120");
    }

    #[test]
    fn csv_records() {
        let data = "# x, x_ds1, ...\n1, 2, 3\n4.5,-6e-1,\n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records, vec![vec![1., 2., 3.], vec![4.5, -0.6]]);
        assert!(matches!(
            read_records("1,,2,3".as_bytes()),
            Err(MeshError::ParseFloat(value)) if value.is_empty()
        ));
        assert!(matches!(
            read_records("1, two".as_bytes()),
            Err(MeshError::ParseFloat(_))
        ));
    }
}
