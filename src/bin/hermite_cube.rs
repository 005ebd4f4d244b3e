use clap::Parser;
use hermite_mesh::{io, MeshGenerator, Options};
use std::{fs::File, path::PathBuf};

/// Builds a tricubic Hermite hexahedral mesh from node records and writes it to an EX file
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// CSV file with one node record per row
    records: PathBuf,
    /// Output EX file
    #[arg(short, long, default_value = "test_cube.exf")]
    output: PathBuf,
    /// Records include the cross derivatives (24 values per node instead of 12)
    #[arg(short, long)]
    cross_derivatives: bool,
    /// Number of elements along xi1, xi2 and xi3
    #[arg(
        short,
        long,
        num_args = 3,
        value_names = ["N1", "N2", "N3"],
        default_values_t = [1, 1, 1]
    )]
    elements: Vec<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let options = Options::default()
        .use_cross_derivatives(cli.cross_derivatives)
        .elements_count(cli.elements[0], cli.elements[1], cli.elements[2]);
    let records = io::read_records(File::open(&cli.records)?)?;

    let mut generator = MeshGenerator::new(options);
    generator.load_node_parameters(&records)?;
    let mesh = generator.generate()?;
    println!("{mesh}");
    generator.write(&cli.output)?;
    println!("mesh written to {:?}", cli.output);

    Ok(())
}
