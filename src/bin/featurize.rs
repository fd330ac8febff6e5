use clap::{Parser, ValueEnum};
use molgraph::prelude::*;
use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
enum OutputType {
    /// Array shapes and per-molecule scopes
    #[default]
    Summary,
    /// Every array in the batch
    Arrays,
}

#[derive(Parser)]
#[command(version, about = "Featurize SMILES strings into a batched directed-edge graph")]
struct Cli {
    #[arg(short, long, default_value = "summary")]
    out: OutputType,
    /// Keep hydrogen atoms written in the input as graph atoms
    #[arg(long)]
    explicit_h: bool,
    /// Treat inputs as reaction SMILES, combining features in this mode
    #[arg(short, long)]
    reaction: Option<ReactionMode>,
    /// Only keep the bond part of edge features
    #[arg(short, long)]
    atom_messages: bool,
    #[arg(required = true)]
    inputs: Vec<String>,
}

fn init_logging() {
    let targets = match env::var("MOLGRAPH_LOG") {
        Ok(name) => Targets::from_str(&name).unwrap_or_else(|e| {
            eprintln!("Error in MOLGRAPH_LOG environment variable: {e}");
            Targets::new().with_default(LevelFilter::ERROR)
        }),
        Err(env::VarError::NotPresent) => Targets::new().with_default(LevelFilter::ERROR),
        Err(env::VarError::NotUnicode(_)) => {
            eprintln!("Error in MOLGRAPH_LOG environment variable: not valid UTF-8");
            Targets::new().with_default(LevelFilter::ERROR)
        }
    };
    Registry::default()
        .with(targets)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    let config = FeaturizerConfig::new()
        .with_explicit_h(cli.explicit_h)
        .with_reaction(cli.reaction);
    let batch = match mol2graph(&cli.inputs, config) {
        Ok(batch) => batch,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let comps = batch.components(cli.atom_messages);
    println!(
        "{} molecules, f_atoms {:?}, f_bonds {:?}, a2b {:?}",
        batch.n_mols(),
        comps.f_atoms.dim(),
        comps.f_bonds.dim(),
        comps.a2b.dim(),
    );
    for (smiles, (a, b)) in cli
        .inputs
        .iter()
        .zip(comps.a_scope.iter().zip(comps.b_scope))
    {
        println!(
            "{smiles}: atoms {}..{}, edges {}..{}",
            a.start,
            a.start + a.len,
            b.start,
            b.start + b.len
        );
    }
    if let OutputType::Arrays = cli.out {
        println!("f_atoms:\n{}", comps.f_atoms);
        println!("f_bonds:\n{}", comps.f_bonds);
        println!("a2b:\n{}", comps.a2b);
        println!("b2a:\n{}", comps.b2a);
        println!("b2revb:\n{}", comps.b2revb);
    }
    ExitCode::SUCCESS
}
