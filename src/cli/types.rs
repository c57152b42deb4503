use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::ObjectKind;

#[derive(Debug, Parser)]
#[command(
    name = "objdist",
    version,
    about = "Distance measurements between detections and annotations"
)]
pub(super) struct Cli {
    /// Worker threads for per-detection measurements (defaults to all cores).
    #[arg(long, global = true)]
    pub(super) threads: Option<usize>,

    /// Log debug output to stderr unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    pub(super) verbose: bool,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Print calibration, plane and object summary of an image-data file.
    Info { input: PathBuf },
    /// Measure detection distances and write the updated image data.
    Distance(DistanceArgs),
    /// Run a JSON/YAML recipe of operations.
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        recipe: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Export object measurements as TSV or CSV.
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum)]
        objects: Option<ObjectFilter>,
    },
    Ops {
        #[command(subcommand)]
        command: OpsCommand,
    },
}

#[derive(Debug, Args)]
pub(super) struct DistanceArgs {
    #[arg(long)]
    pub(super) input: PathBuf,
    #[arg(long)]
    pub(super) output: PathBuf,
    /// Negative distances inside annotation areas.
    #[arg(long)]
    pub(super) signed: bool,
    /// Target classification; repeat to select several.
    #[arg(long = "class")]
    pub(super) classes: Vec<String>,
    /// Measure against other detections instead of annotations.
    #[arg(long)]
    pub(super) detections: bool,
    /// Fold all z/t planes together instead of matching planes.
    #[arg(long)]
    pub(super) flatten: bool,
}

#[derive(Debug, Subcommand)]
pub(super) enum OpsCommand {
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(super) enum ObjectFilter {
    Annotations,
    Detections,
}

impl From<ObjectFilter> for ObjectKind {
    fn from(value: ObjectFilter) -> Self {
        match value {
            ObjectFilter::Annotations => ObjectKind::Annotation,
            ObjectFilter::Detections => ObjectKind::Detection,
        }
    }
}
