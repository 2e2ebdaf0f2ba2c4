use crate::config::{Config, load_config};
use crate::ir::{Align, Direction};
use crate::layout::LayoutStabilizer;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_diagram;
use crate::store::DiagramStore;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowlay", version, about = "Auto-layout flow diagrams with dagre")]
pub struct Args {
    /// Input diagram (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Rank direction (overrides the diagram and config file)
    #[arg(short = 'd', long = "direction", value_enum)]
    pub direction: Option<DirectionArg>,

    /// Rank alignment (accepted, not used by the engine)
    #[arg(short = 'a', long = "align", value_enum)]
    pub align: Option<AlignArg>,

    /// Log layout progress to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[value(rename_all = "UPPER")]
pub enum DirectionArg {
    Lr,
    Tb,
    Rl,
    Bt,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Lr => Direction::LeftRight,
            DirectionArg::Tb => Direction::TopBottom,
            DirectionArg::Rl => Direction::RightLeft,
            DirectionArg::Bt => Direction::BottomTop,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[value(rename_all = "UPPER")]
pub enum AlignArg {
    Ul,
    Ur,
    Dl,
    Dr,
}

impl From<AlignArg> for Align {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Ul => Align::UpLeft,
            AlignArg::Ur => Align::UpRight,
            AlignArg::Dl => Align::DownLeft,
            AlignArg::Dr => Align::DownRight,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let diagram = parse_diagram(&input)?;

    let (direction, align) = resolve_options(&args, &config, diagram.direction, diagram.align);
    let store = diagram.into_store();
    let mut stabilizer = LayoutStabilizer::new(config.layout);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(stabilizer.relayout(&store, direction, align))?;

    let dump = LayoutDump::from_layout(&store.nodes(), stabilizer.graph(), report, direction);
    write_layout_dump(args.output.as_deref(), &dump)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "flow_autolayout=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Command-line flags win over the diagram file, which wins over the config file.
fn resolve_options(
    args: &Args,
    config: &Config,
    diagram_direction: Option<Direction>,
    diagram_align: Option<Align>,
) -> (Direction, Option<Align>) {
    let direction = args
        .direction
        .map(Direction::from)
        .or(diagram_direction)
        .unwrap_or(config.direction);
    let align = args
        .align
        .map(Align::from)
        .or(diagram_align)
        .or(config.align);
    (direction, align)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
