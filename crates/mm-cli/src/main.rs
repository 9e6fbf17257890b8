//! Headless CLI: inspect and export mindmap snapshot documents.
//!
//! ```text
//! mm stats  graph.json
//! mm render graph.json --format png --out graph.png --scale 2
//! mm render graph.json --format svg
//! ```
//!
//! Reads from stdin when the input path is `-` or omitted. SVG goes to
//! stdout unless `--out` is given; PNG always requires `--out`.

use mm_render::{ExportOptions, HeuristicMeasurer};
use std::io::Read;
use std::str::FromStr;

const USAGE: &str = "usage: mm <stats|render> [input.json] \
[--format svg|png] [--out FILE] [--scale N] [--width N] [--height N]";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Snapshot(mm_core::SnapshotError),
    Export(mm_render::ExportError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Snapshot(err) => write!(f, "{err}"),
            CliError::Export(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mm_core::SnapshotError> for CliError {
    fn from(value: mm_core::SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<mm_render::ExportError> for CliError {
    fn from(value: mm_render::ExportError) -> Self {
        Self::Export(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Stats,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    format: RenderFormat,
    out: Option<String>,
    scale: f32,
    width: Option<f32>,
    height: Option<f32>,
}

fn parse_args(argv: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut args = Args {
        scale: 1.0,
        ..Default::default()
    };
    let mut it = argv;

    args.command = match it.next().as_deref() {
        Some("stats") => Command::Stats,
        Some("render") => Command::Render,
        Some("-h") | Some("--help") | None => return Err(CliError::Usage(USAGE)),
        Some(_) => return Err(CliError::Usage(USAGE)),
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--format" => {
                let value = it.next().ok_or(CliError::Usage("--format needs a value"))?;
                args.format = value
                    .parse()
                    .map_err(|_| CliError::Usage("--format must be svg or png"))?;
            }
            "--out" | "-o" => {
                args.out = Some(it.next().ok_or(CliError::Usage("--out needs a path"))?);
            }
            "--scale" => {
                let value = it.next().ok_or(CliError::Usage("--scale needs a value"))?;
                args.scale = value
                    .parse()
                    .map_err(|_| CliError::Usage("--scale must be a number"))?;
            }
            "--width" => {
                let value = it.next().ok_or(CliError::Usage("--width needs a value"))?;
                args.width = Some(
                    value
                        .parse()
                        .map_err(|_| CliError::Usage("--width must be a number"))?,
                );
            }
            "--height" => {
                let value = it.next().ok_or(CliError::Usage("--height needs a value"))?;
                args.height = Some(
                    value
                        .parse()
                        .map_err(|_| CliError::Usage("--height must be a number"))?,
                );
            }
            _ if args.input.is_none() && !arg.starts_with('-') => args.input = Some(arg),
            "-" if args.input.is_none() => args.input = Some(arg),
            _ => return Err(CliError::Usage(USAGE)),
        }
    }

    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(p) => Ok(std::fs::read_to_string(p)?),
    }
}

fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args().skip(1))?;
    let json = read_input(args.input.as_deref())?;
    let graph = mm_core::load_json(&json)?;

    match args.command {
        Command::Stats => stats(&graph),
        Command::Render => render(&graph, &args),
    }
}

fn stats(graph: &mm_core::Graph) -> Result<(), CliError> {
    let dangling = graph
        .edges()
        .iter()
        .filter(|e| graph.node(e.from_id).is_none() || graph.node(e.to_id).is_none())
        .count();
    println!("nodes:   {}", graph.nodes().len());
    println!("edges:   {}", graph.edges().len());
    println!("next id: {}", graph.next_id());
    if dangling > 0 {
        println!("dangling edges: {dangling}");
    }
    Ok(())
}

fn render(graph: &mm_core::Graph, args: &Args) -> Result<(), CliError> {
    let opts = ExportOptions {
        width: args.width,
        height: args.height,
        scale: args.scale,
        ..Default::default()
    };
    let measurer = HeuristicMeasurer::default();

    match args.format {
        RenderFormat::Svg => {
            let svg = mm_render::render_svg(graph, &measurer, &opts);
            match &args.out {
                Some(path) => std::fs::write(path, svg)?,
                None => print!("{svg}"),
            }
        }
        RenderFormat::Png => {
            let path = args
                .out
                .as_ref()
                .ok_or(CliError::Usage("png output requires --out"))?;
            let png = mm_render::export_png(graph, &measurer, &opts)?;
            std::fs::write(path, png)?;
            log::info!("wrote {path}");
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
