use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pipscope::export::{export_to_string, render_script, ExportData, ExportFormat};
use pipscope::graph::{build_graph, DependencyGraph, DEFAULT_MAX_DEPTH};
use pipscope::source::PipSource;
use pipscope::visualize::Visualizer;

#[derive(Parser)]
#[command(name = "pipscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Visualize the transitive dependency graph of a pip package with PlantUML", long_about = None)]
struct Cli {
    /// Name of the installed Python package to analyze
    #[arg(long)]
    package_name: String,

    /// Path to the PlantUML renderer (JAR file)
    #[arg(long)]
    visualizer_path: PathBuf,

    /// Maximum traversal depth, the package itself being depth 1
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_depth)]
    max_depth: usize,

    /// Directory for the generated script and image
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also print the graph to stdout in the given format (plantuml, json)
    #[arg(long, value_name = "FORMAT")]
    print: Option<ExportFormat>,

    /// Only write the script, do not run the renderer
    #[arg(long)]
    no_render: bool,

    /// pip executable used to query package metadata
    #[arg(long, default_value = "pip")]
    pip: String,

    /// Java launcher used to run the renderer
    #[arg(long, default_value = "java")]
    java: String,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_depth(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(depth) if depth >= 1 => Ok(depth),
        Ok(_) => Err("depth must be at least 1".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = PipSource::with_program(&cli.pip);
    let edges = build_graph(&source, &cli.package_name, cli.max_depth)
        .with_context(|| format!("failed to resolve dependencies of '{}'", cli.package_name))?;

    let graph = DependencyGraph::from_edges(&cli.package_name, &edges);
    info!(
        package = %cli.package_name,
        packages = graph.node_count(),
        edges = graph.edge_count(),
        depth = graph.max_depth(),
        "dependency graph built"
    );
    for cycle in graph.get_cycle_details() {
        warn!(cycle = %cycle.cycle_path(), "circular dependency");
    }

    let script = render_script(&edges);

    if let Some(format) = cli.print {
        let data = ExportData::new(cli.package_name.as_str(), cli.max_depth, edges);
        let output = export_to_string(format, &data).context("failed to export graph")?;
        println!("{}", output.trim_end());
    }

    let script_path = cli.output_dir.join(script_file_name(&cli.package_name));

    if cli.no_render {
        std::fs::write(&script_path, &script)
            .with_context(|| format!("failed to write {}", script_path.display()))?;
        println!("{}", script_path.display());
        return Ok(());
    }

    let image = Visualizer::new(&cli.visualizer_path)
        .with_java(&cli.java)
        .render(&script, &script_path)
        .context("failed to render diagram")?;
    println!("{}", image.display());

    Ok(())
}

/// Script file name for a package, keeping path separators out of it.
fn script_file_name(package: &str) -> PathBuf {
    let stem: String = package
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    PathBuf::from(format!("{stem}.puml"))
}
