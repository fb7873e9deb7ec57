//! lum-bootstrap CLI - set up a LumEngine checkout for building
//!
//! Usage:
//!   lum-bootstrap                    Configure and install all dependencies
//!   lum-bootstrap --only glfw        Install a single dependency
//!   lum-bootstrap --list             Show the dependencies that would be installed

use anyhow::{Context, Result};
use clap::Parser;
use lum_bootstrap::{output, Bootstrapper, Manifest, ProjectLayout};
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lum-bootstrap")]
#[command(about = "Configure the LumEngine build and install prebuilt dependencies")]
#[command(version)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, env = "LUM_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Dependency manifest (defaults to <project-root>/bootstrap.toml if present)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Engine directory holding external/ (overrides the manifest)
    #[arg(long)]
    engine_dir: Option<String>,

    /// Build configuration tool
    #[arg(long, env = "LUM_CONFIGURE_TOOL", default_value = "cmake")]
    configure_tool: String,

    /// Do not run the build configuration tool
    #[arg(long)]
    skip_configure: bool,

    /// Only install the named dependencies
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// List the dependencies and exit
    #[arg(long)]
    list: bool,

    /// Exit without waiting for Enter
    #[arg(long, env = "LUM_NO_PAUSE")]
    no_pause: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err.to_string());
            for cause in err.chain().skip(1) {
                output::error(&format!("  caused by: {}", cause));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match cli.project_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let root = std::path::absolute(&root)
        .with_context(|| format!("Invalid project root: {}", root.display()))?;

    let mut manifest = Manifest::resolve(&root, cli.manifest.as_deref())
        .context("Failed to load dependency manifest")?;
    if let Some(engine_dir) = &cli.engine_dir {
        manifest.set_engine_dir(engine_dir)?;
    }

    let selected = manifest.select(&cli.only)?;

    if cli.list {
        output::info(&format!(
            "{} dependencies -> {}/{}/external",
            selected.len(),
            root.display(),
            manifest.engine_dir
        ));
        for dep in &selected {
            output::list_item(&dep.name, &dep.url, dep.sha256.is_some());
        }
        return Ok(());
    }

    let layout = ProjectLayout::new(&root, &manifest.engine_dir);
    let mut bootstrapper = Bootstrapper::new(layout).with_configure_tool(&cli.configure_tool);
    if cli.skip_configure {
        bootstrapper = bootstrapper.skip_configure();
    }

    let reports = bootstrapper.run(selected).context("Bootstrap failed")?;

    let libraries: usize = reports.iter().map(|r| r.libraries.len()).sum();
    output::success(&format!(
        "Setup finished ({} dependencies, {} libraries)",
        reports.len(),
        libraries
    ));
    output::detail(&format!(
        "libraries in {} and {}",
        bootstrapper.layout().debug_dir().display(),
        bootstrapper.layout().release_dir().display()
    ));

    if !cli.no_pause {
        wait_for_enter()?;
    }

    Ok(())
}

fn wait_for_enter() -> Result<()> {
    println!("Press Enter to exit...");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(())
}
