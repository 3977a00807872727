mod palette;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use contract_tagger_config::Config;
use contract_tagger_engine::{BatchRequest, TagStyle, io, parse_document, run_batch};

/// Tag the structure of plain-text contracts.
#[derive(Debug, Parser)]
#[command(name = "contract-tagger", version, about)]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["file", "folder"])))]
struct Args {
    /// Tag a single .txt, .html or .docx file and print the result
    #[arg(long)]
    file: Option<PathBuf>,

    /// Tag every matching file below this folder
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Output folder for --folder runs [default: from config, else file_parser_output]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Maximum number of files a --folder run picks up
    #[arg(long)]
    size: Option<usize>,

    /// Color the tag markers (terminal output only)
    #[arg(long)]
    color: bool,

    /// Print the structure tree instead of the tagged text
    #[arg(long)]
    tree: bool,

    /// Config file to use instead of ~/.config/contract-tagger/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            log::debug!("Config path: {}", path.display());
            Config::load_from_path(&path)?
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Config::load()?
        }
    };
    if config.is_none() {
        log::debug!("No config file, using defaults");
    }
    Ok(config.unwrap_or_default())
}

fn tag_file(path: &Path, style: &TagStyle, tree: bool) -> Result<()> {
    let text = io::read_source(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = parse_document(&text).with_context(|| format!("Failed to tag {}", path.display()))?;
    log::debug!(
        "{}: {} lines, {} tree nodes",
        path.display(),
        doc.lines.len(),
        doc.tree.len()
    );

    if tree {
        print!("{}", doc.tree.outline());
    } else {
        println!("{}", doc.render(style));
    }
    Ok(())
}

fn tag_folder(args: &Args, folder: PathBuf, config: &Config) -> Result<()> {
    let request = BatchRequest {
        source_dir: folder,
        output_dir: args.output.clone().unwrap_or_else(|| config.output_dir.clone()),
        patterns: config.include.clone(),
        limit: args.size,
    };

    // Files never get terminal color codes
    let report = run_batch(&request, &TagStyle::plain())
        .with_context(|| format!("Failed to scan {}", request.source_dir.display()))?;

    println!(
        "Tagged {} of {} files from '{}' into '{}'",
        report.processed.len(),
        report.total(),
        request.source_dir.display(),
        request.output_dir.display()
    );
    for failure in &report.failures {
        eprintln!("  [!] {}: {}", failure.path.display(), failure.error);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = load_config(args.config.clone())?;
    let style = palette::tag_style(&config.colors, args.color || config.enable_colors);

    if let Some(file) = &args.file {
        tag_file(file, &style, args.tree)?;
    }
    if let Some(folder) = args.folder.clone() {
        tag_folder(&args, folder, &config)?;
    }
    Ok(())
}
