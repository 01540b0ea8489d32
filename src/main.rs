//! Wikigrade: Editorial Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;
use wikigrade::analyzer::{AnalysisEngine, BatchReport};
use wikigrade::config::{
    build_ignore_set, is_ignored, load_config, write_starter_config, Config, TopicSetting,
    CONFIG_FILENAME,
};
use wikigrade::guidelines::GuidelineCatalog;
use wikigrade::parser::is_article_file;
use wikigrade::reporter::{ConsoleReporter, JsonReporter};
use wikigrade::AnalysisResult;

/// Wikigrade: quality scoring and guideline checks for Wikipedia-style articles
#[derive(Parser, Debug)]
#[command(name = "wikigrade")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Article file (.wiki, .txt, .json) or directory to analyze
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (one line per article)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (all suggestions, metric details, debug logs)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .wikigraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Topic profile: auto, scientific, biographical, historical, general
    #[arg(long)]
    topic: Option<TopicSetting>,

    /// Reference year for source recency (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Show guideline violations and compliance
    #[arg(long, short)]
    guidelines: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .wikigraderc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// List the built-in writing guidelines
    Guidelines {
        /// Output format as JSON
        #[arg(long, short)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Init { threshold, dir, force } => run_init(threshold, dir.as_deref(), force),
            Commands::Guidelines { json } => run_guidelines(json),
        };
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a path is required when no subcommand is given");
    };

    // Resolve work directory for config search
    let work_dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    };

    // Load config (CLI flags override config file)
    let config = load_config(work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.topic, args.year);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let files = collect_article_files(&path, &config, ignore_set.as_ref())?;
    if files.is_empty() {
        eprintln!("{}: No article files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let engine = AnalysisEngine::from_config(&config).context("Invalid configuration")?;

    let use_parallel = args.parallel || files.len() > 10;
    let outcomes = if use_parallel {
        engine.analyze_parallel(&files, Some(&config))
    } else {
        engine.analyze_many(&files, Some(&config))
    };

    let mut results = Vec::with_capacity(outcomes.len());
    let mut analyzed_paths = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(result) => {
                results.push(result);
                analyzed_paths.push(file.as_path());
            }
            Err(e) => {
                had_errors = true;
                warn!(path = %file.display(), error = %e, "analysis failed");
                if !args.quiet {
                    eprintln!(
                        "{}: Failed to analyze {}: {:#}",
                        "Error".red(),
                        file.display(),
                        e
                    );
                }
            }
        }
    }

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    report(&args, &results);

    if below_threshold(&config, &analyzed_paths, &results) {
        return Ok(ExitCode::from(1));
    }
    if had_errors {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn report(args: &Args, results: &[AnalysisResult]) {
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            let batch = BatchReport::from_results(results);
            println!("{}", reporter.report_with_summary(results, &batch));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in results {
            reporter.report_quiet(result);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if results.len() == 1 {
            reporter.report(&results[0], args.guidelines);
        } else {
            let batch = BatchReport::from_results(results);
            reporter.report_many(results, &batch, args.guidelines);
        }
    }
}

/// Whether any article scored under its effective threshold
fn below_threshold(config: &Config, paths: &[&Path], results: &[AnalysisResult]) -> bool {
    paths.iter().zip(results).any(|(path, result)| {
        config
            .effective_for_file(path)
            .threshold
            .is_some_and(|threshold| result.score.overall < threshold)
    })
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>, force: bool) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);

    let mut config = Config::starter();
    if threshold.is_some() {
        config.threshold = threshold;
    }
    let path = write_starter_config(dir, &config, force)?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        path.display(),
        config.threshold.unwrap_or_default()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_guidelines(json: bool) -> Result<ExitCode> {
    let catalog = GuidelineCatalog::builtin();
    if json {
        println!("{}", JsonReporter::new().pretty().report_catalog(catalog));
    } else {
        ConsoleReporter::new().report_catalog(catalog);
    }
    Ok(ExitCode::SUCCESS)
}

fn collect_article_files(
    path: &Path,
    config: &Config,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !is_article_file(file_path) {
            continue;
        }
        // config files are JSON too
        if file_path.file_name().is_some_and(|n| n == CONFIG_FILENAME)
            || config.is_source(file_path)
        {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(file_path, set) {
                continue;
            }
        }
        files.push(file_path.to_path_buf());
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}
