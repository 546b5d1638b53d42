//! Aliasbot CLI - find variables worth renaming and review naming suggestions

use aliasbot::config::{self, AliasConfig};
use aliasbot::suggestion::parse_suggestions;
use aliasbot::{ui, ExtractionEngine, LanguageTag, VariableRecord};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "aliasbot")]
#[command(version)]
#[command(about = "Multi-language variable extraction for naming review")]
#[command(long_about = r#"
Aliasbot finds variable declarations in source files, reporting each
variable's initializer, value kind and (for JavaScript and TypeScript)
every place it is read.

Example usage:
  aliasbot extract src/
  aliasbot extract main.py --format json
  aliasbot suggestions --response reply.md --source app.js
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./aliasbot.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract variable declarations from files or directories
    Extract {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Language of the given files; restricts directory walks to that language
        #[arg(short, long)]
        language: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Worker threads (defaults to the config value, then the CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List supported languages
    Languages {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Parse a model response and show its naming suggestions
    Suggestions {
        /// File holding the model response
        #[arg(short, long)]
        response: PathBuf,

        /// Source file whose variables the suggestions are for
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Language of the source file
        #[arg(short, long)]
        language: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write a starter aliasbot.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Extraction result for one file
#[derive(Serialize)]
struct FileReport {
    path: PathBuf,
    language: LanguageTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Vec<VariableRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?;
    if config.is_some() {
        tracing::debug!("loaded config");
    }
    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Extract { paths, language, format, jobs } => {
            run_extract(&config, &paths, language.as_deref(), format, jobs)
        }
        Commands::Languages { format } => run_languages(&config, format),
        Commands::Suggestions { response, source, language, format } => {
            run_suggestions(&config, &response, source.as_deref(), language.as_deref(), format)
        }
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &AliasConfig::starter(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
            Ok(())
        }
    }
}

fn parse_language(language: Option<&str>) -> anyhow::Result<Option<LanguageTag>> {
    language
        .map(|tag| tag.parse::<LanguageTag>())
        .transpose()
        .map_err(Into::into)
}

/// Resolve the files to extract and the language of each
fn collect_tasks(
    config: &AliasConfig,
    paths: &[PathBuf],
    forced: Option<LanguageTag>,
) -> anyhow::Result<Vec<(PathBuf, LanguageTag)>> {
    let mut tasks = Vec::new();
    for path in paths {
        if path.is_dir() {
            for file in aliasbot::ignore::walk_files(path, &config.exclude) {
                match config.language_for(&file)? {
                    Some(language) if forced.is_none_or(|forced| forced == language) => {
                        tasks.push((file, language));
                    }
                    _ => tracing::trace!(path = %file.display(), "skipping file"),
                }
            }
        } else {
            let language = match forced {
                Some(language) => language,
                None => config
                    .language_for(path)?
                    .with_context(|| format!("cannot detect the language of {}", path.display()))?,
            };
            tasks.push((path.clone(), language));
        }
    }
    Ok(tasks)
}

/// Extract every task on a pool of scoped worker threads, keeping input order
fn extract_all(
    engine: &ExtractionEngine,
    tasks: Vec<(PathBuf, LanguageTag)>,
    jobs: usize,
) -> anyhow::Result<Vec<FileReport>> {
    let (task_tx, task_rx) = crossbeam::channel::unbounded();
    for task in tasks.into_iter().enumerate() {
        task_tx.send(task)?;
    }
    drop(task_tx);

    let (report_tx, report_rx) = crossbeam::channel::unbounded();
    crossbeam::thread::scope(|scope| {
        for _ in 0..jobs {
            let task_rx = task_rx.clone();
            let report_tx = report_tx.clone();
            scope.spawn(move |_| {
                for (index, (path, language)) in task_rx.iter() {
                    let report = match engine.extract_file(&path, Some(language)) {
                        Ok(records) => FileReport { path, language, variables: Some(records), error: None },
                        Err(e) => FileReport { path, language, variables: None, error: Some(e.to_string()) },
                    };
                    if report_tx.send((index, report)).is_err() {
                        break;
                    }
                }
            });
        }
    })
    .map_err(|_| anyhow::anyhow!("extraction worker panicked"))?;
    drop(report_tx);

    let mut reports: Vec<(usize, FileReport)> = report_rx.iter().collect();
    reports.sort_by_key(|(index, _)| *index);
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

fn run_extract(
    config: &AliasConfig,
    paths: &[PathBuf],
    language: Option<&str>,
    format: OutputFormat,
    jobs: Option<usize>,
) -> anyhow::Result<()> {
    let forced = parse_language(language)?;
    let tasks = collect_tasks(config, paths, forced)?;
    let jobs = jobs
        .or(config.jobs)
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
        .clamp(1, tasks.len().max(1));
    tracing::info!(files = tasks.len(), jobs, "extracting");

    let engine = ExtractionEngine::with_options(config.heuristic_options());
    let reports = extract_all(&engine, tasks, jobs)?;
    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_reports(&reports),
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, reports.len());
    }
    Ok(())
}

fn print_reports(reports: &[FileReport]) {
    if reports.is_empty() {
        ui::warn("No supported source files found");
        return;
    }

    let mut total = 0;
    for report in reports {
        let path = report.path.display().to_string();
        match (&report.variables, &report.error) {
            (Some(records), _) => {
                total += records.len();
                ui::file_heading(&path, report.language, records.len());
                if records.is_empty() {
                    println!("  {}", ui::muted("no variables"));
                } else {
                    println!("{}", ui::records_table(records));
                }
            }
            (None, Some(error)) => ui::error(&format!("{}: {}", path, error)),
            (None, None) => {}
        }
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    ui::section("Summary");
    ui::summary_row("Files:", &reports.len().to_string());
    ui::summary_row("Variables:", &total.to_string());
    if failed > 0 {
        ui::summary_row("Failed:", &failed.to_string());
    }
}

fn run_languages(config: &AliasConfig, format: OutputFormat) -> anyhow::Result<()> {
    let engine = ExtractionEngine::with_options(config.heuristic_options());
    let languages = engine.languages();
    match format {
        OutputFormat::Json => {
            let data: Vec<_> = languages
                .iter()
                .map(|info| {
                    serde_json::json!({
                        "tag": info.tag.as_str(),
                        "adapter": info.adapter,
                        "family": info.family.as_str(),
                        "extensions": info.tag.file_extensions(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Text => {
            ui::header("Supported languages");
            println!("{}", ui::languages_table(&languages));
            if !config.extensions.is_empty() {
                ui::section("Extension overrides");
                for (extension, tag) in &config.extensions {
                    ui::summary_row(&format!(".{}", extension), tag);
                }
            }
        }
    }
    Ok(())
}

fn run_suggestions(
    config: &AliasConfig,
    response: &Path,
    source: Option<&Path>,
    language: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(response)
        .with_context(|| format!("failed to read {}", response.display()))?;
    let suggestions = parse_suggestions(&text);
    if format == OutputFormat::Text {
        ui::info("Response", &response.display().to_string());
    }

    let Some(source) = source else {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
            OutputFormat::Text => {
                ui::header("Suggestions");
                if suggestions.is_empty() {
                    ui::warn("No suggestions found in response");
                }
                for entry in suggestions.entries() {
                    ui::summary_row(&format!("{}:", entry.variable), &entry.candidates.join(", "));
                }
            }
        }
        return Ok(());
    };

    let language = match parse_language(language)? {
        Some(language) => language,
        None => config
            .language_for(source)?
            .with_context(|| format!("cannot detect the language of {}", source.display()))?,
    };
    let engine = ExtractionEngine::with_options(config.heuristic_options());
    let records = engine.extract_file(source, Some(language))?;
    let reviews = suggestions.for_records(&records);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reviews)?),
        OutputFormat::Text => {
            ui::file_heading(&source.display().to_string(), language, records.len());
            println!("{}", ui::review_table(&reviews));
            let unmatched: Vec<_> = suggestions
                .entries()
                .iter()
                .filter(|entry| !records.iter().any(|r| r.name == entry.variable))
                .map(|entry| entry.variable.as_str())
                .collect();
            if !unmatched.is_empty() {
                ui::warn(&format!("Suggestions for unknown variables: {}", unmatched.join(", ")));
            }
        }
    }
    Ok(())
}
