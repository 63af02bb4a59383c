use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, debug, info};

use explainer::config::DEFAULT_CONFIG;
use explainer::language::{self, LANGUAGES};
use explainer::store::SnippetStore;
use explainer::{AnalysisResult, Config, Report};

#[derive(Parser)]
#[command(name = "explainer", version)]
#[command(about = "Render AI code analyses as structured documents and reports")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "explainer.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the languages a snippet can be analyzed as
    Languages,

    /// Render a markdown-subset file
    Render {
        /// Input file
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = RenderFormat::Typst)]
        format: RenderFormat,

        /// Output file (stdout for json/typst, input name with the format's extension otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the analysis prompt for a snippet
    Prompt {
        #[command(flatten)]
        snippet: SnippetArgs,
    },

    /// Build a report from a snippet and the provider's analysis response
    Report {
        #[command(flatten)]
        snippet: SnippetArgs,

        /// JSON response from the analysis provider
        #[arg(short, long)]
        analysis: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ReportFormat::Pdf)]
        format: ReportFormat,

        /// Output file (defaults to the analysis file name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Where to write it (defaults to the --config path)
        path: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct SnippetArgs {
    /// Language of the snippet (value or label, see `explainer languages`)
    #[arg(short, long)]
    language: String,

    /// File containing the snippet
    #[arg(long, required_unless_present = "previous", conflicts_with = "previous")]
    code: Option<PathBuf>,

    /// Use the last analyzed snippet
    #[arg(long)]
    previous: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderFormat {
    Json,
    Typst,
    Pdf,
    Svg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Typst,
    Pdf,
    Svg,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Typst => "typ",
            ReportFormat::Pdf => "pdf",
            ReportFormat::Svg => "svg",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let config = Config::load(&cli.config)?;
    let store = SnippetStore::new(&config.store.dir);

    match cli.command {
        Command::Languages => {
            for language in LANGUAGES {
                println!("{:<12} {}", language.value, language.label);
            }
            Ok(())
        }
        Command::Render {
            input,
            format,
            output,
        } => render(&input, format, output, &config),
        Command::Prompt { snippet } => {
            let (code, language) = load_snippet(&snippet, &store)?;
            print!("{}", explainer::analysis::analysis_prompt(&code, language));
            Ok(())
        }
        Command::Report {
            snippet,
            analysis,
            format,
            output,
        } => {
            let (code, language) = load_snippet(&snippet, &store)?;
            let response = fs::read_to_string(&analysis)
                .with_context(|| format!("Error reading {}", analysis.display()))?;
            let result =
                AnalysisResult::from_json(&response).map_err(|e| anyhow!(e.user_message()))?;

            store.save(&code)?;

            let report = Report {
                language,
                code: &code,
                analysis: &result,
            };
            let output = output.unwrap_or_else(|| analysis.with_extension(format.extension()));
            write_report(&report, format, &output, &config)
        }
        Command::InitConfig { path } => {
            let path = path.unwrap_or(cli.config);
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            fs::write(&path, DEFAULT_CONFIG)
                .with_context(|| format!("Error writing {}", path.display()))?;
            info!("Created {}", path.display());
            Ok(())
        }
    }
}

/// Resolve the snippet and its language tag from the arguments or the cache.
fn load_snippet(args: &SnippetArgs, store: &SnippetStore) -> Result<(String, &'static str)> {
    let language = language::find(&args.language).ok_or_else(|| {
        let known: Vec<_> = LANGUAGES.iter().map(|l| l.value).collect();
        anyhow!(
            "Unknown language '{}' (expected one of: {})",
            args.language,
            known.join(", ")
        )
    })?;

    let code = match &args.code {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Error reading {}", path.display()))?,
        None => store
            .load()
            .ok_or_else(|| anyhow!("No previously analyzed code in {}", store.path().display()))?,
    };

    if code.trim().is_empty() {
        bail!("Please enter some code to analyze.");
    }

    debug!("Loaded {} bytes of {} code", code.len(), language.label);
    Ok((code, language.value))
}

fn render(
    input: &Path,
    format: RenderFormat,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Error reading {}", input.display()))?;

    match format {
        RenderFormat::Json => {
            let json = serde_json::to_string_pretty(&explainer::render(&content))?;
            emit_text(&json, output.as_deref())
        }
        RenderFormat::Typst => {
            let typst = explainer::markdown_to_typst_with_config(&content, config);
            emit_text(&typst, output.as_deref())
        }
        RenderFormat::Pdf => {
            let output = output.unwrap_or_else(|| input.with_extension("pdf"));
            let markup = explainer::markdown_to_typst_with_config(&content, config);
            write_file(&output, &explainer::compile_pdf(markup)?)
        }
        RenderFormat::Svg => {
            let output = output.unwrap_or_else(|| input.with_extension("svg"));
            let markup = explainer::markdown_to_typst_with_config(&content, config);
            write_svg_pages(&explainer::compile_svg(markup)?, &output)
        }
    }
}

fn write_report(
    report: &Report,
    format: ReportFormat,
    output: &Path,
    config: &Config,
) -> Result<()> {
    match format {
        ReportFormat::Typst => {
            write_file(output, explainer::report_to_typst(report, config).as_bytes())
        }
        ReportFormat::Pdf => write_file(output, &explainer::report_to_pdf(report, config)?),
        ReportFormat::Svg => write_svg_pages(&explainer::report_to_svg(report, config)?, output),
    }
}

/// Print to stdout, or write to a file when one was given.
fn emit_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_file(path, text.as_bytes()),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

/// Write each page as `<stem>-<n>.svg` next to `output`.
fn write_svg_pages(svg: &explainer::SvgDocument, output: &Path) -> Result<()> {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("page");
    for (index, page) in svg.pages.iter().enumerate() {
        let path = output.with_file_name(format!("{}-{}.svg", stem, index + 1));
        write_file(&path, page.as_bytes())?;
    }
    debug!("Page size {}x{}pt", svg.width_pt, svg.height_pt);
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Error writing {}", path.display()))?;
    info!("Created {}", path.display());
    Ok(())
}
