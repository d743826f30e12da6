use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use talk_compiler::{Talk, TalkCompiler, compile_dir, config, output};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "talk-compiler")]
#[command(about = "Compile markdown talks into structured slides")]
#[command(long_about = "\
Compile markdown talks into structured slides

A talk is a markdown file with YAML frontmatter. Slides are separated by
`---` lines; presenter notes follow a `???` line within a slide. The notes
of the first slide become the talk's intro.

Content structure:

  content/
  ├── talks/
  │   └── paradise-lost.md               # Published talk
  ├── drafts/
  │   └── work-in-progress.md            # Draft (compiled with draft = true)
  └── images/talks/
      └── paradise-lost/
          ├── paradise-lost.001.png      # One image per slide, PNG or JPG
          └── paradise-lost.002.jpg

Required frontmatter: title, event, location, published_at.

Run 'talk-compiler gen-config' to generate a documented talks.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing talks.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Content directory (overrides content_root from talks.toml)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Log pipeline steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// JSON shape printed by `compile`: the talk plus its rendered sidebar info.
#[derive(Serialize)]
struct CompiledTalk<'a> {
    #[serde(flatten)]
    talk: &'a Talk,
    publishing_info: String,
}

#[derive(Subcommand)]
enum Command {
    /// Compile talk files and print them as JSON
    Compile {
        /// Talk files to compile
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Mark the compiled talks as drafts
        #[arg(long)]
        draft: bool,
        /// Print a readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Compile every talk and draft, reporting failures
    Check,
    /// Print a stock talks.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let talks_config = config::load_config(&cli.config_dir)?;
    init_thread_pool(&talks_config.processing);
    let content_root = cli
        .content
        .clone()
        .unwrap_or_else(|| talks_config.content_root_in(&cli.config_dir));
    let compiler = TalkCompiler::new(&content_root);

    match cli.command {
        Command::Compile {
            files,
            draft,
            summary,
        } => {
            for file in &files {
                let (dir, name) = split_path(file)?;
                let talk = compiler.compile(dir, name, draft)?;
                if summary {
                    output::print_talk_output(&talk);
                    println!();
                } else {
                    let compiled = CompiledTalk {
                        publishing_info: talk.publishing_info(&talks_config.info_html),
                        talk: &talk,
                    };
                    println!("{}", serde_json::to_string_pretty(&compiled)?);
                }
            }
        }
        Command::Check => {
            println!("==> Checking talks in {}", content_root.display());
            let mut results =
                compile_dir(&compiler, &talks_config.talks_path(&content_root), false)?;
            results.extend(compile_dir(
                &compiler,
                &talks_config.drafts_path(&content_root),
                true,
            )?);

            for (name, result) in &results {
                if let Err(e) = result {
                    warn!("{name}: {e}");
                }
            }
            output::print_check_output(&results);

            if results.iter().any(|(_, r)| r.is_err()) {
                std::process::exit(1);
            }
        }
        Command::GenConfig => unreachable!("handled before loading config"),
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the default filter.
fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if verbose {
        "talk_compiler=debug"
    } else {
        "talk_compiler=info"
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Split a talk path into its directory and file name.
fn split_path(file: &Path) -> Result<(&Path, &str), Box<dyn std::error::Error>> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("not a talk file: {}", file.display()))?;
    let dir = file.parent().unwrap_or_else(|| Path::new("."));
    Ok((dir, name))
}
