use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "scenegen", version, about)]
struct Cli {
    /// Config file (defaults to the per-user scenegen/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the scene collection for a run from the spreadsheet, then fetch its slides.
    Generate(GenerateArgs),
    /// Build a scene collection from local template and run-list files.
    Synth(SynthArgs),
    /// Download the slide deck for a run.
    Slides(RunArgs),
    /// Load a scene collection and check its structure.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Spreadsheet URL (defaults to `spreadsheet_url` from the config).
    #[arg(long)]
    url: Option<String>,

    /// Run name, i.e. the spreadsheet tab (defaults to the next Sunday, YYYY-MM-DD).
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Skip the slide download.
    #[arg(long)]
    no_slides: bool,

    /// Append scenes even if their names are already taken.
    #[arg(long)]
    allow_duplicates: bool,
}

#[derive(Args, Debug)]
struct SynthArgs {
    /// Template scene collection JSON.
    #[arg(long)]
    template: PathBuf,

    /// Run-list CSV (header row first).
    #[arg(long)]
    runlist: PathBuf,

    /// Name of the generated collection (defaults to the next Sunday).
    #[arg(long)]
    name: Option<String>,

    /// Slide deck base URL; `&page=<n>` is appended per scene.
    #[arg(long)]
    slides_url: String,

    /// Output scene collection JSON.
    #[arg(long)]
    out: PathBuf,

    /// Append scenes even if their names are already taken.
    #[arg(long)]
    allow_duplicates: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Scene collection JSON to check.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Command::Generate(args) => cmd_generate(cli.config, args),
        Command::Synth(args) => cmd_synth(args),
        Command::Slides(args) => cmd_slides(cli.config, args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn duplicate_policy(allow: bool) -> scenegen::DuplicatePolicy {
    if allow {
        scenegen::DuplicatePolicy::Allow
    } else {
        scenegen::DuplicatePolicy::Reject
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<scenegen::Config> {
    scenegen::Config::load(path.as_deref()).context("load configuration")
}

fn resolve_run(config: &scenegen::Config, run: RunArgs) -> anyhow::Result<(String, String)> {
    let url = match run.url {
        Some(url) => url,
        None => config.spreadsheet_url()?.to_string(),
    };
    let name = run.name.unwrap_or_else(scenegen::default_run_name);
    Ok((url, name))
}

fn cmd_generate(config_path: Option<PathBuf>, args: GenerateArgs) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (url, name) = resolve_run(&config, args.run)?;
    let sheets = scenegen::GoogleSheets::new(config.api_key.clone());

    let opts = scenegen::GenerateOptions {
        synthesis: scenegen::SynthesisOptions {
            duplicates: duplicate_policy(args.allow_duplicates),
        },
    };
    let out = scenegen::generate_scene_collection(&config, &sheets, &url, &name, &opts)
        .with_context(|| format!("generate scene collection '{name}'"))?;
    eprintln!("wrote {}", out.display());

    if !args.no_slides {
        fetch_and_report(&config, &sheets, &url, &name)?;
    }
    Ok(())
}

fn cmd_slides(config_path: Option<PathBuf>, args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (url, name) = resolve_run(&config, args)?;
    let sheets = scenegen::GoogleSheets::new(config.api_key.clone());
    fetch_and_report(&config, &sheets, &url, &name)
}

fn fetch_and_report(
    config: &scenegen::Config,
    sheets: &scenegen::GoogleSheets,
    url: &str,
    name: &str,
) -> anyhow::Result<()> {
    let drive = scenegen::GoogleDrive::new();
    match scenegen::fetch_slides(config, sheets, &drive, url, name)
        .with_context(|| format!("fetch slides for '{name}'"))?
    {
        Some(path) => eprintln!("wrote {}", path.display()),
        None => eprintln!("no slide link for '{name}', skipped slide download"),
    }
    Ok(())
}

fn cmd_synth(args: SynthArgs) -> anyhow::Result<()> {
    let name = args.name.unwrap_or_else(scenegen::default_run_name);
    let opts = scenegen::SynthesisOptions {
        duplicates: duplicate_policy(args.allow_duplicates),
    };
    let collection = scenegen::synthesize_files(
        &args.template,
        &args.runlist,
        &name,
        &args.slides_url,
        &args.out,
        &opts,
    )
    .with_context(|| format!("synthesize '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} scenes)",
        args.out.display(),
        collection.scene_order.len()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let collection = scenegen::SceneCollection::from_path(&args.in_path)?;
    collection
        .validate()
        .with_context(|| format!("check '{}'", args.in_path.display()))?;
    println!(
        "ok: {} sources, {} scenes",
        collection.sources.len(),
        collection.scene_order.len()
    );
    Ok(())
}
