use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{
    CommandAction, CommandHandler, CommandRequest, DetectPayload, MatchPayload, NormalizePayload,
    RoutePayload,
};
use gensys_inconsistency::{Lexicon, ProfileRecord};
use gensys_protocol::{serialize_json, serialize_json_pretty, CommandResponse};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod command;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "gensys")]
#[command(about = "Label matching, report routing and note checks for GENSYS case files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Pretty-print JSON response
    #[arg(long, global = true)]
    pretty: bool,

    /// TOML file overriding the name-check word lists
    #[arg(long, global = true, env = "GENSYS_LEXICON")]
    lexicon: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON Command API request
    Command(CommandArgs),

    /// Normalize a label (case, accents, punctuation, whitespace)
    Normalize(NormalizeArgs),

    /// Check whether a section title matches a folder name
    Match(MatchArgs),

    /// Check a note for name/date inconsistencies against a profile
    Detect(DetectArgs),

    /// Route folder contents into report sections
    Route(RouteArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct NormalizeArgs {
    /// Text to normalize
    text: String,
}

#[derive(Args)]
struct MatchArgs {
    /// Report section title
    section: String,

    /// Folder name
    folder: String,
}

#[derive(Args)]
struct DetectArgs {
    /// JSON file with the profile record (without one, no checks run)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Inline note text (defaults to stdin)
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// File containing the note text
    #[arg(long)]
    text_file: Option<PathBuf>,
}

#[derive(Args)]
struct RouteArgs {
    /// JSON file with `sections`, `folders` and an optional `placeholder` (defaults to stdin)
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let pretty = cli.pretty;
    let response = match prepare(cli) {
        Ok((handler, request)) => handler.execute(request),
        Err(err) => {
            let (code, hint) = command::classify_error(&err);
            log::error!("{err:#}");
            CommandResponse::error(code, format!("{err:#}"), hint)
        }
    };

    emit(&response, pretty)?;
    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn prepare(cli: Cli) -> Result<(CommandHandler, CommandRequest)> {
    let lexicon = match &cli.lexicon {
        Some(path) => Lexicon::load(path)
            .with_context(|| format!("Failed to load lexicon {}", path.display()))?,
        None => Lexicon::default(),
    };
    let request = build_request(cli.command)?;
    Ok((CommandHandler::new(lexicon), request))
}

fn emit(response: &CommandResponse, pretty: bool) -> Result<()> {
    let output = if pretty {
        serialize_json_pretty(response)?
    } else {
        serialize_json(response)?
    };
    print_stdout(&output)
}

fn build_request(command: Commands) -> Result<CommandRequest> {
    match command {
        Commands::Command(args) => {
            let raw = read_request(&args)?;
            serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")
        }
        Commands::Normalize(args) => request(
            CommandAction::Normalize,
            NormalizePayload { text: args.text },
        ),
        Commands::Match(args) => request(
            CommandAction::Match,
            MatchPayload {
                section: args.section,
                folder: args.folder,
            },
        ),
        Commands::Detect(args) => {
            let profile = args.profile.as_deref().map(read_profile).transpose()?;
            let text = match (args.text, args.text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_file(&path, "note")?,
                (None, None) => read_stdin("note")?,
            };
            request(CommandAction::Detect, DetectPayload { text, profile })
        }
        Commands::Route(args) => {
            let raw = match &args.file {
                Some(path) => read_file(path, "route request")?,
                None => read_stdin("route request")?,
            };
            let payload: RoutePayload =
                serde_json::from_str(&raw).context("Invalid route request")?;
            request(CommandAction::Route, payload)
        }
    }
}

fn request<T: Serialize>(action: CommandAction, payload: T) -> Result<CommandRequest> {
    Ok(CommandRequest {
        action,
        payload: serde_json::to_value(payload)?,
    })
}

fn read_profile(path: &Path) -> Result<ProfileRecord> {
    let raw = read_file(path, "profile")?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid profile in {}", path.display()))
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {what} from {}", path.display()))
}

fn read_stdin(what: &str) -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .with_context(|| format!("Failed to read {what} from stdin"))?;
    Ok(buffer)
}

fn read_request(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return read_file(path, "JSON request");
    }

    let buffer = read_stdin("JSON request")?;
    if buffer.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Command request is empty. Provide --json, --file, or pipe JSON via stdin.",
        ))
        .context("Failed to read JSON request");
    }

    Ok(buffer)
}
