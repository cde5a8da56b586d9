use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use fraction_core::model::Question;
use services::{AppServices, Clock, OpenAiSpeech};
use storage::{AudioCache, builtin_catalog};

const DEFAULT_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_AUDIO_CACHE: &str = "./audio_cache";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAddr { raw: String },
    InvalidAudioCache { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAddr { raw } => write!(f, "invalid --addr value: {raw}"),
            ArgsError::InvalidAudioCache { raw } => {
                write!(f, "invalid --audio-cache value: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- serve   [--addr <host:port>] [--audio-cache <dir>]");
    eprintln!("  cargo run -p app -- catalog  # print the built-in lessons as JSON");
    eprintln!();
    eprintln!("Defaults for serve:");
    eprintln!("  --addr {DEFAULT_ADDR}");
    eprintln!("  --audio-cache {DEFAULT_AUDIO_CACHE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FRACTION_ADDR, FRACTION_AUDIO_CACHE");
    eprintln!("  FRACTION_TTS_API_KEY, FRACTION_TTS_BASE_URL, FRACTION_TTS_MODEL");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Catalog,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "catalog" => Some(Self::Catalog),
            _ => None,
        }
    }
}

struct ServeArgs {
    addr: SocketAddr,
    audio_cache: PathBuf,
}

impl ServeArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut addr = parse_addr(
            std::env::var("FRACTION_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into()),
        )?;
        let mut audio_cache = std::env::var("FRACTION_AUDIO_CACHE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_AUDIO_CACHE), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--addr" => {
                    addr = parse_addr(require_value(args, "--addr")?)?;
                }
                "--audio-cache" => {
                    let value = require_value(args, "--audio-cache")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidAudioCache { raw: value });
                    }
                    audio_cache = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { addr, audio_cache })
    }
}

fn parse_addr(raw: String) -> Result<SocketAddr, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidAddr { raw })
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let speech = OpenAiSpeech::from_env();
    if !speech.enabled() {
        log::warn!("FRACTION_TTS_API_KEY not set; welcome audio will fail unless cached");
    }

    let cache = AudioCache::new(args.audio_cache);
    cache.ensure_dir().await?;
    log::info!("audio cache at {}", cache.dir().display());

    let services = AppServices::in_memory(Clock::system(), cache, Arc::new(speech))?;
    let router = api::router(services);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

fn print_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = builtin_catalog()?;
    let questions: Vec<&Question> = catalog
        .lessons()
        .iter()
        .flat_map(|lesson| catalog.questions_for(lesson.id()))
        .collect();
    let doc = serde_json::json!({
        "lessons": catalog.lessons(),
        "questions": questions,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means serve.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    match cmd {
        Command::Catalog => print_catalog(),
        Command::Serve => {
            let mut iter = argv.into_iter();
            let args = ServeArgs::parse(&mut iter).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;
            serve(args).await
        }
    }
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("{err}");
        std::process::exit(2);
    }
}
