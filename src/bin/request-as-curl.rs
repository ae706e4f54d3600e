use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use request_as_curl::{Body, CommandBuilder, Platform, RawRequest};
use tracing_subscriber::EnvFilter;

/// Print the curl command that replays an HTTP request.
#[derive(Parser, Debug)]
#[command(name = "request-as-curl", version, about)]
struct Cli {
  /// Shell the command is escaped for [default: the current platform's]
  #[arg(long, value_enum)]
  shell: Option<Platform>,
  /// How the input is written
  #[arg(long, value_enum, default_value_t = Format::Raw)]
  format: Format,
  /// Use this text as the body instead of the one in the input
  #[arg(long)]
  body: Option<String>,
  /// Input file, stdin when omitted
  file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
  /// An HTTP/1.x request message
  Raw,
  /// {"method", "url" or "path", "headers", "body"}
  Json,
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();
  let cli = Cli::parse();
  match run(cli) {
    Ok(command) => {
      println!("{command}");
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("request-as-curl: {e}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> request_as_curl::Result<String> {
  let input = match &cli.file {
    Some(path) => std::fs::read(path)?,
    None => {
      let mut buf = Vec::new();
      std::io::stdin().read_to_end(&mut buf)?;
      buf
    }
  };
  let (raw, body) = match cli.format {
    Format::Raw => RawRequest::parse_http(&input)?,
    Format::Json => RawRequest::from_json(&String::from_utf8_lossy(&input))?,
  };
  let body = cli.body.map(Body::from).or(body);
  let platform = cli.shell.unwrap_or_default();
  tracing::debug!(?platform, "serializing");
  Ok(CommandBuilder::new().platform(platform).serialize(&raw, body))
}
