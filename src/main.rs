use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotmp3::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Download every track of a Spotify playlist
    Playlist(PlaylistOptions),

    /// Download a single media link or search result
    Download(DownloadOptions),

    /// Show or change the remembered output folder
    Folder(FolderOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist URL, spotify:playlist: URI or playlist id
    playlist: String,

    /// Output folder (remembered for the next run)
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    /// Media URL, or free text such as "title artist"
    input: String,

    /// Treat the input as a search phrase even if it looks like a link
    #[clap(long)]
    search: bool,

    /// Custom file name, without extension
    #[clap(long)]
    name: Option<String>,

    /// Output folder (remembered for the next run)
    #[clap(long, short)]
    output: Option<PathBuf>,

    /// Do not embed the thumbnail as cover art
    #[clap(long)]
    no_artwork: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FolderOptions {
    /// New output folder
    #[clap(long)]
    set: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Playlist(opt) => cli::playlist(opt.playlist, opt.output).await,
        Command::Download(opt) => {
            cli::download(opt.input, opt.search, opt.name, opt.output, opt.no_artwork).await
        }
        Command::Folder(opt) => cli::folder(opt.set).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
