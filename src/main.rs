use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lbcli::{
    cli, config, error,
    types::{Entity, ListenType, PlaylistKind, StatsRange},
};

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
    /// Validate and store a ListenBrainz user token
    Auth(AuthOptions),

    /// Import listens from JSON files
    Import(ImportOptions),

    /// Tell ListenBrainz what is playing right now
    NowPlaying(TrackOptions),

    /// Submit a single listen stamped with the current time
    Listen(TrackOptions),

    /// Show a user's listens
    Listens(ListensOptions),

    /// Follow a user
    Follow(UserTokenOptions),

    /// Stop following a user
    Unfollow(UserTokenOptions),

    /// List the followers of a user
    Followers(UserOptions),

    /// List the users a user follows
    Following(UserOptions),

    /// Show top artists, releases or recordings of a user
    Stats(StatsOptions),

    /// List a user's playlists
    Playlists(PlaylistsOptions),

    /// List the recordings a user has pinned
    Pins(PinsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// User token from https://listenbrainz.org/settings/
    #[clap(long)]
    token: Option<String>,

    /// Remove the stored token
    #[clap(long, conflicts_with = "token")]
    clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// JSON files, each holding an array of listens
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Listens per submission
    #[clap(long, default_value_t = 1000)]
    batch_size: usize,

    /// Listen type of the submission (single or import)
    #[clap(long, default_value = "import")]
    listen_type: ListenType,

    #[clap(long, env = "LISTENBRAINZ_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    #[clap(long)]
    artist: String,

    #[clap(long)]
    track: String,

    #[clap(long)]
    release: Option<String>,

    #[clap(long, env = "LISTENBRAINZ_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListensOptions {
    user: String,

    /// Number of listens to show
    #[clap(long)]
    count: Option<u32>,

    /// Only listens after this unix timestamp
    #[clap(long, conflicts_with = "max_ts")]
    min_ts: Option<i64>,

    /// Only listens before this unix timestamp
    #[clap(long)]
    max_ts: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct UserOptions {
    user: String,
}

#[derive(Parser, Debug, Clone)]
pub struct UserTokenOptions {
    user: String,

    #[clap(long, env = "LISTENBRAINZ_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    user: String,

    /// artist, release or recording
    #[clap(long, default_value = "artist")]
    entity: Entity,

    /// week, month, year or all_time
    #[clap(long, default_value = "all_time")]
    range: StatsRange,

    #[clap(long)]
    count: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    user: String,

    /// Playlists created for the user
    #[clap(long, conflicts_with = "collaborator")]
    created_for: bool,

    /// Playlists the user collaborates on
    #[clap(long)]
    collaborator: bool,

    #[clap(long, default_value_t = 25)]
    count: u32,

    /// Include private playlists of the token owner
    #[clap(long)]
    token: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PinsOptions {
    user: String,

    #[clap(long, default_value_t = 25)]
    count: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => cli::auth(opt.token, opt.clear).await,
        Command::Import(opt) => {
            cli::import(opt.files, opt.batch_size, opt.listen_type, opt.token).await
        }
        Command::NowPlaying(opt) => {
            cli::now_playing(opt.artist, opt.track, opt.release, opt.token).await
        }
        Command::Listen(opt) => cli::listen(opt.artist, opt.track, opt.release, opt.token).await,
        Command::Listens(opt) => cli::listens(opt.user, opt.count, opt.min_ts, opt.max_ts).await,
        Command::Follow(opt) => cli::follow(opt.user, opt.token).await,
        Command::Unfollow(opt) => cli::unfollow(opt.user, opt.token).await,
        Command::Followers(opt) => cli::followers(opt.user).await,
        Command::Following(opt) => cli::following(opt.user).await,
        Command::Stats(opt) => cli::stats(opt.user, opt.entity, opt.range, opt.count).await,
        Command::Playlists(opt) => {
            let kind = if opt.created_for {
                PlaylistKind::CreatedFor
            } else if opt.collaborator {
                PlaylistKind::Collaborator
            } else {
                PlaylistKind::Owned
            };
            cli::playlists(opt.user, kind, opt.count, opt.token).await
        }
        Command::Pins(opt) => cli::pins(opt.user, opt.count).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
