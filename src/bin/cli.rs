//! mpdwire CLI Client
//!
//! Command-line interface for driving a daemon through mpdwire.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use mpdwire::{Client, Config, FieldType, Session, Song};
use tracing_subscriber::{fmt, EnvFilter};

/// mpdwire CLI
#[derive(Parser, Debug)]
#[command(name = "mpdwire-cli")]
#[command(about = "CLI for the MPD line protocol")]
#[command(version)]
struct Args {
    /// Daemon host
    #[arg(long, env = "MPD_HOST", default_value = "localhost")]
    host: String,

    /// Daemon port
    #[arg(short, long, env = "MPD_PORT", default_value_t = mpdwire::config::DEFAULT_PORT)]
    port: u16,

    /// Reply timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show player status
    Status,

    /// Show the current song
    Current,

    /// Show database statistics
    Stats,

    /// List the queue
    Queue,

    /// Substring search with fallbacks
    Search {
        /// artist, album, title, genre or any
        field: FieldType,

        /// Query text
        query: String,
    },

    /// Exact-match lookup
    Find {
        field: FieldType,
        query: String,
    },

    /// List stored playlists
    Playlists,

    /// Append a URI to the queue
    Add { uri: String },

    /// Start playback
    Play { position: Option<u32> },

    Pause,
    Stop,
    Next,
    Prev,

    /// Set the volume (clamped to 0..=100)
    Volume {
        #[arg(allow_negative_numbers = true)]
        level: f64,
    },

    /// Turn repeat mode on or off
    Repeat {
        #[arg(action = clap::ArgAction::Set)]
        on: bool,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mpdwire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.timeout_ms)
        .build();

    let client = Client::new(Arc::new(Session::new(config)));

    if let Err(e) = client.connect() {
        tracing::error!("Failed to connect: {}", e);
        std::process::exit(1);
    }

    let result = run(&client, args.command);
    client.disconnect();

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(client: &Client, command: Commands) -> mpdwire::Result<()> {
    match command {
        Commands::Status => println!("{:#?}", client.status()?),
        Commands::Current => match client.current_song()? {
            Some(song) => println!("{}", describe(&song)),
            None => println!("(nothing playing)"),
        },
        Commands::Stats => println!("{:#?}", client.stats()?),
        Commands::Queue => print_songs(&client.playlist_info()?),
        Commands::Search { field, query } => print_songs(&client.search(field, &query)?),
        Commands::Find { field, query } => print_songs(&client.find(field, &query)?),
        Commands::Playlists => {
            for entry in client.list_playlists()? {
                println!(
                    "{}\t{}",
                    entry.name,
                    entry.last_modified.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Add { uri } => client.playlist_add(&uri)?,
        Commands::Play { position } => client.play(position)?,
        Commands::Pause => client.pause()?,
        Commands::Stop => client.stop()?,
        Commands::Next => client.next()?,
        Commands::Prev => client.previous()?,
        Commands::Volume { level } => client.set_volume(level)?,
        Commands::Repeat { on } => client.set_repeat(on)?,
    }
    Ok(())
}

fn print_songs(songs: &[Song]) {
    if songs.is_empty() {
        println!("(no matches)");
    }
    for song in songs {
        println!("{}", describe(song));
    }
}

fn describe(song: &Song) -> String {
    match (&song.artist, &song.title) {
        (Some(artist), Some(title)) => format!("{} - {}  [{}]", artist, title, song.file),
        (None, Some(title)) => format!("{}  [{}]", title, song.file),
        _ => song.file.clone(),
    }
}
