mod commands;

use clap::Parser;
use vibenotes_client::Config;

/// Command-line arguments.
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    #[derive(Parser, Debug)]
    #[command(name = "vibenotes", version, about = "VibeNotes command-line client")]
    pub struct Args {
        /// Backend base URL (overrides VIBENOTES_API_URL / VUE_APP_API_URL)
        #[arg(long, global = true)]
        pub api_url: Option<String>,

        /// Keep the session token in memory only instead of the OS keyring
        #[arg(long, global = true)]
        pub ephemeral: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Subcommand, Debug)]
    pub enum Command {
        /// Create an account and start a session
        Register { username: String, password: String },
        /// Log in and start a session
        Login { username: String, password: String },
        /// End the session and forget the stored token
        Logout,
        /// Check that the auth endpoint is reachable
        Test,
        /// Show the current user's profile
        Profile,
        /// Update the current user's profile
        UpdateProfile {
            #[arg(long)]
            description: Option<String>,
            #[arg(long)]
            avatar_url: Option<String>,
        },
        /// List all users
        Users,
        /// Show one user
        User { id: i64 },
        /// Upload an avatar image
        UploadAvatar { file: PathBuf },
        /// List your notes
        Notes,
        /// Show one note
        Note { id: i64 },
        /// Create a note
        CreateNote {
            #[arg(long)]
            title: String,
            #[arg(long)]
            content: String,
            /// Make the note visible on your public page
            #[arg(long)]
            public: bool,
        },
        /// Replace a note's title, content and visibility
        UpdateNote {
            id: i64,
            #[arg(long)]
            title: String,
            #[arg(long)]
            content: String,
            #[arg(long)]
            public: bool,
        },
        /// Delete a note
        DeleteNote { id: i64 },
        /// List a user's public notes
        PublicNotes { username: String },
        /// Attach a file to a note
        Attach { note_id: i64, file: PathBuf },
        /// Download an attachment
        Download {
            note_id: i64,
            attachment_id: i64,
            /// Output file (defaults to the server-provided filename)
            #[arg(short, long)]
            output: Option<PathBuf>,
        },
        /// Delete an attachment
        Detach { note_id: i64, attachment_id: i64 },
        /// Show where navigating to a route path ends up
        Navigate {
            path: String,
            #[arg(long)]
            from: Option<String>,
        },
    }
}

#[tokio::main]
async fn main() {
    // Load .env before the logger so RUST_LOG from the file applies.
    let mut config = Config::from_env();
    env_logger::init();

    let args = cli::Args::parse();
    if let Some(ref url) = args.api_url {
        config.set_base_url(url);
    }
    log::debug!("Using API at {}", config.api_url());

    if let Err(e) = commands::run(args, &config).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
