//! Terminal client for the Podium ranked-prediction game.

mod client;
mod render;
mod session;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use console::style;

use client::ApiClient;
use render::{EntrySort, RankColumn};
use session::{Session, default_path};

#[derive(Parser, Debug)]
#[command(name = "podium", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the Podium server
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000", env = "PODIUM_SERVER")]
    server: String,

    /// Where the login session is stored
    #[arg(long, global = true, env = "PODIUM_SESSION")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in by name, creating the identity on first use
    Login { name: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// List all entries with your predicted ranks (official ranks for the admin)
    Entries {
        #[arg(long, value_enum, default_value_t = EntrySort::Id)]
        sort: EntrySort,
    },
    /// Predict the final rank of an entry
    Predict { entry_id: i32, rank: i32 },
    /// Remove your prediction for an entry
    Unpredict { entry_id: i32 },
    /// Show predictions, your own or another identity's
    Predictions {
        #[arg(long)]
        user: Option<String>,
    },
    /// Show the official results
    Results,
    /// Set an entry's official rank (admin)
    SetResult { entry_id: i32, rank: i32 },
    /// Remove an entry's official rank (admin)
    ClearResult { entry_id: i32 },
    /// Show the standings
    Leaderboard,
}

fn require_session(path: &Path) -> Result<Session> {
    Session::load(path)?.context("Not logged in. Run `podium login <name>` first.")
}

fn entry_names(api: &ApiClient) -> Result<HashMap<i32, String>> {
    Ok(api.entries()?.into_iter().map(|e| (e.id, e.name)).collect())
}

fn run(cli: Cli) -> Result<()> {
    let session_path = cli.session_file.unwrap_or_else(default_path);

    match cli.command {
        Command::Login { name } => {
            let api = ApiClient::new(&cli.server, None)?;
            let res = api.login(&name)?;
            let session = Session {
                token: res.token,
                user: res.user,
            };
            session.save(&session_path)?;

            let verb = if res.created { "Welcome" } else { "Welcome back" };
            println!("{verb}, {}!", style(&session.user.name).bold());
            if session.user.is_admin {
                println!("{}", style("You can enter official results.").yellow());
            }
        }
        Command::Logout => {
            Session::clear(&session_path)?;
            println!("Logged out.");
        }
        Command::Whoami => {
            let session = require_session(&session_path)?;
            let me = ApiClient::new(&cli.server, Some(session.token))?.me()?;
            let role = if me.is_admin { " (admin)" } else { "" };
            println!("{}{role}", style(me.name).bold());
        }
        Command::Entries { sort } => {
            let session = require_session(&session_path)?;
            let column = RankColumn::for_session(session.user.is_admin);
            let api = ApiClient::new(&cli.server, Some(session.token))?;
            let mut entries = api.entries()?;
            let ranks: HashMap<i32, i32> = match column {
                RankColumn::Predictions => api
                    .my_predictions()?
                    .data
                    .into_iter()
                    .map(|p| (p.entry_id, p.rank))
                    .collect(),
                RankColumn::Results => api
                    .results()?
                    .into_iter()
                    .map(|r| (r.entry_id, r.rank))
                    .collect(),
            };
            render::sort_entries(&mut entries, &ranks, sort);
            print!("{}", render::entries_table(&entries, &ranks, column));
        }
        Command::Predict { entry_id, rank } => {
            let session = require_session(&session_path)?;
            let api = ApiClient::new(&cli.server, Some(session.token))?;
            let outcome = api.predict(entry_id, rank)?;
            println!("{}", render::assignment_line(&outcome, &entry_names(&api)?));
        }
        Command::Unpredict { entry_id } => {
            let session = require_session(&session_path)?;
            ApiClient::new(&cli.server, Some(session.token))?.unpredict(entry_id)?;
            println!("Entry #{entry_id} is now unranked.");
        }
        Command::Predictions { user } => {
            let session = require_session(&session_path)?;
            let api = ApiClient::new(&cli.server, Some(session.token))?;
            let list = match user {
                None => api.my_predictions()?,
                Some(name) => {
                    let Some(found) = api.users()?.into_iter().find(|u| u.name == name) else {
                        bail!("No identity named {name}");
                    };
                    api.user_predictions(found.id)?
                }
            };
            print!("{}", render::predictions_table(&list));
        }
        Command::Results => {
            let session = require_session(&session_path)?;
            let results = ApiClient::new(&cli.server, Some(session.token))?.results()?;
            print!("{}", render::results_table(&results));
        }
        Command::SetResult { entry_id, rank } => {
            let session = require_session(&session_path)?;
            session.require_admin()?;
            let api = ApiClient::new(&cli.server, Some(session.token))?;
            let outcome = api.set_result(entry_id, rank)?;
            println!("{}", render::assignment_line(&outcome, &entry_names(&api)?));
        }
        Command::ClearResult { entry_id } => {
            let session = require_session(&session_path)?;
            session.require_admin()?;
            ApiClient::new(&cli.server, Some(session.token))?.clear_result(entry_id)?;
            println!("Entry #{entry_id} has no official rank.");
        }
        Command::Leaderboard => {
            let session = require_session(&session_path)?;
            let board = ApiClient::new(&cli.server, Some(session.token))?.leaderboard()?;
            print!("{}", render::leaderboard_table(&board));
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {e:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}
