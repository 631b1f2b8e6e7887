use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

mod clock;
mod confirm_command;
mod console;
mod log_command;
mod log_session;
mod points;
mod points_command;
mod repository;
mod session;
mod session_time;
mod sessions_command;
mod summary;

use confirm_command::{ConfirmArgs, ConfirmCommand};
use console::ConsoleMarkdownList;
use log_command::{log_command, LogArgs};
use points_command::{points_command, PointsArgs};
use repository::JsonSessionRepository;
use sessions_command::{SessionsArgs, SessionsCommand};

/// ベビーシッター交換のセッションをポイントで扱うためのCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- points --start 22:00 --end 01:00
/// $ cargo run -- log --role parent --with Bob --start 18:00 --end 21:00
/// $ cargo run -- sessions --member u1 --daily
/// $ cargo run -- confirm s1 --me u1
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(short = 'v', long = "verbose", help = "Show debug logs")]
    verbose: bool,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    Points(PointsArgs),
    Log(LogArgs),
    Sessions(SessionsArgs),
    Confirm(ConfirmArgs),
}

/// ログの出力先を設定する。
///
/// ログは標準エラー出力に出し、標準出力は結果の表示だけに使う。
fn setup_logger(verbose: bool) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
        .context("Failed to set up logger")?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logger(args.verbose)?;

    let mut stdout = io::stdout();
    let mut presenter = ConsoleMarkdownList::new(&mut stdout);
    match args.subcommand {
        SubCommands::Points(points) => {
            if points_command(points, &mut presenter)?.is_none() {
                process::exit(1);
            }
        }
        SubCommands::Log(log) => {
            let session = log_command(log)?;
            println!(
                "Logged session {} ({} points, {})",
                session.id, session.points, session.status
            );
        }
        SubCommands::Sessions(sessions) => {
            let repository = match &sessions.file {
                Some(file) => JsonSessionRepository::new(file),
                None => JsonSessionRepository::from_env()?,
            };
            log::debug!("Sessions file: {}", repository.path().display());
            SessionsCommand::new(&repository).run(&sessions, &mut presenter)?;
        }
        SubCommands::Confirm(confirm) => {
            let repository = match &confirm.file {
                Some(file) => JsonSessionRepository::new(file),
                None => JsonSessionRepository::from_env()?,
            };
            let session = ConfirmCommand::new(&repository).run(confirm)?;
            println!("Session {} is now {}", session.id, session.status);
        }
    }

    Ok(())
}
