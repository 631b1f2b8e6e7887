use std::env;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::info;

use crate::clock;
use crate::log_session::{LogSessionRequest, Member};
use crate::points_command::parse_date;
use crate::session::{Session, SessionRole};

/// セッションを記録するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct LogArgs {
    #[clap(short = 'r', long = "role", help = "Your role in the session: babysitter or parent")]
    pub role: SessionRole,

    #[clap(long = "with", help = "Name of the other party")]
    pub with: String,

    #[clap(long = "with-id", help = "Member ID of the other party (defaults to the name)")]
    pub with_id: Option<String>,

    #[clap(long = "me", help = "Your member ID (defaults to $HUBPOINTS_MEMBER)")]
    pub me: Option<String>,

    #[clap(
        short = 'd',
        long = "date",
        help = "Sets the session date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    pub date: Option<NaiveDate>,

    #[clap(short = 's', long = "start", help = "Start time in the format HH:MM")]
    pub start: String,

    #[clap(short = 'e', long = "end", help = "End time in the format HH:MM")]
    pub end: String,

    #[clap(short = 'n', long = "notes", help = "Notes visible to the other party")]
    pub notes: Option<String>,
}

/// `log`サブコマンドの処理を行う。
///
/// 入力を検証してセッションを作成する。作成したセッションは保存しない。
///
/// # Arguments
///
/// * `args` - `log`サブコマンドの引数
pub fn log_command(args: LogArgs) -> Result<Session> {
    let me_id = resolve_member(args.me)?;
    let me = Member {
        id: me_id.clone(),
        name: me_id,
    };
    let other_party = Member {
        id: args.with_id.unwrap_or_else(|| args.with.clone()),
        name: args.with,
    };
    let request = LogSessionRequest {
        role: args.role,
        other_party,
        date: args.date.unwrap_or_else(clock::today),
        start_time: args.start,
        end_time: args.end,
        notes: args.notes,
    };

    let session_id = format!("mock_session_{}", Utc::now().timestamp_millis());
    let session = request
        .submit(&me, &session_id)
        .context("Could not log session. Please check details")?;
    info!(
        "{} -> {}: {} points awaiting confirmation by {}",
        session.babysitter_name, session.parent_name, session.points, session.parent_name
    );

    Ok(session)
}

/// 操作するメンバーのIDを返す。
///
/// 指定されていない場合は環境変数`HUBPOINTS_MEMBER`を利用する。
pub fn resolve_member(me: Option<String>) -> Result<String> {
    match me {
        Some(me) => Ok(me),
        None => env::var("HUBPOINTS_MEMBER").context("--me or HUBPOINTS_MEMBER must be set"),
    }
}
