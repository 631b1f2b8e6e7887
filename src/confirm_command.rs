use anyhow::{Context, Result};
use log::info;

use crate::log_command::resolve_member;
use crate::repository::SessionRepository;
use crate::session::{Session, SessionStatus};

/// `confirm`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct ConfirmArgs {
    #[clap(help = "ID of the session to confirm")]
    pub session_id: String,

    #[clap(long = "me", help = "Your member ID (defaults to $HUBPOINTS_MEMBER)")]
    pub me: Option<String>,

    #[clap(long = "dispute", help = "Dispute the session instead of confirming it")]
    pub dispute: bool,

    #[clap(short = 'f', long = "file", help = "Sessions JSON file (defaults to $HUBPOINTS_SESSIONS)")]
    pub file: Option<String>,
}

pub struct ConfirmCommand<'a, R: SessionRepository> {
    repository: &'a R,
}

impl<'a, R: SessionRepository> ConfirmCommand<'a, R> {
    /// 新しい`ConfirmCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - セッションの読み込み先
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// `confirm`サブコマンドの処理を行う。
    ///
    /// 親としてセッションを確認、または異議を申し立てる。変更後のセッションは保存せず、ログに出力する。
    ///
    /// # Arguments
    ///
    /// * `args` - `confirm`サブコマンドの引数
    pub fn run(&self, args: ConfirmArgs) -> Result<Session> {
        let me = resolve_member(args.me)?;
        let sessions = self
            .repository
            .read_sessions()
            .context("Failed to retrieve sessions")?;
        let session = sessions
            .iter()
            .find(|session| session.id == args.session_id)
            .with_context(|| format!("Session not found: {}", args.session_id))?;

        let result = if args.dispute {
            session.dispute(&me)
        } else {
            session.confirm(&me)
        };
        let reviewed =
            result.with_context(|| format!("Could not review session: {}", session.id))?;

        match reviewed.status {
            SessionStatus::Confirmed => info!(
                "{} confirmed session {}: {} points move from {} to {}",
                me, reviewed.id, reviewed.points, reviewed.parent_name, reviewed.babysitter_name
            ),
            _ => info!(
                "{} disputed session {}. An admin may review it",
                me, reviewed.id
            ),
        }
        info!("Mock reviewed session: {:?}", reviewed);

        Ok(reviewed)
    }
}
