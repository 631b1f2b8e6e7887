use anyhow::{Context, Result};
use log::{info, warn};

use crate::console::ConsolePresenter;
use crate::repository::SessionRepository;
use crate::summary::{group_by_date, PointsSummary};

/// `sessions`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct SessionsArgs {
    #[clap(short = 'f', long = "file", help = "Sessions JSON file (defaults to $HUBPOINTS_SESSIONS)")]
    pub file: Option<String>,

    #[clap(short = 'm', long = "member", help = "Show the points summary of this member ID")]
    pub member: Option<String>,

    #[clap(long = "daily", help = "Show sessions by day")]
    pub daily: bool,
}

pub struct SessionsCommand<'a, R: SessionRepository> {
    repository: &'a R,
}

impl<'a, R: SessionRepository> SessionsCommand<'a, R> {
    /// 新しい`SessionsCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - セッションの読み込み先
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// `sessions`サブコマンドの処理を行う。
    ///
    /// セッションを一覧表示し、メンバーが指定されている場合はポイントの集計結果も表示する。
    /// 記録されたポイントが料金表と異なるセッションは警告する。
    ///
    /// # Arguments
    ///
    /// * `args` - `sessions`サブコマンドの引数
    /// * `presenter` - 結果の表示先
    pub fn run<P: ConsolePresenter>(
        &self,
        args: &SessionsArgs,
        presenter: &mut P,
    ) -> Result<Option<PointsSummary>> {
        let sessions = self
            .repository
            .read_sessions()
            .context("Failed to retrieve sessions")?;
        info!("Sessions retrieved successfully.");

        sessions
            .iter()
            .filter(|session| session.points_mismatch())
            .for_each(|session| warn!("Session {} has unexpected points", session.id));

        if args.daily {
            for (date, entries) in group_by_date(&sessions) {
                presenter.show_heading(&format!("## {}", date))?;
                presenter
                    .show_sessions(&entries)
                    .with_context(|| format!("Failed to show sessions for date: {}", date))?;
            }
        } else {
            presenter.show_sessions(&sessions)?;
        }

        let summary = args
            .member
            .as_deref()
            .map(|member| PointsSummary::for_member(member, &sessions));
        if let Some(summary) = &summary {
            presenter.show_summary(summary)?;
        }

        Ok(summary)
    }
}
