use std::io::Write;

use anyhow::{Context, Result};

use crate::points::PointBreakdown;
use crate::session::Session;
use crate::summary::{PointsSummary, OPENING_BALANCE};

/// Consoleにセッションとポイントを表示するためのtrait。
pub trait ConsolePresenter {
    /// セッションを表示する。
    ///
    /// # Arguments
    ///
    /// * `sessions` - 表示するセッション
    fn show_sessions(&mut self, sessions: &[Session]) -> Result<()>;

    /// 見出しを表示する。
    fn show_heading(&mut self, heading: &str) -> Result<()>;

    /// メンバーの集計結果を表示する。
    fn show_summary(&mut self, summary: &PointsSummary) -> Result<()>;

    /// ポイントの計算結果を表示する。
    ///
    /// 計算できなかった場合は`no result`と表示する。
    fn show_points(&mut self, points: Option<PointBreakdown>, with_breakdown: bool) -> Result<()>;
}

/// セッションをMarkdownのlist形式で表示する。
pub struct ConsoleMarkdownList<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleMarkdownList<'a, W> {
    /// 新しい`ConsoleMarkdownList`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleMarkdownList<'a, W> {
    // 日付と開始時刻の順に並べて表示する。
    fn show_sessions(&mut self, sessions: &[Session]) -> Result<()> {
        let mut sorted_sessions = sessions.to_vec();
        sorted_sessions.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));

        for session in sorted_sessions {
            let expected = match session.recomputed_points() {
                Some(points) if points != session.points => format!(" (expected {})", points),
                None => " (expected no result)".to_string(),
                _ => String::new(),
            };
            writeln!(
                self.writer,
                "- {} {} ~ {}: {} -> {} {}pt ({}){}",
                session.date,
                session.start_time,
                session.end_time,
                session.babysitter_name,
                session.parent_name,
                session.points,
                session.status,
                expected
            )
            .with_context(|| format!("Failed to write session: {:?}", session))?;
        }

        Ok(())
    }

    fn show_heading(&mut self, heading: &str) -> Result<()> {
        writeln!(self.writer, "{}", heading)
            .with_context(|| format!("Failed to write heading: {}", heading))?;

        Ok(())
    }

    fn show_summary(&mut self, summary: &PointsSummary) -> Result<()> {
        writeln!(
            self.writer,
            "- {}: opening {}, earned {}, spent {}, balance {} ({}; awaiting you {}, disputed {})",
            summary.member_id,
            OPENING_BALANCE,
            summary.earned,
            summary.spent,
            summary.balance(),
            summary.arrears(),
            summary.pending,
            summary.disputed
        )
        .with_context(|| format!("Failed to write summary: {:?}", summary))?;

        Ok(())
    }

    fn show_points(&mut self, points: Option<PointBreakdown>, with_breakdown: bool) -> Result<()> {
        let written = match points {
            Some(breakdown) if with_breakdown => writeln!(
                self.writer,
                "{} (day {} x 30min, night {} x 30min)",
                breakdown.points, breakdown.day_buckets, breakdown.night_buckets
            ),
            Some(breakdown) => writeln!(self.writer, "{}", breakdown.points),
            None => writeln!(self.writer, "no result"),
        };
        written.context("Failed to write points")?;

        Ok(())
    }
}
