use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::clock;
use crate::console::ConsolePresenter;
use crate::points::{PointBreakdown, Tariff};
use crate::session_time::TimeInterval;

/// セッションのポイントを計算するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct PointsArgs {
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

    #[clap(long = "breakdown", help = "Show day and night half-hours")]
    pub breakdown: bool,
}

/// `points`サブコマンドの処理を行う。
///
/// 日付が指定されていない場合は、Localタイムゾーンで今日の日付を利用する。
/// 時刻の形式が不正な場合もエラーにはせず、`no result`を表示して`None`を返す。
///
/// # Arguments
///
/// * `args` - `points`サブコマンドの引数
/// * `presenter` - 結果の表示先
pub fn points_command<P: ConsolePresenter>(
    args: PointsArgs,
    presenter: &mut P,
) -> Result<Option<PointBreakdown>> {
    let date = args.date.unwrap_or_else(clock::today);
    info!("Date: {}, Start: {}, End: {}", date, args.start, args.end);

    let breakdown = match TimeInterval::parse(date, &args.start, &args.end) {
        Ok(interval) => {
            if interval.crosses_midnight() {
                debug!("End time is on the next day");
            }
            Tariff::default().breakdown(&interval)
        }
        Err(err) => {
            warn!("{}", err);
            None
        }
    };
    presenter.show_points(breakdown, args.breakdown)?;

    Ok(breakdown)
}

/// 日付をパースする。
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}", s))?;

    Ok(date)
}
