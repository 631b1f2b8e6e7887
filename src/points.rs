use chrono::{Duration, NaiveDate, Timelike};

use crate::session_time::TimeInterval;

/// 30分枠の料金区分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    Day,
    Night,
}

/// セッションのポイント内訳。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointBreakdown {
    pub day_buckets: u32,
    pub night_buckets: u32,
    pub points: u32,
}

/// ポイントの料金表。
///
/// 夜間帯は`[night_start_hour, night_end_hour)`の半開区間。
/// `night_start_hour > night_end_hour`の場合は日付をまたぐ区間として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    pub day_points: u32,
    pub night_points: u32,
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    pub bucket_minutes: i64,
}

impl Default for Tariff {
    /// 30分ごとに1ポイント、23:00から7:00までは2ポイント。
    fn default() -> Self {
        Self {
            day_points: 1,
            night_points: 2,
            night_start_hour: 23,
            night_end_hour: 7,
            bucket_minutes: 30,
        }
    }
}

impl Tariff {
    /// 指定した時(0-23)に始まる枠の料金区分を返す。
    pub fn rate_at(&self, hour: u32) -> Rate {
        let is_night = if self.night_start_hour <= self.night_end_hour {
            self.night_start_hour <= hour && hour < self.night_end_hour
        } else {
            hour >= self.night_start_hour || hour < self.night_end_hour
        };
        if is_night {
            Rate::Night
        } else {
            Rate::Day
        }
    }

    fn points_of(&self, rate: Rate) -> u32 {
        match rate {
            Rate::Day => self.day_points,
            Rate::Night => self.night_points,
        }
    }

    /// 区間を30分枠に分割し、枠ごとの内訳を計算する。
    ///
    /// 枠の料金は枠の開始時刻の「時」だけで決まる。30分に満たない最後の枠は数えない。
    /// 区間が進まない場合、枠の長さが正でないか範囲外の場合、ポイントが溢れる場合、
    /// またはポイントが0の場合は`None`を返す。
    ///
    /// # Arguments
    ///
    /// * `interval` - セッションの時間帯
    pub fn breakdown(&self, interval: &TimeInterval) -> Option<PointBreakdown> {
        if self.bucket_minutes <= 0 {
            return None;
        }
        let (start, end) = interval.bounds()?;
        let step = Duration::try_minutes(self.bucket_minutes)?;

        let mut breakdown = PointBreakdown::default();
        let mut current = start;
        loop {
            let next = match current.checked_add_signed(step) {
                Some(next) if next <= end => next,
                _ => break,
            };
            let rate = self.rate_at(current.hour());
            match rate {
                Rate::Day => breakdown.day_buckets += 1,
                Rate::Night => breakdown.night_buckets += 1,
            }
            breakdown.points = breakdown.points.checked_add(self.points_of(rate))?;
            current = next;
        }

        if breakdown.points == 0 {
            return None;
        }

        Some(breakdown)
    }

    /// 区間のポイント合計を返す。
    pub fn points_for(&self, interval: &TimeInterval) -> Option<u32> {
        self.breakdown(interval).map(|breakdown| breakdown.points)
    }
}

/// 日付と`HH:MM`形式の開始・終了時刻から、標準の料金表でポイントを計算する。
///
/// 時刻の形式が不正な場合や30分に満たない場合は`None`を返す。
/// 入力途中の値でも呼び出されるため、エラーにはしない。
///
/// # Examples
///
/// ```
/// $ cargo run -- points --date 2024-05-01 --start 22:00 --end 01:00
/// 10
/// ```
pub fn compute_session_points(date: NaiveDate, start_time: &str, end_time: &str) -> Option<u32> {
    let interval = TimeInterval::parse(date, start_time, end_time).ok()?;
    Tariff::default().points_for(&interval)
}
