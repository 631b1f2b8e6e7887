use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

/// `HH:MM`形式の時刻をパースした時のエラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("time must be in HH:MM format: {0:?}")]
    Format(String),
    #[error("hour out of range (00-23): {0:?}")]
    Hour(String),
    #[error("minute out of range (00-59): {0:?}")]
    Minute(String),
}

/// 24時間表記の時刻(`HH:MM`)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// `HH:MM`形式の文字列をパースする。
    ///
    /// 桁数は厳密にチェックし、`7:00`や`07:0`のような入力は受け付けない。
    ///
    /// # Arguments
    ///
    /// * `s` - パースする文字列
    pub fn parse(s: &str) -> Result<Self, TimeFormatError> {
        let bytes = s.as_bytes();
        let digits_ok = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !digits_ok {
            return Err(TimeFormatError::Format(s.to_string()));
        }

        let hour = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
        let minute = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');
        if hour > 23 {
            return Err(TimeFormatError::Hour(s.to_string()));
        }
        if minute > 59 {
            return Err(TimeFormatError::Minute(s.to_string()));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeFormatError::Format(s.to_string()))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// 1回のセッションの時間帯。
///
/// 終了時刻が開始時刻以前の場合は、翌日の時刻として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeInterval {
    pub fn new(date: NaiveDate, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { date, start, end }
    }

    /// 日付と`HH:MM`形式の開始・終了時刻から`TimeInterval`を作成する。
    pub fn parse(date: NaiveDate, start: &str, end: &str) -> Result<Self, TimeFormatError> {
        Ok(Self::new(date, start.parse()?, end.parse()?))
    }

    /// 開始と終了の日時を返す。
    ///
    /// 終了が開始以前の場合は終了を1日進める。それでも進まない区間は`None`とする。
    /// 日時はタイムゾーンを持たない壁時計の時刻で扱う。
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.date.and_time(self.start.as_naive());
        let mut end = self.date.and_time(self.end.as_naive());
        if end <= start {
            end = end.checked_add_signed(Duration::days(1))?;
        }
        if end <= start {
            return None;
        }

        Some((start, end))
    }

    /// 日付をまたぐ区間かどうかを返す。
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{TimeFormatError, TimeInterval, TimeOfDay};

    #[rstest]
    #[case::midnight("00:00", 0, 0)]
    #[case::morning("07:05", 7, 5)]
    #[case::last_minute("23:59", 23, 59)]
    fn test_parse_time_of_day(#[case] input: &str, #[case] hour: u32, #[case] minute: u32) {
        let time = TimeOfDay::parse(input).unwrap();

        assert_eq!((time.hour(), time.minute()), (hour, minute));
        assert_eq!(time.to_string(), input);
    }

    #[rstest]
    #[case::empty("", TimeFormatError::Format("".to_string()))]
    #[case::single_digit_hour("7:00", TimeFormatError::Format("7:00".to_string()))]
    #[case::single_digit_minute("07:0", TimeFormatError::Format("07:0".to_string()))]
    #[case::leading_space(" 07:00", TimeFormatError::Format(" 07:00".to_string()))]
    #[case::seconds("07:00:00", TimeFormatError::Format("07:00:00".to_string()))]
    #[case::dot_separator("07.00", TimeFormatError::Format("07.00".to_string()))]
    #[case::hour_24("24:00", TimeFormatError::Hour("24:00".to_string()))]
    #[case::hour_25("25:00", TimeFormatError::Hour("25:00".to_string()))]
    #[case::minute_60("07:60", TimeFormatError::Minute("07:60".to_string()))]
    fn test_parse_time_of_day_error(#[case] input: &str, #[case] expected: TimeFormatError) {
        assert_eq!(input.parse::<TimeOfDay>(), Err(expected));
    }

    #[rstest]
    #[case::same_day("18:00", "21:30", (2024, 5, 1, 18, 0), (2024, 5, 1, 21, 30))]
    #[case::overnight("22:00", "01:00", (2024, 5, 1, 22, 0), (2024, 5, 2, 1, 0))]
    #[case::equal_times("09:00", "09:00", (2024, 5, 1, 9, 0), (2024, 5, 2, 9, 0))]
    #[case::night_start("23:30", "00:30", (2024, 5, 1, 23, 30), (2024, 5, 2, 0, 30))]
    fn test_bounds(
        #[case] start: &str,
        #[case] end: &str,
        #[case] expected_start: (i32, u32, u32, u32, u32),
        #[case] expected_end: (i32, u32, u32, u32, u32),
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let interval = TimeInterval::parse(date, start, end).unwrap();

        let (actual_start, actual_end) = interval.bounds().unwrap();

        assert_eq!(actual_start, datetime(expected_start));
        assert_eq!(actual_end, datetime(expected_end));
    }

    #[test]
    fn test_bounds_rolls_over_month_and_year() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let interval = TimeInterval::parse(date, "23:00", "02:00").unwrap();

        let (_, end) = interval.bounds().unwrap();

        assert_eq!(end, datetime((2024, 1, 1, 2, 0)));
    }

    #[rstest]
    #[case::same_day("18:00", "21:30", false)]
    #[case::overnight("22:00", "01:00", true)]
    #[case::equal_times("09:00", "09:00", true)]
    fn test_crosses_midnight(#[case] start: &str, #[case] end: &str, #[case] expected: bool) {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let interval = TimeInterval::parse(date, start, end).unwrap();

        assert_eq!(interval.crosses_midnight(), expected);
    }

    /// テスト用に`(年, 月, 日, 時, 分)`から日時を作成する。
    fn datetime((y, mo, d, h, mi): (i32, u32, u32, u32, u32)) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }
}
