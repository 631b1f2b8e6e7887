use chrono::{Local, NaiveDate};

#[cfg(not(test))]
/// Localタイムゾーンでの今日の日付を取得する。
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}


#[cfg(test)]
pub use mock_clock::today;

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};

    use super::mock_clock;

    /// モックの日付を設定した時に、その日付が取得できることを確認する。
    #[test]
    fn test_today_specific_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        mock_clock::set_mock_date(date);

        assert_eq!(mock_clock::today(), date);
    }

    /// モックの日付をリセットした時に、今日の日付が取得できることを確認する。
    ///
    ///  - 日付が変わる瞬間に実行するとテストが失敗する可能性がある。
    #[test]
    fn test_today_after_clear_mock_date() {
        mock_clock::set_mock_date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        mock_clock::clear_mock_date();

        assert_eq!(mock_clock::today(), Local::now().date_naive());
    }
}
