use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::session::{Session, SessionStatus};

/// 新しいメンバーの初期ポイント。
pub const OPENING_BALANCE: i64 = 10;

/// 残高がこの値以下になると、ケアを依頼できなくなる。
pub const ARREARS_LIMIT: i64 = -10;

/// 上限に近いとみなす、上限からのポイント差。
const NEAR_LIMIT_MARGIN: i64 = 5;

/// 残高の状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrearsStatus {
    InCredit,
    InArrears,
    NearLimit,
    LimitExceeded,
}

impl ArrearsStatus {
    /// 残高から状態を判定する。
    pub fn of(balance: i64) -> Self {
        if balance <= ARREARS_LIMIT {
            ArrearsStatus::LimitExceeded
        } else if balance < 0 && balance <= ARREARS_LIMIT + NEAR_LIMIT_MARGIN {
            ArrearsStatus::NearLimit
        } else if balance < 0 {
            ArrearsStatus::InArrears
        } else {
            ArrearsStatus::InCredit
        }
    }
}

impl fmt::Display for ArrearsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArrearsStatus::InCredit => "in credit",
            ArrearsStatus::InArrears => "in arrears",
            ArrearsStatus::NearLimit => "close to the arrears limit",
            ArrearsStatus::LimitExceeded => "arrears limit exceeded",
        };
        write!(f, "{}", s)
    }
}

/// メンバーのポイント集計結果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsSummary {
    pub member_id: String,
    pub earned: u32,
    pub spent: u32,
    pub pending: usize,
    pub disputed: usize,
}

impl PointsSummary {
    /// メンバーのポイントを集計する。
    ///
    /// 確定したセッションのみポイントに反映する。
    /// `pending`はこのメンバーの対応を待っているセッションだけを数える。
    ///
    /// # Arguments
    ///
    /// * `member_id` - 集計するメンバーのID
    /// * `sessions` - 集計対象のセッション
    pub fn for_member(member_id: &str, sessions: &[Session]) -> Self {
        sessions
            .iter()
            .filter(|session| session.babysitter_id == member_id || session.parent_id == member_id)
            .fold(
                Self {
                    member_id: member_id.to_string(),
                    ..Self::default()
                },
                |mut acc, session| {
                    match session.status {
                        SessionStatus::Confirmed => {
                            if session.babysitter_id == member_id {
                                acc.earned += session.points;
                            }
                            if session.parent_id == member_id {
                                acc.spent += session.points;
                            }
                        }
                        SessionStatus::PendingBabysitter | SessionStatus::PendingParent => {
                            if session.awaits(member_id) {
                                acc.pending += 1
                            }
                        }
                        SessionStatus::Disputed => acc.disputed += 1,
                    }
                    acc
                },
            )
    }

    /// 初期ポイントに獲得ポイントを足し、消費ポイントを引いた残高。
    pub fn balance(&self) -> i64 {
        OPENING_BALANCE + i64::from(self.earned) - i64::from(self.spent)
    }

    pub fn arrears(&self) -> ArrearsStatus {
        ArrearsStatus::of(self.balance())
    }
}

/// セッションを日付ごとにまとめる。
pub fn group_by_date(sessions: &[Session]) -> BTreeMap<NaiveDate, Vec<Session>> {
    sessions.iter().fold(BTreeMap::new(), |mut acc, session| {
        acc.entry(session.date)
            .or_insert_with(Vec::new)
            .push(session.clone());
        acc
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{group_by_date, ArrearsStatus, PointsSummary};
    use crate::session::fixtures::dummy_session;
    use crate::session::SessionStatus;

    #[test]
    fn test_for_member() {
        let sessions = vec![
            dummy_session("s1", 1, ("18:00", "21:00"), ("u1", "u2"), 6, SessionStatus::Confirmed),
            dummy_session("s2", 2, ("22:00", "01:00"), ("u2", "u1"), 10, SessionStatus::Confirmed),
            dummy_session("s3", 3, ("09:00", "10:00"), ("u1", "u3"), 2, SessionStatus::Confirmed),
            dummy_session("s4", 4, ("09:00", "10:00"), ("u1", "u2"), 2, SessionStatus::PendingParent),
            dummy_session("s5", 5, ("09:00", "10:00"), ("u3", "u1"), 2, SessionStatus::Disputed),
            dummy_session("s6", 6, ("09:00", "10:00"), ("u2", "u3"), 2, SessionStatus::Confirmed),
            dummy_session("s7", 7, ("09:00", "10:00"), ("u2", "u1"), 2, SessionStatus::PendingParent),
            dummy_session("s8", 8, ("09:00", "10:00"), ("u1", "u3"), 2, SessionStatus::PendingBabysitter),
            dummy_session("s9", 9, ("09:00", "10:00"), ("u3", "u1"), 2, SessionStatus::PendingBabysitter),
        ];

        let summary = PointsSummary::for_member("u1", &sessions);

        assert_eq!(
            summary,
            PointsSummary {
                member_id: "u1".to_string(),
                earned: 8,
                spent: 10,
                pending: 2,
                disputed: 1,
            }
        );
        assert_eq!(summary.balance(), 8);
    }

    #[test]
    fn test_for_member_without_sessions() {
        let summary = PointsSummary::for_member("u9", &[]);

        assert_eq!(summary.balance(), 10);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.arrears(), ArrearsStatus::InCredit);
    }

    #[rstest]
    #[case::opening(10, ArrearsStatus::InCredit)]
    #[case::zero(0, ArrearsStatus::InCredit)]
    #[case::just_below_zero(-1, ArrearsStatus::InArrears)]
    #[case::before_near_limit(-4, ArrearsStatus::InArrears)]
    #[case::near_limit_start(-5, ArrearsStatus::NearLimit)]
    #[case::just_above_limit(-9, ArrearsStatus::NearLimit)]
    #[case::at_limit(-10, ArrearsStatus::LimitExceeded)]
    #[case::beyond_limit(-25, ArrearsStatus::LimitExceeded)]
    fn test_arrears_status(#[case] balance: i64, #[case] expected: ArrearsStatus) {
        assert_eq!(ArrearsStatus::of(balance), expected);
    }

    #[test]
    fn test_arrears_from_sessions() {
        let sessions = vec![
            dummy_session("s1", 1, ("23:00", "07:00"), ("u2", "u1"), 32, SessionStatus::Confirmed),
        ];

        let summary = PointsSummary::for_member("u1", &sessions);

        assert_eq!(summary.balance(), -22);
        assert_eq!(summary.arrears(), ArrearsStatus::LimitExceeded);
    }

    #[test]
    fn test_group_by_date() {
        let sessions = vec![
            dummy_session("s2", 2, ("09:00", "10:00"), ("u1", "u2"), 2, SessionStatus::Confirmed),
            dummy_session("s1", 1, ("09:00", "10:00"), ("u1", "u2"), 2, SessionStatus::Confirmed),
            dummy_session("s3", 2, ("12:00", "13:00"), ("u1", "u2"), 2, SessionStatus::Confirmed),
        ];

        let grouped = group_by_date(&sessions);

        let days: Vec<NaiveDate> = grouped.keys().copied().collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            ]
        );
        let second_day: Vec<&str> = grouped[&days[1]].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(second_day, vec!["s2", "s3"]);
    }
}
