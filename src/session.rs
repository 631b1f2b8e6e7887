use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::points::Tariff;
use crate::session_time::TimeInterval;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    PendingBabysitter,
    PendingParent,
    Confirmed,
    Disputed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::PendingBabysitter => "pending_babysitter",
            SessionStatus::PendingParent => "pending_parent",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Disputed => "disputed",
        };
        write!(f, "{}", s)
    }
}

/// セッションを記録するメンバーの役割。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionRole {
    Babysitter,
    Parent,
}

impl FromStr for SessionRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "babysitter" => Ok(SessionRole::Babysitter),
            "parent" => Ok(SessionRole::Parent),
            _ => Err(format!("role must be babysitter or parent: {}", s)),
        }
    }
}

/// セッションの確認や異議を受け付けられない理由。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("only the parent of session {session_id} can review it")]
    NotParent { session_id: String },
    #[error("session {session_id} is {status}, not awaiting the parent")]
    NotAwaitingParent {
        session_id: String,
        status: SessionStatus,
    },
}

/// ベビーシッターのセッション。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub babysitter_id: String,
    pub babysitter_name: String,
    pub parent_id: String,
    pub parent_name: String,
    pub points: u32,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Session {
    /// セッションの時間帯を返す。
    pub fn interval(&self) -> Result<TimeInterval> {
        TimeInterval::parse(self.date, &self.start_time, &self.end_time)
            .with_context(|| format!("Invalid time range in session: {}", self.id))
    }

    /// 標準の料金表でポイントを再計算する。
    pub fn recomputed_points(&self) -> Option<u32> {
        let interval = self.interval().ok()?;
        Tariff::default().points_for(&interval)
    }

    /// 記録されたポイントが料金表の値と異なるかどうかを返す。
    pub fn points_mismatch(&self) -> bool {
        self.recomputed_points() != Some(self.points)
    }

    /// 親としてセッションを確認し、確定したセッションを返す。
    ///
    /// 確認できるのは親の確認待ちのセッションの親だけとする。
    ///
    /// # Arguments
    ///
    /// * `member_id` - 確認するメンバーのID
    pub fn confirm(&self, member_id: &str) -> std::result::Result<Session, ReviewError> {
        self.review(member_id, SessionStatus::Confirmed)
    }

    /// 親としてセッションに異議を申し立て、異議ありのセッションを返す。
    pub fn dispute(&self, member_id: &str) -> std::result::Result<Session, ReviewError> {
        self.review(member_id, SessionStatus::Disputed)
    }

    fn review(
        &self,
        member_id: &str,
        status: SessionStatus,
    ) -> std::result::Result<Session, ReviewError> {
        if self.parent_id != member_id {
            return Err(ReviewError::NotParent {
                session_id: self.id.clone(),
            });
        }
        if self.status != SessionStatus::PendingParent {
            return Err(ReviewError::NotAwaitingParent {
                session_id: self.id.clone(),
                status: self.status,
            });
        }

        Ok(Session {
            status,
            ..self.clone()
        })
    }

    /// メンバーの対応を待っているセッションかどうかを返す。
    pub fn awaits(&self, member_id: &str) -> bool {
        match self.status {
            SessionStatus::PendingParent => self.parent_id == member_id,
            SessionStatus::PendingBabysitter => self.babysitter_id == member_id,
            SessionStatus::Confirmed | SessionStatus::Disputed => false,
        }
    }
}
