use chrono::NaiveDate;
use log::info;
use thiserror::Error;

use crate::points::Tariff;
use crate::session::{Session, SessionRole, SessionStatus};
use crate::session_time::{TimeFormatError, TimeInterval};

pub const MAX_NOTES_LEN: usize = 500;

/// セッション記録を受け付けられない理由。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogSessionError {
    #[error(transparent)]
    Time(#[from] TimeFormatError),
    #[error("notes must be {max} characters or less (got {0})", max = MAX_NOTES_LEN)]
    NotesTooLong(usize),
    #[error("the other party must be someone else")]
    SelfSession,
    #[error("session is too short to earn any points")]
    NoPoints,
}

/// セッションを記録するメンバー。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
}

/// セッション記録フォームの入力。
#[derive(Debug, Clone)]
pub struct LogSessionRequest {
    pub role: SessionRole,
    pub other_party: Member,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

impl LogSessionRequest {
    /// 入力を検証し、相手の確認待ちのセッションを作成する。
    ///
    /// 記録は保存せず、ログに出力するだけとする。
    /// 手動で記録したセッションは、常に親の確認待ちになる。
    ///
    /// # Arguments
    ///
    /// * `me` - 記録するメンバー
    /// * `session_id` - 作成するセッションのID
    pub fn submit(&self, me: &Member, session_id: &str) -> Result<Session, LogSessionError> {
        let points = self.validate(me)?;

        let (babysitter, parent) = match self.role {
            SessionRole::Babysitter => (me, &self.other_party),
            SessionRole::Parent => (&self.other_party, me),
        };
        let session = Session {
            id: session_id.to_string(),
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            babysitter_id: babysitter.id.clone(),
            babysitter_name: babysitter.name.clone(),
            parent_id: parent.id.clone(),
            parent_name: parent.name.clone(),
            points,
            status: SessionStatus::PendingParent,
            notes: self.notes.clone(),
        };
        info!("Mock logged session: {:?}", session);

        Ok(session)
    }

    /// 入力を検証し、セッションのポイントを返す。
    pub fn validate(&self, me: &Member) -> Result<u32, LogSessionError> {
        let interval = TimeInterval::parse(self.date, &self.start_time, &self.end_time)?;
        if let Some(notes) = &self.notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_LEN {
                return Err(LogSessionError::NotesTooLong(len));
            }
        }
        if self.other_party.id == me.id {
            return Err(LogSessionError::SelfSession);
        }

        match Tariff::default().points_for(&interval) {
            Some(points) if points > 0 => Ok(points),
            _ => Err(LogSessionError::NoPoints),
        }
    }
}
