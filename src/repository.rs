use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
#[cfg(test)]
use mockall::automock;

use crate::session::Session;

/// セッションの読み込み先を表すtrait。
#[cfg_attr(test, automock)]
pub trait SessionRepository {
    /// 記録されているセッションを全て取得する。
    fn read_sessions(&self) -> Result<Vec<Session>>;
}

/// JSONファイルに保存されたセッションを読み込む。
///
/// ファイルはセッションの配列とする。
///
/// # Examples
///
/// ```
/// let repository = JsonSessionRepository::from_env()?;
/// let sessions = repository.read_sessions()?;
/// ```
pub struct JsonSessionRepository {
    path: PathBuf,
}

impl JsonSessionRepository {
    /// 新しい`JsonSessionRepository`を返す。
    ///
    /// # Arguments
    ///
    /// * `path` - セッションを保存したJSONファイルのパス
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 環境変数`HUBPOINTS_SESSIONS`のパスを利用する。
    ///
    /// 設定されていない場合はデータディレクトリの`hubpoints/sessions.json`を利用する。
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = env::var("HUBPOINTS_SESSIONS") {
            return Ok(Self::new(path));
        }

        let data_dir = dirs::data_dir().context("Failed to find data directory")?;
        Ok(Self::new(data_dir.join("hubpoints").join("sessions.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionRepository for JsonSessionRepository {
    fn read_sessions(&self) -> Result<Vec<Session>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read sessions file: {}", self.path.display()))?;
        let sessions: Vec<Session> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse sessions file: {}", self.path.display()))?;
        info!("length of sessions: {}", sessions.len());

        Ok(sessions)
    }
}
