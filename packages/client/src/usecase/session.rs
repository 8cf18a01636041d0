//! UseCase: セッション（ログイン中ユーザーのプロフィール）
//!
//! 画面をまたいで共有される唯一の状態です。プロフィールを変更する操作の後は
//! `refresh` を呼び出して最新の状態に更新します。

use std::sync::Arc;

use crate::domain::{ProfileGateway, User};

/// ログイン中ユーザーの状態
pub struct Session {
    profile: Arc<dyn ProfileGateway>,
    user: Option<User>,
}

impl Session {
    pub fn new(profile: Arc<dyn ProfileGateway>) -> Self {
        Self {
            profile,
            user: None,
        }
    }

    /// `/profile` を取得してユーザー状態を更新
    ///
    /// 失敗した場合はユーザー状態をクリアします（ログのみ出力）。
    pub async fn refresh(&mut self) -> Option<&User> {
        match self.profile.fetch_profile().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session refreshed");
                self.user = Some(user);
            }
            Err(e) => {
                tracing::warn!("failed to fetch profile: {}", e);
                self.user = None;
            }
        }
        self.user.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// ログアウト時などにユーザー状態を破棄
    pub fn clear(&mut self) {
        self.user = None;
    }
}
