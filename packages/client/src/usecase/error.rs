//! UseCase 層のエラー定義と通知メッセージ
//!
//! 各操作は `Result<Notice, ActionError>` を返し、UI 層がトーストとして表示します。
//! 失敗時の文言はサーバーの `error` フィールドを優先し、無ければ操作ごとの既定文言を使います。

use thiserror::Error;

use crate::domain::{GatewayError, TokenStoreError, ValueObjectError};

/// ユーザー操作の種類（通知文言の決定に使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Register,
    Logout,
    CreateFeed,
    LikeFeed,
    UpdateFeed,
    DeleteFeed,
    AddComment,
    UpdateComment,
    DeleteComment,
    CreateChatroom,
    DeleteChatroom,
    SendMessage,
    DeleteMessage,
    UpdateProfile,
    UpdateAvatar,
    ChangePassword,
    DeactivateAccount,
    Follow,
    Unfollow,
}

impl Action {
    /// 成功時の文言（表示しない操作は None）
    pub fn success_message(&self) -> Option<&'static str> {
        let message = match self {
            Action::Login => "Login berhasil",
            Action::Register => "Registrasi berhasil, silakan login",
            Action::Logout => "Logout berhasil",
            Action::CreateFeed => "Feed berhasil dibuat",
            Action::LikeFeed => "Feed dilike",
            Action::UpdateFeed => "Feed berhasil diupdate",
            Action::DeleteFeed => "Feed berhasil dihapus",
            Action::AddComment => "Komentar berhasil dikirim",
            Action::UpdateComment => "Komentar berhasil diupdate",
            Action::DeleteComment => "Komentar berhasil dihapus",
            Action::CreateChatroom => "Chatroom created successfully.",
            Action::DeleteChatroom => "Chatroom deleted successfully",
            Action::SendMessage => return None,
            Action::DeleteMessage => "Message deleted successfully",
            Action::UpdateProfile => "Profile berhasil diperbarui",
            Action::UpdateAvatar => "Foto profil berhasil diperbarui",
            Action::ChangePassword => "Password berhasil diubah",
            Action::DeactivateAccount => "Akun berhasil dinonaktifkan",
            Action::Follow => "Berhasil mengikuti user",
            Action::Unfollow => "Berhasil berhenti mengikuti user",
        };
        Some(message)
    }

    /// サーバーから文言が返らなかった場合の既定文言
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::Login => "Login gagal",
            Action::Register => "Registrasi gagal",
            Action::Logout => "Logout gagal",
            Action::CreateFeed => "Gagal membuat feed",
            Action::LikeFeed => "Gagal meng-like feed",
            Action::UpdateFeed => "Gagal mengupdate feed",
            Action::DeleteFeed => "Gagal menghapus feed",
            Action::AddComment => "Gagal mengirim komentar",
            Action::UpdateComment => "Gagal mengupdate komentar",
            Action::DeleteComment => "Gagal menghapus komentar",
            Action::CreateChatroom => "Failed to create chatroom",
            Action::DeleteChatroom => "Failed to delete chatroom",
            Action::SendMessage => "Failed to send message",
            Action::DeleteMessage => "Failed to delete message",
            Action::UpdateProfile => "Gagal update profile",
            Action::UpdateAvatar => "Gagal update foto profil",
            Action::ChangePassword => "Gagal mengubah password",
            Action::DeactivateAccount => "Gagal menonaktifkan akun",
            Action::Follow => "Gagal mengikuti user",
            Action::Unfollow => "Gagal berhenti mengikuti user",
        }
    }
}

/// 通知の重要度（トーストの色に対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// UI に表示する一時的な通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Danger,
            message: message.into(),
        }
    }

    /// 操作成功時の通知（成功文言の無い操作は None）
    pub fn for_success(action: Action) -> Option<Self> {
        action.success_message().map(Notice::success)
    }
}

/// UseCase 操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// 値オブジェクトの検証エラー（フォーム入力）
    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    /// 画面固有のクライアント側検証エラー（ネットワーク呼び出し前に拒否）
    #[error("{0}")]
    Invalid(&'static str),

    /// 所有者以外の編集・削除（UI 上は操作自体を表示しない）
    #[error("{action:?} is only available to the owner")]
    NotOwner { action: Action },

    /// 対象がローカル状態に存在しない
    #[error("{action:?} target not found")]
    NotFound { action: Action },

    /// バックエンド呼び出しの失敗
    #[error("{action:?} failed: {source}")]
    Gateway {
        action: Action,
        #[source]
        source: GatewayError,
    },

    /// トークン保存の失敗
    #[error("{action:?} failed: {message}")]
    Storage { action: Action, message: String },
}

impl ActionError {
    pub fn gateway(action: Action) -> impl FnOnce(GatewayError) -> Self {
        move |source| ActionError::Gateway { action, source }
    }

    pub fn storage(action: Action) -> impl FnOnce(TokenStoreError) -> Self {
        move |e| ActionError::Storage {
            action,
            message: e.to_string(),
        }
    }

    /// ユーザーに表示する通知
    pub fn notice(&self) -> Notice {
        let message = match self {
            ActionError::Validation(e) => e.to_string(),
            ActionError::Invalid(message) => (*message).to_string(),
            ActionError::NotOwner { action }
            | ActionError::NotFound { action }
            | ActionError::Storage { action, .. } => action.failure_message().to_string(),
            ActionError::Gateway { action, source } => source
                .server_message()
                .unwrap_or(action.failure_message())
                .to_string(),
        };
        Notice::danger(message)
    }
}

/// 画面操作の結果
pub type ActionResult = Result<Option<Notice>, ActionError>;
