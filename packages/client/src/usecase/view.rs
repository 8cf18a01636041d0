//! 画面間で共有する表示用モデル

use crate::domain::{BaseUrl, User, UserId};

/// 投稿者・コメント者・送信者の表示情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorView {
    /// 不明な場合は 0
    pub id: UserId,
    pub name: String,
    pub initials: String,
    pub avatar_url: Option<String>,
}

impl AuthorView {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(user: Option<&User>, base_url: &BaseUrl) -> Self {
        match user {
            Some(user) => Self {
                id: user.id,
                name: user.display_name().to_string(),
                initials: user.initials(),
                avatar_url: user
                    .photo_profile
                    .as_ref()
                    .map(|path| base_url.file_url(path.as_str())),
            },
            None => Self {
                id: UserId::new(0),
                name: Self::UNKNOWN.to_string(),
                initials: "U".to_string(),
                avatar_url: None,
            },
        }
    }
}
