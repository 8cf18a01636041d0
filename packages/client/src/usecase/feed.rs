//! UseCase: フィード画面
//!
//! 投稿一覧の取得・投稿作成・いいね・編集/削除・コメントの操作を扱います。
//! すべての変更操作は成功後に一覧を再取得します（いいね数をクライアントで増減しない）。
//!
//! ## テスト観点
//! - 編集/削除の操作は投稿者本人にのみ表示される
//! - いいね後の再取得で、閲覧者のいいねが 1 回だけ数えられる
//! - 空の投稿・空のコメントはリクエスト前に拒否される
//! - 添付ファイルの種類（画像/ダウンロードリンク）の判定

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::domain::{
    Attachment, BaseUrl, Comment, CommentId, Feed, FeedDraft, FeedGateway, FeedId, MediaLayout,
    MediaPreview, NewComment, User, UserId,
};

use super::{
    error::{Action, ActionError, ActionResult, Notice},
    view::AuthorView,
};

/// この文字数を超える本文は折りたたむ
pub const TRUNCATE_AT: usize = 280;

const EMPTY_FEED: &str = "Isi feed tidak boleh kosong";
const EMPTY_COMMENT: &str = "Komentar tidak boleh kosong";

/// コメントの表示情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub id: CommentId,
    pub author: AuthorView,
    pub body: String,
    pub created_at: Option<String>,
    /// 編集・削除メニューを表示するか
    pub can_manage: bool,
    /// インライン編集中の下書き
    pub editing: Option<String>,
}

/// 投稿カードの表示情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCard {
    pub id: FeedId,
    pub author: AuthorView,
    /// 表示する本文（折りたたみ時は切り詰め済み）
    pub body: String,
    /// 本文が長く「もっと見る」切り替えを表示するか
    pub expandable: bool,
    pub expanded: bool,
    pub media: MediaLayout,
    pub liked: bool,
    pub like_count: usize,
    /// 編集・削除メニューを表示するか
    pub can_manage: bool,
    pub created_at: Option<String>,
    pub comments: Vec<CommentView>,
    pub comment_draft: String,
    /// 本文を編集中の場合はその下書き
    pub editing: Option<String>,
}

/// 投稿作成フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedComposer {
    pub body: String,
    pub files: Vec<Attachment>,
}

impl FeedComposer {
    /// 選択中ファイルのプレビュー（1 件なら単体、複数ならカルーセル）
    pub fn previews(&self) -> MediaLayout {
        MediaLayout::from_previews(self.files.iter().map(MediaPreview::local).collect())
    }
}

/// フィード画面の状態
pub struct FeedScreen {
    gateway: Arc<dyn FeedGateway>,
    base_url: BaseUrl,
    feeds: Vec<Feed>,
    composer: FeedComposer,
    editing_feed: Option<(FeedId, String)>,
    comment_drafts: HashMap<FeedId, String>,
    editing_comments: HashMap<CommentId, String>,
    expanded: HashSet<FeedId>,
}

impl FeedScreen {
    pub fn new(gateway: Arc<dyn FeedGateway>, base_url: BaseUrl) -> Self {
        Self {
            gateway,
            base_url,
            feeds: Vec::new(),
            composer: FeedComposer::default(),
            editing_feed: None,
            comment_drafts: HashMap::new(),
            editing_comments: HashMap::new(),
            expanded: HashSet::new(),
        }
    }

    /// 一覧を再取得（失敗時はログのみで、表示中の一覧を維持）
    pub async fn load(&mut self) {
        match self.gateway.list_feeds().await {
            Ok(feeds) => {
                tracing::debug!(count = feeds.len(), "feeds loaded");
                self.feeds = feeds;
            }
            Err(e) => tracing::error!("failed to load feeds: {}", e),
        }
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    pub fn composer(&self) -> &FeedComposer {
        &self.composer
    }

    pub fn set_composer_body(&mut self, body: impl Into<String>) {
        self.composer.body = body.into();
    }

    pub fn attach(&mut self, file: Attachment) {
        self.composer.files.push(file);
    }

    /// 選択中ファイルを取り除く（範囲外なら None）
    pub fn detach(&mut self, index: usize) -> Option<Attachment> {
        (index < self.composer.files.len()).then(|| self.composer.files.remove(index))
    }

    /// 投稿を作成
    pub async fn create_feed(&mut self) -> ActionResult {
        let body = self.composer.body.trim();
        if body.is_empty() {
            return Err(ActionError::Invalid(EMPTY_FEED));
        }
        let draft = FeedDraft {
            body: body.to_string(),
            files: self.composer.files.clone(),
        };

        self.gateway
            .create_feed(draft)
            .await
            .map_err(ActionError::gateway(Action::CreateFeed))?;

        self.composer = FeedComposer::default();
        self.load().await;
        Ok(Notice::for_success(Action::CreateFeed))
    }

    /// いいね/いいね解除（サーバー側でトグル）
    pub async fn toggle_like(&mut self, feed_id: FeedId) -> ActionResult {
        self.gateway
            .toggle_like(feed_id)
            .await
            .map_err(ActionError::gateway(Action::LikeFeed))?;
        self.load().await;
        Ok(Notice::for_success(Action::LikeFeed))
    }

    pub fn toggle_expanded(&mut self, feed_id: FeedId) {
        if !self.expanded.remove(&feed_id) {
            self.expanded.insert(feed_id);
        }
    }

    /// 本文の編集を開始（投稿者のみ）
    pub fn start_edit_feed(
        &mut self,
        viewer: Option<&User>,
        feed_id: FeedId,
    ) -> Result<(), ActionError> {
        let body = self
            .owned_feed(viewer, feed_id, Action::UpdateFeed)?
            .body
            .clone();
        self.editing_feed = Some((feed_id, body));
        Ok(())
    }

    pub fn set_edit_feed_body(&mut self, body: impl Into<String>) {
        if let Some((_, draft)) = self.editing_feed.as_mut() {
            *draft = body.into();
        }
    }

    pub fn cancel_edit_feed(&mut self) {
        self.editing_feed = None;
    }

    /// 編集中の本文を保存
    pub async fn save_feed_edit(&mut self, viewer: Option<&User>) -> ActionResult {
        let Some((feed_id, draft)) = self.editing_feed.clone() else {
            return Err(ActionError::NotFound {
                action: Action::UpdateFeed,
            });
        };
        let body = draft.trim();
        if body.is_empty() {
            return Err(ActionError::Invalid(EMPTY_FEED));
        }
        self.owned_feed(viewer, feed_id, Action::UpdateFeed)?;

        self.gateway
            .update_feed(feed_id, body.to_string())
            .await
            .map_err(ActionError::gateway(Action::UpdateFeed))?;

        self.editing_feed = None;
        self.load().await;
        Ok(Notice::for_success(Action::UpdateFeed))
    }

    /// 投稿を削除（投稿者のみ）
    pub async fn delete_feed(&mut self, viewer: Option<&User>, feed_id: FeedId) -> ActionResult {
        self.owned_feed(viewer, feed_id, Action::DeleteFeed)?;
        self.gateway
            .delete_feed(feed_id)
            .await
            .map_err(ActionError::gateway(Action::DeleteFeed))?;

        if self.editing_feed.as_ref().is_some_and(|(id, _)| *id == feed_id) {
            self.editing_feed = None;
        }
        self.expanded.remove(&feed_id);
        self.comment_drafts.remove(&feed_id);
        self.load().await;
        Ok(Notice::for_success(Action::DeleteFeed))
    }

    pub fn set_comment_draft(&mut self, feed_id: FeedId, body: impl Into<String>) {
        self.comment_drafts.insert(feed_id, body.into());
    }

    /// コメントを投稿（コメント者の情報を添えて送信）
    pub async fn add_comment(&mut self, viewer: Option<&User>, feed_id: FeedId) -> ActionResult {
        let body = self
            .comment_drafts
            .get(&feed_id)
            .map(|draft| draft.trim().to_string())
            .unwrap_or_default();
        if body.is_empty() {
            return Err(ActionError::Invalid(EMPTY_COMMENT));
        }
        let comment = NewComment {
            body,
            author: viewer.cloned(),
        };

        self.gateway
            .add_comment(feed_id, comment)
            .await
            .map_err(ActionError::gateway(Action::AddComment))?;

        self.comment_drafts.remove(&feed_id);
        self.load().await;
        Ok(Notice::for_success(Action::AddComment))
    }

    /// コメントのインライン編集を開始（コメント者のみ）
    pub fn start_edit_comment(
        &mut self,
        viewer: Option<&User>,
        comment_id: CommentId,
    ) -> Result<(), ActionError> {
        let body = self
            .owned_comment(viewer, comment_id, Action::UpdateComment)?
            .body
            .clone();
        self.editing_comments.insert(comment_id, body);
        Ok(())
    }

    pub fn set_comment_edit(&mut self, comment_id: CommentId, body: impl Into<String>) {
        if let Some(draft) = self.editing_comments.get_mut(&comment_id) {
            *draft = body.into();
        }
    }

    pub fn cancel_edit_comment(&mut self, comment_id: CommentId) {
        self.editing_comments.remove(&comment_id);
    }

    /// 編集中のコメントを保存
    pub async fn save_comment_edit(
        &mut self,
        viewer: Option<&User>,
        comment_id: CommentId,
    ) -> ActionResult {
        let body = self
            .editing_comments
            .get(&comment_id)
            .map(|draft| draft.trim().to_string())
            .ok_or(ActionError::NotFound {
                action: Action::UpdateComment,
            })?;
        if body.is_empty() {
            return Err(ActionError::Invalid(EMPTY_COMMENT));
        }
        self.owned_comment(viewer, comment_id, Action::UpdateComment)?;

        self.gateway
            .update_comment(comment_id, body)
            .await
            .map_err(ActionError::gateway(Action::UpdateComment))?;

        self.editing_comments.remove(&comment_id);
        self.load().await;
        Ok(Notice::for_success(Action::UpdateComment))
    }

    /// コメントを削除（コメント者のみ）
    pub async fn delete_comment(
        &mut self,
        viewer: Option<&User>,
        comment_id: CommentId,
    ) -> ActionResult {
        self.owned_comment(viewer, comment_id, Action::DeleteComment)?;
        self.gateway
            .delete_comment(comment_id)
            .await
            .map_err(ActionError::gateway(Action::DeleteComment))?;

        self.editing_comments.remove(&comment_id);
        self.load().await;
        Ok(Notice::for_success(Action::DeleteComment))
    }

    /// 表示用のカード一覧
    pub fn cards(&self, viewer: Option<&User>) -> Vec<FeedCard> {
        let viewer_id = viewer.map(|user| user.id);
        self.feeds
            .iter()
            .map(|feed| self.card(feed, viewer_id))
            .collect()
    }

    fn card(&self, feed: &Feed, viewer: Option<UserId>) -> FeedCard {
        let expanded = self.expanded.contains(&feed.id);
        let expandable = feed.body.chars().count() > TRUNCATE_AT;
        let body = if expandable && !expanded {
            let mut truncated: String = feed.body.chars().take(TRUNCATE_AT).collect();
            truncated.push_str("...");
            truncated
        } else {
            feed.body.clone()
        };

        FeedCard {
            id: feed.id,
            author: AuthorView::new(feed.author.as_ref(), &self.base_url),
            body,
            expandable,
            expanded,
            media: MediaLayout::from_paths(&feed.attachments, &self.base_url),
            liked: viewer.is_some_and(|id| feed.is_liked_by(id)),
            like_count: feed.like_count(),
            can_manage: viewer.is_some_and(|id| feed.is_owned_by(id)),
            created_at: feed.created_at.as_ref().map(|t| t.to_datetime_string()),
            comments: feed
                .comments
                .iter()
                .map(|comment| self.comment_view(comment, viewer))
                .collect(),
            comment_draft: self.comment_drafts.get(&feed.id).cloned().unwrap_or_default(),
            editing: self
                .editing_feed
                .as_ref()
                .filter(|(id, _)| *id == feed.id)
                .map(|(_, draft)| draft.clone()),
        }
    }

    fn comment_view(&self, comment: &Comment, viewer: Option<UserId>) -> CommentView {
        CommentView {
            id: comment.id,
            author: AuthorView::new(comment.known_author(), &self.base_url),
            body: comment.body.clone(),
            created_at: comment.created_at.as_ref().map(|t| t.to_datetime_string()),
            can_manage: viewer.is_some_and(|id| comment.is_owned_by(id)),
            editing: self.editing_comments.get(&comment.id).cloned(),
        }
    }

    fn owned_feed(
        &self,
        viewer: Option<&User>,
        feed_id: FeedId,
        action: Action,
    ) -> Result<&Feed, ActionError> {
        let feed = self
            .feeds
            .iter()
            .find(|feed| feed.id == feed_id)
            .ok_or(ActionError::NotFound { action })?;
        match viewer {
            Some(viewer) if feed.is_owned_by(viewer.id) => Ok(feed),
            _ => Err(ActionError::NotOwner { action }),
        }
    }

    fn owned_comment(
        &self,
        viewer: Option<&User>,
        comment_id: CommentId,
        action: Action,
    ) -> Result<&Comment, ActionError> {
        let comment = self
            .feeds
            .iter()
            .find_map(|feed| feed.comment(comment_id))
            .ok_or(ActionError::NotFound { action })?;
        match viewer {
            Some(viewer) if comment.is_owned_by(viewer.id) => Ok(comment),
            _ => Err(ActionError::NotOwner { action }),
        }
    }
}
