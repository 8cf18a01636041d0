//! UseCase: チャット画面
//!
//! チャットルーム一覧・メッセージ一覧・メッセージ送信（添付ファイル 1 件まで）・
//! ルーム作成/削除を扱います。リアルタイム受信は行わず、ルームの再選択や
//! 明示的な再読み込みで最新のメッセージを取得します。
//!
//! ## テスト観点
//! - ルーム未選択、または本文・添付が空のメッセージはリクエスト前に拒否される
//! - 表示中のルームを削除すると選択とメッセージがクリアされる
//! - 宛先 1 人ならルーム名が自動生成され、2 人以上ならグループ名が必須
//! - 画面幅によるモバイル/デスクトップ表示の切り替え

use std::sync::Arc;

use crate::domain::{
    Attachment, BaseUrl, ChatGateway, Chatroom, ChatroomId, MediaPreview, Message, MessageDraft,
    MessageId, NewChatroom, User, UserGateway, UserId,
};

use super::{
    error::{Action, ActionError, ActionResult, Notice},
    view::AuthorView,
};

/// この幅未満はモバイル表示
pub const MOBILE_BREAKPOINT: u16 = 768;

const NO_ROOM_SELECTED: &str = "Please select a chatroom first.";
const EMPTY_MESSAGE: &str = "Message cannot be empty.";
const NO_RECIPIENT: &str = "Please select at least one user for chat.";
const NO_GROUP_NAME: &str = "Please enter a group name for group chat.";

/// 画面幅による表示の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatLayout {
    /// ルーム一覧とスレッドを切り替えて表示
    Mobile,
    /// 両方を並べて表示
    Desktop,
}

impl ChatLayout {
    pub fn from_width(width: u16) -> Self {
        if width < MOBILE_BREAKPOINT {
            ChatLayout::Mobile
        } else {
            ChatLayout::Desktop
        }
    }
}

/// 表示する領域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPane {
    Rooms,
    Thread,
}

/// ルーム一覧の項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub id: ChatroomId,
    pub title: String,
    pub is_group: bool,
    pub selected: bool,
    /// 削除ボタンを表示するか（作成者のみ）
    pub can_delete: bool,
}

/// メッセージの表示情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub sender: AuthorView,
    pub body: String,
    pub attachment: Option<MediaPreview>,
    pub time: Option<String>,
    /// 自分のメッセージ（右寄せ・削除可能）
    pub own: bool,
}

/// メッセージ入力欄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageComposer {
    pub body: String,
    pub attachment: Option<Attachment>,
}

impl MessageComposer {
    /// 選択中ファイルのプレビュー
    pub fn preview(&self) -> Option<MediaPreview> {
        self.attachment.as_ref().map(MediaPreview::local)
    }
}

/// 新規チャット作成フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewChatForm {
    /// 宛先候補（閲覧者を除く）
    pub candidates: Vec<User>,
    pub recipients: Vec<UserId>,
    pub name: String,
}

impl NewChatForm {
    pub fn is_group(&self) -> bool {
        self.recipients.len() > 1
    }

    /// 宛先 1 人のときはルーム名を編集できない
    pub fn name_is_editable(&self) -> bool {
        self.is_group()
    }
}

/// チャット画面の状態
pub struct ChatScreen {
    chats: Arc<dyn ChatGateway>,
    users: Arc<dyn UserGateway>,
    base_url: BaseUrl,
    layout: ChatLayout,
    rooms: Vec<Chatroom>,
    selected: Option<ChatroomId>,
    messages: Vec<Message>,
    composer: MessageComposer,
    new_chat: Option<NewChatForm>,
    scroll_pending: bool,
}

impl ChatScreen {
    pub fn new(
        chats: Arc<dyn ChatGateway>,
        users: Arc<dyn UserGateway>,
        base_url: BaseUrl,
        width: u16,
    ) -> Self {
        Self {
            chats,
            users,
            base_url,
            layout: ChatLayout::from_width(width),
            rooms: Vec::new(),
            selected: None,
            messages: Vec::new(),
            composer: MessageComposer::default(),
            new_chat: None,
            scroll_pending: false,
        }
    }

    pub fn layout(&self) -> ChatLayout {
        self.layout
    }

    /// 画面幅の変更
    pub fn resize(&mut self, width: u16) {
        self.layout = ChatLayout::from_width(width);
    }

    /// 表示する領域（モバイルは選択状態で切り替え）
    pub fn panes(&self) -> Vec<ChatPane> {
        match (self.layout, self.selected) {
            (ChatLayout::Desktop, _) => vec![ChatPane::Rooms, ChatPane::Thread],
            (ChatLayout::Mobile, Some(_)) => vec![ChatPane::Thread],
            (ChatLayout::Mobile, None) => vec![ChatPane::Rooms],
        }
    }

    /// ルーム一覧を再取得
    pub async fn load_rooms(&mut self) {
        match self.chats.list_chatrooms().await {
            Ok(rooms) => {
                tracing::debug!(count = rooms.len(), "chatrooms loaded");
                self.rooms = rooms;
            }
            Err(e) => tracing::error!("failed to load chatrooms: {}", e),
        }
    }

    /// ルームを選択してメッセージを取得
    pub async fn select_room(&mut self, chatroom_id: ChatroomId) {
        if self.selected != Some(chatroom_id) {
            self.messages.clear();
            self.composer = MessageComposer::default();
        }
        self.selected = Some(chatroom_id);
        self.load_messages().await;
    }

    /// 選択中ルームのメッセージを再取得
    pub async fn load_messages(&mut self) {
        let Some(chatroom_id) = self.selected else {
            return;
        };
        match self.chats.list_messages(chatroom_id).await {
            Ok(messages) => {
                tracing::debug!(%chatroom_id, count = messages.len(), "messages loaded");
                self.messages = messages;
                self.scroll_pending = true;
            }
            Err(e) => tracing::error!(%chatroom_id, "failed to load messages: {}", e),
        }
    }

    /// ルーム一覧に戻る（モバイル）
    pub fn back(&mut self) {
        self.selected = None;
        self.messages.clear();
        self.composer = MessageComposer::default();
    }

    pub fn selected(&self) -> Option<&Chatroom> {
        self.selected
            .and_then(|id| self.rooms.iter().find(|room| room.id == id))
    }

    pub fn selected_id(&self) -> Option<ChatroomId> {
        self.selected
    }

    pub fn rooms(&self, viewer: Option<&User>) -> Vec<RoomView> {
        self.rooms
            .iter()
            .map(|room| RoomView {
                id: room.id,
                title: room.title().to_string(),
                is_group: room.is_group,
                selected: self.selected == Some(room.id),
                can_delete: viewer.is_some_and(|viewer| room.is_owned_by(viewer.id)),
            })
            .collect()
    }

    pub fn messages(&self, viewer: Option<&User>) -> Vec<MessageView> {
        self.messages
            .iter()
            .map(|message| MessageView {
                id: message.id,
                sender: AuthorView::new(Some(&message.sender), &self.base_url),
                body: message.body.clone(),
                attachment: message
                    .attachment
                    .as_ref()
                    .map(|path| MediaPreview::remote(path, &self.base_url)),
                time: message.created_at.as_ref().map(|t| t.to_time_string()),
                own: viewer.is_some_and(|viewer| message.is_sent_by(viewer.id)),
            })
            .collect()
    }

    /// 新しいメッセージ表示後の自動スクロール要求を取り出す
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    pub fn set_message_body(&mut self, body: impl Into<String>) {
        self.composer.body = body.into();
    }

    /// 添付ファイルを選択（既存の選択は置き換え）
    pub fn attach(&mut self, file: Attachment) {
        tracing::debug!(file = %file.file_name, kind = file.kind().as_str(), "attachment selected");
        self.composer.attachment = Some(file);
    }

    pub fn detach(&mut self) -> Option<Attachment> {
        self.composer.attachment.take()
    }

    /// メッセージを送信
    pub async fn send_message(&mut self) -> ActionResult {
        let Some(chatroom_id) = self.selected else {
            return Err(ActionError::Invalid(NO_ROOM_SELECTED));
        };
        let body = self.composer.body.trim();
        if body.is_empty() && self.composer.attachment.is_none() {
            return Err(ActionError::Invalid(EMPTY_MESSAGE));
        }
        let draft = MessageDraft {
            body: body.to_string(),
            attachment: self.composer.attachment.clone(),
        };

        self.chats
            .send_message(chatroom_id, draft)
            .await
            .map_err(ActionError::gateway(Action::SendMessage))?;

        self.composer = MessageComposer::default();
        self.load_messages().await;
        Ok(Notice::for_success(Action::SendMessage))
    }

    /// 自分のメッセージを削除
    pub async fn delete_message(
        &mut self,
        viewer: Option<&User>,
        message_id: MessageId,
    ) -> ActionResult {
        let message = self
            .messages
            .iter()
            .find(|message| message.id == message_id)
            .ok_or(ActionError::NotFound {
                action: Action::DeleteMessage,
            })?;
        if !viewer.is_some_and(|viewer| message.is_sent_by(viewer.id)) {
            return Err(ActionError::NotOwner {
                action: Action::DeleteMessage,
            });
        }

        self.chats
            .delete_message(message_id)
            .await
            .map_err(ActionError::gateway(Action::DeleteMessage))?;

        self.load_messages().await;
        Ok(Notice::for_success(Action::DeleteMessage))
    }

    /// ルームを削除（作成者のみ）
    pub async fn delete_room(
        &mut self,
        viewer: Option<&User>,
        chatroom_id: ChatroomId,
    ) -> ActionResult {
        let room = self
            .rooms
            .iter()
            .find(|room| room.id == chatroom_id)
            .ok_or(ActionError::NotFound {
                action: Action::DeleteChatroom,
            })?;
        if !viewer.is_some_and(|viewer| room.is_owned_by(viewer.id)) {
            return Err(ActionError::NotOwner {
                action: Action::DeleteChatroom,
            });
        }

        self.chats
            .delete_chatroom(chatroom_id)
            .await
            .map_err(ActionError::gateway(Action::DeleteChatroom))?;

        if self.selected == Some(chatroom_id) {
            self.back();
        }
        self.load_rooms().await;
        Ok(Notice::for_success(Action::DeleteChatroom))
    }

    /// 新規チャットフォームを開き、宛先候補を取得
    pub async fn open_new_chat(&mut self, viewer: Option<&User>) {
        let candidates = match self.users.list_users().await {
            Ok(users) => users
                .into_iter()
                .filter(|user| viewer.is_none_or(|viewer| user.id != viewer.id))
                .collect(),
            Err(e) => {
                tracing::error!("failed to load users: {}", e);
                Vec::new()
            }
        };
        self.new_chat = Some(NewChatForm {
            candidates,
            ..NewChatForm::default()
        });
    }

    pub fn close_new_chat(&mut self) {
        self.new_chat = None;
    }

    pub fn new_chat(&self) -> Option<&NewChatForm> {
        self.new_chat.as_ref()
    }

    /// 宛先の選択を切り替える（ルーム名はリセットされる）
    pub fn toggle_recipient(&mut self, viewer: Option<&User>, user_id: UserId) {
        let Some(form) = self.new_chat.as_mut() else {
            return;
        };
        if !form.candidates.iter().any(|user| user.id == user_id) {
            return;
        }
        match form.recipients.iter().position(|id| *id == user_id) {
            Some(index) => {
                form.recipients.remove(index);
            }
            None => form.recipients.push(user_id),
        }

        form.name = match (viewer, form.recipients.as_slice()) {
            (Some(viewer), [recipient]) => form
                .candidates
                .iter()
                .find(|user| user.id == *recipient)
                .map(|recipient| format!("{} - {}", viewer.fullname, recipient.fullname))
                .unwrap_or_default(),
            _ => String::new(),
        };
    }

    /// グループ名を入力（宛先 2 人以上のときのみ）
    pub fn set_group_name(&mut self, name: impl Into<String>) {
        if let Some(form) = self.new_chat.as_mut().filter(|form| form.name_is_editable()) {
            form.name = name.into();
        }
    }

    /// ルームを作成
    pub async fn create_chatroom(&mut self) -> ActionResult {
        let Some(form) = self.new_chat.as_ref() else {
            return Err(ActionError::Invalid(NO_RECIPIENT));
        };
        if form.recipients.is_empty() {
            return Err(ActionError::Invalid(NO_RECIPIENT));
        }
        let name = form.name.trim();
        if form.is_group() && name.is_empty() {
            return Err(ActionError::Invalid(NO_GROUP_NAME));
        }
        let chatroom = NewChatroom {
            name: name.to_string(),
            is_group: form.is_group(),
            member_ids: form.recipients.clone(),
        };

        self.chats
            .create_chatroom(chatroom)
            .await
            .map_err(ActionError::gateway(Action::CreateChatroom))?;

        self.new_chat = None;
        self.load_rooms().await;
        Ok(Notice::for_success(Action::CreateChatroom))
    }
}
