//! Gateway traits: the domain's view of the REST backend and token storage.
//!
//! The UseCase layer depends on these traits only; the HTTP implementation
//! lives in the infrastructure layer (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{Chatroom, Feed, Message, User},
    error::{GatewayError, TokenStoreError},
    media::Attachment,
    value_object::{
        AuthToken, BirthDate, ChatroomId, CommentId, Email, FeedId, Fullname, Gender, MessageId,
        Password, UserId, Username,
    },
};

/// Credentials posted to `/login`; `login` is an e-mail or a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub login: String,
    pub password: Password,
}

/// Payload of `/register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub fullname: Fullname,
    pub username: String,
    pub email: Email,
    pub password: Password,
    pub gender: Gender,
    pub birth_date: BirthDate,
}

/// Text fields of the profile form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub fullname: Fullname,
    pub username: Username,
    pub email: Email,
    pub gender: Option<Gender>,
    pub birth_date: Option<BirthDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: Password,
    pub new_password: Password,
}

/// A new post: text plus zero or more files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDraft {
    pub body: String,
    pub files: Vec<Attachment>,
}

/// A new comment; the author summary travels with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub body: String,
    pub author: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatroom {
    pub name: String,
    pub is_group: bool,
    pub member_ids: Vec<UserId>,
}

/// A chat message: text and/or one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub body: String,
    pub attachment: Option<Attachment>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthToken, GatewayError>;

    async fn register(&self, registration: Registration) -> Result<(), GatewayError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Profile of the user the stored token belongs to.
    async fn fetch_profile(&self) -> Result<User, GatewayError>;

    async fn update_profile(&self, update: ProfileUpdate) -> Result<(), GatewayError>;

    async fn update_avatar(&self, avatar: Attachment) -> Result<(), GatewayError>;

    async fn change_password(&self, change: PasswordChange) -> Result<(), GatewayError>;

    async fn deactivate(&self) -> Result<(), GatewayError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError>;

    /// Users the viewer follows.
    async fn list_following(&self) -> Result<Vec<User>, GatewayError>;

    /// Users following the viewer.
    async fn list_followers(&self) -> Result<Vec<User>, GatewayError>;

    async fn follow(&self, user_id: UserId) -> Result<(), GatewayError>;

    async fn unfollow(&self, user_id: UserId) -> Result<(), GatewayError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedGateway: Send + Sync {
    async fn list_feeds(&self) -> Result<Vec<Feed>, GatewayError>;

    async fn create_feed(&self, draft: FeedDraft) -> Result<(), GatewayError>;

    /// The backend adds or removes the viewer's like.
    async fn toggle_like(&self, feed_id: FeedId) -> Result<(), GatewayError>;

    async fn update_feed(&self, feed_id: FeedId, body: String) -> Result<(), GatewayError>;

    async fn delete_feed(&self, feed_id: FeedId) -> Result<(), GatewayError>;

    async fn add_comment(&self, feed_id: FeedId, comment: NewComment)
    -> Result<(), GatewayError>;

    async fn update_comment(&self, comment_id: CommentId, body: String)
    -> Result<(), GatewayError>;

    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), GatewayError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn list_chatrooms(&self) -> Result<Vec<Chatroom>, GatewayError>;

    async fn create_chatroom(&self, chatroom: NewChatroom) -> Result<(), GatewayError>;

    async fn delete_chatroom(&self, chatroom_id: ChatroomId) -> Result<(), GatewayError>;

    async fn list_messages(&self, chatroom_id: ChatroomId) -> Result<Vec<Message>, GatewayError>;

    async fn send_message(
        &self,
        chatroom_id: ChatroomId,
        draft: MessageDraft,
    ) -> Result<(), GatewayError>;

    async fn delete_message(&self, message_id: MessageId) -> Result<(), GatewayError>;
}

/// Persisted client storage for the bearer token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<AuthToken>;

    fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError>;

    fn clear(&self) -> Result<(), TokenStoreError>;
}
