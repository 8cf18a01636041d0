//! JSON shapes exchanged with the REST backend.
//!
//! The backend serializes its models with PascalCase keys (`ID`, `Fullname`,
//! `UserID`, ...). List envelopes may carry `null` instead of an empty array.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AttachmentPath, AttachmentPaths, BirthDate, Chatroom, ChatroomId, Comment, CommentId, Feed,
    FeedId, Message, MessageId, Reaction, ReactionId, Timestamp, User, UserId,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Fullname")]
    pub fullname: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "PhotoProfile")]
    pub photo_profile: Option<String>,
    #[serde(rename = "JenisKelamin")]
    pub jenis_kelamin: Option<String>,
    #[serde(rename = "TanggalLahir")]
    pub tanggal_lahir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "FeedID")]
    pub feed_id: u64,
    #[serde(rename = "User")]
    pub user: Option<UserDto>,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "FeedID")]
    pub feed_id: u64,
    #[serde(rename = "Reaction")]
    pub reaction: String,
    #[serde(rename = "UserID")]
    pub user_id: u64,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Feed")]
    pub feed: String,
    /// Comma-joined attachment paths.
    #[serde(rename = "File")]
    pub file: Option<String>,
    #[serde(rename = "UserID")]
    pub user_id: u64,
    #[serde(rename = "User")]
    pub user: Option<UserDto>,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "Comments")]
    pub comments: Option<Vec<CommentDto>>,
    #[serde(rename = "Reactions")]
    pub reactions: Option<Vec<ReactionDto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatroomDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IsGroup")]
    pub is_group: bool,
    #[serde(rename = "OwnerID")]
    pub owner_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "File")]
    pub file: Option<String>,
    #[serde(rename = "User")]
    pub user: UserDto,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
}

// ---- response envelopes ----

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsersResponse {
    pub users: Option<Vec<UserDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FollowingResponse {
    pub following: Option<Vec<UserDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FollowersResponse {
    pub followers: Option<Vec<UserDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedsResponse {
    pub feeds: Option<Vec<FeedDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatroomsResponse {
    pub chatrooms: Option<Vec<ChatroomDto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessagesResponse {
    pub messages: Option<Vec<MessageDto>>,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// ---- request bodies ----

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub jenis_kelamin: String,
    pub tanggal_lahir: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateFeedRequest {
    pub feed: String,
}

/// Author summary sent along with a new comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentAuthorDto {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Fullname")]
    pub fullname: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "PhotoProfile")]
    pub photo_profile: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub comment: String,
    pub user: Option<CommentAuthorDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCommentRequest {
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateChatroomRequest {
    pub is_group: bool,
    pub name: String,
    pub user_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ---- DTO -> domain ----

fn timestamp(value: Option<&str>) -> Option<Timestamp> {
    value.and_then(Timestamp::parse)
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: UserId::new(dto.id),
            fullname: dto.fullname,
            username: dto.username,
            email: dto.email,
            photo_profile: dto.photo_profile.as_deref().and_then(AttachmentPath::new),
            gender: dto
                .jenis_kelamin
                .as_deref()
                .and_then(|value| value.parse().ok()),
            birth_date: dto
                .tanggal_lahir
                .as_deref()
                .and_then(feedsapp_shared::time::parse_date_prefix)
                .map(BirthDate::new),
        }
    }
}

impl From<&User> for CommentAuthorDto {
    fn from(user: &User) -> Self {
        CommentAuthorDto {
            id: user.id.value(),
            fullname: user.fullname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            photo_profile: user
                .photo_profile
                .as_ref()
                .map(|path| path.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<CommentDto> for Comment {
    fn from(dto: CommentDto) -> Self {
        Comment {
            id: CommentId::new(dto.id),
            body: dto.comment,
            feed_id: FeedId::new(dto.feed_id),
            author: dto.user.map(User::from),
            created_at: timestamp(dto.created_at.as_deref()),
        }
    }
}

impl From<ReactionDto> for Reaction {
    fn from(dto: ReactionDto) -> Self {
        Reaction {
            id: ReactionId::new(dto.id),
            feed_id: FeedId::new(dto.feed_id),
            kind: dto.reaction,
            user_id: UserId::new(dto.user_id),
            created_at: timestamp(dto.created_at.as_deref()),
        }
    }
}

impl From<FeedDto> for Feed {
    fn from(dto: FeedDto) -> Self {
        Feed {
            id: FeedId::new(dto.id),
            body: dto.feed,
            attachments: AttachmentPaths::parse(dto.file.as_deref().unwrap_or_default()),
            author_id: UserId::new(dto.user_id),
            author: dto.user.map(User::from),
            comments: dto
                .comments
                .unwrap_or_default()
                .into_iter()
                .map(Comment::from)
                .collect(),
            reactions: dto
                .reactions
                .unwrap_or_default()
                .into_iter()
                .map(Reaction::from)
                .collect(),
            created_at: timestamp(dto.created_at.as_deref()),
            updated_at: timestamp(dto.updated_at.as_deref()),
        }
    }
}

impl From<ChatroomDto> for Chatroom {
    fn from(dto: ChatroomDto) -> Self {
        Chatroom {
            id: ChatroomId::new(dto.id),
            name: dto.name,
            is_group: dto.is_group,
            owner_id: UserId::new(dto.owner_id),
        }
    }
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Message {
            id: MessageId::new(dto.id),
            body: dto.message,
            attachment: dto.file.as_deref().and_then(AttachmentPath::new),
            sender: User::from(dto.user),
            created_at: timestamp(dto.created_at.as_deref()),
        }
    }
}

/// Convert an optional list envelope into domain models.
pub fn into_models<D, M: From<D>>(items: Option<Vec<D>>) -> Vec<M> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(M::from)
        .collect()
}
