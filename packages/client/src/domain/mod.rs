//! Domain layer for the FeedsApp client.
//!
//! This module contains the models and rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod gateway;
pub mod media;
pub mod value_object;

pub use entity::{Chatroom, Comment, Feed, Message, Reaction, User, initials};
pub use error::{GatewayError, TokenStoreError, ValueObjectError};
pub use gateway::{
    AuthGateway, ChatGateway, FeedDraft, FeedGateway, LoginCredentials, MessageDraft, NewChatroom,
    NewComment, PasswordChange, ProfileGateway, ProfileUpdate, Registration, TokenStore,
    UserGateway,
};
pub use media::{Attachment, MediaKind, MediaLayout, MediaPreview};
pub use value_object::{
    AttachmentPath, AttachmentPaths, AuthToken, BaseUrl, BirthDate, ChatroomId, CommentId, Email,
    FeedId, Fullname, Gender, MessageId, Password, ReactionId, Timestamp, UserId, Username,
};
