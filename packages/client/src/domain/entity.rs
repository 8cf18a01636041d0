//! Core domain models mirrored from the backend.

use super::value_object::{
    AttachmentPath, AttachmentPaths, BirthDate, ChatroomId, CommentId, FeedId, Gender, MessageId,
    ReactionId, Timestamp, UserId,
};

/// Reaction kind stored by the like endpoint.
pub const LIKE_REACTION: &str = "like";

/// Initials shown in place of a missing avatar.
///
/// One word gives its first letter; more words give the first letters of the
/// first two. Blank names give `U`.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub username: String,
    pub email: String,
    /// Relative path of the avatar, if one was uploaded.
    pub photo_profile: Option<AttachmentPath>,
    pub gender: Option<Gender>,
    pub birth_date: Option<BirthDate>,
}

impl User {
    /// Fullname, falling back to the username when blank.
    pub fn display_name(&self) -> &str {
        if self.fullname.trim().is_empty() {
            &self.username
        } else {
            &self.fullname
        }
    }

    pub fn initials(&self) -> String {
        initials(self.display_name())
    }

    /// Case-insensitive substring match on fullname or username. Whitespace
    /// in the query is matched as typed.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.fullname.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
    }
}

/// A post on the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: FeedId,
    pub body: String,
    pub attachments: AttachmentPaths,
    pub author_id: UserId,
    /// Embedded author; the backend may omit it.
    pub author: Option<User>,
    pub comments: Vec<Comment>,
    pub reactions: Vec<Reaction>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Feed {
    /// Whether `viewer` owns this post.
    ///
    /// Ownership follows the embedded author; without one, nobody owns it
    /// from the client's point of view.
    pub fn is_owned_by(&self, viewer: UserId) -> bool {
        self.author.as_ref().is_some_and(|author| author.id == viewer)
    }

    /// Whether `viewer` holds a like reaction on this post.
    pub fn is_liked_by(&self, viewer: UserId) -> bool {
        self.reactions
            .iter()
            .any(|reaction| reaction.is_like() && reaction.user_id == viewer)
    }

    /// Number of distinct users holding a like reaction.
    pub fn like_count(&self) -> usize {
        let mut likers: Vec<UserId> = self
            .reactions
            .iter()
            .filter(|reaction| reaction.is_like())
            .map(|reaction| reaction.user_id)
            .collect();
        likers.sort_unstable();
        likers.dedup();
        likers.len()
    }

    pub fn comment(&self, comment_id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == comment_id)
    }
}

/// A comment under a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub feed_id: FeedId,
    pub author: Option<User>,
    pub created_at: Option<Timestamp>,
}

impl Comment {
    /// Author id, or `None` when the author is missing or has a blank username.
    pub fn author_id(&self) -> Option<UserId> {
        self.known_author().map(|author| author.id)
    }

    pub fn known_author(&self) -> Option<&User> {
        self.author
            .as_ref()
            .filter(|author| !author.username.trim().is_empty())
    }

    pub fn is_owned_by(&self, viewer: UserId) -> bool {
        self.author_id() == Some(viewer)
    }
}

/// A reaction on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: ReactionId,
    pub feed_id: FeedId,
    pub kind: String,
    pub user_id: UserId,
    pub created_at: Option<Timestamp>,
}

impl Reaction {
    pub fn is_like(&self) -> bool {
        self.kind == LIKE_REACTION
    }
}

/// A direct or group conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chatroom {
    pub id: ChatroomId,
    /// May be empty; see [`Chatroom::title`].
    pub name: String,
    pub is_group: bool,
    pub owner_id: UserId,
}

impl Chatroom {
    /// Name, or a generic title when the room is unnamed.
    pub fn title(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else if self.is_group {
            "Group Chat"
        } else {
            "Direct Chat"
        }
    }

    pub fn is_owned_by(&self, viewer: UserId) -> bool {
        self.owner_id == viewer
    }
}

/// A message inside a chatroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub body: String,
    pub attachment: Option<AttachmentPath>,
    pub sender: User,
    pub created_at: Option<Timestamp>,
}

impl Message {
    pub fn is_sent_by(&self, viewer: UserId) -> bool {
        self.sender.id == viewer
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by unit tests across layers.

    use super::*;

    pub fn user(id: u64, fullname: &str) -> User {
        User {
            id: UserId::new(id),
            fullname: fullname.to_string(),
            username: fullname.to_lowercase().replace(' ', "_"),
            email: format!("user{id}@example.com"),
            photo_profile: None,
            gender: None,
            birth_date: None,
        }
    }

    pub fn feed(id: u64, body: &str, author: &User) -> Feed {
        Feed {
            id: FeedId::new(id),
            body: body.to_string(),
            attachments: AttachmentPaths::default(),
            author_id: author.id,
            author: Some(author.clone()),
            comments: Vec::new(),
            reactions: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn like(id: u64, feed_id: u64, user_id: u64) -> Reaction {
        Reaction {
            id: ReactionId::new(id),
            feed_id: FeedId::new(feed_id),
            kind: LIKE_REACTION.to_string(),
            user_id: UserId::new(user_id),
            created_at: None,
        }
    }

    pub fn comment(id: u64, feed_id: u64, body: &str, author: &User) -> Comment {
        Comment {
            id: CommentId::new(id),
            body: body.to_string(),
            feed_id: FeedId::new(feed_id),
            author: Some(author.clone()),
            created_at: None,
        }
    }

    pub fn chatroom(id: u64, name: &str, is_group: bool, owner: u64) -> Chatroom {
        Chatroom {
            id: ChatroomId::new(id),
            name: name.to_string(),
            is_group,
            owner_id: UserId::new(owner),
        }
    }

    pub fn message(id: u64, body: &str, sender: &User) -> Message {
        Message {
            id: MessageId::new(id),
            body: body.to_string(),
            attachment: None,
            sender: sender.clone(),
            created_at: None,
        }
    }
}
