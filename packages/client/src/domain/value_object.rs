//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDate};
use feedsapp_shared::time::{format_date, format_datetime, format_time, parse_rfc3339};

use super::{error::ValueObjectError, media::MediaKind};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a backend identifier.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the inner value.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValueObjectError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<u64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(ValueObjectError::IdInvalid {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

entity_id!(
    /// User identifier.
    UserId
);
entity_id!(
    /// Feed (post) identifier.
    FeedId
);
entity_id!(
    /// Comment identifier.
    CommentId
);
entity_id!(
    /// Reaction identifier.
    ReactionId
);
entity_id!(
    /// Chatroom identifier.
    ChatroomId
);
entity_id!(
    /// Chat message identifier.
    MessageId
);

/// Bearer token issued by `/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new AuthToken.
    ///
    /// # Returns
    ///
    /// A Result containing the AuthToken or an error if the token is blank
    pub fn new(token: String) -> Result<Self, ValueObjectError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(ValueObjectError::TokenEmpty);
        }
        Ok(Self(token))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens never end up in logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Display name of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fullname(String);

impl Fullname {
    pub const MAX_LEN: usize = 100;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::FullnameEmpty);
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::FullnameTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Login handle of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub const MIN_LEN: usize = 5;
    pub const MAX_LEN: usize = 50;

    /// Create a Username with the profile form's length rule (5-50).
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = value.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ValueObjectError::UsernameLength {
                min: Self::MIN_LEN,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// E-mail address with a shape check.
///
/// Only the shape is checked here: one `@`, a non-empty local part and a
/// dotted domain. The backend remains the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 100;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::EmailTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        if !Self::has_valid_shape(&value) {
            return Err(ValueObjectError::EmailInvalid(value));
        }
        Ok(Self(value))
    }

    fn has_valid_shape(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        let labels: Vec<&str> = domain.split('.').collect();
        labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Password typed into a form.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LEN: usize = 6;

    /// A new password, which must be at least six characters long.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::PasswordEmpty);
        }
        let len = value.chars().count();
        if len < Self::MIN_LEN {
            return Err(ValueObjectError::PasswordTooShort {
                min: Self::MIN_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    /// An existing password (login, old password); only presence is checked.
    pub fn existing(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::PasswordEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Gender as offered by the registration and profile forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Man,
    Woman,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Man => "Man",
            Gender::Woman => "Woman",
        }
    }
}

impl FromStr for Gender {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "man" => Ok(Gender::Man),
            "woman" => Ok(Gender::Woman),
            _ => Err(ValueObjectError::GenderInvalid(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Birth date in `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for BirthDate {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValueObjectError::BirthDateInvalid(s.to_string()))
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(&self.0))
    }
}

/// Backend timestamp (`CreatedAt`, `UpdatedAt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }

    /// Parse an RFC 3339 string; `None` for empty or malformed values.
    pub fn parse(value: &str) -> Option<Self> {
        parse_rfc3339(value).map(Self)
    }

    pub fn value(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// `YYYY-MM-DD HH:MM`, as shown on feeds and comments.
    pub fn to_datetime_string(&self) -> String {
        format_datetime(&self.0)
    }

    /// `HH:MM:SS`, as shown on chat bubbles.
    pub fn to_time_string(&self) -> String {
        format_time(&self.0)
    }
}

/// Base URL of the REST backend; uploaded files are served relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(value: &str) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim().trim_end_matches('/');
        let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let has_host = trimmed
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty());
        if !has_scheme || !has_host {
            return Err(ValueObjectError::BaseUrlInvalid(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL of an API endpoint such as `/feeds/1/like`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    /// Absolute URL of an uploaded file such as `public/uploads/photo.png`.
    pub fn file_url(&self, relative_path: &str) -> String {
        self.endpoint(relative_path)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relative path of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPath(String);

impl AttachmentPath {
    /// Label used for files without an extension.
    pub const FALLBACK_LABEL: &'static str = "Download File";

    /// `None` for blank paths.
    pub fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. `notes.pdf` for `public/uploads/notes.pdf`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Lower-cased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(self.file_name())
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_extension(self.extension().as_deref())
    }

    /// Download label: the file name, or `Download File` without an extension.
    pub fn label(&self) -> String {
        match self.extension() {
            Some(_) => self.file_name().to_string(),
            None => Self::FALLBACK_LABEL.to_string(),
        }
    }
}

/// Lower-cased extension after the last dot of a file name.
pub(crate) fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Ordered attachment paths of a feed, comma-joined on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentPaths(Vec<AttachmentPath>);

impl AttachmentPaths {
    /// Split the wire value, keeping order and dropping empty segments.
    pub fn parse(joined: &str) -> Self {
        Self(joined.split(',').filter_map(AttachmentPath::new).collect())
    }

    pub fn join(&self) -> String {
        self.0
            .iter()
            .map(AttachmentPath::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachmentPath> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
