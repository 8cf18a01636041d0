//! REPL command parsing.
//!
//! One command per line: a verb followed by its arguments. Commands taking an
//! id and free text read the id first and the rest of the line as the text;
//! multi-field forms separate fields with `|`.

use std::{path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::{
    domain::{ChatroomId, CommentId, FeedId, MessageId, UserId, ValueObjectError},
    usecase::RegisterForm,
};

pub const HELP: &str = "\
General
  help | quit | refresh | logout | width <columns>
  go <feeds|chat|search|profile|logout|login|register|/users/<id>>
Auth
  login <email or username> | <password>
  register <fullname> | <username> | <email> | <password> | <Man|Woman> | <YYYY-MM-DD>
Feeds
  post <text>              attach <path>        detach [index]
  like <feed>              expand <feed>        comment <feed> <text>
  edit <feed> <text>       delete <feed>
  edit-comment <comment> <text>                 delete-comment <comment>
Chat
  open <room>   back   send [text]   attach <path>   detach
  delete-message <message>   delete-room <room>
  new-chat   to <user>   group-name <name>   create-chat   cancel-chat
Search
  search <query>   user <id>   follow
Profile
  set <fullname|username|email|gender|birthdate> <value>   save
  avatar <path>   password <old> | <new>   deactivate   confirm   cancel";

/// Editable field of the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Fullname,
    Username,
    Email,
    Gender,
    BirthDate,
}

impl FromStr for ProfileField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fullname" => Ok(ProfileField::Fullname),
            "username" => Ok(ProfileField::Username),
            "email" => Ok(ProfileField::Email),
            "gender" => Ok(ProfileField::Gender),
            "birthdate" | "birth_date" => Ok(ProfileField::BirthDate),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Refresh,
    Logout,
    Width(u16),
    /// Menu key (`feeds`, `logout`) or a route path (`/users/7`).
    Go(String),
    Login { login: String, password: String },
    Register(RegisterForm),
    Post(String),
    Attach(PathBuf),
    Detach(Option<usize>),
    Like(FeedId),
    Expand(FeedId),
    EditFeed { feed_id: FeedId, body: String },
    DeleteFeed(FeedId),
    Comment { feed_id: FeedId, body: String },
    EditComment { comment_id: CommentId, body: String },
    DeleteComment(CommentId),
    OpenRoom(ChatroomId),
    Back,
    Send(String),
    DeleteMessage(MessageId),
    DeleteRoom(ChatroomId),
    NewChat,
    ToggleRecipient(UserId),
    GroupName(String),
    CreateChat,
    CancelChat,
    Search(String),
    ViewUser(UserId),
    Follow,
    SetProfile { field: ProfileField, value: String },
    SaveProfile,
    Avatar(PathBuf),
    ChangePassword { old: String, new: String },
    Deactivate,
    Confirm,
    Cancel,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown profile field `{0}`")]
    UnknownField(String),

    #[error(transparent)]
    InvalidId(#[from] ValueObjectError),
}

impl Command {
    /// Parse one input line; `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "refresh" => Command::Refresh,
            "logout" => Command::Logout,
            "width" => Command::Width(
                rest.parse()
                    .map_err(|_| ParseError::Usage("width <columns>"))?,
            ),
            "go" => Command::Go(required(rest, "go <screen>")?.to_string()),
            "login" => {
                let [login, password] =
                    fields::<2>(rest, "login <email or username> | <password>")?;
                Command::Login { login, password }
            }
            "register" => {
                let [fullname, username, email, password, gender, birth_date] = fields::<6>(
                    rest,
                    "register <fullname> | <username> | <email> | <password> | <gender> | <YYYY-MM-DD>",
                )?;
                Command::Register(RegisterForm {
                    fullname,
                    username,
                    email,
                    password,
                    gender,
                    birth_date,
                })
            }
            "post" => Command::Post(required(rest, "post <text>")?.to_string()),
            "attach" => Command::Attach(PathBuf::from(required(rest, "attach <path>")?)),
            "detach" => Command::Detach(match rest {
                "" => None,
                index => Some(
                    index
                        .parse()
                        .map_err(|_| ParseError::Usage("detach [index]"))?,
                ),
            }),
            "like" => Command::Like(id(rest, "like <feed>")?),
            "expand" => Command::Expand(id(rest, "expand <feed>")?),
            "edit" => {
                let (feed_id, body) = id_and_text(rest, "edit <feed> <text>")?;
                Command::EditFeed { feed_id, body }
            }
            "delete" => Command::DeleteFeed(id(rest, "delete <feed>")?),
            "comment" => {
                let (feed_id, body) = id_and_text(rest, "comment <feed> <text>")?;
                Command::Comment { feed_id, body }
            }
            "edit-comment" => {
                let (comment_id, body) = id_and_text(rest, "edit-comment <comment> <text>")?;
                Command::EditComment { comment_id, body }
            }
            "delete-comment" => Command::DeleteComment(id(rest, "delete-comment <comment>")?),
            "open" => Command::OpenRoom(id(rest, "open <room>")?),
            "back" => Command::Back,
            "send" => Command::Send(rest.to_string()),
            "delete-message" => Command::DeleteMessage(id(rest, "delete-message <message>")?),
            "delete-room" => Command::DeleteRoom(id(rest, "delete-room <room>")?),
            "new-chat" => Command::NewChat,
            "to" => Command::ToggleRecipient(id(rest, "to <user>")?),
            "group-name" => Command::GroupName(rest.to_string()),
            "create-chat" => Command::CreateChat,
            "cancel-chat" => Command::CancelChat,
            "search" => Command::Search(rest.to_string()),
            "user" => Command::ViewUser(id(rest, "user <id>")?),
            "follow" | "unfollow" => Command::Follow,
            "set" => {
                let usage = "set <field> <value>";
                let (field, value) = required(rest, usage)?
                    .split_once(char::is_whitespace)
                    .map(|(field, value)| (field, value.trim()))
                    .unwrap_or((rest, ""));
                Command::SetProfile {
                    field: field.parse()?,
                    value: value.to_string(),
                }
            }
            "save" => Command::SaveProfile,
            "avatar" => Command::Avatar(PathBuf::from(required(rest, "avatar <path>")?)),
            "password" => {
                let [old, new] = fields::<2>(rest, "password <old> | <new>")?;
                Command::ChangePassword { old, new }
            }
            "deactivate" => Command::Deactivate,
            "confirm" => Command::Confirm,
            "cancel" => Command::Cancel,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(rest)
    }
}

fn id<T>(rest: &str, usage: &'static str) -> Result<T, ParseError>
where
    T: FromStr<Err = ValueObjectError>,
{
    Ok(required(rest, usage)?.parse::<T>()?)
}

fn id_and_text<T>(rest: &str, usage: &'static str) -> Result<(T, String), ParseError>
where
    T: FromStr<Err = ValueObjectError>,
{
    let (id_part, text) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseError::Usage(usage))?;
    Ok((id_part.parse::<T>()?, text.trim().to_string()))
}

/// Exactly `N` fields separated by `|`; fields are kept as typed.
fn fields<const N: usize>(rest: &str, usage: &'static str) -> Result<[String; N], ParseError> {
    let parts: Vec<String> = rest.split('|').map(|part| part.trim().to_string()).collect();
    parts.try_into().map_err(|_| ParseError::Usage(usage))
}
