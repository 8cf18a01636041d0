//! UseCase 層
//!
//! 画面ごとの状態とビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層のゲートウェイ trait を通じてバックエンドを操作します。

pub mod auth;
pub mod chat;
pub mod error;
pub mod feed;
pub mod navigation;
pub mod profile;
pub mod route_guard;
pub mod search_users;
pub mod session;
pub mod user_detail;
pub mod view;

pub use auth::{AuthUseCase, RegisterForm};
pub use chat::{ChatLayout, ChatPane, ChatScreen};
pub use error::{Action, ActionError, ActionResult, Notice, NoticeLevel};
pub use feed::FeedScreen;
pub use navigation::{MenuItem, MenuTarget};
pub use profile::ProfileScreen;
pub use route_guard::{GuardDecision, Route, guard};
pub use search_users::SearchScreen;
pub use session::Session;
pub use user_detail::UserDetailScreen;
pub use view::AuthorView;
