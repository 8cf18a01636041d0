//! UseCase: 画面遷移とルートガード
//!
//! トークンが保存されていれば画面を表示し、無ければログイン画面へリダイレクトします。
//! トークンの有効期限は確認しません（401 は操作の失敗として通知されます）。

use std::fmt;

use crate::domain::{TokenStore, UserId};

/// 画面（ルート）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Feeds,
    Chat,
    Search,
    Profile,
    UserDetail(UserId),
}

impl Route {
    /// パス文字列からルートを解決（未知のパスはログイン画面）
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_end_matches('/');
        match path {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "" | "/" | "/feeds" => Route::Feeds,
            "/chat" => Route::Chat,
            "/search" => Route::Search,
            "/profile" => Route::Profile,
            _ => path
                .strip_prefix("/users/")
                .and_then(|id| id.parse::<UserId>().ok())
                .map(Route::UserDetail)
                .unwrap_or(Route::Login),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Feeds => "/feeds".to_string(),
            Route::Chat => "/chat".to_string(),
            Route::Search => "/search".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::UserDetail(id) => format!("/users/{id}"),
        }
    }

    /// 未ログインでも表示できる画面か
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// ルートガードの判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

impl GuardDecision {
    /// 実際に表示する画面
    pub fn route(&self) -> Route {
        match self {
            GuardDecision::Render(route) | GuardDecision::Redirect(route) => *route,
        }
    }
}

/// ルートガード
pub fn guard(route: Route, tokens: &dyn TokenStore) -> GuardDecision {
    if route.is_public() || tokens.load().is_some() {
        GuardDecision::Render(route)
    } else {
        tracing::debug!(%route, "no token stored, redirecting to login");
        GuardDecision::Redirect(Route::Login)
    }
}
