//! UseCase: ナビゲーションメニュー
//!
//! メニュー項目は遷移先を型で持ちます。表示内容から遷移先を推測することはありません。

use super::route_guard::Route;

/// メニュー項目の動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Navigate(Route),
    Logout,
}

/// メニュー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
    /// モバイルのボトムタブに表示するアイコン
    pub icon: &'static str,
    pub target: MenuTarget,
}

impl MenuItem {
    const fn new(key: &'static str, label: &'static str, icon: &'static str, target: MenuTarget) -> Self {
        Self {
            key,
            label,
            icon,
            target,
        }
    }
}

/// ログイン状態に応じたメニュー
pub fn menu(signed_in: bool) -> Vec<MenuItem> {
    if signed_in {
        vec![
            MenuItem::new("feeds", "Feeds", "[#]", MenuTarget::Navigate(Route::Feeds)),
            MenuItem::new("chat", "Chat", "[@]", MenuTarget::Navigate(Route::Chat)),
            MenuItem::new("search", "Search", "[?]", MenuTarget::Navigate(Route::Search)),
            MenuItem::new("profile", "Profile", "[~]", MenuTarget::Navigate(Route::Profile)),
            MenuItem::new("logout", "Logout", "[x]", MenuTarget::Logout),
        ]
    } else {
        vec![
            MenuItem::new("login", "Login", "[>]", MenuTarget::Navigate(Route::Login)),
            MenuItem::new("register", "Register", "[+]", MenuTarget::Navigate(Route::Register)),
        ]
    }
}

/// キーからメニュー項目を検索
pub fn find(signed_in: bool, key: &str) -> Option<MenuItem> {
    menu(signed_in)
        .into_iter()
        .find(|item| item.key.eq_ignore_ascii_case(key.trim()))
}
