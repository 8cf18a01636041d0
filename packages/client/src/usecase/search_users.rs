//! UseCase: ユーザー検索画面
//!
//! `/users` を一度だけ取得し、氏名またはユーザー名の部分一致（大文字小文字を区別しない）で
//! 絞り込みます。閲覧者自身は結果に含めません。

use std::sync::Arc;

use crate::domain::{BaseUrl, User, UserGateway};

use super::view::AuthorView;

/// 検索結果の 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResult {
    pub author: AuthorView,
    pub username: String,
}

/// ユーザー検索画面の状態
pub struct SearchScreen {
    users: Arc<dyn UserGateway>,
    base_url: BaseUrl,
    all: Vec<User>,
    query: String,
}

impl SearchScreen {
    pub fn new(users: Arc<dyn UserGateway>, base_url: BaseUrl) -> Self {
        Self {
            users,
            base_url,
            all: Vec::new(),
            query: String::new(),
        }
    }

    pub async fn load(&mut self) {
        match self.users.list_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "users loaded");
                self.all = users;
            }
            Err(e) => tracing::error!("failed to load users: {}", e),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 絞り込み結果（閲覧者を除く）
    pub fn results(&self, viewer: Option<&User>) -> Vec<UserResult> {
        self.all
            .iter()
            .filter(|user| viewer.is_none_or(|viewer| user.id != viewer.id))
            .filter(|user| user.matches_query(&self.query))
            .map(|user| UserResult {
                author: AuthorView::new(Some(user), &self.base_url),
                username: user.username.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, entity::fixtures::user, gateway::MockUserGateway};

    fn screen_with(users: Vec<User>) -> SearchScreen {
        let mut gateway = MockUserGateway::new();
        gateway
            .expect_list_users()
            .times(1)
            .returning(move || Ok(users.clone()));
        SearchScreen::new(
            Arc::new(gateway),
            BaseUrl::new("http://localhost:8080").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_search_excludes_viewer() {
        // テスト項目: 検索結果に閲覧者自身は含まれない
        // given (前提条件):
        let viewer = user(5, "Budi Santoso");
        let mut screen = screen_with(vec![viewer.clone(), user(9, "Budi Hartono")]);
        screen.load().await;

        // when (操作):
        screen.set_query("budi");
        let results = screen.results(Some(&viewer));

        // then (期待する結果):
        let ids: Vec<UserId> = results.iter().map(|r| r.author.id).collect();
        assert_eq!(ids, vec![UserId::new(9)]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_on_name_or_username() {
        // テスト項目: 氏名またはユーザー名の部分一致で、大文字小文字を区別しない
        // given (前提条件):
        let mut sari = user(7, "Sari Dewi");
        sari.username = "sdewi".to_string();
        let mut screen = screen_with(vec![user(9, "Budi Hartono"), sari]);
        screen.load().await;

        // when (操作):
        screen.set_query("DEWI");
        let by_name = screen.results(None).len();
        screen.set_query("Hart");
        let by_fullname = screen.results(None);
        screen.set_query("");
        let all = screen.results(None).len();

        // then (期待する結果):
        assert_eq!(by_name, 1);
        assert_eq!(by_fullname[0].username, "budi_hartono");
        assert_eq!(all, 2);
    }
}
