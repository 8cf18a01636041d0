//! UseCase: ユーザー詳細画面
//!
//! 対象ユーザー（`/users` から解決）、その投稿（`/feeds` から絞り込み）、
//! フォロー状態（`/following` から導出）の 3 つを並行して取得します。
//! それぞれの取得は独立して失敗します。

use std::sync::Arc;

use futures_util::future;

use crate::domain::{Feed, FeedGateway, User, UserGateway, UserId};

use super::error::{Action, ActionError, ActionResult, Notice};

/// ユーザー詳細画面の状態
pub struct UserDetailScreen {
    users: Arc<dyn UserGateway>,
    feeds: Arc<dyn FeedGateway>,
    target_id: UserId,
    target: Option<User>,
    posts: Vec<Feed>,
    following: bool,
}

impl UserDetailScreen {
    pub fn new(
        users: Arc<dyn UserGateway>,
        feeds: Arc<dyn FeedGateway>,
        target_id: UserId,
    ) -> Self {
        Self {
            users,
            feeds,
            target_id,
            target: None,
            posts: Vec::new(),
            following: false,
        }
    }

    pub fn target_id(&self) -> UserId {
        self.target_id
    }

    pub fn target(&self) -> Option<&User> {
        self.target.as_ref()
    }

    pub fn posts(&self) -> &[Feed] {
        &self.posts
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub async fn load(&mut self) {
        let (users, feeds, following) = future::join3(
            self.users.list_users(),
            self.feeds.list_feeds(),
            self.users.list_following(),
        )
        .await;

        match users {
            Ok(users) => {
                self.target = users.into_iter().find(|user| user.id == self.target_id);
                if self.target.is_none() {
                    tracing::warn!(user_id = %self.target_id, "user not found");
                }
            }
            Err(e) => tracing::error!("failed to load users: {}", e),
        }
        match feeds {
            Ok(feeds) => {
                let target_id = self.target_id;
                self.posts = feeds
                    .into_iter()
                    .filter(|feed| feed.author_id == target_id || feed.is_owned_by(target_id))
                    .collect();
            }
            Err(e) => tracing::error!("failed to load feeds: {}", e),
        }
        match following {
            Ok(users) => self.following = users.iter().any(|user| user.id == self.target_id),
            Err(e) => tracing::error!("failed to load following: {}", e),
        }
    }

    pub async fn follow(&mut self) -> ActionResult {
        self.users
            .follow(self.target_id)
            .await
            .map_err(ActionError::gateway(Action::Follow))?;
        self.following = true;
        Ok(Notice::for_success(Action::Follow))
    }

    pub async fn unfollow(&mut self) -> ActionResult {
        self.users
            .unfollow(self.target_id)
            .await
            .map_err(ActionError::gateway(Action::Unfollow))?;
        self.following = false;
        Ok(Notice::for_success(Action::Unfollow))
    }

    /// フォロー状態に応じてフォロー/フォロー解除
    pub async fn toggle_follow(&mut self) -> ActionResult {
        if self.following {
            self.unfollow().await
        } else {
            self.follow().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        FeedId, GatewayError,
        entity::fixtures::{feed, user},
        gateway::{MockFeedGateway, MockUserGateway},
    };

    #[tokio::test]
    async fn test_load_resolves_target_posts_and_follow_state() {
        // テスト項目: 対象ユーザー・その投稿・フォロー状態が取得される
        // given (前提条件):
        let budi = user(9, "Budi");
        let sari = user(5, "Sari");
        let posts = vec![feed(1, "dari budi", &budi), feed(2, "dari sari", &sari)];
        let mut users = MockUserGateway::new();
        let all = vec![budi.clone(), sari.clone()];
        users.expect_list_users().returning(move || Ok(all.clone()));
        users
            .expect_list_following()
            .returning(move || Ok(vec![budi.clone()]));
        let mut feeds = MockFeedGateway::new();
        feeds.expect_list_feeds().returning(move || Ok(posts.clone()));
        let mut screen = UserDetailScreen::new(Arc::new(users), Arc::new(feeds), UserId::new(9));

        // when (操作):
        screen.load().await;

        // then (期待する結果):
        assert_eq!(screen.target().map(|u| u.fullname.as_str()), Some("Budi"));
        let ids: Vec<FeedId> = screen.posts().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![FeedId::new(1)]);
        assert!(screen.is_following());
    }

    #[tokio::test]
    async fn test_loads_fail_independently() {
        // テスト項目: 投稿の取得に失敗しても対象ユーザーとフォロー状態は表示される
        let budi = user(9, "Budi");
        let mut users = MockUserGateway::new();
        users
            .expect_list_users()
            .returning(move || Ok(vec![budi.clone()]));
        users.expect_list_following().returning(|| Ok(Vec::new()));
        let mut feeds = MockFeedGateway::new();
        feeds
            .expect_list_feeds()
            .returning(|| Err(GatewayError::Transport("refused".to_string())));
        let mut screen = UserDetailScreen::new(Arc::new(users), Arc::new(feeds), UserId::new(9));

        screen.load().await;

        assert!(screen.target().is_some());
        assert!(screen.posts().is_empty());
        assert!(!screen.is_following());
    }

    #[tokio::test]
    async fn test_toggle_follow() {
        // テスト項目: フォロー状態に応じて POST/DELETE が切り替わる
        // given (前提条件):
        let mut users = MockUserGateway::new();
        users
            .expect_follow()
            .withf(|id| *id == UserId::new(9))
            .times(1)
            .returning(|_| Ok(()));
        users
            .expect_unfollow()
            .withf(|id| *id == UserId::new(9))
            .times(1)
            .returning(|_| {
                Err(GatewayError::Rejected {
                    status: 500,
                    message: None,
                })
            });
        let mut screen =
            UserDetailScreen::new(Arc::new(users), Arc::new(MockFeedGateway::new()), UserId::new(9));

        // when (操作):
        let followed = screen.toggle_follow().await;
        let unfollowed = screen.toggle_follow().await;

        // then (期待する結果):
        assert_eq!(followed.unwrap().map(|n| n.message), Some("Berhasil mengikuti user".to_string()));
        assert_eq!(unfollowed.unwrap_err().notice().message, "Gagal berhenti mengikuti user");
        assert!(screen.is_following());
    }
}
