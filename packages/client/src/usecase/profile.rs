//! UseCase: プロフィール画面
//!
//! 自分のプロフィールの編集・アバター更新・パスワード変更・アカウント無効化と、
//! フォロー中/フォロワー一覧の表示を扱います。
//! プロフィールを変更した後は `Session::refresh` でセッションを更新します。

use std::sync::Arc;

use futures_util::future;

use crate::domain::{
    Attachment, BaseUrl, BirthDate, Email, Fullname, Gender, Password, PasswordChange,
    ProfileGateway, ProfileUpdate, TokenStore, User, UserGateway, Username,
};

use super::{
    error::{Action, ActionError, ActionResult, Notice},
    session::Session,
};

/// アバター未設定時の画像
pub const DEFAULT_AVATAR: &str = "public/default/user.png";

const CONFIRM_FIRST: &str = "Konfirmasi penonaktifan akun terlebih dahulu";

/// プロフィール編集フォーム（未検証の入力値）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub fullname: String,
    pub username: String,
    pub email: String,
    /// 空文字は未選択
    pub gender: String,
    /// `YYYY-MM-DD`、空文字は未入力
    pub birth_date: String,
}

impl ProfileForm {
    fn from_user(user: &User) -> Self {
        Self {
            fullname: user.fullname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            gender: user.gender.map(|g| g.to_string()).unwrap_or_default(),
            birth_date: user.birth_date.map(|d| d.to_string()).unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<ProfileUpdate, ActionError> {
        let gender = match self.gender.trim() {
            "" => None,
            value => Some(value.parse::<Gender>()?),
        };
        let birth_date = match self.birth_date.trim() {
            "" => None,
            value => Some(value.parse::<BirthDate>()?),
        };
        Ok(ProfileUpdate {
            fullname: Fullname::new(self.fullname.clone())?,
            username: Username::new(self.username.clone())?,
            email: Email::new(self.email.clone())?,
            gender,
            birth_date,
        })
    }
}

/// パスワード変更フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
}

/// アバターのプレビュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarPreview {
    /// サーバーに保存済みの画像 URL
    Remote(String),
    /// アップロード中のローカルファイル名
    Local(String),
}

/// アカウント無効化の確認状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Deactivation {
    #[default]
    Idle,
    Confirming,
}

/// プロフィール画面の状態
pub struct ProfileScreen {
    profile: Arc<dyn ProfileGateway>,
    users: Arc<dyn UserGateway>,
    tokens: Arc<dyn TokenStore>,
    base_url: BaseUrl,
    form: ProfileForm,
    password: PasswordForm,
    avatar: AvatarPreview,
    deactivation: Deactivation,
    following: Vec<User>,
    followers: Vec<User>,
}

impl ProfileScreen {
    pub fn new(
        profile: Arc<dyn ProfileGateway>,
        users: Arc<dyn UserGateway>,
        tokens: Arc<dyn TokenStore>,
        base_url: BaseUrl,
    ) -> Self {
        let avatar = AvatarPreview::Remote(base_url.file_url(DEFAULT_AVATAR));
        Self {
            profile,
            users,
            tokens,
            base_url,
            form: ProfileForm::default(),
            password: PasswordForm::default(),
            avatar,
            deactivation: Deactivation::Idle,
            following: Vec::new(),
            followers: Vec::new(),
        }
    }

    /// セッションのユーザーでフォームとアバターを初期化
    pub fn load(&mut self, session: &Session) {
        if let Some(user) = session.user() {
            self.form = ProfileForm::from_user(user);
        }
        self.avatar = AvatarPreview::Remote(self.avatar_url(session.user()));
    }

    /// フォロー中・フォロワー一覧を取得（それぞれ独立して失敗しうる）
    pub async fn load_connections(&mut self) {
        let (following, followers) =
            future::join(self.users.list_following(), self.users.list_followers()).await;
        match following {
            Ok(users) => self.following = users,
            Err(e) => tracing::error!("failed to load following: {}", e),
        }
        match followers {
            Ok(users) => self.followers = users,
            Err(e) => tracing::error!("failed to load followers: {}", e),
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    pub fn password_form(&self) -> &PasswordForm {
        &self.password
    }

    pub fn password_form_mut(&mut self) -> &mut PasswordForm {
        &mut self.password
    }

    pub fn avatar(&self) -> &AvatarPreview {
        &self.avatar
    }

    pub fn deactivation(&self) -> Deactivation {
        self.deactivation
    }

    pub fn following(&self) -> &[User] {
        &self.following
    }

    pub fn followers(&self) -> &[User] {
        &self.followers
    }

    /// プロフィールを更新し、セッションを再取得
    pub async fn update_profile(&mut self, session: &mut Session) -> ActionResult {
        let update = self.form.validate()?;
        self.profile
            .update_profile(update)
            .await
            .map_err(ActionError::gateway(Action::UpdateProfile))?;

        session.refresh().await;
        self.load(session);
        Ok(Notice::for_success(Action::UpdateProfile))
    }

    /// アバターを即時アップロード（アップロード中はローカルファイルをプレビュー）
    pub async fn update_avatar(
        &mut self,
        session: &mut Session,
        file: Attachment,
    ) -> ActionResult {
        self.avatar = AvatarPreview::Local(file.file_name.clone());
        let result = self.profile.update_avatar(file).await;
        if let Err(e) = result {
            self.avatar = AvatarPreview::Remote(self.avatar_url(session.user()));
            return Err(ActionError::gateway(Action::UpdateAvatar)(e));
        }

        session.refresh().await;
        self.load(session);
        Ok(Notice::for_success(Action::UpdateAvatar))
    }

    /// パスワードを変更（成功時はフォームをクリア）
    pub async fn change_password(&mut self) -> ActionResult {
        let change = PasswordChange {
            old_password: Password::existing(self.password.old_password.clone())?,
            new_password: Password::new(self.password.new_password.clone())?,
        };
        self.profile
            .change_password(change)
            .await
            .map_err(ActionError::gateway(Action::ChangePassword))?;

        self.password = PasswordForm::default();
        Ok(Notice::for_success(Action::ChangePassword))
    }

    /// アカウント無効化の確認を開始
    pub fn request_deactivation(&mut self) {
        self.deactivation = Deactivation::Confirming;
    }

    pub fn cancel_deactivation(&mut self) {
        self.deactivation = Deactivation::Idle;
    }

    /// アカウントを無効化し、保存済みトークンを削除してログアウト
    pub async fn confirm_deactivation(&mut self, session: &mut Session) -> ActionResult {
        if self.deactivation != Deactivation::Confirming {
            return Err(ActionError::Invalid(CONFIRM_FIRST));
        }
        self.deactivation = Deactivation::Idle;
        self.profile
            .deactivate()
            .await
            .map_err(ActionError::gateway(Action::DeactivateAccount))?;

        self.tokens
            .clear()
            .map_err(ActionError::storage(Action::DeactivateAccount))?;
        session.clear();
        tracing::info!("account deactivated");
        Ok(Notice::for_success(Action::DeactivateAccount))
    }

    fn avatar_url(&self, user: Option<&User>) -> String {
        let path = user
            .and_then(|user| user.photo_profile.as_ref())
            .map(|path| path.as_str())
            .unwrap_or(DEFAULT_AVATAR);
        self.base_url.file_url(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AttachmentPath, AuthToken, GatewayError, ValueObjectError,
        entity::fixtures::user,
        gateway::{MockProfileGateway, MockUserGateway},
    };
    use crate::infrastructure::InMemoryTokenStore;

    fn base_url() -> BaseUrl {
        BaseUrl::new("http://localhost:8080").unwrap()
    }

    fn budi() -> User {
        let mut budi = user(9, "Budi Santoso");
        budi.username = "budisan".to_string();
        budi.gender = Some(Gender::Man);
        budi.birth_date = "1995-04-12".parse().ok();
        budi
    }

    fn screen(profile: Arc<MockProfileGateway>, tokens: Arc<InMemoryTokenStore>) -> ProfileScreen {
        ProfileScreen::new(profile, Arc::new(MockUserGateway::new()), tokens, base_url())
    }

    #[tokio::test]
    async fn test_load_fills_form_and_default_avatar() {
        // テスト項目: セッションのユーザーでフォームが埋まり、アバター未設定時は既定画像になる
        // given (前提条件):
        let mut gateway = MockProfileGateway::new();
        gateway.expect_fetch_profile().returning(|| Ok(budi()));
        let gateway = Arc::new(gateway);
        let mut session = Session::new(gateway.clone());
        session.refresh().await;
        let mut screen = screen(gateway, Arc::new(InMemoryTokenStore::new()));

        // when (操作):
        screen.load(&session);

        // then (期待する結果):
        assert_eq!(screen.form().username, "budisan");
        assert_eq!(screen.form().gender, "Man");
        assert_eq!(screen.form().birth_date, "1995-04-12");
        assert_eq!(
            screen.avatar(),
            &AvatarPreview::Remote("http://localhost:8080/public/default/user.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_profile_validates_and_refreshes_session() {
        // テスト項目: 入力検証後にプロフィールを更新し、セッションを再取得する
        // given (前提条件):
        let mut gateway = MockProfileGateway::new();
        let mut calls = 0;
        gateway.expect_fetch_profile().times(2).returning(move || {
            calls += 1;
            let mut user = budi();
            if calls > 1 {
                user.fullname = "Budi S.".to_string();
            }
            Ok(user)
        });
        gateway
            .expect_update_profile()
            .withf(|u| u.fullname.as_str() == "Budi S." && u.gender == Some(Gender::Man))
            .times(1)
            .returning(|_| Ok(()));
        let gateway = Arc::new(gateway);
        let mut session = Session::new(gateway.clone());
        session.refresh().await;
        let mut screen = screen(gateway, Arc::new(InMemoryTokenStore::new()));
        screen.load(&session);

        // when (操作):
        screen.form_mut().fullname = "Budi S.".to_string();
        let notice = screen.update_profile(&mut session).await.unwrap();

        // then (期待する結果):
        assert_eq!(notice.map(|n| n.message), Some("Profile berhasil diperbarui".to_string()));
        assert_eq!(session.user().map(|u| u.fullname.as_str()), Some("Budi S."));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_invalid_fields() {
        // テスト項目: 不正な入力はリクエスト前に拒否される
        // given (前提条件):
        let mut gateway = MockProfileGateway::new();
        gateway.expect_update_profile().never();
        let mut session = Session::new(Arc::new(MockProfileGateway::new()));
        let mut screen = screen(Arc::new(gateway), Arc::new(InMemoryTokenStore::new()));
        *screen.form_mut() = ProfileForm {
            fullname: "Budi".to_string(),
            username: "bud".to_string(),
            email: "budi@example.com".to_string(),
            ..ProfileForm::default()
        };

        // when (操作):
        let short_username = screen.update_profile(&mut session).await;
        screen.form_mut().username = "budisan".to_string();
        screen.form_mut().email = "budi.example.com".to_string();
        let bad_email = screen.update_profile(&mut session).await;

        // then (期待する結果):
        assert_eq!(
            short_username,
            Err(ActionError::Validation(ValueObjectError::UsernameLength {
                min: 5,
                max: 50,
                actual: 3
            }))
        );
        assert_eq!(bad_email.unwrap_err().notice().message, "Masukkan email valid!");
    }

    #[tokio::test]
    async fn test_update_avatar_previews_local_file_until_refresh() {
        // テスト項目: アバター更新の失敗時はサーバー上の画像のプレビューに戻る
        // given (前提条件):
        let mut gateway = MockProfileGateway::new();
        gateway.expect_update_avatar().returning(|_| {
            Err(GatewayError::Rejected {
                status: 413,
                message: Some("File terlalu besar".to_string()),
            })
        });
        let mut session = Session::new(Arc::new(MockProfileGateway::new()));
        let mut screen = screen(Arc::new(gateway), Arc::new(InMemoryTokenStore::new()));

        // when (操作):
        let error = screen
            .update_avatar(&mut session, Attachment::new("me.png", vec![1]))
            .await
            .unwrap_err();

        // then (期待する結果):
        assert_eq!(error.notice().message, "File terlalu besar");
        assert!(matches!(screen.avatar(), AvatarPreview::Remote(_)));
    }

    #[tokio::test]
    async fn test_update_avatar_success_uses_new_photo() {
        // テスト項目: アバター更新成功後はセッションの新しい画像をプレビューする
        let mut gateway = MockProfileGateway::new();
        gateway
            .expect_update_avatar()
            .withf(|file| file.file_name == "me.png")
            .times(1)
            .returning(|_| Ok(()));
        gateway.expect_fetch_profile().returning(|| {
            let mut user = budi();
            user.photo_profile = AttachmentPath::new("public/uploads/me.png");
            Ok(user)
        });
        let gateway = Arc::new(gateway);
        let mut session = Session::new(gateway.clone());
        let mut screen = screen(gateway, Arc::new(InMemoryTokenStore::new()));

        let notice = screen
            .update_avatar(&mut session, Attachment::new("me.png", vec![1]))
            .await
            .unwrap();

        assert_eq!(notice.map(|n| n.message), Some("Foto profil berhasil diperbarui".to_string()));
        assert_eq!(
            screen.avatar(),
            &AvatarPreview::Remote("http://localhost:8080/public/uploads/me.png".to_string())
        );
    }

    #[tokio::test]
    async fn test_change_password() {
        // テスト項目: 新しいパスワードは 6 文字以上、成功後にフォームがクリアされる
        // given (前提条件):
        let mut gateway = MockProfileGateway::new();
        gateway
            .expect_change_password()
            .withf(|c| c.old_password.as_str() == "lama" && c.new_password.as_str() == "barubaru")
            .times(1)
            .returning(|_| Ok(()));
        let mut screen = screen(Arc::new(gateway), Arc::new(InMemoryTokenStore::new()));
        *screen.password_form_mut() = PasswordForm {
            old_password: "lama".to_string(),
            new_password: "baru".to_string(),
        };

        // when (操作):
        let too_short = screen.change_password().await;
        screen.password_form_mut().new_password = "barubaru".to_string();
        let changed = screen.change_password().await;

        // then (期待する結果):
        assert!(matches!(
            too_short,
            Err(ActionError::Validation(ValueObjectError::PasswordTooShort { .. }))
        ));
        assert_eq!(changed.unwrap().map(|n| n.message), Some("Password berhasil diubah".to_string()));
        assert_eq!(screen.password_form(), &PasswordForm::default());
    }

    #[tokio::test]
    async fn test_deactivation_requires_confirmation_and_signs_out() {
        // テスト項目: 確認後にのみアカウントを無効化し、トークンを削除する
        // given (前提条件):
        let mut gateway = MockProfileGateway::new();
        gateway.expect_deactivate().times(1).returning(|| Ok(()));
        gateway.expect_fetch_profile().returning(|| Ok(budi()));
        let gateway = Arc::new(gateway);
        let tokens = Arc::new(InMemoryTokenStore::with_token(
            AuthToken::new("jwt".to_string()).unwrap(),
        ));
        let mut session = Session::new(gateway.clone());
        session.refresh().await;
        let mut screen = screen(gateway, tokens.clone());

        // when (操作):
        let unconfirmed = screen.confirm_deactivation(&mut session).await;
        screen.request_deactivation();
        screen.cancel_deactivation();
        assert_eq!(screen.deactivation(), Deactivation::Idle);
        screen.request_deactivation();
        let confirmed = screen.confirm_deactivation(&mut session).await;

        // then (期待する結果):
        assert!(matches!(unconfirmed, Err(ActionError::Invalid(_))));
        assert_eq!(confirmed.unwrap().map(|n| n.message), Some("Akun berhasil dinonaktifkan".to_string()));
        assert!(tokens.load().is_none());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_load_connections_fail_independently() {
        // テスト項目: フォロワー取得に失敗してもフォロー中一覧は表示される
        let mut users = MockUserGateway::new();
        users
            .expect_list_following()
            .returning(|| Ok(vec![user(7, "Andi")]));
        users
            .expect_list_followers()
            .returning(|| Err(GatewayError::Transport("timeout".to_string())));
        let mut screen = ProfileScreen::new(
            Arc::new(MockProfileGateway::new()),
            Arc::new(users),
            Arc::new(InMemoryTokenStore::new()),
            base_url(),
        );

        screen.load_connections().await;

        assert_eq!(screen.following().len(), 1);
        assert!(screen.followers().is_empty());
    }
}
