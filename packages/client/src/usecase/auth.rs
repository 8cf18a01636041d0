//! UseCase: 認証（ログイン・ユーザー登録・ログアウト）
//!
//! ログイン成功時に受け取ったトークンは `TokenStore` に保存され、
//! 以降のリクエストに Bearer トークンとして付与されます。

use std::sync::Arc;

use crate::domain::{
    AuthGateway, BirthDate, Email, Fullname, Gender, LoginCredentials, Password, Registration,
    TokenStore, ValueObjectError,
};

use super::error::{Action, ActionError, ActionResult, Notice};

/// 登録フォームの入力値（未検証）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub birth_date: String,
}

impl RegisterForm {
    fn validate(&self) -> Result<Registration, ValueObjectError> {
        let fullname = Fullname::new(self.fullname.clone())?;
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        Ok(Registration {
            fullname,
            username: username.to_string(),
            email: Email::new(self.email.clone())?,
            password: Password::new(self.password.clone())?,
            gender: self.gender.parse::<Gender>()?,
            birth_date: self.birth_date.parse::<BirthDate>()?,
        })
    }
}

/// 認証のユースケース
pub struct AuthUseCase {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { gateway, tokens }
    }

    /// ログインを実行し、トークンを保存
    ///
    /// * `login` - メールアドレスまたはユーザー名
    pub async fn login(&self, login: &str, password: &str) -> ActionResult {
        let login = login.trim();
        if login.is_empty() {
            return Err(ActionError::Invalid("Masukkan email atau username!"));
        }
        let credentials = LoginCredentials {
            login: login.to_string(),
            password: Password::existing(password.to_string())?,
        };

        let token = self
            .gateway
            .login(credentials)
            .await
            .map_err(ActionError::gateway(Action::Login))?;
        self.tokens
            .save(&token)
            .map_err(ActionError::storage(Action::Login))?;

        tracing::info!(login = %login, "logged in");
        Ok(Notice::for_success(Action::Login))
    }

    /// ユーザー登録を実行（ログインは行わない）
    pub async fn register(&self, form: &RegisterForm) -> ActionResult {
        let registration = form.validate()?;
        self.gateway
            .register(registration)
            .await
            .map_err(ActionError::gateway(Action::Register))?;

        tracing::info!(username = %form.username.trim(), "registered");
        Ok(Notice::for_success(Action::Register))
    }

    /// ログアウト（保存済みトークンを削除）
    pub fn logout(&self) -> Result<(), ActionError> {
        self.tokens
            .clear()
            .map_err(ActionError::storage(Action::Logout))
    }

    pub fn is_signed_in(&self) -> bool {
        self.tokens.load().is_some()
    }
}
