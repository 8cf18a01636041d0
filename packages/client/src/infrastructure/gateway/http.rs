//! REST gateway over `reqwest`.
//!
//! Every request passes through [`HttpGateway::request`], which attaches the
//! bearer token from the token store when one is present. There is no retry,
//! timeout or backoff: failures surface as [`GatewayError`] at the call site.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Method, RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;

use crate::{
    domain::{
        Attachment, AuthGateway, AuthToken, BaseUrl, ChatGateway, Chatroom, ChatroomId, CommentId,
        Feed, FeedDraft, FeedGateway, FeedId, GatewayError, LoginCredentials, Message,
        MessageDraft, MessageId, NewChatroom, NewComment, PasswordChange, ProfileGateway,
        ProfileUpdate, Registration, TokenStore, User, UserGateway, UserId,
    },
    infrastructure::dto::http::{
        ChangePasswordRequest, ChatroomsResponse, CommentAuthorDto, CommentRequest,
        CreateChatroomRequest, ErrorBody, FeedsResponse, FollowersResponse, FollowingResponse,
        LoginRequest, LoginResponse, MessagesResponse, ProfileResponse, RegisterRequest,
        UpdateCommentRequest, UpdateFeedRequest, UsersResponse, into_models,
    },
};

/// HTTP client bound to one backend.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: BaseUrl,
    tokens: Arc<dyn TokenStore>,
}

impl HttpGateway {
    /// Create a gateway for `base_url`, reading the bearer token from `tokens`.
    pub fn new(base_url: BaseUrl, tokens: Arc<dyn TokenStore>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url, tokens))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: BaseUrl,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        let builder = self.client.request(method, self.base_url.endpoint(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request failed before a response: {}", e);
            GatewayError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are optional; anything unparsable counts as no message.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        tracing::warn!(
            "Request rejected with status {}: {}",
            status.as_u16(),
            message.as_deref().unwrap_or("<no error message>")
        );
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, GatewayError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), GatewayError> {
        self.send(builder).await.map(|_| ())
    }
}

/// File part carrying the attachment's MIME type when one is known.
fn file_part(attachment: Attachment) -> Result<Part, GatewayError> {
    let part = Part::bytes(attachment.content).file_name(attachment.file_name);
    match attachment.content_type {
        Some(content_type) => part.mime_str(&content_type).map_err(|e| {
            GatewayError::Transport(format!("invalid content type {content_type}: {e}"))
        }),
        None => Ok(part),
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthToken, GatewayError> {
        let body = LoginRequest {
            login: credentials.login,
            password: credentials.password.as_str().to_string(),
        };
        let response: LoginResponse = self
            .fetch(self.request(Method::POST, "/login").json(&body))
            .await?;
        AuthToken::new(response.token).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn register(&self, registration: Registration) -> Result<(), GatewayError> {
        let body = RegisterRequest {
            fullname: registration.fullname.as_str().to_string(),
            username: registration.username,
            email: registration.email.as_str().to_string(),
            password: registration.password.as_str().to_string(),
            jenis_kelamin: registration.gender.as_str().to_string(),
            tanggal_lahir: Some(registration.birth_date.to_string()),
        };
        self.execute(self.request(Method::POST, "/register").json(&body))
            .await
    }
}

#[async_trait]
impl ProfileGateway for HttpGateway {
    async fn fetch_profile(&self) -> Result<User, GatewayError> {
        let response: ProfileResponse = self.fetch(self.request(Method::GET, "/profile")).await?;
        Ok(User::from(response.user))
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<(), GatewayError> {
        let mut form = Form::new()
            .text("fullname", update.fullname.as_str().to_string())
            .text("username", update.username.as_str().to_string())
            .text("email", update.email.as_str().to_string());
        if let Some(gender) = update.gender {
            form = form.text("jenis_kelamin", gender.as_str());
        }
        if let Some(birth_date) = update.birth_date {
            form = form.text("tanggal_lahir", birth_date.to_string());
        }
        self.execute(self.request(Method::PUT, "/profile").multipart(form))
            .await
    }

    async fn update_avatar(&self, avatar: Attachment) -> Result<(), GatewayError> {
        let form = Form::new().part("photo_profile", file_part(avatar)?);
        self.execute(self.request(Method::PUT, "/profile").multipart(form))
            .await
    }

    async fn change_password(&self, change: PasswordChange) -> Result<(), GatewayError> {
        let body = ChangePasswordRequest {
            old_password: change.old_password.as_str().to_string(),
            new_password: change.new_password.as_str().to_string(),
        };
        self.execute(self.request(Method::PUT, "/profile/password").json(&body))
            .await
    }

    async fn deactivate(&self) -> Result<(), GatewayError> {
        self.execute(self.request(Method::DELETE, "/profile")).await
    }
}

#[async_trait]
impl UserGateway for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        let response: UsersResponse = self.fetch(self.request(Method::GET, "/users")).await?;
        Ok(into_models(response.users))
    }

    async fn list_following(&self) -> Result<Vec<User>, GatewayError> {
        let response: FollowingResponse =
            self.fetch(self.request(Method::GET, "/following")).await?;
        Ok(into_models(response.following))
    }

    async fn list_followers(&self) -> Result<Vec<User>, GatewayError> {
        let response: FollowersResponse =
            self.fetch(self.request(Method::GET, "/followers")).await?;
        Ok(into_models(response.followers))
    }

    async fn follow(&self, user_id: UserId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::POST, &format!("/follow/{user_id}")))
            .await
    }

    async fn unfollow(&self, user_id: UserId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::DELETE, &format!("/follow/{user_id}")))
            .await
    }
}

#[async_trait]
impl FeedGateway for HttpGateway {
    async fn list_feeds(&self) -> Result<Vec<Feed>, GatewayError> {
        let response: FeedsResponse = self.fetch(self.request(Method::GET, "/feeds")).await?;
        Ok(into_models(response.feeds))
    }

    async fn create_feed(&self, draft: FeedDraft) -> Result<(), GatewayError> {
        let mut form = Form::new().text("feed", draft.body);
        for file in draft.files {
            form = form.part("file", file_part(file)?);
        }
        self.execute(self.request(Method::POST, "/feeds").multipart(form))
            .await
    }

    async fn toggle_like(&self, feed_id: FeedId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::POST, &format!("/feeds/{feed_id}/like")))
            .await
    }

    async fn update_feed(&self, feed_id: FeedId, body: String) -> Result<(), GatewayError> {
        let body = UpdateFeedRequest { feed: body };
        self.execute(
            self.request(Method::PUT, &format!("/feeds/{feed_id}"))
                .json(&body),
        )
        .await
    }

    async fn delete_feed(&self, feed_id: FeedId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::DELETE, &format!("/feeds/{feed_id}")))
            .await
    }

    async fn add_comment(
        &self,
        feed_id: FeedId,
        comment: NewComment,
    ) -> Result<(), GatewayError> {
        let body = CommentRequest {
            comment: comment.body,
            user: comment.author.as_ref().map(CommentAuthorDto::from),
        };
        self.execute(
            self.request(Method::POST, &format!("/feeds/{feed_id}/comments"))
                .json(&body),
        )
        .await
    }

    async fn update_comment(
        &self,
        comment_id: CommentId,
        body: String,
    ) -> Result<(), GatewayError> {
        let body = UpdateCommentRequest { comment: body };
        self.execute(
            self.request(Method::PUT, &format!("/comments/{comment_id}"))
                .json(&body),
        )
        .await
    }

    async fn delete_comment(&self, comment_id: CommentId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::DELETE, &format!("/comments/{comment_id}")))
            .await
    }
}

#[async_trait]
impl ChatGateway for HttpGateway {
    async fn list_chatrooms(&self) -> Result<Vec<Chatroom>, GatewayError> {
        let response: ChatroomsResponse =
            self.fetch(self.request(Method::GET, "/chatrooms")).await?;
        Ok(into_models(response.chatrooms))
    }

    async fn create_chatroom(&self, chatroom: NewChatroom) -> Result<(), GatewayError> {
        let body = CreateChatroomRequest {
            is_group: chatroom.is_group,
            name: chatroom.name,
            user_ids: chatroom.member_ids.iter().map(UserId::value).collect(),
        };
        self.execute(self.request(Method::POST, "/chatrooms").json(&body))
            .await
    }

    async fn delete_chatroom(&self, chatroom_id: ChatroomId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::DELETE, &format!("/chatrooms/{chatroom_id}")))
            .await
    }

    async fn list_messages(&self, chatroom_id: ChatroomId) -> Result<Vec<Message>, GatewayError> {
        let response: MessagesResponse = self
            .fetch(self.request(Method::GET, &format!("/chatrooms/{chatroom_id}/messages")))
            .await?;
        Ok(into_models(response.messages))
    }

    async fn send_message(
        &self,
        chatroom_id: ChatroomId,
        draft: MessageDraft,
    ) -> Result<(), GatewayError> {
        let mut form = Form::new().text("message", draft.body);
        if let Some(file) = draft.attachment {
            form = form.part("file", file_part(file)?);
        }
        self.execute(
            self.request(Method::POST, &format!("/chatrooms/{chatroom_id}/messages"))
                .multipart(form),
        )
        .await
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), GatewayError> {
        self.execute(self.request(Method::DELETE, &format!("/messages/{message_id}")))
            .await
    }
}
