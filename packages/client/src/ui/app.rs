//! Application shell: the current route, the screens and the toast surface.
//!
//! Commands are dispatched to the screen that owns the state they touch.
//! Every action outcome ends up as a toast.

use std::sync::Arc;

use crate::{
    domain::{
        AuthGateway, BaseUrl, ChatGateway, FeedGateway, ProfileGateway, TokenStore, User,
        UserGateway,
    },
    infrastructure::load_attachment,
    usecase::{
        Action, ActionResult, AuthUseCase, ChatLayout, ChatPane, ChatScreen, FeedScreen, Notice,
        ProfileScreen, Route, SearchScreen, Session, UserDetailScreen, guard,
        navigation::{self, MenuTarget},
    },
};

use super::{
    command::{Command, ProfileField},
    render,
    toast::Toaster,
};

const LOGIN_USAGE: &str = "login <email or username> | <password>";
const REGISTER_USAGE: &str =
    "register <fullname> | <username> | <email> | <password> | <Man|Woman> | <YYYY-MM-DD>";

/// Whether the REPL keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    tokens: Arc<dyn TokenStore>,
    profiles: Arc<dyn ProfileGateway>,
    users: Arc<dyn UserGateway>,
    feeds: Arc<dyn FeedGateway>,
    chats: Arc<dyn ChatGateway>,
    base_url: BaseUrl,
    width: u16,
    route: Route,
    session: Session,
    auth: AuthUseCase,
    feed: FeedScreen,
    chat: ChatScreen,
    profile: ProfileScreen,
    search: SearchScreen,
    detail: Option<UserDetailScreen>,
    toaster: Toaster,
}

impl App {
    pub fn new<G>(
        gateway: Arc<G>,
        tokens: Arc<dyn TokenStore>,
        base_url: BaseUrl,
        width: u16,
    ) -> Self
    where
        G: AuthGateway + ProfileGateway + UserGateway + FeedGateway + ChatGateway + 'static,
    {
        let auth: Arc<dyn AuthGateway> = gateway.clone();
        let profile: Arc<dyn ProfileGateway> = gateway.clone();
        let users: Arc<dyn UserGateway> = gateway.clone();
        let feeds: Arc<dyn FeedGateway> = gateway.clone();
        let chats: Arc<dyn ChatGateway> = gateway;

        Self {
            session: Session::new(profile.clone()),
            auth: AuthUseCase::new(auth, tokens.clone()),
            feed: FeedScreen::new(feeds.clone(), base_url.clone()),
            chat: ChatScreen::new(chats.clone(), users.clone(), base_url.clone(), width),
            profile: ProfileScreen::new(
                profile.clone(),
                users.clone(),
                tokens.clone(),
                base_url.clone(),
            ),
            search: SearchScreen::new(users.clone(), base_url.clone()),
            detail: None,
            toaster: Toaster::new(),
            route: Route::Login,
            tokens,
            profiles: profile,
            users,
            feeds,
            chats,
            base_url,
            width,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn feed(&self) -> &FeedScreen {
        &self.feed
    }

    pub fn chat(&self) -> &ChatScreen {
        &self.chat
    }

    pub fn toaster(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    fn layout(&self) -> ChatLayout {
        ChatLayout::from_width(self.width)
    }

    fn signed_in(&self) -> bool {
        self.auth.is_signed_in()
    }

    fn viewer(&self) -> Option<User> {
        self.session.user().cloned()
    }

    /// Open the initial screen.
    pub async fn start(&mut self) {
        self.navigate(Route::Feeds).await;
    }

    /// Apply the route guard and load the destination screen.
    pub async fn navigate(&mut self, route: Route) {
        let decision = guard(route, self.tokens.as_ref());
        self.route = decision.route();
        tracing::debug!(route = %self.route, "navigated");

        if self.signed_in() && self.session.user().is_none() {
            self.session.refresh().await;
        }

        match self.route {
            Route::Login | Route::Register => {}
            Route::Feeds => self.feed.load().await,
            Route::Chat => {
                self.chat.load_rooms().await;
                self.chat.load_messages().await;
            }
            Route::Search => self.search.load().await,
            Route::Profile => {
                self.profile.load(&self.session);
                self.profile.load_connections().await;
            }
            Route::UserDetail(user_id) => {
                let mut detail =
                    UserDetailScreen::new(self.users.clone(), self.feeds.clone(), user_id);
                detail.load().await;
                self.detail = Some(detail);
            }
        }
    }

    /// Drop everything loaded for the previous account.
    fn reset_screens(&mut self) {
        self.feed = FeedScreen::new(self.feeds.clone(), self.base_url.clone());
        self.chat = ChatScreen::new(
            self.chats.clone(),
            self.users.clone(),
            self.base_url.clone(),
            self.width,
        );
        self.profile = ProfileScreen::new(
            self.profiles.clone(),
            self.users.clone(),
            self.tokens.clone(),
            self.base_url.clone(),
        );
        self.search = SearchScreen::new(self.users.clone(), self.base_url.clone());
        self.detail = None;
    }

    async fn logout(&mut self) {
        let result = self.auth.logout().map(|_| Notice::for_success(Action::Logout));
        self.session.clear();
        self.reset_screens();
        self.notify(result);
        self.navigate(Route::Login).await;
    }

    /// Menu keys first, then route paths such as `/users/7`.
    async fn go(&mut self, target: &str) {
        match navigation::find(self.signed_in(), target).map(|item| item.target) {
            Some(MenuTarget::Logout) => self.logout().await,
            Some(MenuTarget::Navigate(route)) => self.navigate(route).await,
            None if target.starts_with('/') => self.navigate(Route::parse(target)).await,
            None => self.navigate(Route::parse(&format!("/{target}"))).await,
        }
    }

    fn notify(&mut self, result: ActionResult) {
        match result {
            Ok(Some(notice)) => {
                self.toaster.show(notice);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("action failed: {}", e);
                self.toaster.show(e.notice());
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> Flow {
        let viewer = self.viewer();
        let viewer = viewer.as_ref();

        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => {}
            Command::Refresh => self.navigate(self.route).await,
            Command::Logout => self.logout().await,
            Command::Width(width) => {
                self.width = width;
                self.chat.resize(width);
            }
            Command::Go(target) => self.go(&target).await,
            Command::Login { login, password } => {
                let result = self.auth.login(&login, &password).await;
                let succeeded = result.is_ok();
                self.notify(result);
                if succeeded {
                    self.session.refresh().await;
                    self.navigate(Route::Feeds).await;
                }
            }
            Command::Register(form) => {
                let result = self.auth.register(&form).await;
                let succeeded = result.is_ok();
                self.notify(result);
                if succeeded {
                    self.navigate(Route::Login).await;
                }
            }
            Command::Post(body) => {
                self.feed.set_composer_body(body);
                let result = self.feed.create_feed().await;
                self.notify(result);
            }
            Command::Attach(path) => match load_attachment(&path).await {
                Ok(file) if self.route == Route::Chat => self.chat.attach(file),
                Ok(file) => self.feed.attach(file),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to read attachment: {}", e);
                    self.toaster
                        .show(Notice::danger(format!("Cannot read {}: {e}", path.display())));
                }
            },
            Command::Detach(index) => {
                if self.route == Route::Chat {
                    self.chat.detach();
                } else {
                    self.feed.detach(index.unwrap_or(0));
                }
            }
            Command::Like(feed_id) => {
                let result = self.feed.toggle_like(feed_id).await;
                self.notify(result);
            }
            Command::Expand(feed_id) => self.feed.toggle_expanded(feed_id),
            Command::EditFeed { feed_id, body } => {
                let result = match self.feed.start_edit_feed(viewer, feed_id) {
                    Ok(()) => {
                        self.feed.set_edit_feed_body(body);
                        self.feed.save_feed_edit(viewer).await
                    }
                    Err(e) => Err(e),
                };
                if result.is_err() {
                    self.feed.cancel_edit_feed();
                }
                self.notify(result);
            }
            Command::DeleteFeed(feed_id) => {
                let result = self.feed.delete_feed(viewer, feed_id).await;
                self.notify(result);
            }
            Command::Comment { feed_id, body } => {
                self.feed.set_comment_draft(feed_id, body);
                let result = self.feed.add_comment(viewer, feed_id).await;
                self.notify(result);
            }
            Command::EditComment { comment_id, body } => {
                let result = match self.feed.start_edit_comment(viewer, comment_id) {
                    Ok(()) => {
                        self.feed.set_comment_edit(comment_id, body);
                        self.feed.save_comment_edit(viewer, comment_id).await
                    }
                    Err(e) => Err(e),
                };
                if result.is_err() {
                    self.feed.cancel_edit_comment(comment_id);
                }
                self.notify(result);
            }
            Command::DeleteComment(comment_id) => {
                let result = self.feed.delete_comment(viewer, comment_id).await;
                self.notify(result);
            }
            Command::OpenRoom(chatroom_id) => {
                if self.route != Route::Chat {
                    self.navigate(Route::Chat).await;
                }
                self.chat.select_room(chatroom_id).await;
            }
            Command::Back => self.chat.back(),
            Command::Send(body) => {
                self.chat.set_message_body(body);
                let result = self.chat.send_message().await;
                self.notify(result);
            }
            Command::DeleteMessage(message_id) => {
                let result = self.chat.delete_message(viewer, message_id).await;
                self.notify(result);
            }
            Command::DeleteRoom(chatroom_id) => {
                let result = self.chat.delete_room(viewer, chatroom_id).await;
                self.notify(result);
            }
            Command::NewChat => self.chat.open_new_chat(viewer).await,
            Command::ToggleRecipient(user_id) => self.chat.toggle_recipient(viewer, user_id),
            Command::GroupName(name) => self.chat.set_group_name(name),
            Command::CreateChat => {
                let result = self.chat.create_chatroom().await;
                self.notify(result);
            }
            Command::CancelChat => self.chat.close_new_chat(),
            Command::Search(query) => {
                self.search.set_query(query);
                if self.route != Route::Search {
                    self.navigate(Route::Search).await;
                }
            }
            Command::ViewUser(user_id) => self.navigate(Route::UserDetail(user_id)).await,
            Command::Follow => match self.detail.as_mut() {
                Some(detail) if self.route == Route::UserDetail(detail.target_id()) => {
                    let result = detail.toggle_follow().await;
                    self.notify(result);
                }
                _ => {
                    self.toaster
                        .show(Notice::warning("Open a user with `user <id>` first"));
                }
            },
            Command::SetProfile { field, value } => {
                let form = self.profile.form_mut();
                match field {
                    ProfileField::Fullname => form.fullname = value,
                    ProfileField::Username => form.username = value,
                    ProfileField::Email => form.email = value,
                    ProfileField::Gender => form.gender = value,
                    ProfileField::BirthDate => form.birth_date = value,
                }
            }
            Command::SaveProfile => {
                let result = self.profile.update_profile(&mut self.session).await;
                self.notify(result);
            }
            Command::Avatar(path) => match load_attachment(&path).await {
                Ok(file) => {
                    let result = self.profile.update_avatar(&mut self.session, file).await;
                    self.notify(result);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to read avatar: {}", e);
                    self.toaster
                        .show(Notice::danger(format!("Cannot read {}: {e}", path.display())));
                }
            },
            Command::ChangePassword { old, new } => {
                let form = self.profile.password_form_mut();
                form.old_password = old;
                form.new_password = new;
                let result = self.profile.change_password().await;
                self.notify(result);
            }
            Command::Deactivate => self.profile.request_deactivation(),
            Command::Confirm => {
                let result = self.profile.confirm_deactivation(&mut self.session).await;
                let succeeded = result.is_ok();
                self.notify(result);
                if succeeded {
                    self.reset_screens();
                    self.navigate(Route::Login).await;
                }
            }
            Command::Cancel => self.profile.cancel_deactivation(),
        }
        Flow::Continue
    }

    /// Menu, current screen and the active toast.
    pub fn render(&mut self) -> String {
        let layout = self.layout();
        let viewer = self.viewer();
        let viewer = viewer.as_ref();
        let menu = render::menu(&navigation::menu(self.signed_in()), layout);

        let screen = match self.route {
            Route::Login => format!("Sign in: {LOGIN_USAGE}"),
            Route::Register => format!("Create an account: {REGISTER_USAGE}"),
            Route::Feeds => {
                let mut parts = vec![render::feed_cards(&self.feed.cards(viewer))];
                parts.extend(render::feed_composer(self.feed.composer()));
                parts.join("\n\n")
            }
            Route::Chat => self.render_chat(viewer),
            Route::Search => render::search_results(
                self.search.query(),
                &self.search.results(viewer),
            ),
            Route::Profile => render::profile(
                self.profile.form(),
                self.profile.avatar(),
                self.profile.deactivation(),
                self.profile.following(),
                self.profile.followers(),
            ),
            Route::UserDetail(_) => match &self.detail {
                Some(detail) => {
                    render::user_detail(detail.target(), detail.is_following(), detail.posts())
                }
                None => "User not found.".to_string(),
            },
        };

        let mut sections = match layout {
            ChatLayout::Desktop => vec![menu, screen],
            ChatLayout::Mobile => vec![screen, menu],
        };
        if let Some(toast) = self.toaster.visible() {
            sections.push(render::toast(toast));
        }
        sections.join("\n\n")
    }

    fn render_chat(&mut self, viewer: Option<&User>) -> String {
        let scroll = self.chat.take_scroll_request();
        let mut parts: Vec<String> = self
            .chat
            .panes()
            .into_iter()
            .map(|pane| match pane {
                ChatPane::Rooms => render::rooms(&self.chat.rooms(viewer)),
                ChatPane::Thread => render::thread(
                    self.chat.selected().map(|room| room.title()),
                    &self.chat.messages(viewer),
                    self.chat.composer(),
                    scroll,
                ),
            })
            .collect();
        if let Some(form) = self.chat.new_chat() {
            parts.push(render::new_chat_form(form));
        }
        parts.join("\n\n")
    }
}
