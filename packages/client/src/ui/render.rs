//! Plain-text rendering of screen view models.

use crate::{
    domain::{Feed, MediaKind, MediaLayout, MediaPreview, User},
    usecase::{
        AuthorView, ChatLayout, MenuItem, NoticeLevel,
        chat::{MessageComposer, MessageView, NewChatForm, RoomView},
        feed::{FeedCard, FeedComposer},
        profile::{AvatarPreview, Deactivation, ProfileForm},
        search_users::UserResult,
    },
};

use super::toast::Toast;

pub fn toast(toast: &Toast) -> String {
    let tag = match toast.notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Danger => "error",
    };
    format!("[{tag}] {}", toast.notice.message)
}

/// Desktop: a labelled bar. Mobile: icon-only bottom tabs.
pub fn menu(items: &[MenuItem], layout: ChatLayout) -> String {
    let entries: Vec<String> = match layout {
        ChatLayout::Desktop => items
            .iter()
            .map(|item| format!("{} ({})", item.label, item.key))
            .collect(),
        ChatLayout::Mobile => items.iter().map(|item| item.icon.to_string()).collect(),
    };
    entries.join(" | ")
}

pub fn media(preview: &MediaPreview) -> String {
    match preview.kind {
        MediaKind::Generic => format!("[download] {} <{}>", preview.label, preview.source),
        kind => format!("[{}] {}", kind.as_str(), preview.source),
    }
}

fn media_lines(layout: &MediaLayout, indent: &str) -> Vec<String> {
    let previews = layout.previews();
    let carousel = matches!(layout, MediaLayout::Carousel(_));
    previews
        .iter()
        .enumerate()
        .map(|(index, preview)| {
            if carousel {
                format!("{indent}{}/{} {}", index + 1, previews.len(), media(preview))
            } else {
                format!("{indent}{}", media(preview))
            }
        })
        .collect()
}

fn author(author: &AuthorView) -> String {
    format!("({}) {}", author.initials, author.name)
}

pub fn feed_cards(cards: &[FeedCard]) -> String {
    if cards.is_empty() {
        return "No feeds yet.".to_string();
    }
    let mut lines = Vec::new();
    for card in cards {
        let mut header = format!("#{} {}", card.id, author(&card.author));
        if let Some(created_at) = &card.created_at {
            header.push_str(&format!("  {created_at}"));
        }
        if card.can_manage {
            header.push_str("  [Edit] [Hapus]");
        }
        lines.push(header);

        match &card.editing {
            Some(draft) => lines.push(format!("  (editing) {draft}")),
            None => lines.push(format!("  {}", card.body)),
        }
        if card.expandable {
            let toggle = if card.expanded { "show less" } else { "show more" };
            lines.push(format!("  [{toggle}: expand {}]", card.id));
        }
        lines.extend(media_lines(&card.media, "  "));

        let heart = if card.liked { "♥" } else { "♡" };
        lines.push(format!(
            "  {heart} {}  💬 {}",
            card.like_count,
            card.comments.len()
        ));
        for comment in &card.comments {
            let mut line = format!("    c{} {}: ", comment.id, author(&comment.author));
            match &comment.editing {
                Some(draft) => line.push_str(&format!("(editing) {draft}")),
                None => line.push_str(&comment.body),
            }
            if comment.can_manage {
                line.push_str("  [Edit] [Hapus]");
            }
            lines.push(line);
        }
        if !card.comment_draft.is_empty() {
            lines.push(format!("    > {}", card.comment_draft));
        }
    }
    lines.join("\n")
}

pub fn feed_composer(composer: &FeedComposer) -> Option<String> {
    if composer.files.is_empty() {
        return None;
    }
    let mut lines = vec!["Selected files:".to_string()];
    lines.extend(media_lines(&composer.previews(), "  "));
    Some(lines.join("\n"))
}

pub fn rooms(rooms: &[RoomView]) -> String {
    if rooms.is_empty() {
        return "No chatrooms yet. Use `new-chat`.".to_string();
    }
    rooms
        .iter()
        .map(|room| {
            let marker = if room.selected { ">" } else { " " };
            let kind = if room.is_group { "group" } else { "direct" };
            let delete = if room.can_delete { "  [Delete]" } else { "" };
            format!("{marker} #{} {} ({kind}){delete}", room.id, room.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn thread(
    title: Option<&str>,
    messages: &[MessageView],
    composer: &MessageComposer,
    scroll_to_bottom: bool,
) -> String {
    let Some(title) = title else {
        return "Select a chatroom with `open <room>`.".to_string();
    };
    let mut lines = vec![format!("== {title} ==")];
    if messages.is_empty() {
        lines.push("No messages yet.".to_string());
    }
    for message in messages {
        let side = if message.own { "me" } else { message.sender.name.as_str() };
        let time = message.time.as_deref().unwrap_or("--:--:--");
        let mut line = format!("[{time}] m{} {side}: {}", message.id, message.body);
        if message.own {
            line.push_str("  [Delete]");
        }
        lines.push(line);
        if let Some(preview) = &message.attachment {
            lines.push(format!("    {}", media(preview)));
        }
    }
    if let Some(preview) = composer.preview() {
        lines.push(format!("Attached: {}", media(&preview)));
    }
    if scroll_to_bottom {
        lines.push("-- latest --".to_string());
    }
    lines.join("\n")
}

pub fn new_chat_form(form: &NewChatForm) -> String {
    let mut lines = vec!["New chat: choose recipients with `to <user>`".to_string()];
    for user in &form.candidates {
        let mark = if form.recipients.contains(&user.id) { "x" } else { " " };
        lines.push(format!("  [{mark}] #{} {} @{}", user.id, user.display_name(), user.username));
    }
    let name = if form.name.is_empty() { "-" } else { form.name.as_str() };
    let access = if form.name_is_editable() { "group-name <name>" } else { "auto" };
    lines.push(format!("Name: {name} ({access})"));
    lines.join("\n")
}

pub fn search_results(query: &str, results: &[UserResult]) -> String {
    let mut lines = vec![format!("Search: {query}")];
    if results.is_empty() {
        lines.push("No users found.".to_string());
    }
    lines.extend(results.iter().map(|result| {
        format!("  #{} {} @{}", result.author.id, author(&result.author), result.username)
    }));
    lines.join("\n")
}

pub fn user_detail(user: Option<&User>, following: bool, posts: &[Feed]) -> String {
    let Some(user) = user else {
        return "User not found.".to_string();
    };
    let follow = if following { "[Unfollow]" } else { "[Follow]" };
    let mut lines = vec![
        format!("({}) {} @{}  {follow}", user.initials(), user.display_name(), user.username),
        format!("{} posts", posts.len()),
    ];
    lines.extend(posts.iter().map(|feed| format!("  #{} {}", feed.id, feed.body)));
    lines.join("\n")
}

pub fn profile(
    form: &ProfileForm,
    avatar: &AvatarPreview,
    deactivation: Deactivation,
    following: &[User],
    followers: &[User],
) -> String {
    let avatar = match avatar {
        AvatarPreview::Remote(url) => url.clone(),
        AvatarPreview::Local(file_name) => format!("{file_name} (uploading)"),
    };
    let or_dash = |value: &str| if value.is_empty() { "-".to_string() } else { value.to_string() };
    let mut lines = vec![
        format!("Avatar:     {avatar}"),
        format!("Fullname:   {}", or_dash(&form.fullname)),
        format!("Username:   {}", or_dash(&form.username)),
        format!("Email:      {}", or_dash(&form.email)),
        format!("Gender:     {}", or_dash(&form.gender)),
        format!("Birth date: {}", or_dash(&form.birth_date)),
        format!("Following ({}): {}", following.len(), names(following)),
        format!("Followers ({}): {}", followers.len(), names(followers)),
    ];
    if deactivation == Deactivation::Confirming {
        lines.push("Deactivate this account? `confirm` or `cancel`".to_string());
    }
    lines.join("\n")
}

fn names(users: &[User]) -> String {
    users
        .iter()
        .map(|user| user.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}
