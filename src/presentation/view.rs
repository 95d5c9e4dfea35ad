use crate::application::auth_service::Navigation;
use crate::domain::article::ArticleId;
use crate::domain::user::SessionUser;
use crate::domain::validation::{FieldError, StrengthMeter};

/// Visibility and labels for the page header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderState {
    pub show_auth_buttons: bool,
    pub show_profile: bool,
    pub show_write_button: bool,
    pub user_name: Option<String>,
    pub avatar_initials: Option<String>,
}

impl HeaderState {
    pub fn from_session(session: Option<&SessionUser>) -> Self {
        match session {
            Some(user) => Self {
                show_auth_buttons: false,
                show_profile: true,
                show_write_button: true,
                user_name: Some(user.name.clone()),
                avatar_initials: Some(initials(&user.name)),
            },
            None => Self {
                show_auth_buttons: true,
                ..Self::default()
            },
        }
    }
}

/// First letter of each space-separated word, upper-cased.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FieldError(FieldError),
    PasswordStrength(StrengthMeter),
    Header(HeaderState),
    Navigate(Navigation),
    FeedChanged(Vec<ArticleId>),
    LikeChanged { article_id: ArticleId, liked: bool },
    BookmarkChanged { article_id: ArticleId, bookmarked: bool },
    FollowChanged { author: String, following: bool },
}

/// Receives everything the view needs to re-render.
pub trait ViewObserver: Send + Sync {
    fn notify(&self, event: ViewEvent);
}
