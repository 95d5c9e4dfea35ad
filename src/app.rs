use crate::application::auth_service::AuthService;
use crate::application::feed_service::FeedService;
use crate::data::session_repository::KvSessionRepository;
use crate::data::user_repository::KvUserRepository;
use crate::domain::article::Article;
use crate::domain::repository::UserRepository;
use crate::infrastructure::config::AppConfig;
use crate::presentation::auth::AuthController;
use crate::presentation::feed::FeedController;
use crate::presentation::view::ViewObserver;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub type LocalAuthService = AuthService<KvUserRepository, KvSessionRepository>;
pub type LocalAuthController = AuthController<KvUserRepository, KvSessionRepository>;

/// Everything a page needs, wired over one key-value store.
pub struct App {
    pub auth: LocalAuthController,
    pub feed: FeedController,
}

impl App {
    #[instrument(skip_all)]
    pub async fn bootstrap(
        config: &AppConfig,
        articles: Vec<Article>,
        observer: Arc<dyn ViewObserver>,
    ) -> Result<Self> {
        let store = config.open_store();

        let users = Arc::new(KvUserRepository::new(store.clone()));
        users.initialize().await?;
        let sessions = Arc::new(KvSessionRepository::new(store));
        info!("User store ready");

        let auth_service: Arc<LocalAuthService> = Arc::new(AuthService::new(users, sessions));
        let auth = AuthController::new(auth_service, observer.clone());

        info!(articles = articles.len(), "Loading article feed");
        let feed = FeedController::new(
            FeedService::new(articles),
            observer,
            config.search_debounce,
        )?;

        let app = Self { auth, feed };
        app.auth.refresh_header().await?;
        info!("Application initialized");
        Ok(app)
    }
}
