mod common;

use common::RecordingObserver;
use insight::app::App;
use insight::application::auth_service::{AuthService, Navigation};
use insight::data::file::FileKeyValueStore;
use insight::data::memory::InMemoryKeyValueStore;
use insight::data::session_repository::KvSessionRepository;
use insight::data::user_repository::KvUserRepository;
use insight::domain::repository::{CURRENT_USER_KEY, KeyValueStore, USERS_KEY, UserRepository};
use insight::domain::error::DomainError;
use insight::domain::validation::{
    FieldError, FormField, LoginForm, SignupForm, StrengthBand, validate_signup,
};
use insight::infrastructure::config::AppConfig;
use insight::infrastructure::logging::try_init_logging;
use insight::presentation::auth::AuthController;
use insight::presentation::view::{HeaderState, ViewEvent};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

macro_rules! setup_auth_test {
    () => {{
        try_init_logging();
        let store = InMemoryKeyValueStore::new();
        let shared: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        let users = Arc::new(KvUserRepository::new(shared.clone()));
        let sessions = Arc::new(KvSessionRepository::new(shared));
        let auth_service = Arc::new(AuthService::new(users, sessions));
        let observer = RecordingObserver::new();
        let controller = AuthController::new(auth_service, observer.clone());
        (controller, observer, store)
    }};
}

fn signup_form(email: &str) -> SignupForm {
    SignupForm {
        name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        password: "Analytical1843!".to_string(),
        confirm_password: "Analytical1843!".to_string(),
        accept_terms: true,
    }
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
        remember_me: true,
    }
}

#[tokio::test]
async fn test_full_signup_logout_login_flow() {
    let (controller, observer, store) = setup_auth_test!();

    // Signup
    let result = controller
        .submit_signup(signup_form("flow@example.com"))
        .await
        .unwrap();
    assert!(result.success);
    let user = result.user.unwrap();
    assert_eq!(user.email, "flow@example.com");
    assert_eq!(
        observer.take(),
        vec![
            ViewEvent::Header(HeaderState::from_session(Some(&user))),
            ViewEvent::Navigate(Navigation::Landing),
        ]
    );

    // Logout
    controller.logout().await.unwrap();
    assert!(store.get(CURRENT_USER_KEY).await.unwrap().is_none());
    assert_eq!(
        observer.take(),
        vec![
            ViewEvent::Header(HeaderState::from_session(None)),
            ViewEvent::Navigate(Navigation::Landing),
        ]
    );

    // Login
    let result = controller
        .submit_login(login_form("flow@example.com", "Analytical1843!"))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.user.as_ref().unwrap().id, user.id);

    let raw = store.get(CURRENT_USER_KEY).await.unwrap().unwrap();
    let session: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(session["email"], "flow@example.com");
    assert_eq!(session["rememberMe"], true);
    assert!(session.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_signup_with_taken_email_reports_on_email_field() {
    let (controller, observer, store) = setup_auth_test!();
    controller
        .submit_signup(signup_form("taken@example.com"))
        .await
        .unwrap();
    observer.take();

    let result = controller
        .submit_signup(signup_form("taken@example.com"))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("This email address is already in use")
    );
    assert_eq!(
        observer.events(),
        vec![ViewEvent::FieldError(FieldError::new(
            FormField::Email,
            "This email address is already in use"
        ))]
    );

    let raw = store.get(USERS_KEY).await.unwrap().unwrap();
    let users: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_bad_login_reports_generic_message_on_password_field() {
    let (controller, observer, _store) = setup_auth_test!();
    controller
        .submit_signup(signup_form("ada@example.com"))
        .await
        .unwrap();
    controller.logout().await.unwrap();
    observer.take();

    let wrong_password = controller
        .submit_login(login_form("ada@example.com", "guess"))
        .await
        .unwrap();
    let unknown_email = controller
        .submit_login(login_form("eve@example.com", "Analytical1843!"))
        .await
        .unwrap();

    assert!(!wrong_password.success);
    assert_eq!(wrong_password, unknown_email);
    let expected = ViewEvent::FieldError(FieldError::new(
        FormField::Password,
        "Invalid email or password",
    ));
    assert_eq!(observer.events(), vec![expected.clone(), expected]);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_store() {
    let (controller, observer, store) = setup_auth_test!();

    let mut form = signup_form("not-an-email");
    let result = controller.submit_signup(form.clone()).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("Enter a valid email address"));

    form.email = "ok@example.com".to_string();
    form.accept_terms = false;
    let result = controller.submit_signup(form).await.unwrap();
    assert!(!result.success);

    let fields: Vec<FormField> = observer
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ViewEvent::FieldError(err) => Some(err.field),
            _ => None,
        })
        .collect();
    assert_eq!(fields, vec![FormField::Email, FormField::Terms]);
    assert!(store.get(USERS_KEY).await.unwrap().is_none());

    let result = controller.submit_login(LoginForm::default()).await.unwrap();
    assert_eq!(result.message.as_deref(), Some("Email address is required"));
}

#[tokio::test]
async fn test_password_input_emits_strength_meter() {
    let (controller, observer, _store) = setup_auth_test!();

    let weak = controller.password_input("abcdefgh");
    let strong = controller.password_input("Abcdefgh1!");

    assert_eq!(weak.score, 25);
    assert_eq!(weak.band, StrengthBand::Weak);
    assert!(strong.score >= 75);
    assert_eq!(strong.band, StrengthBand::Strong);
    assert_eq!(
        observer.events(),
        vec![
            ViewEvent::PasswordStrength(weak),
            ViewEvent::PasswordStrength(strong)
        ]
    );
}

#[tokio::test]
async fn test_logout_twice_is_harmless() {
    let (controller, _observer, _store) = setup_auth_test!();
    controller
        .submit_signup(signup_form("twice@example.com"))
        .await
        .unwrap();

    controller.logout().await.unwrap();
    controller.logout().await.unwrap();

    let header = controller.refresh_header().await.unwrap();
    assert!(header.show_auth_buttons);
}

#[tokio::test]
async fn test_corrupt_store_is_returned_as_error() {
    let (controller, observer, store) = setup_auth_test!();
    store.set(USERS_KEY, "not json").await.unwrap();

    let err = controller
        .submit_login(login_form("ada@example.com", "Analytical1843!"))
        .await
        .unwrap_err();

    assert!(err.field_error().is_none());
    assert!(err.to_string().starts_with("Storage error"));
    assert!(observer.events().is_empty());
}

#[tokio::test]
async fn test_session_survives_restart_with_file_store() {
    try_init_logging();
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        store_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    let observer = RecordingObserver::new();
    let app = App::bootstrap(&config, vec![], observer.clone())
        .await
        .unwrap();
    assert_eq!(
        observer.take(),
        vec![ViewEvent::Header(HeaderState::from_session(None))]
    );
    app.auth
        .submit_signup(signup_form("persist@example.com"))
        .await
        .unwrap();
    drop(app);

    // a second page load over the same profile directory
    let observer = RecordingObserver::new();
    let app = App::bootstrap(&config, vec![], observer.clone())
        .await
        .unwrap();
    match observer.events().first() {
        Some(ViewEvent::Header(header)) => {
            assert!(header.show_profile);
            assert_eq!(header.avatar_initials.as_deref(), Some("AL"));
        }
        other => panic!("expected header event, got {:?}", other),
    }

    let users = KvUserRepository::new(Arc::new(FileKeyValueStore::new(dir.path())));
    let records = users.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].password_hash.starts_with("$argon2id$"));

    app.auth.logout().await.unwrap();
    app.auth
        .submit_login(login_form("persist@example.com", "Analytical1843!"))
        .await
        .unwrap();
}

macro_rules! shared_auth_service {
    ($store:expr) => {{
        let shared: Arc<dyn KeyValueStore> = $store;
        let users = Arc::new(KvUserRepository::new(shared.clone()));
        users.initialize().await.unwrap();
        let sessions = Arc::new(KvSessionRepository::new(shared));
        (Arc::new(AuthService::new(users.clone(), sessions)), users)
    }};
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_signups_on_file_store_are_all_stored() {
    try_init_logging();
    let dir = TempDir::new().unwrap();
    let (service, users) = shared_auth_service!(Arc::new(FileKeyValueStore::new(dir.path())));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let form = signup_form(&format!("writer{}@example.com", i));
            let req = validate_signup(&form).unwrap();
            service.signup(req).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        handle.await.unwrap().unwrap();
        successes += 1;
    }

    let records = users.list().await.unwrap();
    assert_eq!(records.len(), successes);
    let emails: HashSet<String> = records.into_iter().map(|r| r.email).collect();
    assert_eq!(emails.len(), successes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_signups_with_one_email_keep_it_unique() {
    try_init_logging();
    let (service, users) = shared_auth_service!(Arc::new(InMemoryKeyValueStore::new()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let req = validate_signup(&signup_form("same@example.com"))
                .unwrap();
            service.signup(req).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(user) => {
                assert_eq!(user.email, "same@example.com");
                successes += 1;
            }
            Err(err) => assert_eq!(
                err.downcast_ref::<DomainError>(),
                Some(&DomainError::EmailInUse)
            ),
        }
    }

    assert_eq!(successes, 1);
    let records = users.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].email, "same@example.com");
}
