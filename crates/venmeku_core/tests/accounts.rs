use venmeku_core::{
    Account, AccountRepository, AuthService, KvStore, MemoryKvStore, RepoError, SessionState,
};

#[test]
fn signup_then_login_returns_same_account() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);

    let created = repo.signup("alice", "secret1").unwrap();
    assert_eq!(created, Account::new("alice", "secret1"));
    assert_eq!(
        store.get("users").unwrap().as_deref(),
        Some(r#"[{"name":"alice","password":"secret1","photoUri":null}]"#)
    );

    let logged_in = repo.login("alice", "secret1").unwrap();
    assert_eq!(logged_in.name, "alice");
    assert!(logged_in.photo_uri.is_none());
}

#[test]
fn login_with_wrong_password_is_invalid_credentials() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);
    repo.signup("alice", "secret1").unwrap();

    for attempt in ["wrong", "secret", "Secret1", "secret1 "] {
        let err = repo.login("alice", attempt).unwrap_err();
        assert!(matches!(err, RepoError::InvalidCredentials), "{attempt}");
    }
}

#[test]
fn name_match_is_case_sensitive() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);
    repo.signup("alice", "secret1").unwrap();

    let err = repo.login("Alice", "secret1").unwrap_err();
    assert!(matches!(err, RepoError::InvalidCredentials));
    repo.signup("Alice", "another1").unwrap();
    assert_eq!(repo.list().unwrap().len(), 2);
}

#[test]
fn duplicate_name_is_rejected_regardless_of_password() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);
    repo.signup("alice", "secret1").unwrap();

    for password in ["secret1", "different-password"] {
        let err = repo.signup("alice", password).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateAccount(ref name) if name == "alice"));
    }
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn signup_validates_before_touching_storage() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);

    assert!(matches!(
        repo.signup("", "secret1").unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(matches!(
        repo.signup("alice", "").unwrap_err(),
        RepoError::Validation(_)
    ));
    let short = repo.signup("alice", "12345").unwrap_err();
    assert_eq!(short.to_string(), "Password must be at least 6 characters long.");
    assert_eq!(store.write_count(), 0);
}

#[test]
fn login_without_any_users_is_not_found() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);
    assert!(matches!(
        repo.login("alice", "secret1").unwrap_err(),
        RepoError::NotFound(_)
    ));

    store.set("users", "[]").unwrap();
    assert!(matches!(
        repo.login("alice", "secret1").unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn update_photo_sets_uri_on_matching_account() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);
    repo.signup("alice", "secret1").unwrap();
    repo.signup("bob", "secret2").unwrap();

    repo.update_photo("bob", "file:///bob.jpg").unwrap();

    let bob = repo.find("bob").unwrap().unwrap();
    assert_eq!(bob.photo_uri.as_deref(), Some("file:///bob.jpg"));
    assert_eq!(bob.password, "secret2");
    assert!(repo.find("alice").unwrap().unwrap().photo_uri.is_none());
}

#[test]
fn update_photo_without_match_falls_back_to_single_entry() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);

    repo.update_photo("ghost", "file:///g.jpg").unwrap();
    let users = repo.list().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "ghost");
    assert_eq!(users[0].photo_uri.as_deref(), Some("file:///g.jpg"));

    repo.signup("alice", "secret1").unwrap();
    repo.update_photo("nobody", "file:///n.jpg").unwrap();
    let users = repo.list().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "nobody");
}

#[test]
fn replace_rejects_rename_onto_existing_account() {
    let store = MemoryKvStore::new();
    let repo = AccountRepository::new(&store);
    repo.signup("alice", "secret1").unwrap();
    repo.signup("bob", "secret2").unwrap();

    let mut renamed = repo.find("alice").unwrap().unwrap();
    renamed.name = "bob".to_string();
    let err = repo.replace("alice", &renamed).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateAccount(_)));

    renamed.name = "alicia".to_string();
    repo.replace("alice", &renamed).unwrap();
    let names: Vec<_> = repo.list().unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["alicia".to_string(), "bob".to_string()]);
}

#[test]
fn malformed_users_blob_is_deserialization_error() {
    let store = MemoryKvStore::new();
    store.set("users", r#"{"name":"alice"}"#).unwrap();
    let repo = AccountRepository::new(&store);

    let err = repo.login("alice", "secret1").unwrap_err();
    assert!(matches!(err, RepoError::Deserialization { ref key, .. } if key == "users"));
}

#[test]
fn auth_service_starts_session_only_on_success() {
    let store = MemoryKvStore::new();
    let auth = AuthService::new(&store);

    assert!(auth.signup("alice", "short").is_err());
    assert_eq!(auth.state().unwrap(), SessionState::LoggedOut);

    auth.signup("alice", "secret1").unwrap();
    assert_eq!(
        auth.state().unwrap(),
        SessionState::LoggedIn("alice".to_string())
    );

    auth.logout().unwrap();
    assert!(auth.login("alice", "wrong").is_err());
    assert_eq!(auth.state().unwrap(), SessionState::LoggedOut);

    let account = auth.login("alice", "secret1").unwrap();
    assert_eq!(auth.current().unwrap(), Some(account));
}
