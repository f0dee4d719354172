//! Integration tests for directory securing methods

use reco_export::config::{secret_string, CredentialsConfig, ScopeCredentials};
use reco_export::core::credentials::{
    ConfigCredentialsResolver, ExportCredentialsDispatcher, BASIC_METHOD, NONE_METHOD, USER_METHOD,
};
use reco_export::core::files::FileManager;
use reco_export::domain::RecoError;
use secrecy::ExposeSecret;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;
use test_case::test_case;

fn dispatcher() -> ExportCredentialsDispatcher {
    let mut scopes = BTreeMap::new();
    scopes.insert(
        "intranet".to_string(),
        ScopeCredentials {
            login: "intranet-user".to_string(),
            password: secret_string("intranet-pass".to_string()),
        },
    );
    let config = CredentialsConfig {
        login: Some("site-user".to_string()),
        password: Some(secret_string("site-pass".to_string())),
        scopes,
    };
    ExportCredentialsDispatcher::with_defaults(Arc::new(ConfigCredentialsResolver::new(config)))
}

#[test]
fn test_builtin_methods_are_registered() {
    assert_eq!(
        dispatcher().methods(),
        vec![
            BASIC_METHOD.to_string(),
            NONE_METHOD.to_string(),
            USER_METHOD.to_string()
        ]
    );
}

#[tokio::test]
async fn test_none_method_yields_empty_credentials() {
    let credentials = dispatcher()
        .credentials(NONE_METHOD, Some("intranet"))
        .await
        .unwrap();
    assert!(credentials.is_empty());
}

#[test_case(Some("intranet"), "intranet-user", "intranet-pass" ; "scoped")]
#[test_case(Some("public"), "site-user", "site-pass" ; "unknown scope falls back")]
#[test_case(None, "site-user", "site-pass" ; "no scope")]
#[tokio::test]
async fn test_user_method_resolves_scope(scope: Option<&str>, login: &str, password: &str) {
    let credentials = dispatcher().credentials(USER_METHOD, scope).await.unwrap();
    assert_eq!(credentials.login(), Some(login));
    assert!(*credentials.password().unwrap().expose_secret() == password);
}

#[tokio::test]
async fn test_basic_method_generates_fresh_credentials() {
    let dispatcher = dispatcher();
    let first = dispatcher.credentials(BASIC_METHOD, None).await.unwrap();
    let second = dispatcher.credentials(BASIC_METHOD, None).await.unwrap();

    let login = first.login().unwrap();
    assert_eq!(login.len(), 10);
    assert!(login.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(first.login(), second.login());
}

#[tokio::test]
async fn test_unknown_method_lists_available() {
    let err = dispatcher().credentials("ldap", None).await.unwrap_err();
    match err {
        RecoError::UnsupportedExportCredentialsMethod { method, available } => {
            assert_eq!(method, "ldap");
            assert_eq!(available.len(), 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_basic_credentials_written_and_verified() {
    let root = TempDir::new().unwrap();
    let files = FileManager::new(root.path());
    let chunk_dir = files.create_chunk_dir().unwrap();

    let credentials = dispatcher().credentials(BASIC_METHOD, None).await.unwrap();
    let credentials = files
        .secure_dir(&chunk_dir, BASIC_METHOD, credentials)
        .unwrap();
    let login = credentials.login().unwrap().to_string();
    let password: &str = credentials.password().unwrap().expose_secret().as_ref();
    let password = password.to_string();

    let htpasswd = String::from_utf8(files.load(&format!("{chunk_dir}.htpasswd")).unwrap()).unwrap();
    assert!(htpasswd.starts_with(&format!("{login}:$5$")));
    assert!(!htpasswd.contains(&password));

    assert!(files.verify_credentials(&chunk_dir, &login, &password).unwrap());
    assert!(!files.verify_credentials(&chunk_dir, "someone", &password).unwrap());
}

#[tokio::test]
async fn test_user_credentials_leave_directory_open() {
    let root = TempDir::new().unwrap();
    let files = FileManager::new(root.path());
    let chunk_dir = files.create_chunk_dir().unwrap();

    let credentials = dispatcher().credentials(USER_METHOD, None).await.unwrap();
    files.secure_dir(&chunk_dir, USER_METHOD, credentials).unwrap();

    assert!(files.load(&format!("{chunk_dir}.htpasswd")).is_err());
}
