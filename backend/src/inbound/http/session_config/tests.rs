//! Session configuration parsing across build modes.

use std::collections::HashMap;
use std::io::Write as _;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn full_key() -> NamedTempFile {
    key_file(MIN_KEY_LEN)
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().display().to_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn rejected(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release configuration should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_a_complete_configuration(full_key: NamedTempFile) {
    let settings = session_settings_from_env(&mock_env(release_vars(&full_key)), BuildMode::Release)
        .expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(full_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&full_key);
    vars.remove(missing);
    let error = rejected(vars);
    assert!(
        matches!(error, SessionConfigError::MissingEnv { name } if name == missing),
        "unexpected error: {error}"
    );
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_unparseable_booleans(full_key: NamedTempFile, #[case] value: &str) {
    let mut vars = release_vars(&full_key);
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());
    assert!(matches!(
        rejected(vars),
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_rejects_unknown_same_site(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(SAMESITE_ENV, "sideways".to_owned());
    assert!(matches!(
        rejected(vars),
        SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookies(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        rejected(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        rejected(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(MIN_KEY_LEN - 1);
    match rejected(release_vars(&short)) {
        SessionConfigError::KeyTooShort { length, min_len, .. } => {
            assert_eq!(length, MIN_KEY_LEN - 1);
            assert_eq!(min_len, MIN_KEY_LEN);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn release_rejects_missing_key_files(full_key: NamedTempFile) {
    let mut vars = release_vars(&full_key);
    vars.insert(KEY_FILE_ENV, "/nonexistent/campus/session.key".to_owned());
    assert!(matches!(rejected(vars), SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_lenient_defaults() {
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV, "/nonexistent/campus/session.key".to_owned());
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_malformed_values() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/campus/session.key".to_owned()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
        (SAMESITE_ENV, "sideways".to_owned()),
    ]);
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("1", Some(true))]
#[case("Yes", Some(true))]
#[case(" y ", Some(true))]
#[case("FALSE", Some(false))]
#[case("n", Some(false))]
#[case("2", None)]
fn boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
