//! Registration and credential-check integration tests.

use rstest::rstest;
use taskforge::identity::{
    domain::ValidationError,
    ports::ProfileRepository,
    services::{AuthenticationError, RegisterRequest, RegistrationError},
};

use super::helpers::{TestEnv, env, register_user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registering_creates_the_account_and_its_profile(env: TestEnv) {
    let user = register_user(&env, "alice", "alice@example.com").await;

    let profile = env
        .profile_repository
        .find_by_user(user.id())
        .await
        .expect("profile lookup should succeed")
        .expect("profile should exist");
    assert_eq!(profile.user_id(), user.id());

    let authenticated = env
        .registration
        .authenticate("alice@example.com", "correct-horse-battery")
        .await
        .expect("authentication should succeed");
    assert_eq!(authenticated.id(), user.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registering_twice_reports_both_taken_fields(env: TestEnv) {
    register_user(&env, "alice", "alice@example.com").await;

    let result = env
        .registration
        .register(RegisterRequest::new(
            "alice",
            "alice@example.com",
            "another-strong-pass",
            "another-strong-pass",
        ))
        .await;

    let Err(RegistrationError::Validation(error)) = result else {
        panic!("expected a validation error");
    };
    let messages = error.field_messages();
    assert!(messages.contains(&("email", "Email already taken.".to_owned())));
    assert!(messages.contains(&("username", "Username already taken.".to_owned())));

    // Only one profile exists for the original account.
    let profiles = env
        .profile_repository
        .list()
        .await
        .expect("profile list should succeed");
    assert_eq!(profiles.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_credentials_are_rejected_without_detail(env: TestEnv) {
    register_user(&env, "alice", "alice@example.com").await;

    let result = env
        .registration
        .authenticate("alice@example.com", "guessed-wrong")
        .await;
    let Err(error) = result else {
        panic!("expected authentication to fail");
    };
    assert!(matches!(error, AuthenticationError::InvalidCredentials));
    assert_eq!(error.to_string(), "Invalid credentials.");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mismatched_confirmation_blocks_registration(env: TestEnv) {
    let result = env
        .registration
        .register(RegisterRequest::new(
            "alice",
            "alice@example.com",
            "correct-horse-battery",
            "correct-horse-staple",
        ))
        .await;

    assert!(matches!(
        result,
        Err(RegistrationError::Validation(
            ValidationError::PasswordMismatch
        ))
    ));
}
