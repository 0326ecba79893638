//! Domain validation tests for identity scalars and entities.

use crate::identity::domain::{
    EmailAddress, IdentityDomainError, Profile, User, Username, ValidationError,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

/// Clock pinned to a fixed instant for timestamp assertions.
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid instant")
}

#[rstest]
#[case("alice")]
#[case("alice.smith+work@corp_1")]
#[case("  padded  ")]
fn username_accepts_valid_values(#[case] raw: &str) {
    let username = Username::new(raw).expect("username should parse");
    assert_eq!(username.as_str(), raw.trim());
}

#[rstest]
fn username_rejects_empty_values() {
    assert_eq!(
        Username::new("   "),
        Err(IdentityDomainError::EmptyUsername)
    );
}

#[rstest]
fn username_rejects_unsupported_characters() {
    assert!(matches!(
        Username::new("alice smith"),
        Err(IdentityDomainError::InvalidUsername(_))
    ));
    assert!(matches!(
        Username::new("alice#1"),
        Err(IdentityDomainError::InvalidUsername(_))
    ));
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "a".repeat(Username::MAX_LENGTH + 1);
    assert_eq!(
        Username::new(raw),
        Err(IdentityDomainError::UsernameTooLong(Username::MAX_LENGTH))
    );
}

#[rstest]
#[case("alice@example.com")]
#[case("a.b+c@mail.example.co.uk")]
fn email_accepts_valid_values(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("email should parse");
    assert_eq!(email.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("alice")]
#[case("alice@")]
#[case("@example.com")]
#[case("alice@localhost")]
#[case("alice@exa mple.com")]
#[case("alice@@example.com")]
fn email_rejects_malformed_values(#[case] raw: &str) {
    assert!(EmailAddress::new(raw).is_err());
}

#[rstest]
fn user_starts_active_and_can_be_deactivated() {
    let mut user = User::new(
        Username::new("alice").expect("valid username"),
        EmailAddress::new("alice@example.com").expect("valid email"),
    );
    assert!(user.is_active());
    user.deactivate();
    assert!(!user.is_active());
}

#[rstest]
fn profile_touch_advances_only_updated_at() {
    let created = FixedClock(instant(1_000));
    let later = FixedClock(instant(2_000));
    let user = User::new(
        Username::new("alice").expect("valid username"),
        EmailAddress::new("alice@example.com").expect("valid email"),
    );

    let mut profile = Profile::new(user.id(), &created);
    assert_eq!(profile.created_at(), instant(1_000));
    assert_eq!(profile.updated_at(), instant(1_000));

    profile.touch(&later);
    assert_eq!(profile.created_at(), instant(1_000));
    assert_eq!(profile.updated_at(), instant(2_000));
}

#[rstest]
fn collect_returns_ok_for_no_violations() {
    assert_eq!(ValidationError::collect(Vec::new()), Ok(()));
}

#[rstest]
fn collect_unwraps_a_single_violation() {
    let result = ValidationError::collect(vec![ValidationError::PasswordMismatch]);
    assert_eq!(result, Err(ValidationError::PasswordMismatch));
}

#[rstest]
fn collect_bundles_several_violations() {
    let result = ValidationError::collect(vec![
        ValidationError::PasswordMismatch,
        ValidationError::EmailTaken,
    ]);
    let Err(bundle) = result else {
        panic!("expected a validation error");
    };
    assert!(bundle.is_multiple());
    assert_eq!(bundle.errors().map(<[ValidationError]>::len), Some(2));
}

#[rstest]
fn field_messages_flatten_bundles_with_field_scopes() {
    let bundle = ValidationError::multiple(vec![
        ValidationError::PasswordMismatch,
        ValidationError::EmailTaken,
        ValidationError::UsernameTaken,
    ]);
    let messages = bundle.field_messages();
    assert_eq!(
        messages,
        vec![
            ("password", "Passwords must match.".to_owned()),
            ("email", "Email already taken.".to_owned()),
            ("username", "Username already taken.".to_owned()),
        ]
    );
}
