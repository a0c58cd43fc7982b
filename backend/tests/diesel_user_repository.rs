//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.

use board_backend::domain::ports::{UserRepository, UserRepositoryError};
use board_backend::domain::{Email, NewUser, PasswordHash, Username};
use board_backend::outbound::persistence::DieselUserRepository;
use rstest::{fixture, rstest};

mod support;

use support::test_database;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: Username::new(username).expect("valid username"),
        email: Email::new(email).expect("valid email"),
        password_hash: PasswordHash::new("$2b$10$abcdefghijklmnopqrstuv"),
    }
}

#[fixture]
fn alice() -> NewUser {
    new_user("alice", "alice@example.com")
}

#[rstest]
fn inserted_account_is_found_by_email(alice: NewUser) {
    let Some(db) = test_database() else {
        eprintln!("SKIP-TEST-CLUSTER: inserted_account_is_found_by_email skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool());

    let stored = db.block_on(repo.insert(&alice)).expect("insert succeeds");
    assert!(stored.profile.id.get() > 0);
    assert_eq!(stored.profile.username, alice.username);

    let found = db
        .block_on(repo.find_by_email(&alice.email))
        .expect("lookup succeeds")
        .expect("account exists");
    assert_eq!(found, stored);
    assert_eq!(found.password_hash, alice.password_hash);

    let stranger = Email::new("nobody@example.com").expect("valid email");
    assert_eq!(
        db.block_on(repo.find_by_email(&stranger)).expect("lookup succeeds"),
        None
    );
}

#[rstest]
#[case("alice", "other@example.com", true)]
#[case("other", "alice@example.com", true)]
#[case("other", "other@example.com", false)]
fn either_identifier_counts_as_taken(
    alice: NewUser,
    #[case] username: &str,
    #[case] email: &str,
    #[case] taken: bool,
) {
    let Some(db) = test_database() else {
        eprintln!("SKIP-TEST-CLUSTER: either_identifier_counts_as_taken skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool());
    db.block_on(repo.insert(&alice)).expect("insert succeeds");

    let candidate = new_user(username, email);
    let exists = db
        .block_on(repo.exists_with_email_or_username(&candidate.email, &candidate.username))
        .expect("check succeeds");
    assert_eq!(exists, taken);
}

#[rstest]
#[case("alice", "second@example.com")]
#[case("second", "alice@example.com")]
fn unique_violation_is_reported_as_duplicate(
    alice: NewUser,
    #[case] username: &str,
    #[case] email: &str,
) {
    let Some(db) = test_database() else {
        eprintln!("SKIP-TEST-CLUSTER: unique_violation_is_reported_as_duplicate skipped");
        return;
    };
    let repo = DieselUserRepository::new(db.pool());
    db.block_on(repo.insert(&alice)).expect("first insert succeeds");

    let error = db
        .block_on(repo.insert(&new_user(username, email)))
        .expect_err("second insert collides");
    assert!(
        matches!(error, UserRepositoryError::Duplicate { .. }),
        "expected a duplicate error, got {error:?}"
    );
}
