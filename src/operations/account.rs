// Copyright 2023 Remi Bernotavicius

use super::{optional_text, require_text};
use crate::database::models::{NewUser, User, UserId};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::password::{hash_password, verify_password};
use crate::query;
use crate::session::Session;

pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub bio: Option<&'a str>,
}

/// Creates a user account. Only the hash of the password is stored.
pub fn register(db: &mut Database, registration: &Registration<'_>) -> Result<UserId> {
    let username = require_text("username", registration.username)?;
    let email = require_text("email", registration.email)?;
    if registration.password.is_empty() {
        return Err(Error::validation("password can't be empty"));
    }
    if registration.password != registration.confirm_password {
        return Err(Error::validation("passwords do not match"));
    }
    let password_hash = hash_password(registration.password);
    let bio = optional_text(registration.bio);

    let user_id = db.with_transaction(|conn| {
        query::users::insert_user(
            conn,
            &NewUser {
                username,
                email,
                password_hash: &password_hash,
                bio,
                created_at: chrono::Local::now().naive_local(),
            },
        )
    })?;
    log::info!("registered user {username:?}");
    Ok(user_id)
}

pub fn login(db: &mut Database, username: &str, password: &str) -> Result<Session> {
    let user = query::users::find_by_username(db.conn(), username)?;
    match user {
        Some(user) if verify_password(password, &user.password_hash) => Ok(Session {
            user_id: user.id,
            username: user.username,
        }),
        _ => Err(Error::InvalidCredentials),
    }
}

pub fn view_profile(db: &mut Database, session: &Session) -> Result<User> {
    query::users::get_user(db.conn(), session.user_id)
}

/// Changes whichever of the email and bio are given. Returns `false` when there was nothing to
/// change.
pub fn update_profile(
    db: &mut Database,
    session: &Session,
    email: Option<&str>,
    bio: Option<&str>,
) -> Result<bool> {
    let email = optional_text(email);
    let bio = optional_text(bio);
    if email.is_none() && bio.is_none() {
        return Ok(false);
    }

    db.with_transaction(|conn| {
        if let Some(email) = email {
            query::users::update_email(conn, session.user_id, email)?;
        }
        if let Some(bio) = bio {
            query::users::update_bio(conn, session.user_id, bio)?;
        }
        Ok(())
    })?;
    Ok(true)
}

pub fn change_password(
    db: &mut Database,
    session: &Session,
    current_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<()> {
    let user = query::users::get_user(db.conn(), session.user_id)?;
    if !verify_password(current_password, &user.password_hash) {
        return Err(Error::InvalidCredentials);
    }
    if new_password.is_empty() {
        return Err(Error::validation("password can't be empty"));
    }
    if new_password != confirm_password {
        return Err(Error::validation("new passwords do not match"));
    }

    let new_hash = hash_password(new_password);
    db.with_transaction(|conn| query::users::update_password_hash(conn, session.user_id, &new_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_database;

    fn registration<'a>(username: &'a str, email: &'a str) -> Registration<'a> {
        Registration {
            username,
            email,
            password: "password123",
            confirm_password: "password123",
            bio: Some("Demo User Bio"),
        }
    }

    #[test]
    fn register_then_login() {
        let mut db = test_database();
        let user_id = register(&mut db, &registration("demo_user", "demo@example.com")).unwrap();

        let session = login(&mut db, "demo_user", "password123").unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.username, "demo_user");

        let user = view_profile(&mut db, &session).unwrap();
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.bio.as_deref(), Some("Demo User Bio"));
        assert_ne!(user.password_hash, "password123");

        assert!(matches!(
            login(&mut db, "demo_user", "wrong"),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            login(&mut db, "nobody", "password123"),
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn register_rejects_bad_input() {
        let mut db = test_database();

        let mismatch = Registration {
            confirm_password: "password124",
            ..registration("demo_user", "demo@example.com")
        };
        assert!(matches!(
            register(&mut db, &mismatch),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            register(&mut db, &registration(" ", "demo@example.com")),
            Err(Error::Validation(_))
        ));
        assert!(query::users::find_by_username(db.conn(), "demo_user")
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicate_username_or_email_conflicts() {
        let mut db = test_database();
        register(&mut db, &registration("demo_user", "demo@example.com")).unwrap();

        let err = register(&mut db, &registration("demo_user", "other@example.com")).unwrap_err();
        assert!(err.is_conflict());
        let err = register(&mut db, &registration("chef_master", "demo@example.com")).unwrap_err();
        assert!(err.is_conflict());

        // The failed attempts left the connection usable.
        register(&mut db, &registration("chef_master", "chef@example.com")).unwrap();
    }

    #[test]
    fn update_profile_keeps_blank_fields() {
        let mut db = test_database();
        register(&mut db, &registration("demo_user", "demo@example.com")).unwrap();
        let session = login(&mut db, "demo_user", "password123").unwrap();

        assert!(!update_profile(&mut db, &session, Some(""), None).unwrap());
        assert!(update_profile(&mut db, &session, None, Some("Weekend baker")).unwrap());

        let user = view_profile(&mut db, &session).unwrap();
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.bio.as_deref(), Some("Weekend baker"));

        register(&mut db, &registration("chef_master", "chef@example.com")).unwrap();
        let err = update_profile(&mut db, &session, Some("chef@example.com"), Some("x"));
        assert!(err.unwrap_err().is_conflict());
        let user = view_profile(&mut db, &session).unwrap();
        assert_eq!(user.bio.as_deref(), Some("Weekend baker"));
    }

    #[test]
    fn change_password_checks_current_and_confirmation() {
        let mut db = test_database();
        register(&mut db, &registration("demo_user", "demo@example.com")).unwrap();
        let session = login(&mut db, "demo_user", "password123").unwrap();

        assert!(matches!(
            change_password(&mut db, &session, "nope", "new-pass", "new-pass"),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            change_password(&mut db, &session, "password123", "new-pass", "new-pasS"),
            Err(Error::Validation(_))
        ));
        change_password(&mut db, &session, "password123", "new-pass", "new-pass").unwrap();

        assert!(login(&mut db, "demo_user", "password123").is_err());
        assert!(login(&mut db, "demo_user", "new-pass").is_ok());
    }
}
