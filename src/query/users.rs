// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{NewUser, User, UserId};
use crate::error::{Error, Result};
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub fn insert_user(conn: &mut database::Connection, new_user: &NewUser<'_>) -> Result<UserId> {
    use database::schema::users::dsl::*;
    use diesel::insert_into;

    Ok(insert_into(users)
        .values(new_user)
        .returning(id)
        .get_result(conn)?)
}

pub fn find_by_username(conn: &mut database::Connection, needle: &str) -> Result<Option<User>> {
    use database::schema::users::dsl::*;

    Ok(users
        .select(User::as_select())
        .filter(username.eq(needle))
        .get_result(conn)
        .optional()?)
}

pub fn get_user(conn: &mut database::Connection, user_id: UserId) -> Result<User> {
    use database::schema::users::dsl::*;

    users
        .select(User::as_select())
        .filter(id.eq(user_id))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| Error::not_found("user", user_id))
}

pub fn update_email(
    conn: &mut database::Connection,
    user_id: UserId,
    new_email: &str,
) -> Result<()> {
    use database::schema::users::dsl::*;
    use diesel::update;

    update(users)
        .filter(id.eq(user_id))
        .set(email.eq(new_email))
        .execute(conn)?;
    Ok(())
}

pub fn update_bio(conn: &mut database::Connection, user_id: UserId, new_bio: &str) -> Result<()> {
    use database::schema::users::dsl::*;
    use diesel::update;

    update(users)
        .filter(id.eq(user_id))
        .set(bio.eq(new_bio))
        .execute(conn)?;
    Ok(())
}

pub fn update_password_hash(
    conn: &mut database::Connection,
    user_id: UserId,
    new_hash: &str,
) -> Result<()> {
    use database::schema::users::dsl::*;
    use diesel::update;

    update(users)
        .filter(id.eq(user_id))
        .set(password_hash.eq(new_hash))
        .execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_database;

    fn new_user<'a>(username: &'a str, email: &'a str) -> NewUser<'a> {
        NewUser {
            username,
            email,
            password_hash: "0000",
            bio: None,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    #[test]
    fn insert_and_find() {
        let mut db = test_database();
        let conn = db.conn();

        let user_id = insert_user(conn, &new_user("demo_user", "demo@example.com")).unwrap();
        let found = find_by_username(conn, "demo_user").unwrap().unwrap();
        assert_eq!(found.id, user_id);
        assert_eq!(found.email, "demo@example.com");

        assert!(find_by_username(conn, "Demo_User").unwrap().is_none());
        assert!(matches!(
            get_user(conn, UserId(user_id.0 + 1)),
            Err(Error::NotFound { entity: "user", .. })
        ));
    }

    #[test]
    fn username_and_email_unique() {
        let mut db = test_database();
        let conn = db.conn();

        insert_user(conn, &new_user("demo_user", "demo@example.com")).unwrap();
        let same_name = insert_user(conn, &new_user("demo_user", "other@example.com"));
        assert!(same_name.unwrap_err().is_conflict());
        let same_email = insert_user(conn, &new_user("chef_master", "demo@example.com"));
        assert!(same_email.unwrap_err().is_conflict());
    }

    #[test]
    fn updates() {
        let mut db = test_database();
        let conn = db.conn();

        let user_id = insert_user(conn, &new_user("demo_user", "demo@example.com")).unwrap();
        update_email(conn, user_id, "new@example.com").unwrap();
        update_bio(conn, user_id, "Home cook").unwrap();
        update_password_hash(conn, user_id, "ffff").unwrap();

        let user = get_user(conn, user_id).unwrap();
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.bio.as_deref(), Some("Home cook"));
        assert_eq!(user.password_hash, "ffff");
    }
}
