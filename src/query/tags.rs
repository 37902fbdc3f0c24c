// Copyright 2023 Remi Bernotavicius

use crate::database;
use crate::database::models::{Tag, TagId};
use crate::error::{Error, Result};
use diesel::prelude::OptionalExtension as _;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

pub fn find_tag_id(conn: &mut database::Connection, tag_name: &str) -> Result<Option<TagId>> {
    use database::schema::tags::dsl::*;

    Ok(tags
        .select(id)
        .filter(name.eq(tag_name))
        .get_result(conn)
        .optional()?)
}

/// Same contract as [`super::ingredients::find_or_create_ingredient`], for tags.
pub fn find_or_create_tag(
    conn: &mut database::Connection,
    tag_name: &str,
    tag_description: Option<&str>,
) -> Result<TagId> {
    if let Some(existing) = find_tag_id(conn, tag_name)? {
        return Ok(existing);
    }

    {
        use database::schema::tags::dsl::*;
        use diesel::insert_into;

        insert_into(tags)
            .values((name.eq(tag_name), description.eq(tag_description)))
            .on_conflict(name)
            .do_nothing()
            .execute(conn)?;
    }
    log::info!("created tag {tag_name:?}");

    find_tag_id(conn, tag_name)?.ok_or_else(|| Error::not_found("tag", tag_name))
}

pub fn all_tags(conn: &mut database::Connection) -> Result<Vec<Tag>> {
    use database::schema::tags::dsl::*;

    Ok(tags
        .select(Tag::as_select())
        .order_by(name.asc())
        .load(conn)?)
}

#[test]
fn find_or_create_tag_once() {
    let mut db = database::test_database();
    let conn = db.conn();

    let healthy = find_or_create_tag(conn, "Healthy", Some("Nutritious recipes")).unwrap();
    assert_eq!(find_or_create_tag(conn, "Healthy", None).unwrap(), healthy);
    let quick = find_or_create_tag(conn, "Quick Meal", None).unwrap();
    assert_ne!(healthy, quick);

    let all = all_tags(conn).unwrap();
    assert_eq!(
        all.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        ["Healthy", "Quick Meal"]
    );
    assert_eq!(all[0].description.as_deref(), Some("Nutritious recipes"));
    assert_eq!(all[1].description, None);
}
