//! HTTP handlers, one module per entity family

pub mod assessments;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod progress;
pub mod resources;
pub mod system;
pub mod users;

use mudemy_core::{CodePrefix, EntityCode};
use mudemy_db::entities::{course, instruct, module};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Validate a path or body identifier against the prefix it must carry
pub(crate) fn parse_id(raw: &str, prefix: CodePrefix) -> Result<String, ApiError> {
    Ok(EntityCode::parse_as(raw.trim(), prefix)?.to_string())
}

/// Load a row by primary key or fail with 404
pub(crate) async fn find_one<E, C>(conn: &C, what: &str, id: &str) -> Result<E::Model, ApiError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    String: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id.to_string())
        .one(conn)
        .await?
        .ok_or_else(|| ApiError::not_found(what, id))
}

/// Admins manage every course, tutors only those they instruct
pub(crate) async fn ensure_course_manager<C>(
    conn: &C,
    user: &AuthUser,
    course_id: &str,
) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    user.require_author()?;
    if user.is_admin() {
        return Ok(());
    }

    let assigned = instruct::Entity::find_by_id((user.user_id.clone(), course_id.to_string()))
        .one(conn)
        .await?
        .is_some();

    if assigned {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "You are not an instructor of course '{course_id}'"
        )))
    }
}

/// Load a course and check the caller may change it
pub(crate) async fn managed_course<C>(
    conn: &C,
    user: &AuthUser,
    course_id: &str,
) -> Result<course::Model, ApiError>
where
    C: ConnectionTrait,
{
    let course = find_one::<course::Entity, _>(conn, "Course", course_id).await?;
    ensure_course_manager(conn, user, &course.id).await?;
    Ok(course)
}

/// Load a module and check the caller may change its course
pub(crate) async fn managed_module<C>(
    conn: &C,
    user: &AuthUser,
    module_id: &str,
) -> Result<module::Model, ApiError>
where
    C: ConnectionTrait,
{
    let module = find_one::<module::Entity, _>(conn, "Module", module_id).await?;
    ensure_course_manager(conn, user, &module.course_id).await?;
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_checks_prefix_and_shape() {
        assert_eq!(parse_id(" CRS00012 ", CodePrefix::Course).unwrap(), "CRS00012");
        assert!(matches!(
            parse_id("USR00001", CodePrefix::Course),
            Err(ApiError::InvalidId(_))
        ));
        assert!(parse_id("course-1", CodePrefix::Course).is_err());
    }
}
