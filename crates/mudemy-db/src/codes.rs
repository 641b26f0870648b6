//! Allocation of `PREFIX00001` style primary keys

use mudemy_core::{CodePrefix, EntityCode};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

use crate::entities::{
    answer, assignment_submission, certificate, content_media, course, enrollment, lesson, module,
    payment, question, quiz_submission, resource, user,
};

async fn next_in<E, C>(conn: &C, column: E::Column, prefix: CodePrefix) -> Result<String, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let highest: Option<String> = E::find()
        .select_only()
        .column_as(column.max(), "highest")
        .filter(column.starts_with(prefix.as_str()))
        .into_tuple::<Option<String>>()
        .one(conn)
        .await?
        .flatten();

    EntityCode::next_after(prefix, highest.as_deref())
        .map(|code| code.to_string())
        .map_err(|e| DbErr::Custom(e.to_string()))
}

/// Next free code for the table that owns `prefix`
///
/// Two concurrent writers can compute the same code; the primary key
/// rejects the second insert.
pub async fn next_code<C>(conn: &C, prefix: CodePrefix) -> Result<String, DbErr>
where
    C: ConnectionTrait,
{
    match prefix {
        CodePrefix::User => next_in::<user::Entity, _>(conn, user::Column::Id, prefix).await,
        CodePrefix::Course => next_in::<course::Entity, _>(conn, course::Column::Id, prefix).await,
        CodePrefix::Module => next_in::<module::Entity, _>(conn, module::Column::Id, prefix).await,
        CodePrefix::Lesson => next_in::<lesson::Entity, _>(conn, lesson::Column::Id, prefix).await,
        CodePrefix::Media => {
            next_in::<content_media::Entity, _>(conn, content_media::Column::Id, prefix).await
        }
        CodePrefix::Enrollment => {
            next_in::<enrollment::Entity, _>(conn, enrollment::Column::Id, prefix).await
        }
        CodePrefix::Payment => {
            next_in::<payment::Entity, _>(conn, payment::Column::Id, prefix).await
        }
        CodePrefix::Certificate => {
            next_in::<certificate::Entity, _>(conn, certificate::Column::Id, prefix).await
        }
        CodePrefix::Question => {
            next_in::<question::Entity, _>(conn, question::Column::Id, prefix).await
        }
        CodePrefix::Answer => next_in::<answer::Entity, _>(conn, answer::Column::Id, prefix).await,
        CodePrefix::AssignmentSubmission => {
            next_in::<assignment_submission::Entity, _>(
                conn,
                assignment_submission::Column::Id,
                prefix,
            )
            .await
        }
        CodePrefix::QuizSubmission => {
            next_in::<quiz_submission::Entity, _>(conn, quiz_submission::Column::Id, prefix).await
        }
        CodePrefix::Resource => {
            next_in::<resource::Entity, _>(conn, resource::Column::Id, prefix).await
        }
    }
}
