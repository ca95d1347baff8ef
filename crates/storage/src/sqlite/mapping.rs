use std::str::FromStr;

use bridge_core::model::{Course, PostId, TodoId, UserId};
use bridge_core::scoring::IqScore;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Unique-constraint violations become `Conflict`; anything else is a connection error.
pub(crate) fn write_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => conn(e),
    }
}

pub(crate) fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} out of range: {v}")))
}

pub(crate) fn user_id_from_str(v: &str) -> Result<UserId, StorageError> {
    UserId::from_str(v).map_err(ser)
}

pub(crate) fn todo_id_from_i64(v: i64) -> Result<TodoId, StorageError> {
    Ok(TodoId::new(i64_to_u64("todo_id", v)?))
}

pub(crate) fn todo_id_to_i64(id: TodoId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("todo_id overflow".into()))
}

pub(crate) fn post_id_from_i64(v: i64) -> Result<PostId, StorageError> {
    Ok(PostId::new(i64_to_u64("post_id", v)?))
}

pub(crate) fn post_id_to_i64(id: PostId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("post_id overflow".into()))
}

pub(crate) fn course_from_code(code: Option<String>) -> Result<Option<Course>, StorageError> {
    code.map(|c| Course::from_str(&c).map_err(ser)).transpose()
}

pub(crate) fn iq_score_from_i64(v: Option<i64>) -> Result<Option<IqScore>, StorageError> {
    v.map(|raw| {
        if (i64::from(IqScore::MIN)..=i64::from(IqScore::MAX)).contains(&raw) {
            Ok(IqScore::new(raw))
        } else {
            Err(StorageError::Serialization(format!("invalid iq_score: {raw}")))
        }
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_ids() {
        assert!(todo_id_from_i64(-1).is_err());
        assert_eq!(post_id_from_i64(7).unwrap(), PostId::new(7));
    }

    #[test]
    fn iq_score_outside_range_is_corrupt() {
        assert!(iq_score_from_i64(Some(79)).is_err());
        assert_eq!(
            iq_score_from_i64(Some(100)).unwrap().map(IqScore::value),
            Some(100)
        );
        assert!(iq_score_from_i64(None).unwrap().is_none());
    }

    #[test]
    fn course_codes_parse_case_insensitively() {
        assert_eq!(
            course_from_code(Some("neet".into())).unwrap(),
            Some(Course::Neet)
        );
        assert!(course_from_code(Some("mba".into())).is_err());
    }
}
