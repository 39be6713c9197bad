use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_CONTENT_AUTHOR: &str = "content_items_author_id_fkey";
const CNT_CONTENT_ARTICLE_PUBLISHER: &str = "content_items_article_publisher_chk";
const CNT_PUBLISHER_NAME_LEN: &str = "publishers_name_len_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_CONTENT_AUTHOR => DomainError::NotFound("author not found".into()),
                    CNT_CONTENT_ARTICLE_PUBLISHER => {
                        DomainError::invalid_field("publisher", "an article requires a publisher")
                    }
                    CNT_PUBLISHER_NAME_LEN => {
                        DomainError::invalid_field("name", "must be 1 to 100 characters")
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
