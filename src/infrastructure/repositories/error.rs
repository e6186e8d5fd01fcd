use crate::domain::errors::DomainError;

const CNT_DESK_NAME: &str = "desks_name_key";
const CNT_STAGE_NAME: &str = "stages_desk_id_name_key";
const CNT_ARTICLE_DESK: &str = "articles_desk_id_fkey";
const CNT_ARTICLE_STAGE: &str = "articles_stage_id_fkey";
const CNT_ARTICLE_WORD_COUNT: &str = "articles_word_count_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_DESK_NAME => DomainError::Conflict("desk name already exists".into()),
                    CNT_STAGE_NAME => {
                        DomainError::Conflict("stage name already exists on desk".into())
                    }
                    CNT_ARTICLE_DESK => DomainError::NotFound("desk not found".into()),
                    CNT_ARTICLE_STAGE => DomainError::NotFound("stage not found".into()),
                    CNT_ARTICLE_WORD_COUNT => {
                        DomainError::validation("word count must not be negative")
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
                        return DomainError::validation("check constraint violated");
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::ColumnDecode { index, source } => {
            DomainError::Persistence(format!("column {index} could not be decoded: {source}"))
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
