use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_ROLE: &str = "users_role_chk";
const CNT_IDEA_STUDENT: &str = "ideas_student_id_fkey";
const CNT_IDEA_EVALUATOR: &str = "ideas_evaluated_by_fkey";
const CNT_IDEA_RATING: &str = "ideas_rating_range_chk";
const CNT_EVALUATION_IDEA: &str = "idea_evaluations_idea_id_fkey";
const CNT_EVALUATION_EVALUATOR: &str = "idea_evaluations_evaluator_id_fkey";
const CNT_EVALUATION_RATING: &str = "idea_evaluations_rating_range_chk";
const CNT_NOTIFICATION_USER: &str = "notifications_user_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_USER_ROLE => DomainError::Validation("unknown role".into()),
                    CNT_IDEA_STUDENT => DomainError::NotFound("student not found".into()),
                    CNT_IDEA_EVALUATOR | CNT_EVALUATION_EVALUATOR => {
                        DomainError::NotFound("evaluator not found".into())
                    }
                    CNT_IDEA_RATING | CNT_EVALUATION_RATING => {
                        DomainError::Validation("rating must be between 1 and 10".into())
                    }
                    CNT_EVALUATION_IDEA => DomainError::NotFound("idea not found".into()),
                    CNT_NOTIFICATION_USER => DomainError::NotFound("recipient not found".into()),
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

/// Escapes `LIKE` metacharacters and wraps the term for a substring match.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
