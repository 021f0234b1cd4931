// src/infrastructure/repositories/postgres_idea.rs
use super::{map_sqlx, push_condition};
use crate::domain::cursor::{PageCursor, split_page};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::idea::{
    Evaluation, Idea, IdeaCategory, IdeaDescription, IdeaId, IdeaListFilter, IdeaRepository,
    IdeaTitle, IdeaTransition, NewEvaluation, NewIdea, Rating, Recommendation,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const IDEA_COLUMNS: &str = "id, title, description, category, status, student_id, college_id, \
     rating, recommendation, comments, nurture_notes, evaluated_by, evaluated_at, version, \
     created_at, updated_at";

const EVALUATION_COLUMNS: &str =
    "id, idea_id, evaluator_id, rating, recommendation, comments, nurture_notes, created_at";

#[derive(Clone)]
pub struct PostgresIdeaRepository {
    pool: PgPool,
}

impl PostgresIdeaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A guarded update that touched nothing either lost a race or targeted a
    /// missing idea; tell the two apart.
    async fn stale_or_missing(&self, id: IdeaId) -> DomainError {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM ideas WHERE id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await;
        match exists {
            Ok(true) => DomainError::Conflict(
                "idea was modified concurrently, reload and try again".into(),
            ),
            Ok(false) => DomainError::NotFound("idea not found".into()),
            Err(err) => map_sqlx(err),
        }
    }

    fn apply_filter(
        builder: &mut QueryBuilder<'_, Postgres>,
        filter: &IdeaListFilter,
        cursor: Option<PageCursor>,
    ) {
        let mut has_where = false;

        if !filter.statuses.is_empty() {
            let statuses: Vec<String> = filter
                .statuses
                .iter()
                .map(|s| s.as_str().to_string())
                .collect();
            push_condition(builder, &mut has_where);
            builder.push("status = ANY(");
            builder.push_bind(statuses);
            builder.push(")");
        }

        if let Some(college_id) = filter.college_id {
            push_condition(builder, &mut has_where);
            builder.push("college_id = ");
            builder.push_bind(college_id);
        }

        if let Some(student_id) = filter.student_id {
            push_condition(builder, &mut has_where);
            builder.push("student_id = ");
            builder.push_bind(i64::from(student_id));
        }

        if let Some(category) = filter.category.clone() {
            push_condition(builder, &mut has_where);
            builder.push("category = ");
            builder.push_bind(category);
        }

        if let Some(cursor) = cursor {
            push_condition(builder, &mut has_where);
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
    }
}

#[derive(Debug, FromRow)]
struct IdeaRow {
    id: i64,
    title: String,
    description: String,
    category: String,
    status: String,
    student_id: i64,
    college_id: Option<i64>,
    rating: Option<i16>,
    recommendation: Option<String>,
    comments: Option<String>,
    nurture_notes: Option<String>,
    evaluated_by: Option<i64>,
    evaluated_at: Option<DateTime<Utc>>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdeaRow> for Idea {
    type Error = DomainError;

    fn try_from(row: IdeaRow) -> Result<Self, Self::Error> {
        Ok(Idea {
            id: IdeaId::new(row.id)?,
            title: IdeaTitle::new(row.title)?,
            description: IdeaDescription::new(row.description)?,
            category: IdeaCategory::new(row.category)?,
            status: row.status.parse()?,
            student_id: UserId::new(row.student_id)?,
            college_id: row.college_id,
            rating: row.rating.map(|r| Rating::new(i64::from(r))).transpose()?,
            recommendation: row.recommendation.map(|r| r.parse::<Recommendation>()).transpose()?,
            comments: row.comments,
            nurture_notes: row.nurture_notes,
            evaluated_by: row.evaluated_by.map(UserId::new).transpose()?,
            evaluated_at: row.evaluated_at,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct EvaluationRow {
    id: i64,
    idea_id: i64,
    evaluator_id: i64,
    rating: i16,
    recommendation: String,
    comments: Option<String>,
    nurture_notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<EvaluationRow> for Evaluation {
    type Error = DomainError;

    fn try_from(row: EvaluationRow) -> Result<Self, Self::Error> {
        Ok(Evaluation {
            id: row.id,
            idea_id: IdeaId::new(row.idea_id)?,
            evaluator_id: UserId::new(row.evaluator_id)?,
            rating: Rating::new(i64::from(row.rating))?,
            recommendation: row.recommendation.parse()?,
            comments: row.comments,
            nurture_notes: row.nurture_notes,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl IdeaRepository for PostgresIdeaRepository {
    async fn insert(&self, idea: NewIdea) -> DomainResult<Idea> {
        let NewIdea {
            title,
            description,
            category,
            student_id,
            college_id,
            created_at,
        } = idea;

        let row = sqlx::query_as::<_, IdeaRow>(&format!(
            "INSERT INTO ideas (title, description, category, status, student_id, college_id, created_at, updated_at)
             VALUES ($1, $2, $3, 'submitted', $4, $5, $6, $6)
             RETURNING {IDEA_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(description.as_str())
        .bind(category.as_str())
        .bind(i64::from(student_id))
        .bind(college_id)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Idea::try_from(row)
    }

    async fn find_by_id(&self, id: IdeaId) -> DomainResult<Option<Idea>> {
        let row = sqlx::query_as::<_, IdeaRow>(&format!(
            "SELECT {IDEA_COLUMNS} FROM ideas WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Idea::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &IdeaListFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Idea>, Option<PageCursor>)> {
        let limit = limit.clamp(1, 100);
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {IDEA_COLUMNS} FROM ideas"));
        Self::apply_filter(&mut builder, filter, cursor);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit) + 1);

        let rows = builder
            .build_query_as::<IdeaRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let ideas = rows
            .into_iter()
            .map(Idea::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(split_page(ideas, limit, |idea| {
            PageCursor::new(idea.created_at, idea.id.into())
        }))
    }

    async fn transition(&self, transition: IdeaTransition) -> DomainResult<Idea> {
        let IdeaTransition {
            id,
            status,
            expected_version,
            updated_at,
        } = transition;

        let row = sqlx::query_as::<_, IdeaRow>(&format!(
            "UPDATE ideas SET status = $1, updated_at = $2, version = version + 1
             WHERE id = $3 AND version = $4
             RETURNING {IDEA_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Idea::try_from(row),
            None => Err(self.stale_or_missing(id).await),
        }
    }

    async fn record_evaluation(
        &self,
        evaluation: NewEvaluation,
    ) -> DomainResult<(Idea, Evaluation)> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // No version predicate: concurrent evaluations of one idea resolve as
        // last write wins, and every one of them lands in the history.
        let idea_row = sqlx::query_as::<_, IdeaRow>(&format!(
            "UPDATE ideas SET status = $1, rating = $2, recommendation = $3, comments = $4,
                 nurture_notes = $5, evaluated_by = $6, evaluated_at = $7, updated_at = $7,
                 version = version + 1
             WHERE id = $8
             RETURNING {IDEA_COLUMNS}"
        ))
        .bind(evaluation.recommendation.target_status().as_str())
        .bind(i16::from(evaluation.rating))
        .bind(evaluation.recommendation.as_str())
        .bind(evaluation.comments.as_deref())
        .bind(evaluation.nurture_notes.as_deref())
        .bind(i64::from(evaluation.evaluator_id))
        .bind(evaluation.created_at)
        .bind(i64::from(evaluation.idea_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let Some(idea_row) = idea_row else {
            tx.rollback().await.map_err(map_sqlx)?;
            return Err(DomainError::NotFound("idea not found".into()));
        };

        let evaluation_row = sqlx::query_as::<_, EvaluationRow>(&format!(
            "INSERT INTO idea_evaluations
                 (idea_id, evaluator_id, rating, recommendation, comments, nurture_notes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(i64::from(evaluation.idea_id))
        .bind(i64::from(evaluation.evaluator_id))
        .bind(i16::from(evaluation.rating))
        .bind(evaluation.recommendation.as_str())
        .bind(evaluation.comments.as_deref())
        .bind(evaluation.nurture_notes.as_deref())
        .bind(evaluation.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok((
            Idea::try_from(idea_row)?,
            Evaluation::try_from(evaluation_row)?,
        ))
    }

    async fn list_evaluations(&self, idea_id: IdeaId) -> DomainResult<Vec<Evaluation>> {
        let rows = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM idea_evaluations
             WHERE idea_id = $1
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(i64::from(idea_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(Evaluation::try_from)
            .collect::<Result<Vec<_>, _>>()
    }
}
