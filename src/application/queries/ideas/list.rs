use super::IdeaQueryService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, CursorPage, IdeaDto, pagination::normalize_limit},
        error::{ApplicationError, ApplicationResult},
        queries::decode_cursor,
    },
    domain::idea::{IdeaListFilter, IdeaStatus},
};

pub struct ListIdeasForReviewQuery {
    /// Empty means ideas awaiting evaluation.
    pub statuses: Vec<IdeaStatus>,
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

pub struct ListMyIdeasQuery {
    pub status: Option<IdeaStatus>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl IdeaQueryService {
    /// The evaluation queue. Coordinators see their own college; holders of
    /// `ideas:read:any` see every college.
    pub async fn list_for_review(
        &self,
        actor: &AuthenticatedUser,
        query: ListIdeasForReviewQuery,
    ) -> ApplicationResult<CursorPage<IdeaDto>> {
        let college_id = if actor.has_capability("ideas", "read:any") {
            None
        } else {
            ensure_capability(actor, "ideas", "read:college")?;
            Some(actor.college_id.ok_or_else(|| {
                ApplicationError::forbidden("coordinator is not assigned to a college")
            })?)
        };

        let statuses = if query.statuses.is_empty() {
            IdeaStatus::AWAITING_EVALUATION.to_vec()
        } else {
            query.statuses
        };
        let filter = IdeaListFilter {
            statuses,
            college_id,
            student_id: None,
            category: query
                .category
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty()),
        };

        let cursor = decode_cursor(query.cursor.as_deref())?;
        let (ideas, next) = self
            .idea_repo
            .list_page(&filter, normalize_limit(query.limit), cursor)
            .await?;
        Ok(CursorPage::from_domain(ideas, next))
    }

    pub async fn list_mine(
        &self,
        actor: &AuthenticatedUser,
        query: ListMyIdeasQuery,
    ) -> ApplicationResult<CursorPage<IdeaDto>> {
        ensure_capability(actor, "ideas", "read:own")?;

        let filter = IdeaListFilter {
            statuses: query.status.into_iter().collect(),
            student_id: Some(actor.id),
            ..Default::default()
        };
        let cursor = decode_cursor(query.cursor.as_deref())?;
        let (ideas, next) = self
            .idea_repo
            .list_page(&filter, normalize_limit(query.limit), cursor)
            .await?;
        Ok(CursorPage::from_domain(ideas, next))
    }
}
