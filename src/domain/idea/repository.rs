use crate::domain::cursor::PageCursor;
use crate::domain::errors::DomainResult;
use crate::domain::idea::entity::{Idea, IdeaListFilter, IdeaTransition, NewIdea};
use crate::domain::idea::evaluation::{Evaluation, NewEvaluation};
use crate::domain::idea::value_objects::IdeaId;
use async_trait::async_trait;

#[async_trait]
pub trait IdeaRepository: Send + Sync {
    async fn insert(&self, idea: NewIdea) -> DomainResult<Idea>;

    async fn find_by_id(&self, id: IdeaId) -> DomainResult<Option<Idea>>;

    /// Newest first. Returns the page and the cursor for the next one.
    async fn list_page(
        &self,
        filter: &IdeaListFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Idea>, Option<PageCursor>)>;

    /// Fails with `Conflict` when the stored version differs from
    /// `transition.expected_version`.
    async fn transition(&self, transition: IdeaTransition) -> DomainResult<Idea>;

    /// Appends the evaluation and overwrites the idea's current evaluation in
    /// one unit of work. Unversioned: the last evaluation written wins.
    async fn record_evaluation(
        &self,
        evaluation: NewEvaluation,
    ) -> DomainResult<(Idea, Evaluation)>;

    /// Oldest first.
    async fn list_evaluations(&self, idea_id: IdeaId) -> DomainResult<Vec<Evaluation>>;
}
