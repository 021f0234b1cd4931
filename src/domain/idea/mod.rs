pub mod entity;
pub mod evaluation;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Idea, IdeaListFilter, IdeaTransition, NewIdea};
pub use evaluation::{Evaluation, NewEvaluation};
pub use repository::IdeaRepository;
pub use specifications::{CanEvaluateIdeaSpec, CanReviewIdeaSpec, CanViewIdeaSpec, IdeaActor};
pub use value_objects::{
    IdeaCategory, IdeaDescription, IdeaId, IdeaStatus, IdeaTitle, Rating, Recommendation,
};
