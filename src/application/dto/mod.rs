pub mod audit;
pub mod auth;
pub mod context;
pub mod ideas;
pub mod notifications;
pub mod pagination;
pub mod serde_time;
pub mod users;

pub use audit::{AuditLogDto, CsvExport};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use context::RequestContext;
pub use ideas::{EvaluationDto, EvaluationOutcomeDto, IdeaDto};
pub use notifications::{NotificationDto, UnreadCountDto};
pub use pagination::CursorPage;
pub use users::{CapabilityView, UserDto, UserProfileDto};
