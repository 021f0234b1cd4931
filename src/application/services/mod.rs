// src/application/services/mod.rs
pub mod audit_trail;

use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            ideas::IdeaCommandService, notifications::NotificationCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        error::ApplicationError,
        ports::{
            security::{PasswordHasher, TokenManager},
            session_revocation::SessionRevocationStore,
            time::Clock,
        },
        queries::{
            audit::AuditQueryService, ideas::IdeaQueryService,
            notifications::NotificationQueryService, users::UserQueryService,
        },
    },
    domain::{
        audit::AuditLogRepository, idea::IdeaRepository, notification::NotificationRepository,
        user::UserRepository,
    },
};

use self::audit_trail::AuditTrail;

/// Repository adapters the services are assembled from.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub ideas: Arc<dyn IdeaRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub idea_commands: Arc<IdeaCommandService>,
    pub notification_commands: Arc<NotificationCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub idea_queries: Arc<IdeaQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub notification_queries: Arc<NotificationQueryService>,
    token_manager: Arc<dyn TokenManager>,
    session_revocation_store: Arc<dyn SessionRevocationStore>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        session_revocation_store: Arc<dyn SessionRevocationStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let audit = Arc::new(AuditTrail::new(
            Arc::clone(&repos.audit_logs),
            Arc::clone(&clock),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            password_hasher,
            Arc::clone(&token_manager),
            Arc::clone(&session_revocation_store),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        let notification_commands = Arc::new(NotificationCommandService::new(
            Arc::clone(&repos.notifications),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        let idea_commands = Arc::new(IdeaCommandService::new(
            Arc::clone(&repos.ideas),
            Arc::clone(&notification_commands),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));

        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&clock),
        ));
        let idea_queries = Arc::new(IdeaQueryService::new(Arc::clone(&repos.ideas)));
        let audit_queries = Arc::new(AuditQueryService::new(
            Arc::clone(&repos.audit_logs),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        let notification_queries = Arc::new(NotificationQueryService::new(Arc::clone(
            &repos.notifications,
        )));

        Self {
            user_commands,
            idea_commands,
            notification_commands,
            user_queries,
            idea_queries,
            audit_queries,
            notification_queries,
            token_manager,
            session_revocation_store,
        }
    }

    /// Verify a raw bearer token and reject it when its session was revoked.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let user = self.token_manager.authenticate(token).await?;
        self.ensure_session_not_revoked(&user).await?;
        Ok(user)
    }

    async fn ensure_session_not_revoked(&self, user: &AuthenticatedUser) -> ApplicationResult<()> {
        if let Some(session_id) = &user.session_id {
            if self.session_revocation_store.is_revoked(session_id).await? {
                return Err(ApplicationError::unauthorized("session revoked"));
            }
        }
        Ok(())
    }
}
