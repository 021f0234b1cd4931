use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, RequestContext, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditStatus, NewAuditLogEntry},
        user::{User, Username},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(
        &self,
        command: LoginUserCommand,
        ctx: &RequestContext,
    ) -> ApplicationResult<LoginResult> {
        let username = Username::new(command.username)?;

        let user = match self
            .find_and_authenticate_user(&username, &command.password)
            .await
        {
            Ok(user) => user,
            Err(err) => {
                if matches!(
                    err,
                    ApplicationError::Unauthorized(_) | ApplicationError::Forbidden(_)
                ) {
                    warn!(username = %username, "login rejected");
                    self.audit
                        .record(
                            NewAuditLogEntry::new(
                                AuditAction::LoginFailed,
                                "user",
                                format!("Failed login attempt for {username}"),
                            )
                            .user_name(username.to_string())
                            .status(AuditStatus::Failed)
                            .client(ctx.ip_address.clone(), ctx.user_agent.clone()),
                        )
                        .await;
                }
                return Err(err);
            }
        };

        let session_id = Uuid::new_v4().to_string();
        let token = self.issue_session_token(&user, &session_id).await?;
        info!(user_id = %user.id, "user logged in");

        self.audit
            .record(
                NewAuditLogEntry::new(
                    AuditAction::Login,
                    "user",
                    format!("{} logged in", user.username),
                )
                .by_user(user.id, user.username.to_string())
                .resource_id(user.id.into())
                .client(ctx.ip_address.clone(), ctx.user_agent.clone()),
            )
            .await;

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    async fn issue_session_token(
        &self,
        user: &User,
        session_id: &str,
    ) -> ApplicationResult<AuthTokenDto> {
        let subject = TokenSubject {
            user_id: user.id,
            username: user.username.to_string(),
            role: user.role,
            college_id: user.college_id,
            capabilities: user.role.default_capabilities(),
            session_id: Some(session_id.to_string()),
        };

        self.token_manager.issue(subject).await
    }

    async fn find_and_authenticate_user(
        &self,
        username: &Username,
        password: &str,
    ) -> ApplicationResult<User> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        if !user.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        self.password_hasher
            .verify(password, user.password_hash.as_str())
            .await?;

        Ok(user)
    }
}
