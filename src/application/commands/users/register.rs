use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, RequestContext, UserDto},
        error::{ApplicationError, ApplicationResult},
        services::audit_trail::AuditTrail,
    },
    domain::{
        audit::{AuditAction, NewAuditLogEntry},
        user::{DisplayName, NewUser, PasswordHash, Role, User, Username},
    },
};
use tracing::info;

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub college_id: Option<i64>,
}

impl UserCommandService {
    /// The very first account becomes the super admin. Every later account
    /// must be created by someone holding `users:create`.
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
        ctx: &RequestContext,
    ) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;
        let display_name = DisplayName::new(
            command
                .display_name
                .unwrap_or_else(|| username.as_str().to_string()),
        )?;

        let existing = self.user_repo.count().await?;
        let role = self.determine_role(existing, actor, command.role)?;
        self.ensure_username_available(existing, &username).await?;

        let user = self
            .create_and_insert_user(
                username,
                display_name,
                &command.password,
                role,
                command.college_id,
            )
            .await?;
        info!(user_id = %user.id, role = %user.role, "user registered");

        let description = format!("Created user {} with role {}", user.username, user.role);
        let entry = match actor {
            Some(actor) => {
                AuditTrail::entry(actor, ctx, AuditAction::UserCreate, "user", description)
            }
            None => NewAuditLogEntry::new(AuditAction::UserCreate, "user", description)
                .by_user(user.id, user.username.to_string())
                .client(ctx.ip_address.clone(), ctx.user_agent.clone()),
        };
        self.audit
            .record(entry.resource_id(user.id.into()).meta("role", user.role.as_str()))
            .await;

        Ok(user.into())
    }

    fn determine_role(
        &self,
        existing: u64,
        actor: Option<&AuthenticatedUser>,
        role: Option<Role>,
    ) -> ApplicationResult<Role> {
        if existing == 0 {
            return Ok(Role::SuperAdmin);
        }
        let requester = actor
            .ok_or_else(|| ApplicationError::forbidden("administrative privileges are required"))?;
        ensure_capability(requester, "users", "create")?;
        Ok(role.unwrap_or_default())
    }

    async fn ensure_username_available(
        &self,
        existing: u64,
        username: &Username,
    ) -> ApplicationResult<()> {
        if existing == 0 {
            return Ok(());
        }

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        Ok(())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        display_name: DisplayName,
        password: &str,
        role: Role,
        college_id: Option<i64>,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let created_at = self.clock.now();
        let new_user = NewUser::new(
            username,
            display_name,
            password_hash,
            role,
            college_id,
            created_at,
        )?;
        Ok(self.user_repo.insert(new_user).await?)
    }
}
