// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rebuilds the caller from the facts of a verified token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    let missing = |what: &str| ApplicationError::unauthorized(format!("missing {what}"));
    let user_id = ctx.user_id.ok_or_else(|| missing("user id"))?;
    let username = ctx.username.ok_or_else(|| missing("username"))?;
    let role = ctx.role.ok_or_else(|| missing("role"))?;
    let issued_at = ctx.issued_at.ok_or_else(|| missing("issued_at"))?;
    let expires_at = ctx.expires_at.ok_or_else(|| missing("expires_at"))?;

    let mut capabilities = role.default_capabilities();
    capabilities.extend(ctx.capabilities);

    Ok(AuthenticatedUser {
        id: UserId::new(user_id)?,
        username,
        role,
        college_id: ctx.college_id,
        capabilities,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
        session_id: ctx.session_id,
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
    college_id: Option<i64>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    session_id: Option<String>,
    capabilities: HashSet<Capability>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply(fact.predicate);
        }
        ctx
    }

    fn apply(&mut self, predicate: Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user_id = Some(*id);
                self.username = Some(name.clone());
            }
            ("role", [Term::Str(role)]) => self.role = role.parse().ok(),
            ("college", [Term::Integer(id)]) => self.college_id = Some(*id),
            ("issued_at", [Term::Date(secs)]) => self.issued_at = Some(at(*secs)),
            ("expires_at", [Term::Date(secs)]) => self.expires_at = Some(at(*secs)),
            ("session", [Term::Str(sid)]) => self.session_id = Some(sid.clone()),
            ("right", [Term::Str(resource), Term::Str(action)]) => {
                self.capabilities
                    .insert(Capability::new(resource.clone(), action.clone()));
            }
            _ => {}
        }
    }
}

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}
