// tests/support/mocks/repos.rs
//! In-memory repositories that honour the same ordering, filtering and
//! version-guard contracts as the PostgreSQL adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ideaflow_core::domain::{
    audit::{AuditLogEntry, AuditLogFilter, AuditLogRepository, NewAuditLogEntry},
    cursor::{PageCursor, split_page},
    errors::{DomainError, DomainResult},
    idea::{
        Evaluation, Idea, IdeaId, IdeaListFilter, IdeaRepository, IdeaStatus, IdeaTransition,
        NewEvaluation, NewIdea,
    },
    notification::{NewNotification, Notification, NotificationRepository},
    user::{DisplayName, NewUser, PasswordHash, User, UserId, UserRepository, UserUpdate, Username},
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use super::security::TEST_ACTORS;
use super::time::fixed_now;

/// Password every seeded actor can log in with.
pub const SEEDED_PASSWORD: &str = "Seeded!Passw0rd";

/// Newest first, then keyset-paginated with a `limit + 1` probe.
fn page_newest_first<T: Clone>(
    mut rows: Vec<T>,
    limit: u32,
    cursor: Option<PageCursor>,
    position: impl Fn(&T) -> PageCursor,
) -> (Vec<T>, Option<PageCursor>) {
    rows.sort_by(|a, b| {
        let (a, b) = (position(a), position(b));
        (b.created_at, b.id).cmp(&(a.created_at, a.id))
    });
    let rows: Vec<T> = rows
        .into_iter()
        .filter(|row| {
            let at = position(row);
            cursor.is_none_or(|c| c.precedes(at.created_at, at.id))
        })
        .take(limit as usize + 1)
        .collect();
    split_page(rows, limit, position)
}

/* -------------------------------- users -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// One user per pre-authenticated test actor.
    pub fn seeded() -> Self {
        let users = TEST_ACTORS
            .iter()
            .map(|(_, id, username, role, college)| User {
                id: UserId::new(*id).unwrap(),
                username: Username::new(*username).unwrap(),
                display_name: DisplayName::new(username.to_uppercase()).unwrap(),
                password_hash: PasswordHash::new(format!("hashed:{SEEDED_PASSWORD}")).unwrap(),
                role: *role,
                college_id: *college,
                is_active: true,
                created_at: fixed_now(),
            })
            .collect();
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;
        let user = User {
            id: UserId::new(id)?,
            username: new_user.username,
            display_name: new_user.display_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            college_id: new_user.college_id,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        if let Some(display_name) = update.display_name {
            user.display_name = display_name;
        }
        Ok(user.clone())
    }
}

/* -------------------------------- ideas -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryIdeaRepo {
    ideas: Mutex<Vec<Idea>>,
    evaluations: Mutex<Vec<Evaluation>>,
    race_next_read: AtomicBool,
}

impl InMemoryIdeaRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every evaluation row written so far, in write order.
    pub fn evaluations(&self) -> Vec<Evaluation> {
        self.evaluations.lock().unwrap().clone()
    }

    pub fn idea(&self, id: i64) -> Option<Idea> {
        self.ideas
            .lock()
            .unwrap()
            .iter()
            .find(|idea| idea.id.0 == id)
            .cloned()
    }

    /// The next `find_by_id` hands out the current idea and then lets another
    /// writer bump its version behind the caller's back.
    pub fn race_next_read(&self) {
        self.race_next_read.store(true, Ordering::SeqCst);
    }

    /// Simulates another writer touching the idea behind the caller's back.
    pub fn bump_version(&self, id: i64) {
        if let Some(idea) = self
            .ideas
            .lock()
            .unwrap()
            .iter_mut()
            .find(|idea| idea.id.0 == id)
        {
            idea.version += 1;
        }
    }

    fn guarded(&self, transition: &IdeaTransition) -> DomainResult<Idea> {
        let mut ideas = self.ideas.lock().unwrap();
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id == transition.id)
            .ok_or_else(|| DomainError::NotFound("idea not found".into()))?;
        if idea.version != transition.expected_version {
            return Err(DomainError::Conflict(
                "idea was modified concurrently; reload and retry".into(),
            ));
        }
        idea.status = transition.status;
        idea.updated_at = transition.updated_at;
        idea.version += 1;
        Ok(idea.clone())
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepo {
    async fn insert(&self, new: NewIdea) -> DomainResult<Idea> {
        let mut ideas = self.ideas.lock().unwrap();
        let id = ideas.iter().map(|idea| idea.id.0).max().unwrap_or(0) + 1;
        let idea = Idea {
            id: IdeaId::new(id)?,
            title: new.title,
            description: new.description,
            category: new.category,
            status: IdeaStatus::Submitted,
            student_id: new.student_id,
            college_id: new.college_id,
            rating: None,
            recommendation: None,
            comments: None,
            nurture_notes: None,
            evaluated_by: None,
            evaluated_at: None,
            version: 1,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        ideas.push(idea.clone());
        Ok(idea)
    }

    async fn find_by_id(&self, id: IdeaId) -> DomainResult<Option<Idea>> {
        let found = self.idea(id.0);
        if self.race_next_read.swap(false, Ordering::SeqCst) {
            self.bump_version(id.0);
        }
        Ok(found)
    }

    async fn list_page(
        &self,
        filter: &IdeaListFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Idea>, Option<PageCursor>)> {
        let rows: Vec<Idea> = self
            .ideas
            .lock()
            .unwrap()
            .iter()
            .filter(|idea| filter.matches(idea))
            .cloned()
            .collect();
        Ok(page_newest_first(rows, limit, cursor, |idea| {
            PageCursor::new(idea.created_at, idea.id.0)
        }))
    }

    async fn transition(&self, transition: IdeaTransition) -> DomainResult<Idea> {
        self.guarded(&transition)
    }

    async fn record_evaluation(
        &self,
        evaluation: NewEvaluation,
    ) -> DomainResult<(Idea, Evaluation)> {
        let idea = {
            let mut ideas = self.ideas.lock().unwrap();
            let idea = ideas
                .iter_mut()
                .find(|idea| idea.id == evaluation.idea_id)
                .ok_or_else(|| DomainError::NotFound("idea not found".into()))?;
            idea.status = evaluation.recommendation.target_status();
            idea.rating = Some(evaluation.rating);
            idea.recommendation = Some(evaluation.recommendation);
            idea.comments = evaluation.comments.clone();
            idea.nurture_notes = evaluation.nurture_notes.clone();
            idea.evaluated_by = Some(evaluation.evaluator_id);
            idea.evaluated_at = Some(evaluation.created_at);
            idea.updated_at = evaluation.created_at;
            idea.version += 1;
            idea.clone()
        };

        let mut evaluations = self.evaluations.lock().unwrap();
        let stored = Evaluation {
            id: evaluations.len() as i64 + 1,
            idea_id: evaluation.idea_id,
            evaluator_id: evaluation.evaluator_id,
            rating: evaluation.rating,
            recommendation: evaluation.recommendation,
            comments: evaluation.comments,
            nurture_notes: evaluation.nurture_notes,
            created_at: evaluation.created_at,
        };
        evaluations.push(stored.clone());
        Ok((idea, stored))
    }

    async fn list_evaluations(&self, idea_id: IdeaId) -> DomainResult<Vec<Evaluation>> {
        Ok(self
            .evaluations
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.idea_id == idea_id)
            .cloned()
            .collect())
    }
}

/* -------------------------------- audit -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryAuditRepo {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|e| e.action.as_str().to_string())
            .collect()
    }

    fn store(&self, entry: NewAuditLogEntry) -> AuditLogEntry {
        let mut entries = self.entries.lock().unwrap();
        let stored = AuditLogEntry {
            id: entries.len() as i64 + 1,
            user_id: entry.user_id,
            user_name: entry.user_name,
            action: entry.action,
            resource_type: entry.resource_type,
            resource_id: entry.resource_id,
            description: entry.description,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            status: entry.status,
            metadata: entry.metadata,
            created_at: entry.created_at.unwrap_or_else(fixed_now),
        };
        entries.push(stored.clone());
        stored
    }

    fn matching(&self, filter: &AuditLogFilter) -> Vec<AuditLogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }
}

fn audit_position(entry: &AuditLogEntry) -> PageCursor {
    PageCursor::new(entry.created_at, entry.id)
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditRepo {
    async fn insert(&self, entry: NewAuditLogEntry) -> DomainResult<AuditLogEntry> {
        Ok(self.store(entry))
    }

    async fn list(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditLogEntry>, Option<PageCursor>)> {
        Ok(page_newest_first(
            self.matching(filter),
            limit,
            cursor,
            audit_position,
        ))
    }

    async fn export(
        &self,
        filter: &AuditLogFilter,
        max_rows: u32,
    ) -> DomainResult<Vec<AuditLogEntry>> {
        let (rows, _) = page_newest_first(self.matching(filter), max_rows, None, audit_position);
        Ok(rows)
    }
}

/* -------------------------------- notifications -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryNotificationRepo {
    items: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.items.lock().unwrap().clone()
    }

    pub fn for_user(&self, user_id: i64) -> Vec<Notification> {
        self.all()
            .into_iter()
            .filter(|n| n.user_id.0 == user_id)
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepo {
    async fn insert(&self, new: NewNotification) -> DomainResult<Notification> {
        let mut items = self.items.lock().unwrap();
        let notification = Notification {
            id: items.len() as i64 + 1,
            user_id: new.user_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            data: new.data,
            is_read: false,
            created_at: new.created_at,
            read_at: None,
        };
        items.push(notification.clone());
        Ok(notification)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        unread_only: bool,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Notification>, Option<PageCursor>)> {
        let rows: Vec<Notification> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .cloned()
            .collect();
        Ok(page_newest_first(rows, limit, cursor, |n| {
            PageCursor::new(n.created_at, n.id)
        }))
    }

    async fn count_unread(&self, user_id: UserId) -> DomainResult<u64> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as u64)
    }

    async fn mark_read(
        &self,
        id: i64,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Notification>> {
        let mut items = self.items.lock().unwrap();
        Ok(items
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .map(|n| {
                n.mark_read(now);
                n.clone()
            }))
    }
}
