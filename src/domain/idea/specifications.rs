use std::collections::HashSet;

use crate::domain::idea::entity::Idea;
use crate::domain::user::value_objects::{Capability, UserId};

/// Who is asking, as far as idea access rules are concerned.
#[derive(Debug, Clone, Copy)]
pub struct IdeaActor<'a> {
    pub capabilities: &'a HashSet<Capability>,
    pub user_id: UserId,
    pub college_id: Option<i64>,
}

impl IdeaActor<'_> {
    fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }

    fn same_college(&self, idea: &Idea) -> bool {
        matches!((self.college_id, idea.college_id), (Some(a), Some(b)) if a == b)
    }

    /// `verb:any` always passes; `verb:college` needs the idea to belong to the
    /// actor's college.
    fn scoped(&self, verb: &str, idea: &Idea) -> bool {
        self.has_capability("ideas", &format!("{verb}:any"))
            || (self.has_capability("ideas", &format!("{verb}:college")) && self.same_college(idea))
    }
}

pub struct CanViewIdeaSpec<'a> {
    actor: IdeaActor<'a>,
    idea: &'a Idea,
}

impl<'a> CanViewIdeaSpec<'a> {
    pub fn new(actor: IdeaActor<'a>, idea: &'a Idea) -> Self {
        Self { actor, idea }
    }

    pub fn is_satisfied(&self) -> bool {
        self.actor.scoped("read", self.idea)
            || (self.actor.has_capability("ideas", "read:own")
                && self.idea.student_id == self.actor.user_id)
    }
}

pub struct CanReviewIdeaSpec<'a> {
    actor: IdeaActor<'a>,
    idea: &'a Idea,
}

impl<'a> CanReviewIdeaSpec<'a> {
    pub fn new(actor: IdeaActor<'a>, idea: &'a Idea) -> Self {
        Self { actor, idea }
    }

    pub fn is_satisfied(&self) -> bool {
        self.actor.scoped("review", self.idea)
    }
}

pub struct CanEvaluateIdeaSpec<'a> {
    actor: IdeaActor<'a>,
    idea: &'a Idea,
}

impl<'a> CanEvaluateIdeaSpec<'a> {
    pub fn new(actor: IdeaActor<'a>, idea: &'a Idea) -> Self {
        Self { actor, idea }
    }

    pub fn is_satisfied(&self) -> bool {
        self.actor.scoped("evaluate", self.idea)
    }
}
