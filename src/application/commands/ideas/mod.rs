mod evaluate;
mod review;
mod service;
mod submit;

pub use evaluate::{EVALUATION_FIELDS_REQUIRED, EvaluateIdeaCommand};
pub use service::IdeaCommandService;
pub use submit::SubmitIdeaCommand;
