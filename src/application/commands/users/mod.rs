mod login;
mod logout;
mod password;
mod register;
mod service;
mod update;

pub use login::{LoginResult, LoginUserCommand};
pub use register::RegisterUserCommand;
pub use service::UserCommandService;
pub use update::UpdateProfileCommand;
