pub mod auth;
pub mod review;
pub mod template;

pub use auth::AuthCommands;
pub use review::ReviewCommands;
pub use template::TemplateCommands;
