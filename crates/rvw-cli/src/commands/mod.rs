pub mod auth;
pub mod chat;
pub mod dispatch;
pub mod health;
pub mod review;
pub mod shared;
pub mod template;
