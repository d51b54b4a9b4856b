pub mod contractor;
pub mod notification;
pub mod user;
