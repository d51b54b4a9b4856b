pub mod returns;
pub mod users;
