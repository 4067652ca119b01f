pub mod auth;
pub mod categories;
pub mod stats;
pub mod todos;
pub mod trash;
pub mod users;
