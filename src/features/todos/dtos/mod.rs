pub mod todo_dto;

pub use todo_dto::*;
