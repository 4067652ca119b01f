pub mod todo_query;
pub mod todo_service;

pub use todo_service::TodoService;
