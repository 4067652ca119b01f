pub mod todo_handler;

pub use todo_handler::*;
