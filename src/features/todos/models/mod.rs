pub mod todo;

pub use todo::{Priority, Todo};
