pub mod trash_handler;

pub use trash_handler::*;
