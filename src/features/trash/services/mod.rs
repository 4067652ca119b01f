pub mod trash_service;

pub use trash_service::TrashService;
