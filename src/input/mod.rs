pub mod model;

pub use model::UserTaskInput;
