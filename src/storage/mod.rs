pub mod notes_loader;
pub mod quiz_store;

pub use notes_loader::load_all_notes_files;
pub use quiz_store::{QuizStore, StoredQuiz};
