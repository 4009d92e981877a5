pub mod question;
pub mod request;

pub use question::{QuestionRecord, QuizKind};
pub use request::GenerationRequest;
