pub mod content;
pub mod paper;

pub use content::{ClassifyMode, ContentLine, ImageRef, QuestionCounter, Role, SectionContent};
pub use paper::{ChoiceDoc, ChoiceQuestion, PictureDoc, QaDoc, SpeakingDoc};
