pub mod assembler;
pub mod extractor;
pub mod folders;
pub mod renderer;

pub use assembler::DocumentAssembler;
pub use extractor::SectionExtractor;
pub use folders::{list_paper_folders, sorted_content_folders, PaperFolder};
