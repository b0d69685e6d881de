pub mod input;
pub mod output;

pub use input::read_transcript;
pub use output::{render_report_text, write_report};
