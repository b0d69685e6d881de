pub mod segmenter;
pub mod topics;

pub use segmenter::segment_transcript;
pub use topics::{tag_topics, topic_counts};
