pub mod crawler;
pub mod line_client;
pub mod page_enumerator;
pub mod page_fetcher;
pub mod summarizer;
pub mod tag_extractor;

pub use crawler::*;
pub use line_client::*;
pub use page_enumerator::*;
pub use page_fetcher::*;
pub use summarizer::*;
pub use tag_extractor::*;
