pub mod extractor;
pub mod fetcher;
pub mod pacer;

pub use extractor::extract_user_id;
pub use fetcher::PublicationFetcher;
pub use pacer::{FixedDelay, NoDelay, Pacer};
