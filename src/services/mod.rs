pub mod audit;
pub mod rate_limit;
pub mod scraper;
pub mod tweet_details;
