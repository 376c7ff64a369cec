pub mod client;
pub mod crawl;
pub mod error;
pub mod export;
pub mod extract;
pub mod locate;
pub mod resolve;
pub mod selectors;

mod text;

pub use client::PageClient;
pub use crawl::{crawl_urls, CrawlOptions};
pub use error::ScraperError;
pub use export::{write_csv, write_csv_file};
pub use extract::extract_listings;
pub use locate::locate;
pub use resolve::resolve;
pub use selectors::SelectorConfig;
