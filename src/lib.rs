pub mod columns;
pub mod config;
pub mod fetch;
pub mod http;
pub mod posts;
pub mod report;
pub mod sample_feed;
pub mod scoring;
pub mod table;
