pub mod fetcher;
pub mod markdown;
pub mod routes;
