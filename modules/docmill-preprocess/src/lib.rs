pub mod convert;
pub mod element;
pub mod routes;
