pub mod chunk;
pub mod openai;
pub mod pinecone;
pub mod pipeline;
pub mod preprocess;
pub mod routes;
pub mod traits;
