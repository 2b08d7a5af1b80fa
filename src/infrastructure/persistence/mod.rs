mod repositories;
mod vector_store;

pub use repositories::InMemorySessionStore;
pub use vector_store::InMemoryVectorStore;
