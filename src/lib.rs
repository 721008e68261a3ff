pub mod board;
pub mod book;
pub mod movegen;
pub mod search;

pub use board::{Move, Position};
pub use book::{InMemoryBook, OpeningBook};
pub use search::{SearchEngine, SearchResult};
