pub mod board;
pub mod item;
pub mod summary;

pub use board::*;
pub use item::*;
pub use summary::*;
