pub mod client;
pub mod paginator;
pub mod source;

pub use client::MondayClient;
pub use paginator::Paginator;
pub use source::BoardSource;
