pub mod board;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod scorer;
pub mod tour;
pub mod trace;
