pub mod board;
pub mod domain;
pub mod error;
pub mod protocol;
