pub mod cli;
pub mod filter;
