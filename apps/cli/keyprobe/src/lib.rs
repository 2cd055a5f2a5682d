pub mod cli;
pub mod error;
pub mod logger;
pub mod render;

#[cfg(test)]
mod tests;
