pub mod chain;
pub mod classifier;
pub mod resolver;
