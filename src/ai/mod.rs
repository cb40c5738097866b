mod generator;

pub use generator::{Generator, NO_CONTENT_PLACEHOLDER};
