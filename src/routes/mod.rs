mod pages;

pub use pages::{index, predict};
