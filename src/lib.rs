pub mod cli;
pub mod driver;
pub mod report;

// Re-exported so the binary and the tests reach the container through this crate.
pub use growable_array;
