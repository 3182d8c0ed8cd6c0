//! Reading the raw review dataset and writing the cleaned one.
//!
//! Both ends speak comma-separated UTF-8 CSV with a header row.

mod loader;
mod saver;

pub use loader::DataLoader;
pub use saver::DataSaver;
