mod scan_store;
pub mod seed;

pub use scan_store::ScanStore;
pub use seed::{seed_from_source, ScanSeed};
