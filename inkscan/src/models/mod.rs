mod history;
mod scan;

pub use history::*;
pub use scan::*;
