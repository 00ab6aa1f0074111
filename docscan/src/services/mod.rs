mod scan;

pub use scan::{ScanResult, ScanService};
