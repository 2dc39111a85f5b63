pub mod fetch;
pub mod stations;

pub use fetch::fetch;
pub use stations::stations;

use crate::request::{compact, DateRange};

/// File name for one station's payload, e.g. `DEN_202107111200_202107120000.txt`.
pub fn make_output_file_name(station: &str, range: &DateRange) -> String {
    format!(
        "{}_{}_{}.txt",
        station,
        compact(range.start),
        compact(range.end)
    )
}

// -- Tests -------------------------------------------------------------------
