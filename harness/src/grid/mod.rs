//! Parameter grid construction
//!
//! Grids are fully enumerated before a sweep starts, so iteration order is
//! fixed and matches the order of status lines and CSV rows.

pub mod axis;
pub mod builder;

pub use axis::{parse_count, parse_entries, parse_entry, parse_list, AxisEntry, SkipDirective};
pub use axis::DEFAULT_SKIP_MARKER;
pub use builder::{
    batch_series, default_grid_arities, default_leaf_counts, GridEntry, GridShape,
    ParameterGridBuilder, BATCH_SERIES_MAX_EXPONENT, DEFAULT_BATCH_NUM_LEAVES,
    DEFAULT_GRID_ARITIES, DEFAULT_LEAF_COUNTS, DEFAULT_NUM_UPDATES,
};
