mod load;
mod types;

pub use types::{
    DEFAULT_LANGUAGE, DEFAULT_MODEL, DEFAULT_OUTPUT_DIR, DEFAULT_POLL_INTERVAL_SECS, Settings,
};
