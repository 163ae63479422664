pub mod config;
pub mod filters;
pub mod io;
pub mod lang;
pub mod pipeline;
pub mod utils;

pub use pipeline::{clean_language, filter_object_titles, run_filter, FilterReport};
