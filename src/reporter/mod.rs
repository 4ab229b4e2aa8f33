//! Result rendering.

mod terminal;

pub use terminal::print_results;
