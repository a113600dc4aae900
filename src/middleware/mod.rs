pub mod options;

pub use options::options_middleware;
