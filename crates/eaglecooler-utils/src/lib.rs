pub mod atomic_write;
pub mod error;
pub mod json_file;
pub mod logging;
pub mod paths;
pub mod time;
