pub mod app;
pub mod logging;
pub mod output;
pub mod request;
pub mod utils;
