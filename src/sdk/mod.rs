pub mod config;
pub mod console;
pub mod planner;
pub mod routing;
pub mod util;
