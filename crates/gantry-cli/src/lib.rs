mod framework;
pub mod runner;
