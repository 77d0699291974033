pub mod actions;
pub mod assistant;
pub mod calendar;
pub mod config;
pub mod error;
pub mod extractor;
pub mod intent;
pub mod startup;
pub mod status;
pub mod timewindow;
