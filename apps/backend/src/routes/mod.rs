pub mod library;
pub mod session;
pub mod settings;
pub mod stats;
pub mod today;
pub mod uploads;
