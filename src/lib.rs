pub mod config;
pub mod logging;
pub mod output;
pub mod questionnaire;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
