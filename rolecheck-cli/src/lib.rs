pub mod cli;
pub mod console;
pub mod loader;
pub mod output;

pub use cli::Args;
pub use console::ConsoleObserver;
pub use loader::discover_documents;
pub use output::write_report;
