//! Built-in project types.

pub mod cli;
pub mod html;
pub mod library;
pub mod node;
pub mod webapp;

pub use cli::CliProvider;
pub use html::{HtmlProvider, Page};
pub use library::LibraryProvider;
pub use node::NodeProvider;
pub use webapp::WebappProvider;
