// Application layer: the interactive shell and output rendering.

pub mod report;
pub mod shell;

pub use shell::Shell;
