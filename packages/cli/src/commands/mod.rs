pub mod add;
pub mod export;
pub mod init;
pub mod lint;

pub use add::{add, AddArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};
