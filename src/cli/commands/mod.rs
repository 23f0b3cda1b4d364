//! One module per subcommand.

pub mod add;
pub mod category;
pub mod completions;
pub mod delete;
pub mod init;
pub mod show;
pub mod view;
