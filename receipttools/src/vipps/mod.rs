mod command_handler;
mod config;

pub use command_handler::handle_command;
pub use config::storage_path_from_env;
