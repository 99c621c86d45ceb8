pub mod config_commands;
pub mod install_command;
pub mod version_command;
