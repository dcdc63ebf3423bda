pub mod activity_commands;
