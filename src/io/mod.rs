pub mod babylon_loader;
pub mod config_loader;
pub mod obj_loader;
pub mod render_settings;
pub mod resource_loader;
pub mod simple_cli;
