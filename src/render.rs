pub mod composite;
pub mod compositor;
pub mod config;
pub mod layout;
pub mod mask;
pub mod overlay;
