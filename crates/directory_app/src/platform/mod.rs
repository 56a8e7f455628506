mod app;
mod effects;
mod render;
mod settings;

pub use app::run_app;
pub use settings::SETTINGS_FILE;
