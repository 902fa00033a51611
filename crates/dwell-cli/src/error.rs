use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] dwellmd::engine::config::ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] dwellmd::engine::error::EngineError),

    #[error("Plot error: {0}")]
    Plot(#[from] dwellmd::core::plot::chart::PlotError),
}
