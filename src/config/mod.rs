//! Configuration management for the Life simulator

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SimulationConfig,
};
