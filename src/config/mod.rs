/// Main configuration module.
/// 
/// Re-exports submodules for arena, display and driver configuration.
pub mod arena;
pub mod display;
pub mod driver;
