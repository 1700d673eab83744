pub mod audio;
pub mod cli;
pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
