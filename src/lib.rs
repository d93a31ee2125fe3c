pub mod animation;
pub mod assets;
pub mod audio;
pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod generate;
pub mod persistence;
pub mod physics;
pub mod render;
