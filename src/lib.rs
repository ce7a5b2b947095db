pub mod config;
pub mod events;
pub mod gui;
pub mod owner;
pub mod sys;
pub mod theory;
