pub mod app;
pub mod channel;
pub mod config;
pub mod constants;
pub mod keys;
pub mod menu;
pub mod modes;
pub mod observer;
pub mod selection;
pub mod store;
pub mod tool;
pub mod widgets;
