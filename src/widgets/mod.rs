pub mod help_overlay;
pub mod mode_menu;
pub mod preview;
pub mod status_bar;
pub mod toolbar;
