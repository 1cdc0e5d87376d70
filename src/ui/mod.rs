//! Presentation widgets and palette

pub mod search_bar;
pub mod theme;
