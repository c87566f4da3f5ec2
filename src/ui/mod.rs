//! UI module - card rendering and shared widgets

pub mod card;
pub mod components;
