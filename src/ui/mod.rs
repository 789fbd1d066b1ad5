//! Rendering layer: panels, page views, and chart drawing.

pub mod charts;
pub mod panels;
pub mod views;
