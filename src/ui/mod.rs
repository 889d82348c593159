//! Terminal presentation: layout helpers, styling, rendering and repainting.

pub mod context;
pub mod layout;
pub mod live_region;
pub mod primitives;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod widgets;
