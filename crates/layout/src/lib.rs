//! Kontura Layout Engine
//!
//! Models a printable page as a tree of areas: image slots, regular
//! grids, and binary splits. The tree is arena-owned; every structural
//! mutation keeps child bounds, tree depths, and location strings
//! consistent.

mod error;
mod grid;
mod node;
mod page;
mod split;
mod tree;

pub use error::{LayoutError, LayoutResult};
pub use node::{
    location_suffix, AreaId, AreaKind, AreaNode, ImagePixels, ImageRef, SplitOrientation,
};
pub use page::{PageLayout, DEFAULT_BORDER_WIDTH, DEFAULT_SPLIT_PERCENT};
pub use tree::AreaTree;
