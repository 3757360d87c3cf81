//! Data model for the extraction pipeline.
//!
//! These types bridge the pipeline stages: rendered pages come in as
//! [`PageRaster`], textual cues as [`TextReference`], detection produces
//! candidate [`Region`] values, and each successful crop becomes an
//! [`ExtractedElement`] in the run's metadata document.

mod element;
mod raster;
mod reference;
mod region;

pub use element::ExtractedElement;
pub use raster::PageRaster;
pub use reference::TextReference;
pub use region::{Region, RegionKind};
