pub mod font;
pub mod raster;
pub mod store;
