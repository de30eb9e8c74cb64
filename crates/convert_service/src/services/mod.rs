pub mod asset_locator;
pub mod conversion_service;

pub use asset_locator::{AssetLocator, PublicDirLocator};
pub use conversion_service::ConversionService;
