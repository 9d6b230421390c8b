//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod app;
pub mod app_screenshot;
pub mod app_version;
pub mod category;
pub mod download;
pub mod page_view;

pub use app::{AppCardEntity, AppEntity};
pub use app_screenshot::AppScreenshotEntity;
pub use app_version::AppVersionEntity;
pub use category::CategoryEntity;
pub use download::DownloadEntity;
pub use page_view::PageViewEntity;
