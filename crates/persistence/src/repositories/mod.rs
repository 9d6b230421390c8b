//! Repository implementations for database operations.

pub mod app;
pub mod app_screenshot;
pub mod app_version;
pub mod category;
pub mod download;
pub mod page_view;

pub use app::{AppListFilter, AppRepository};
pub use app_screenshot::AppScreenshotRepository;
pub use app_version::AppVersionRepository;
pub use category::CategoryRepository;
pub use download::{DownloadRepository, NewDownload};
pub use page_view::{NewPageView, PageViewRepository};
