//! Domain models for the AppHub catalog.

pub mod app;
pub mod app_version;
pub mod category;
pub mod screenshot;
pub mod tracking;

pub use app::{App, AppCardData, AppStatus, AppWithDetails, ListAppsQuery};
pub use app_version::{AppVersion, Platform};
pub use category::{Category, CategorySummary};
pub use screenshot::AppScreenshot;
pub use tracking::{ClientMetadata, Download, PageView};
