//! Collaborators consumed by the flow controller.
//!
//! - [`notifier`]: user-facing notifications
//! - [`store`]: registration records
//! - [`navigation`]: redirects after completion
//! - [`upload`]: document submission

pub mod navigation;
pub mod notifier;
pub mod store;
pub mod upload;

pub use navigation::{ChannelNavigator, Navigator, RecordingNavigator};
pub use notifier::{ChannelNotifier, Notifier, RecordingNotifier, TracingNotifier};
pub use store::{DataStore, InMemoryStore, StoreError, StoreResult};
pub use upload::{SimulatedUploader, UploadError, Uploader};
