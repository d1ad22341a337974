pub mod paths;
pub mod settings;
pub mod storage;

pub use crate::paths::FakeBizPaths;
pub use crate::settings::{Settings, load_settings};
pub use crate::storage::{ConfigStorage, SecretStorage};
