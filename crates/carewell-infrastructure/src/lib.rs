pub mod audio;
pub mod json_record_repository;
pub mod paths;
pub mod storage;
pub mod toml_settings_repository;

pub use crate::audio::{NullCuePlayer, SilentCuePlayer, resolve_audio_path};
pub use crate::json_record_repository::JsonRecordRepository;
pub use crate::paths::CarePaths;
pub use crate::toml_settings_repository::TomlSettingsRepository;
