//! Preference storage adapters.

mod memory;
mod preference_file;

pub use memory::MemoryPreferenceStorage;
pub use preference_file::FilePreferenceStorage;
