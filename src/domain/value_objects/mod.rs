pub mod file_id;

pub use file_id::FileId;
