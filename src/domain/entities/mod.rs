pub mod deleted_file;
pub mod file_payload;

pub use deleted_file::DeletedFile;
pub use file_payload::FilePayload;
