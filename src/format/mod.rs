pub mod file_name;
pub mod header;
pub mod layout;
pub mod version;
