//! SealVault 密钥交换容器 Header
//!
//! 只负责 Header 的序列化、反序列化与结构校验，
//! 不涉及正文加解密、密钥交换与密码管理。

pub mod config;
pub mod error;
pub mod format;

pub use config::HeaderConfig;
pub use error::{HeaderError, Result};
pub use format::file_name::{decode_file_name_length, file_name_length, is_zero_byte_file};
pub use format::header::{FileHeader, HeaderReader, write_header};
pub use format::layout::{Field, FormatVersion, Layout};
pub use format::version::{validate_format_version, validate_magic};
