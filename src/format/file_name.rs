//! 文件名长度字段
//!
//! 该字段写入加密子 Header，用于解密时还原输出文件名。
//! 空文件无论是否开启混淆都会记录文件名长度，解密空文件时依赖它重建文件名。

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::HeaderConfig;
use crate::error::{HeaderError, Result};
use crate::format::layout::FILE_NAME_LENGTH_LEN;

/// 计算文件名长度字段（u32，小端）
///
/// 非空文件且未开启混淆时返回全零，表示不携带文件名。
/// 其余情况返回文件基本名的 UTF-8 字节长度。
pub fn file_name_length(
    input_path: &Path,
    zero_byte_file: bool,
    config: &HeaderConfig,
) -> Result<[u8; FILE_NAME_LENGTH_LEN]> {
    if !zero_byte_file && !config.obfuscate_file_names {
        return Ok(0u32.to_le_bytes());
    }

    let name_len = base_name(input_path).len();

    let name_len = u32::try_from(name_len).map_err(|_| HeaderError::FileNameTooLong)?;

    debug!(name_len, zero_byte_file, "recorded file name length");

    Ok(name_len.to_le_bytes())
}

/// 最后一个路径分隔符之后的部分，原样保留
///
/// `..` 计为 `..`，以分隔符结尾的路径计为空名。
fn base_name(input_path: &Path) -> String {
    let path = input_path.as_os_str().to_string_lossy();
    match path.rfind(std::path::is_separator) {
        Some(i) => path[i + 1..].to_owned(),
        None => path.into_owned(),
    }
}

pub fn decode_file_name_length(field: [u8; FILE_NAME_LENGTH_LEN]) -> u32 {
    u32::from_le_bytes(field)
}

/// 判断输入文件是否为空文件
pub fn is_zero_byte_file(input_path: &Path) -> io::Result<bool> {
    Ok(fs::metadata(input_path)?.len() == 0)
}
