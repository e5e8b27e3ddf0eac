//! 魔数与格式版本校验
//!
//! 解密前必须先通过这里的校验，才能信任 Header 中的其他字段。
//! 版本号不是秘密，使用普通相等比较即可。

use tracing::warn;

use crate::error::{HeaderError, Result};
use crate::format::layout::{FormatVersion, MAGIC};

/// 校验文件魔数
pub fn validate_magic(magic: &[u8]) -> Result<()> {
    if magic != MAGIC.as_slice() {
        warn!("invalid SealVault magic");
        return Err(HeaderError::InvalidMagic);
    }

    Ok(())
}

/// 校验存储的版本号是否与期望版本完全一致
///
/// 不一致时调用方必须放弃后续所有 Header 与正文的处理。
pub fn validate_format_version(format_version: &[u8], current_format_version: &[u8]) -> Result<()> {
    if format_version != current_format_version {
        warn!(
            stored = ?format_version,
            expected = ?current_format_version,
            "incompatible format version"
        );
        return Err(HeaderError::IncompatibleFormat);
    }

    Ok(())
}

/// 将存储的版本号解析为受支持的格式版本
pub fn resolve_format_version(format_version: &[u8]) -> Result<FormatVersion> {
    FormatVersion::from_tag(format_version).ok_or_else(|| {
        warn!(stored = ?format_version, "unsupported format version");
        HeaderError::IncompatibleFormat
    })
}
