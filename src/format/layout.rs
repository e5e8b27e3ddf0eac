//! SealVault 密钥交换容器的字节布局
//!
//! Header 由六个定长字段按固定顺序拼接而成：
//!
//! ```text
//! | magic (8) | version (2) | ephemeral public key (32) | salt (16) | nonce (24) | encrypted header (56) |
//! ```
//!
//! 每个字段的偏移量只由它之前所有字段的长度决定，不需要长度前缀。
//! 不同格式版本通过 [`FormatVersion`] 映射到各自的 [`Layout`]，
//! 读取端不需要写死任何偏移量。

use std::fmt;
use std::ops::Range;

/// 文件魔数（ASCII）
pub const MAGIC: &[u8; MAGIC_LEN] = b"SVKX\0\0\0\0";

pub const MAGIC_LEN: usize = 8;

/// 版本号字段长度（u16，小端）
pub const VERSION_LEN: usize = 2;

/// 临时公钥长度（X25519）
pub const EPHEMERAL_PUBLIC_KEY_LEN: usize = 32;

/// KDF salt 长度
pub const SALT_LEN: usize = 16;

/// XChaCha20-Poly1305 nonce 长度
pub const NONCE_LEN: usize = 24;

/// AEAD 认证标签长度
pub const TAG_LEN: usize = 16;

/// 子 Header 明文中记录文件名长度的字段
pub const FILE_NAME_LENGTH_LEN: usize = 4;

/// 子 Header 明文长度
///
/// 4  (file name length)
/// 4  (last chunk length)
/// 32 (data key)
pub const SUB_HEADER_LEN: usize = FILE_NAME_LENGTH_LEN + 4 + 32;

/// 加密子 Header 长度（明文 + tag）
pub const ENCRYPTED_HEADER_LEN: usize = SUB_HEADER_LEN + TAG_LEN;

/// Header 中的字段，按写入顺序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Magic,
    Version,
    EphemeralPublicKey,
    Salt,
    Nonce,
    EncryptedHeader,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Magic,
        Field::Version,
        Field::EphemeralPublicKey,
        Field::Salt,
        Field::Nonce,
        Field::EncryptedHeader,
    ];

    const fn index(self) -> usize {
        match self {
            Field::Magic => 0,
            Field::Version => 1,
            Field::EphemeralPublicKey => 2,
            Field::Salt => 3,
            Field::Nonce => 4,
            Field::EncryptedHeader => 5,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Magic => "magic bytes",
            Field::Version => "format version",
            Field::EphemeralPublicKey => "ephemeral public key",
            Field::Salt => "salt",
            Field::Nonce => "nonce",
            Field::EncryptedHeader => "encrypted header",
        };
        f.write_str(name)
    }
}

/// 某一格式版本的字段长度表
///
/// 偏移量全部由长度推导，保证各字段区域首尾相接、互不重叠。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    lengths: [usize; 6],
}

impl Layout {
    pub const fn new(
        ephemeral_public_key_len: usize,
        salt_len: usize,
        nonce_len: usize,
        encrypted_header_len: usize,
    ) -> Self {
        Self {
            lengths: [
                MAGIC_LEN,
                VERSION_LEN,
                ephemeral_public_key_len,
                salt_len,
                nonce_len,
                encrypted_header_len,
            ],
        }
    }

    pub const fn len(&self, field: Field) -> usize {
        self.lengths[field.index()]
    }

    /// 字段的绝对偏移量 = 之前所有字段长度之和
    pub const fn offset(&self, field: Field) -> usize {
        let mut offset = 0;
        let mut i = 0;
        while i < field.index() {
            offset += self.lengths[i];
            i += 1;
        }
        offset
    }

    pub const fn range(&self, field: Field) -> Range<usize> {
        let start = self.offset(field);
        start..start + self.len(field)
    }

    /// Header 总长度，也是密文正文的起始位置
    pub const fn total_len(&self) -> usize {
        self.offset(Field::EncryptedHeader) + self.len(Field::EncryptedHeader)
    }
}

/// v1 布局
pub const LAYOUT_V1: Layout = Layout::new(
    EPHEMERAL_PUBLIC_KEY_LEN,
    SALT_LEN,
    NONCE_LEN,
    ENCRYPTED_HEADER_LEN,
);

/// 支持的格式版本
///
/// 新版本只能追加变体并绑定自己的 [`Layout`]，已有变体的布局不可修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    V1,
}

impl FormatVersion {
    /// 写入端使用的版本
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    pub const V1_TAG: u16 = 1;

    pub const fn tag(self) -> [u8; VERSION_LEN] {
        match self {
            Self::V1 => Self::V1_TAG.to_le_bytes(),
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        let tag: [u8; VERSION_LEN] = tag.try_into().ok()?;
        match u16::from_le_bytes(tag) {
            Self::V1_TAG => Some(Self::V1),
            _ => None,
        }
    }

    pub const fn layout(self) -> &'static Layout {
        match self {
            Self::V1 => &LAYOUT_V1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_offsets() {
        let layout = FormatVersion::V1.layout();

        assert_eq!(layout.offset(Field::Magic), 0);
        assert_eq!(layout.offset(Field::Version), 8);
        assert_eq!(layout.offset(Field::EphemeralPublicKey), 10);
        assert_eq!(layout.offset(Field::Salt), 42);
        assert_eq!(layout.offset(Field::Nonce), 58);
        assert_eq!(layout.offset(Field::EncryptedHeader), 82);
        assert_eq!(layout.total_len(), 138);
    }

    #[test]
    fn regions_are_contiguous() {
        let layout = FormatVersion::CURRENT.layout();
        let mut end = 0;

        for field in Field::ALL {
            let range = layout.range(field);
            assert_eq!(range.start, end, "{field} must follow the previous field");
            end = range.end;
        }

        assert_eq!(end, layout.total_len());
    }

    #[test]
    fn version_tag_resolves() {
        assert_eq!(FormatVersion::V1.tag(), [0x01, 0x00]);
        assert_eq!(FormatVersion::from_tag(&[0x01, 0x00]), Some(FormatVersion::V1));
        assert_eq!(FormatVersion::from_tag(&[0x02, 0x00]), None);
        assert_eq!(FormatVersion::from_tag(&[0x01]), None);
    }
}
