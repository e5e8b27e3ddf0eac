//! SealVault 密钥交换容器 Header 实现
//!
//! Header 的职责：
//! - 标识文件类型（magic）
//! - 指明格式版本号
//! - 保存密钥交换所需的临时公钥
//! - 保存密钥派生所需的 salt
//! - 保存加密子 Header 使用的 nonce
//! - 携带加密后的子 Header（文件名长度、末块长度、数据密钥）
//!
//! 写入：按固定顺序一次性顺序写出，不做长度校验（由调用方保证）。
//! 读取：每个字段根据版本布局计算自己的绝对偏移量，独立随机读取，
//! 任一字段都可以单独读取或重复读取。
//!
//! 解密前必须先校验 magic 与版本号，校验失败必须拒绝继续处理。

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use tracing::{debug, trace, warn};

use crate::error::{HeaderError, Result};
use crate::format::layout::{Field, FormatVersion, Layout, MAGIC};
use crate::format::version::{resolve_format_version, validate_format_version, validate_magic};

/// 将 Header 写入输出流
///
/// 写入顺序：magic, version, ephemeral public key, salt, nonce, encrypted header。
/// 各缓冲区长度由调用方保证；I/O 错误原样返回。
pub fn write_header<W: Write>(
    mut writer: W,
    ephemeral_public_key: &[u8],
    salt: &[u8],
    nonce: &[u8],
    encrypted_header: &[u8],
) -> std::io::Result<()> {
    let version = FormatVersion::CURRENT;

    // magic
    writer.write_all(MAGIC)?;

    // version
    writer.write_all(&version.tag())?;

    writer.write_all(ephemeral_public_key)?;
    writer.write_all(salt)?;
    writer.write_all(nonce)?;
    writer.write_all(encrypted_header)?;

    let len = MAGIC.len()
        + version.tag().len()
        + ephemeral_public_key.len()
        + salt.len()
        + nonce.len()
        + encrypted_header.len();
    debug!(?version, len, "wrote file header");

    Ok(())
}

/// Header 字段读取器
///
/// 不持有任何流状态，只携带某一版本的布局。
#[derive(Debug, Clone, Copy)]
pub struct HeaderReader {
    layout: &'static Layout,
}

impl HeaderReader {
    pub const fn new(version: FormatVersion) -> Self {
        Self {
            layout: version.layout(),
        }
    }

    pub const fn current() -> Self {
        Self::new(FormatVersion::CURRENT)
    }

    pub const fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn read_magic<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        self.read_field(reader, Field::Magic)
    }

    pub fn read_format_version<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        self.read_field(reader, Field::Version)
    }

    pub fn read_ephemeral_public_key<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        self.read_field(reader, Field::EphemeralPublicKey)
    }

    pub fn read_salt<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        self.read_field(reader, Field::Salt)
    }

    pub fn read_nonce<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        self.read_field(reader, Field::Nonce)
    }

    pub fn read_encrypted_header<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<u8>> {
        self.read_field(reader, Field::EncryptedHeader)
    }

    /// 从字段的绝对偏移量处读取恰好 `len(field)` 字节
    ///
    /// 流长度不足时返回 [`HeaderError::Truncated`]，绝不返回不完整的数据。
    pub fn read_field<R: Read + Seek>(&self, reader: &mut R, field: Field) -> Result<Vec<u8>> {
        let offset = self.layout.offset(field) as u64;
        let len = self.layout.len(field);

        reader.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; len];
        if let Err(e) = reader.read_exact(&mut buf) {
            if e.kind() == ErrorKind::UnexpectedEof {
                warn!(%field, offset, len, "file header truncated");
                return Err(HeaderError::Truncated { field, offset, len });
            }
            return Err(e.into());
        }

        trace!(%field, offset, len, "read header field");
        Ok(buf)
    }

    /// 读取 magic 与版本号，返回该文件所属的格式版本
    ///
    /// magic 与版本号字段在所有版本中位置相同。
    pub fn detect_version<R: Read + Seek>(reader: &mut R) -> Result<FormatVersion> {
        let probe = Self::current();

        let magic = probe.read_magic(reader)?;
        validate_magic(&magic)?;

        let version = probe.read_format_version(reader)?;
        resolve_format_version(&version)
    }
}

/// 解析后的完整 Header
///
/// magic 与版本号在读取时已校验，不在结构中保存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub ephemeral_public_key: Vec<u8>,
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    pub encrypted_header: Vec<u8>,
}

impl FileHeader {
    /// 创建当前版本的 Header
    ///
    /// 与 [`write_header`] 不同，这里会校验每个字段的长度。
    pub fn new(
        ephemeral_public_key: impl Into<Vec<u8>>,
        salt: impl Into<Vec<u8>>,
        nonce: impl Into<Vec<u8>>,
        encrypted_header: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let header = Self {
            ephemeral_public_key: ephemeral_public_key.into(),
            salt: salt.into(),
            nonce: nonce.into(),
            encrypted_header: encrypted_header.into(),
        };

        let layout = FormatVersion::CURRENT.layout();
        for (field, value) in header.fields() {
            let expected = layout.len(field);
            if value.len() != expected {
                return Err(HeaderError::InvalidFieldLength {
                    field,
                    expected,
                    actual: value.len(),
                });
            }
        }

        Ok(header)
    }

    fn fields(&self) -> [(Field, &[u8]); 4] {
        [
            (Field::EphemeralPublicKey, self.ephemeral_public_key.as_slice()),
            (Field::Salt, self.salt.as_slice()),
            (Field::Nonce, self.nonce.as_slice()),
            (Field::EncryptedHeader, self.encrypted_header.as_slice()),
        ]
    }

    /// 将 Header 写入输出流
    pub fn write<W: Write>(&self, writer: W) -> std::io::Result<()> {
        write_header(
            writer,
            &self.ephemeral_public_key,
            &self.salt,
            &self.nonce,
            &self.encrypted_header,
        )
    }

    /// 从输入流读取并校验当前版本的 Header
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        Self::read_version(reader, FormatVersion::CURRENT)
    }

    /// 按指定版本读取 Header
    ///
    /// 先校验 magic，再校验版本号，全部通过后才读取其余字段。
    pub fn read_version<R: Read + Seek>(reader: &mut R, expected: FormatVersion) -> Result<Self> {
        let header_reader = HeaderReader::new(expected);

        let magic = header_reader.read_magic(reader)?;
        validate_magic(&magic)?;

        let version = header_reader.read_format_version(reader)?;
        validate_format_version(&version, &expected.tag())?;

        let header = Self {
            ephemeral_public_key: header_reader.read_ephemeral_public_key(reader)?,
            salt: header_reader.read_salt(reader)?,
            nonce: header_reader.read_nonce(reader)?,
            encrypted_header: header_reader.read_encrypted_header(reader)?,
        };

        debug!(version = ?expected, len = header_reader.layout().total_len(), "read file header");

        Ok(header)
    }

    /// 当前版本 Header 的总长度
    pub const fn encoded_len() -> usize {
        FormatVersion::CURRENT.layout().total_len()
    }

    /// 密文正文的起始偏移量
    pub const fn body_offset() -> u64 {
        Self::encoded_len() as u64
    }
}
