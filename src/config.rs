//! Header 相关配置
//!
//! 文件名混淆开关以显式参数传入，不依赖任何全局状态。

/// 写入 Header 时使用的配置。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderConfig {
    /// 是否混淆原始文件名
    ///
    /// 开启后，加密子 Header 中总会记录文件名长度。
    pub obfuscate_file_names: bool,
}

impl HeaderConfig {
    pub fn with_obfuscated_file_names(mut self, enabled: bool) -> Self {
        self.obfuscate_file_names = enabled;
        self
    }
}
