// 图像输入模块 - 接收拍摄的静态图像并解码

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::AnalyzeError;

/// 拍摄的静态图像（未解码）
#[derive(Clone, Debug)]
pub enum CapturedImage {
    /// `data:image/<fmt>;base64,<payload>` 形式
    DataUri(String),
    /// 已编码的图片字节（PNG/JPEG等）
    Encoded(Vec<u8>),
}

fn data_uri_pattern() -> &'static Regex {
    // 使用 OnceLock 缓存正则表达式对象
    static DATA_URI: OnceLock<Regex> = OnceLock::new();
    DATA_URI.get_or_init(|| {
        Regex::new(r"(?s)^data:image/([A-Za-z0-9.+-]+);base64,(.+)$").unwrap()
    })
}

impl CapturedImage {
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self::DataUri(uri.into())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::Encoded(bytes)
    }

    /// 从文件读取；参数本身是 data URI 时直接使用
    pub async fn from_path_or_uri(source: &str) -> Result<Self> {
        if source.starts_with("data:") {
            return Ok(Self::from_data_uri(source));
        }
        Self::from_path(source).await
    }

    /// 从文件读取
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("读取图片失败: {}", path.display()))?;
        Ok(Self::Encoded(bytes))
    }

    /// 取出编码后的图片字节
    fn encoded_bytes(&self) -> std::result::Result<Cow<'_, [u8]>, AnalyzeError> {
        match self {
            Self::Encoded(bytes) => Ok(Cow::Borrowed(bytes)),
            Self::DataUri(uri) => {
                let captures = data_uri_pattern().captures(uri.trim()).ok_or_else(|| {
                    AnalyzeError::InvalidImage("不是 data:image/...;base64 格式".to_string())
                })?;
                debug!("data URI 图片格式: {}", &captures[1]);

                general_purpose::STANDARD
                    .decode(captures[2].trim())
                    .map(Cow::Owned)
                    .map_err(|e| AnalyzeError::InvalidImage(format!("base64 解码失败: {}", e)))
            }
        }
    }

    /// 解码为图像
    pub fn decode(&self) -> std::result::Result<DynamicImage, AnalyzeError> {
        let bytes = self.encoded_bytes()?;
        if bytes.is_empty() {
            return Err(AnalyzeError::InvalidImage("图片数据为空".to_string()));
        }

        image::load_from_memory(&bytes)
            .map_err(|e| AnalyzeError::InvalidImage(format!("图片解码失败: {}", e)))
    }
}
