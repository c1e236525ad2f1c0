// 姿势检测模块 - 定义检测提供商接口并按配置创建提供商

pub mod replay;
pub mod unavailable;

pub use replay::ReplayProvider;
pub use unavailable::UnavailableProvider;

use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::models::DetectedBody;

/// 姿势检测提供商接口
///
/// 给定一张图片，返回检测到的零个或多个人体。调用方只使用第一个人体。
#[async_trait]
pub trait PoseProvider: Send + Sync {
    /// 提供商名称（用于日志）
    fn name(&self) -> &str;

    /// 准备模型（加载权重等），默认无需准备
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// 检测图片中的人体关节点
    ///
    /// # 参数
    /// * `image` - 已解码的图片
    ///
    /// # 返回
    /// * 检测到的人体列表，可能为空
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedBody>>;
}

/// 姿势检测提供商配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProviderSettings {
    /// 回放预先记录的检测结果（JSON文件）
    #[serde(rename = "replay")]
    Replay {
        /// 关节点JSON文件路径
        keypoints_path: PathBuf,
    },
    /// 无可用模型，始终走问卷分析
    #[serde(rename = "unavailable")]
    Unavailable,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings::Unavailable
    }
}

/// 根据配置创建提供商
pub fn create_provider(settings: &ProviderSettings) -> Box<dyn PoseProvider> {
    let provider: Box<dyn PoseProvider> = match settings {
        ProviderSettings::Replay { keypoints_path } => {
            Box::new(ReplayProvider::new(keypoints_path.clone()))
        }
        ProviderSettings::Unavailable => Box::new(UnavailableProvider),
    };
    info!("使用姿势检测提供商: {}", provider.name());
    provider
}
