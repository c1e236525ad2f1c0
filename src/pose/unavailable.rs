// 不可用的提供商 - 初始化和检测都会失败，用于强制走问卷分析

use anyhow::{bail, Result};
use async_trait::async_trait;
use image::DynamicImage;

use super::PoseProvider;
use crate::models::DetectedBody;

pub struct UnavailableProvider;

#[async_trait]
impl PoseProvider for UnavailableProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn initialize(&mut self) -> Result<()> {
        bail!("未配置姿势检测模型")
    }

    async fn detect(&self, _image: &DynamicImage) -> Result<Vec<DetectedBody>> {
        bail!("未配置姿势检测模型")
    }
}
