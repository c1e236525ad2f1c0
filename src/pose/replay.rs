// 回放提供商 - 从 JSON 文件读取预先记录的检测结果
//
// 支持两种文件格式：
// - 人体数组，每个人体是关节点数组：[[{"name": "nose", ...}, ...], ...]
// - 人体对象数组：[{"keypoints": [...]}, ...]

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::PoseProvider;
use crate::models::{DetectedBody, Keypoint};

#[derive(Deserialize)]
#[serde(untagged)]
enum BodyRecord {
    Keypoints(Vec<Keypoint>),
    Body(DetectedBody),
}

impl From<BodyRecord> for DetectedBody {
    fn from(record: BodyRecord) -> Self {
        match record {
            BodyRecord::Keypoints(keypoints) => DetectedBody { keypoints },
            BodyRecord::Body(body) => body,
        }
    }
}

/// 解析检测结果JSON
pub fn parse_bodies(json: &str) -> Result<Vec<DetectedBody>> {
    let records: Vec<BodyRecord> =
        serde_json::from_str(json).context("关节点JSON格式不正确")?;
    Ok(records.into_iter().map(DetectedBody::from).collect())
}

pub struct ReplayProvider {
    keypoints_path: PathBuf,
    bodies: Option<Vec<DetectedBody>>,
}

impl ReplayProvider {
    pub fn new(keypoints_path: PathBuf) -> Self {
        Self {
            keypoints_path,
            bodies: None,
        }
    }

    /// 直接使用内存中的检测结果（无需文件）
    pub fn with_bodies(bodies: Vec<DetectedBody>) -> Self {
        Self {
            keypoints_path: PathBuf::new(),
            bodies: Some(bodies),
        }
    }
}

#[async_trait]
impl PoseProvider for ReplayProvider {
    fn name(&self) -> &str {
        "replay"
    }

    async fn initialize(&mut self) -> Result<()> {
        if self.bodies.is_some() {
            return Ok(());
        }

        let json = tokio::fs::read_to_string(&self.keypoints_path)
            .await
            .with_context(|| format!("读取关节点文件失败: {}", self.keypoints_path.display()))?;
        let bodies = parse_bodies(&json)?;

        info!(
            "已加载 {} 个人体的检测结果: {}",
            bodies.len(),
            self.keypoints_path.display()
        );
        self.bodies = Some(bodies);
        Ok(())
    }

    async fn detect(&self, image: &DynamicImage) -> Result<Vec<DetectedBody>> {
        let bodies = self
            .bodies
            .as_ref()
            .context("回放提供商尚未初始化")?;
        debug!(
            "回放检测结果: {} 个人体 (图片 {}x{})",
            bodies.len(),
            image.width(),
            image.height()
        );
        Ok(bodies.clone())
    }
}
