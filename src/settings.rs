use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::analysis::PostureThresholds;
use crate::logger::LogSettings;
use crate::pose::ProviderSettings;

/// 持久化的应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    /// 判定阈值
    #[serde(default)]
    pub thresholds: PostureThresholds,
    /// 姿势检测提供商
    #[serde(default)]
    pub provider: ProviderSettings,
    /// 日志配置
    #[serde(default)]
    pub log: LogSettings,
}

/// 配置更新（只更新提供的字段）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub thresholds: Option<PostureThresholds>,
    pub provider: Option<ProviderSettings>,
    pub log: Option<LogSettings>,
}

pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<PersistedSettings>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            // 格式错误时不覆盖，避免丢失用户调整过的阈值
            Ok(bytes) if !bytes.is_empty() => serde_json::from_slice::<PersistedSettings>(&bytes)
                .with_context(|| format!("配置文件格式不正确: {}", path.display()))?,
            _ => {
                let default = PersistedSettings::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> PersistedSettings {
        self.data.read().await.clone()
    }

    pub async fn update(&self, update: SettingsUpdate) -> Result<PersistedSettings> {
        let mut settings = self.data.write().await;

        if let Some(thresholds) = update.thresholds {
            settings.thresholds = thresholds;
        }
        if let Some(provider) = update.provider {
            settings.provider = provider;
        }
        if let Some(log) = update.log {
            settings.log = log;
        }

        self.save(&settings).await?;
        Ok(settings.clone())
    }

    async fn save(&self, settings: &PersistedSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
