// 姿势自检诊断 - 主库

// 声明模块
pub mod analysis;
pub mod analyzer;
pub mod capture;
pub mod error;
pub mod logger;
pub mod models;
pub mod pose;
pub mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub use analyzer::{calculate_improvement, PostureAnalyzer};
pub use capture::CapturedImage;
pub use error::AnalyzeError;
pub use models::*;

use analysis::ScoreGrade;
use pose::{create_provider, ProviderSettings};
use settings::{SettingsManager, SettingsUpdate};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "posture-diagnosis", version, about = "姿势自检诊断")]
struct Cli {
    /// 配置文件路径
    #[arg(long, env = "POSTURE_SETTINGS", default_value = "posture-settings.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 根据照片和问卷进行诊断，输出 JSON 结果
    Analyze {
        /// 图片文件路径或 data URI
        #[arg(long)]
        image: String,
        /// 预先记录的关节点 JSON（覆盖配置中的提供商）
        #[arg(long)]
        keypoints: Option<PathBuf>,
        /// 每日伏案时间：0-2 / 3-5 / 6-8 / 8+
        #[arg(long, value_parser = parse_answer::<DeskWorkHours>)]
        desk_hours: DeskWorkHours,
        /// 运动频率：none / rarely / weekly-1-3 / weekly-4-5 / daily
        #[arg(long, value_parser = parse_answer::<ExerciseFrequency>)]
        exercise: ExerciseFrequency,
        /// 症状（可重复）：neck / shoulder / back / headache / eye_strain
        #[arg(long = "symptom", value_parser = parse_answer::<Symptom>)]
        symptoms: Vec<Symptom>,
        /// 结果输出文件（默认输出到 stdout）
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// 比较两次诊断结果的分数变化
    Compare {
        before: PathBuf,
        after: PathBuf,
    },
    /// 查看或修改配置，未给出任何选项时只打印当前配置
    Config {
        /// 使用预先记录的关节点文件作为检测提供商
        #[arg(long, conflicts_with = "no_provider")]
        replay: Option<PathBuf>,
        /// 不使用姿势检测（始终走问卷分析）
        #[arg(long)]
        no_provider: bool,
        /// 日志级别
        #[arg(long)]
        log_level: Option<String>,
    },
}

/// 按 serde 名称解析问卷选项（与前端提交的值一致）
fn parse_answer<T: DeserializeOwned>(value: &str) -> std::result::Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("无效的选项: {}", value))
}

async fn read_result(path: &Path) -> Result<DiagnosisResult> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("读取诊断结果失败: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("诊断结果格式不正确: {}", path.display()))
}

/// 命令行入口
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let settings_manager = SettingsManager::new(cli.settings.clone()).await?;
    let settings = settings_manager.get().await;
    let _log_guard = logger::init(&settings.log)?;

    match cli.command {
        Command::Analyze {
            image,
            keypoints,
            desk_hours,
            exercise,
            symptoms,
            output,
        } => {
            let provider_settings = match keypoints {
                Some(keypoints_path) => ProviderSettings::Replay { keypoints_path },
                None => settings.provider.clone(),
            };

            let mut analyzer =
                PostureAnalyzer::new(create_provider(&provider_settings), settings.thresholds);
            debug!("判定阈值: {:?}", analyzer.thresholds());
            if let Err(e) = analyzer.initialize().await {
                warn!("姿势检测提供商暂不可用，将在诊断时重试: {:#}", e);
            }

            let captured = CapturedImage::from_path_or_uri(&image).await?;
            let answers = QuestionnaireAnswers::new(desk_hours, exercise, symptoms);
            let result = analyzer.analyze(&captured, &answers).await?;

            let grade = ScoreGrade::from_score(result.score);
            info!(
                "诊断结果: {} ({}分, {:?} {})",
                result.name,
                result.score,
                grade,
                grade.color()
            );

            let json = serde_json::to_string_pretty(&result)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("写入结果失败: {}", path.display()))?;
                    info!("结果已保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Compare { before, after } => {
            let before = read_result(&before).await?;
            let after = read_result(&after).await?;
            println!("{}", calculate_improvement(&before, &after));
        }
        Command::Config {
            replay,
            no_provider,
            log_level,
        } => {
            let provider = match replay {
                Some(keypoints_path) => Some(ProviderSettings::Replay { keypoints_path }),
                None if no_provider => Some(ProviderSettings::Unavailable),
                None => None,
            };
            let log = log_level.map(|level| logger::LogSettings {
                level,
                ..settings.log.clone()
            });

            let current = if provider.is_none() && log.is_none() {
                settings
            } else {
                let updated = settings_manager
                    .update(SettingsUpdate {
                        provider,
                        log,
                        ..Default::default()
                    })
                    .await?;
                info!("配置已更新: {}", cli.settings.display());
                updated
            };
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer::<DeskWorkHours>("8+").unwrap(),
            DeskWorkHours::MoreThanEight
        );
        assert_eq!(
            parse_answer::<ExerciseFrequency>("weekly-4-5").unwrap(),
            ExerciseFrequency::Weekly4To5
        );
        assert_eq!(parse_answer::<Symptom>("eye_strain").unwrap(), Symptom::EyeStrain);
        assert!(parse_answer::<Symptom>("knee").is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "posture-diagnosis",
            "analyze",
            "--image",
            "photo.png",
            "--desk-hours",
            "6-8",
            "--exercise",
            "none",
            "--symptom",
            "neck",
            "--symptom",
            "back",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze {
                desk_hours,
                symptoms,
                keypoints,
                ..
            } => {
                assert_eq!(desk_hours, DeskWorkHours::SixToEight);
                assert_eq!(symptoms, vec![Symptom::Neck, Symptom::Back]);
                assert!(keypoints.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_flags_conflict() {
        let result = Cli::try_parse_from([
            "posture-diagnosis",
            "config",
            "--replay",
            "poses.json",
            "--no-provider",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["posture-diagnosis", "config", "--log-level", "debug"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Config { log_level: Some(ref level), no_provider: false, .. } if level == "debug"
        ));
    }
}
