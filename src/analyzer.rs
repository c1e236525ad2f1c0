// 姿势诊断器 - 对外的诊断接口
//
// 流程：图像解码 → 姿势检测 → 关节点聚合 → 信号映射 → 分类评分 → 结果组装
// 只有姿势检测是异步且可能失败的环节，失败时回退到问卷分析。

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::analysis::{
    aggregate, assemble_detected, assemble_fallback, classify_from_questionnaire,
    classify_with_signals, compute_signals, PostureThresholds,
};
use crate::capture::CapturedImage;
use crate::error::Result;
use crate::models::{
    DetectedBody, DiagnosisResult, FallbackReason, PostureSignals, QuestionnaireAnswers,
};
use crate::pose::PoseProvider;

/// 姿势检测阶段的结果
#[derive(Debug)]
enum PoseOutcome {
    /// 检测成功且置信度足够
    Detected {
        body: DetectedBody,
        signals: PostureSignals,
    },
    /// 需要回退到问卷分析
    Fallback(FallbackReason),
}

/// 姿势诊断器
///
/// 诊断之间不保留任何状态，唯一的状态是提供商是否已初始化。
pub struct PostureAnalyzer {
    provider: Box<dyn PoseProvider>,
    thresholds: PostureThresholds,
    initialized: bool,
}

impl PostureAnalyzer {
    pub fn new(provider: Box<dyn PoseProvider>, thresholds: PostureThresholds) -> Self {
        Self {
            provider,
            thresholds,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn thresholds(&self) -> &PostureThresholds {
        &self.thresholds
    }

    /// 初始化姿势检测提供商（可重复调用）
    ///
    /// 失败不影响后续使用：下次诊断时会再次尝试初始化，仍失败则走问卷分析。
    pub async fn initialize(&mut self) -> anyhow::Result<()> {
        if self.initialized {
            return Ok(());
        }

        self.provider.initialize().await?;
        self.initialized = true;
        info!("姿势检测提供商 {} 初始化完成", self.provider.name());
        Ok(())
    }

    /// 根据图像和问卷进行诊断
    ///
    /// 只有图像无法解码时返回错误；模型不可用、未检测到人体、置信度不足都会
    /// 回退到问卷分析并正常返回结果。
    pub async fn analyze(
        &mut self,
        image: &CapturedImage,
        answers: &QuestionnaireAnswers,
    ) -> Result<DiagnosisResult> {
        let decoded = image.decode()?;

        let outcome = self.detect_pose(&decoded).await;
        let result = match outcome {
            PoseOutcome::Detected { body, signals } => {
                let classification = classify_with_signals(&signals, answers, &self.thresholds);
                assemble_detected(classification, body.keypoints, signals)
            }
            PoseOutcome::Fallback(reason) => {
                assemble_fallback(classify_from_questionnaire(answers), reason)
            }
        };

        info!(
            "姿势分析完成: type={}, score={}, pose_detection={}",
            result.posture_type.as_str(),
            result.score,
            result.basis.is_pose_detection()
        );
        Ok(result)
    }

    async fn detect_pose(&mut self, image: &DynamicImage) -> PoseOutcome {
        if let Err(e) = self.initialize().await {
            warn!("姿势检测提供商初始化失败，使用问卷分析: {:#}", e);
            return PoseOutcome::Fallback(FallbackReason::ProviderUnavailable);
        }

        let bodies = match self.provider.detect(image).await {
            Ok(bodies) => bodies,
            Err(e) => {
                warn!("姿势检测失败，使用问卷分析: {:#}", e);
                return PoseOutcome::Fallback(FallbackReason::DetectionFailed);
            }
        };

        if bodies.len() > 1 {
            debug!("检测到 {} 个人体，仅使用第一个", bodies.len());
        }
        let Some(body) = bodies.into_iter().next() else {
            warn!("未检测到人物，使用问卷分析");
            return PoseOutcome::Fallback(FallbackReason::NoBodyDetected);
        };

        let signals = compute_signals(&aggregate(&body.keypoints));
        debug!("姿势信号: {:?}", signals);

        if !self.thresholds.accepts(&signals) {
            warn!("检测置信度过低 ({:.2})，使用问卷分析", signals.confidence);
            return PoseOutcome::Fallback(FallbackReason::LowConfidence {
                confidence: signals.confidence,
            });
        }

        PoseOutcome::Detected { body, signals }
    }
}

/// 计算两次诊断之间的改善程度（后一次减前一次）
pub fn calculate_improvement(before: &DiagnosisResult, after: &DiagnosisResult) -> i32 {
    i32::from(after.score) - i32::from(before.score)
}
