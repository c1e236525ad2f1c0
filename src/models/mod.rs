// 数据模型模块 - 定义所有的数据结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// 关节点名称（MoveNet 17点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    /// 模型输出了未知名称
    #[serde(other)]
    Other,
}

/// 单个关节点（像素坐标）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub name: KeypointName,
    pub x: f32,
    pub y: f32,
    /// 置信度（0-1）
    #[serde(alias = "score")]
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(name: KeypointName, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            name,
            x,
            y,
            confidence,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// 二维点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 检测到的一个人体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedBody {
    pub keypoints: Vec<Keypoint>,
}

/// 姿势信号（单次分析内有效）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureSignals {
    /// 颈部前倾角度（度）
    pub neck_angle: f32,
    /// 左右肩水平距离（像素）
    pub shoulder_asymmetry: f32,
    /// 躯干角度（度，180 为直立）
    pub trunk_angle: f32,
    /// 综合置信度（0-1）
    pub confidence: f32,
}

/// 每日伏案时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeskWorkHours {
    #[serde(rename = "0-2")]
    UpToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6-8")]
    SixToEight,
    #[serde(rename = "8+", alias = "more-8")]
    MoreThanEight,
}

impl DeskWorkHours {
    /// 6小时以上视为长时间伏案
    pub fn is_long(&self) -> bool {
        matches!(self, Self::SixToEight | Self::MoreThanEight)
    }
}

/// 运动频率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseFrequency {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "rarely")]
    Rarely,
    #[serde(rename = "weekly-1-3", alias = "weekly")]
    Weekly1To3,
    #[serde(rename = "weekly-4-5", alias = "4-5")]
    Weekly4To5,
    #[serde(rename = "daily")]
    Daily,
}

impl ExerciseFrequency {
    /// 每周4次以上
    pub fn is_regular(&self) -> bool {
        matches!(self, Self::Daily | Self::Weekly4To5)
    }
}

/// 自觉症状
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Neck,
    Shoulder,
    Back,
    Headache,
    EyeStrain,
}

/// 问卷回答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireAnswers {
    pub desk_work_hours: DeskWorkHours,
    pub exercise_frequency: ExerciseFrequency,
    #[serde(default)]
    pub symptoms: BTreeSet<Symptom>,
}

impl QuestionnaireAnswers {
    pub fn new(
        desk_work_hours: DeskWorkHours,
        exercise_frequency: ExerciseFrequency,
        symptoms: impl IntoIterator<Item = Symptom>,
    ) -> Self {
        Self {
            desk_work_hours,
            exercise_frequency,
            symptoms: symptoms.into_iter().collect(),
        }
    }

    pub fn has(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }
}

/// 姿势类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostureType {
    ForwardHead,
    RoundedShoulders,
    Swayback,
    Good,
    Mixed,
}

impl PostureType {
    pub const ALL: [PostureType; 5] = [
        Self::ForwardHead,
        Self::RoundedShoulders,
        Self::Swayback,
        Self::Good,
        Self::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForwardHead => "forward_head",
            Self::RoundedShoulders => "rounded_shoulders",
            Self::Swayback => "swayback",
            Self::Good => "good",
            Self::Mixed => "mixed",
        }
    }
}

/// 回退到问卷分析的原因
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// 姿势模型初始化失败
    ProviderUnavailable,
    /// 检测调用失败
    DetectionFailed,
    /// 画面中没有人
    NoBodyDetected,
    /// 检测置信度不足
    LowConfidence { confidence: f32 },
}

/// 本次诊断所依据的分析路径
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum AnalysisBasis {
    /// 姿势检测（主路径）
    PoseDetection { confidence: f32 },
    /// 仅问卷（回退路径）
    Questionnaire { reason: FallbackReason },
}

impl AnalysisBasis {
    pub fn is_pose_detection(&self) -> bool {
        matches!(self, Self::PoseDetection { .. })
    }
}

/// 线段（用于骨架绘制）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// 问题部位高亮
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueHighlight {
    pub issue: PostureType,
    pub segment: Segment,
    pub label: String,
}

/// 可视化数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualization {
    pub keypoints: Vec<Keypoint>,
    pub signals: PostureSignals,
    pub detected_issues: BTreeSet<PostureType>,
    pub skeleton: Vec<Segment>,
    pub highlights: Vec<IssueHighlight>,
}

/// 诊断结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub posture_type: PostureType,
    /// 评分（0-100）
    pub score: u8,
    pub name: String,
    pub description: String,
    pub problems: Vec<String>,
    pub recommendations: Vec<String>,
    pub basis: AnalysisBasis,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub visualization: Option<Visualization>,
}
