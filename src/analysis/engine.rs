//! 姿势分类与评分引擎
//!
//! 两条互斥路径：
//! - 主路径：根据姿势信号的阈值规则打标签扣分，再按问卷调整
//! - 回退路径：仅根据问卷回答判定（无检测结果、检测失败或置信度不足时）
//!
//! 两条路径最后都把分数限制在 [0, 100]，引擎本身不会失败。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{
    ExerciseFrequency, PostureSignals, PostureType, QuestionnaireAnswers, Symptom,
};

// 主路径扣分
const FORWARD_HEAD_PENALTY: i32 = 25;
const ROUNDED_SHOULDERS_PENALTY: i32 = 20;
const SWAYBACK_PENALTY: i32 = 15;
const SYMPTOM_PENALTY: i32 = 10;
const NO_EXERCISE_PENALTY: i32 = 15;
const REGULAR_EXERCISE_BONUS: i32 = 10;

// 回退路径
const FALLBACK_BASE_SCORE: i32 = 70;
const FALLBACK_LONG_DESK_PENALTY: i32 = 20;
const FALLBACK_BACK_AND_SHOULDER_PENALTY: i32 = 15;
const FALLBACK_BACK_PENALTY: i32 = 10;
const FALLBACK_GOOD_HABITS_SCORE: i32 = 85;
const FALLBACK_NO_EXERCISE_PENALTY: i32 = 10;

/// 判定阈值（经验值，可通过配置调整）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureThresholds {
    /// 颈部角度上限（度）
    pub max_neck_angle: f32,
    /// 肩部不对称上限（像素）
    pub max_shoulder_asymmetry: f32,
    /// 躯干角度正常范围下限（度）
    pub min_trunk_angle: f32,
    /// 躯干角度正常范围上限（度）
    pub max_trunk_angle: f32,
    /// 采信检测结果的最低综合置信度
    pub min_confidence: f32,
}

impl Default for PostureThresholds {
    fn default() -> Self {
        Self {
            max_neck_angle: 30.0,
            max_shoulder_asymmetry: 20.0,
            min_trunk_angle: 160.0,
            max_trunk_angle: 200.0,
            min_confidence: 0.3,
        }
    }
}

impl PostureThresholds {
    /// 信号是否足够可信，可以走主路径
    pub fn accepts(&self, signals: &PostureSignals) -> bool {
        signals.confidence >= self.min_confidence
    }

    /// 按阈值检出的问题（不含问卷）
    pub fn detect_issues(&self, signals: &PostureSignals) -> BTreeSet<PostureType> {
        let mut issues = BTreeSet::new();
        if signals.neck_angle > self.max_neck_angle {
            issues.insert(PostureType::ForwardHead);
        }
        if signals.shoulder_asymmetry > self.max_shoulder_asymmetry {
            issues.insert(PostureType::RoundedShoulders);
        }
        if signals.trunk_angle < self.min_trunk_angle || signals.trunk_angle > self.max_trunk_angle
        {
            issues.insert(PostureType::Swayback);
        }
        issues
    }
}

/// 分类结果
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub posture_type: PostureType,
    pub score: u8,
    /// 主路径检出的问题，回退路径为空
    pub detected_issues: BTreeSet<PostureType>,
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

fn issue_penalty(issue: PostureType) -> i32 {
    match issue {
        PostureType::ForwardHead => FORWARD_HEAD_PENALTY,
        PostureType::RoundedShoulders => ROUNDED_SHOULDERS_PENALTY,
        PostureType::Swayback => SWAYBACK_PENALTY,
        PostureType::Good | PostureType::Mixed => 0,
    }
}

/// 问卷症状扣分（颈部或头痛、肩、腰各算一次）
fn symptom_adjustment(answers: &QuestionnaireAnswers) -> i32 {
    let mut adjustment = 0;
    if answers.has(Symptom::Neck) || answers.has(Symptom::Headache) {
        adjustment -= SYMPTOM_PENALTY;
    }
    if answers.has(Symptom::Shoulder) {
        adjustment -= SYMPTOM_PENALTY;
    }
    if answers.has(Symptom::Back) {
        adjustment -= SYMPTOM_PENALTY;
    }
    adjustment
}

fn exercise_adjustment(frequency: ExerciseFrequency, no_exercise_penalty: i32) -> i32 {
    match frequency {
        ExerciseFrequency::None => -no_exercise_penalty,
        f if f.is_regular() => REGULAR_EXERCISE_BONUS,
        _ => 0,
    }
}

/// 主路径：根据姿势信号和问卷分类
pub fn classify_with_signals(
    signals: &PostureSignals,
    answers: &QuestionnaireAnswers,
    thresholds: &PostureThresholds,
) -> Classification {
    let detected_issues = thresholds.detect_issues(signals);

    let mut score = 100;
    score -= detected_issues.iter().map(|issue| issue_penalty(*issue)).sum::<i32>();
    score += symptom_adjustment(answers);
    score += exercise_adjustment(answers.exercise_frequency, NO_EXERCISE_PENALTY);

    let mut issues = detected_issues.iter().copied();
    let posture_type = match (issues.next(), issues.next()) {
        (None, _) => PostureType::Good,
        (Some(only), None) => only,
        _ => PostureType::Mixed,
    };

    Classification {
        posture_type,
        score: clamp_score(score),
        detected_issues,
    }
}

/// 回退路径：仅根据问卷分类
///
/// 判定顺序即优先级：长时间伏案 > 腰+肩症状 > 仅腰症状 > 良好习惯 > 复合型
pub fn classify_from_questionnaire(answers: &QuestionnaireAnswers) -> Classification {
    let mut score = FALLBACK_BASE_SCORE;
    let has_back = answers.has(Symptom::Back);
    let has_shoulder = answers.has(Symptom::Shoulder);

    let posture_type = if answers.desk_work_hours.is_long() {
        score -= FALLBACK_LONG_DESK_PENALTY;
        if has_shoulder || answers.has(Symptom::Neck) {
            PostureType::ForwardHead
        } else if has_back {
            PostureType::RoundedShoulders
        } else {
            PostureType::Mixed
        }
    } else if has_back && has_shoulder {
        score -= FALLBACK_BACK_AND_SHOULDER_PENALTY;
        PostureType::Mixed
    } else if has_back {
        score -= FALLBACK_BACK_PENALTY;
        PostureType::Swayback
    } else if answers.symptoms.is_empty() && answers.exercise_frequency.is_regular() {
        score = FALLBACK_GOOD_HABITS_SCORE;
        PostureType::Good
    } else {
        PostureType::Mixed
    };

    score += exercise_adjustment(answers.exercise_frequency, FALLBACK_NO_EXERCISE_PENALTY);

    Classification {
        posture_type,
        score: clamp_score(score),
        detected_issues: BTreeSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeskWorkHours;

    fn signals(neck: f32, shoulder: f32, trunk: f32, confidence: f32) -> PostureSignals {
        PostureSignals {
            neck_angle: neck,
            shoulder_asymmetry: shoulder,
            trunk_angle: trunk,
            confidence,
        }
    }

    fn answers(
        desk: DeskWorkHours,
        exercise: ExerciseFrequency,
        symptoms: &[Symptom],
    ) -> QuestionnaireAnswers {
        QuestionnaireAnswers::new(desk, exercise, symptoms.iter().copied())
    }

    #[test]
    fn test_single_issue_forward_head() {
        let result = classify_with_signals(
            &signals(35.0, 5.0, 180.0, 0.9),
            &answers(DeskWorkHours::UpToTwo, ExerciseFrequency::Daily, &[]),
            &PostureThresholds::default(),
        );
        assert_eq!(result.posture_type, PostureType::ForwardHead);
        assert_eq!(result.score, 85);
    }

    #[test]
    fn test_three_issues_mixed() {
        let result = classify_with_signals(
            &signals(40.0, 25.0, 210.0, 0.5),
            &answers(
                DeskWorkHours::ThreeToFive,
                ExerciseFrequency::None,
                &[Symptom::Neck, Symptom::Back],
            ),
            &PostureThresholds::default(),
        );
        assert_eq!(result.posture_type, PostureType::Mixed);
        assert_eq!(result.score, 5);
        assert_eq!(result.detected_issues.len(), 3);
    }

    #[test]
    fn test_two_issues_are_mixed() {
        let result = classify_with_signals(
            &signals(10.0, 30.0, 150.0, 0.8),
            &answers(DeskWorkHours::UpToTwo, ExerciseFrequency::Rarely, &[]),
            &PostureThresholds::default(),
        );
        assert_eq!(result.posture_type, PostureType::Mixed);
        assert_eq!(result.score, 65);
    }

    #[test]
    fn test_no_issues_is_good_even_with_symptoms() {
        let result = classify_with_signals(
            &signals(5.0, 5.0, 178.0, 0.8),
            &answers(
                DeskWorkHours::MoreThanEight,
                ExerciseFrequency::None,
                &[Symptom::Neck, Symptom::Headache, Symptom::Shoulder, Symptom::Back],
            ),
            &PostureThresholds::default(),
        );
        assert_eq!(result.posture_type, PostureType::Good);
        // 颈部和头痛只扣一次
        assert_eq!(result.score, 100 - 30 - 15);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let result = classify_with_signals(
            &signals(90.0, 200.0, 90.0, 1.0),
            &answers(
                DeskWorkHours::MoreThanEight,
                ExerciseFrequency::None,
                &[Symptom::Neck, Symptom::Shoulder, Symptom::Back, Symptom::EyeStrain],
            ),
            &PostureThresholds::default(),
        );
        // 100-25-20-15-30-15 = -5
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_score_clamped_at_hundred() {
        let result = classify_with_signals(
            &signals(0.0, 0.0, 180.0, 1.0),
            &answers(DeskWorkHours::UpToTwo, ExerciseFrequency::Weekly4To5, &[]),
            &PostureThresholds::default(),
        );
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let result = classify_with_signals(
            &signals(30.0, 20.0, 160.0, 0.9),
            &answers(DeskWorkHours::UpToTwo, ExerciseFrequency::Weekly1To3, &[]),
            &PostureThresholds::default(),
        );
        assert!(result.detected_issues.is_empty());
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = PostureThresholds {
            max_neck_angle: 20.0,
            ..PostureThresholds::default()
        };
        let result = classify_with_signals(
            &signals(25.0, 0.0, 180.0, 0.9),
            &answers(DeskWorkHours::UpToTwo, ExerciseFrequency::Weekly1To3, &[]),
            &thresholds,
        );
        assert_eq!(result.posture_type, PostureType::ForwardHead);
    }

    #[test]
    fn test_confidence_gate() {
        let thresholds = PostureThresholds::default();
        assert!(thresholds.accepts(&signals(0.0, 0.0, 180.0, 0.3)));
        assert!(!thresholds.accepts(&signals(0.0, 0.0, 180.0, 0.29)));
    }

    #[test]
    fn test_fallback_long_desk_hours() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::MoreThanEight,
            ExerciseFrequency::None,
            &[Symptom::Shoulder],
        ));
        assert_eq!(result.posture_type, PostureType::ForwardHead);
        assert_eq!(result.score, 40);
    }

    #[test]
    fn test_fallback_long_desk_neck_only() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::SixToEight,
            ExerciseFrequency::Weekly1To3,
            &[Symptom::Neck],
        ));
        assert_eq!(result.posture_type, PostureType::ForwardHead);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_fallback_long_desk_headache_only() {
        // 头痛不算颈部症状
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::MoreThanEight,
            ExerciseFrequency::Weekly1To3,
            &[Symptom::Headache],
        ));
        assert_eq!(result.posture_type, PostureType::Mixed);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_fallback_long_desk_back_only() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::SixToEight,
            ExerciseFrequency::Weekly1To3,
            &[Symptom::Back],
        ));
        assert_eq!(result.posture_type, PostureType::RoundedShoulders);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_fallback_long_desk_no_symptoms() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::SixToEight,
            ExerciseFrequency::Daily,
            &[],
        ));
        assert_eq!(result.posture_type, PostureType::Mixed);
        assert_eq!(result.score, 60);
    }

    #[test]
    fn test_fallback_back_and_shoulder() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::ThreeToFive,
            ExerciseFrequency::Rarely,
            &[Symptom::Back, Symptom::Shoulder],
        ));
        assert_eq!(result.posture_type, PostureType::Mixed);
        assert_eq!(result.score, 55);
    }

    #[test]
    fn test_fallback_back_only() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::UpToTwo,
            ExerciseFrequency::None,
            &[Symptom::Back],
        ));
        assert_eq!(result.posture_type, PostureType::Swayback);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_fallback_good_habits() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::UpToTwo,
            ExerciseFrequency::Daily,
            &[],
        ));
        assert_eq!(result.posture_type, PostureType::Good);
        assert_eq!(result.score, 95);
    }

    #[test]
    fn test_fallback_default_mixed() {
        let result = classify_from_questionnaire(&answers(
            DeskWorkHours::ThreeToFive,
            ExerciseFrequency::Rarely,
            &[Symptom::Headache],
        ));
        assert_eq!(result.posture_type, PostureType::Mixed);
        assert_eq!(result.score, 70);
        assert!(result.detected_issues.is_empty());
    }
}
