//! 姿势类型知识库（静态只读数据）

use crate::models::PostureType;

/// 姿势类型说明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostureProfile {
    pub display_name: &'static str,
    pub description: &'static str,
    pub problems: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

static FORWARD_HEAD: PostureProfile = PostureProfile {
    display_name: "前傾頭位タイプ",
    description: "頭が前方に突き出た姿勢です。スマートフォンやPC作業が多い方に見られます。",
    problems: &[
        "首や肩の慢性的な痛み",
        "頭痛やめまい",
        "呼吸が浅くなりやすい",
        "集中力の低下",
    ],
    recommendations: &[
        "1時間ごとに首のストレッチを行う",
        "モニターの高さを目線に合わせる",
        "枕の高さを見直す",
        "胸部のストレッチを習慣化する",
    ],
};

static ROUNDED_SHOULDERS: PostureProfile = PostureProfile {
    display_name: "巻き肩タイプ",
    description: "肩が前方に丸まった姿勢です。デスクワークが多い方に多く見られます。",
    problems: &[
        "肩こりや背中の痛み",
        "胸部の圧迫感",
        "腕のしびれ",
        "姿勢の悪化",
    ],
    recommendations: &[
        "胸筋のストレッチを毎日行う",
        "肩甲骨を寄せる運動を実施",
        "デスクの環境を改善する",
        "背筋を鍛えるエクササイズを追加",
    ],
};

static SWAYBACK: PostureProfile = PostureProfile {
    display_name: "反り腰タイプ",
    description: "腰が過度に反った姿勢です。腹筋が弱い方に多く見られます。",
    problems: &[
        "慢性的な腰痛",
        "股関節の痛み",
        "膝への負担増加",
        "消化器系の不調",
    ],
    recommendations: &[
        "腹筋を強化するエクササイズ",
        "骨盤を正しい位置に保つ練習",
        "長時間の立ち仕事を避ける",
        "ストレッチポールを使った矯正",
    ],
};

static GOOD: PostureProfile = PostureProfile {
    display_name: "理想的な姿勢",
    description: "バランスの取れた良い姿勢です。この状態を維持しましょう。",
    problems: &[],
    recommendations: &[
        "現在の良い姿勢を維持する",
        "定期的な運動を続ける",
        "長時間同じ姿勢を避ける",
        "ストレッチを日課にする",
    ],
};

static MIXED: PostureProfile = PostureProfile {
    display_name: "複合タイプ",
    description: "複数の姿勢の問題が組み合わさった状態です。総合的な改善が必要です。",
    problems: &[
        "複数箇所の痛みや不調",
        "姿勢の左右差",
        "疲れやすい",
        "運動パフォーマンスの低下",
    ],
    recommendations: &[
        "専門家による詳細な評価を推奨",
        "全身のバランスを整える運動",
        "生活習慣の総合的な見直し",
        "段階的な改善プログラムの実施",
    ],
};

impl PostureType {
    /// 获取该类型的说明
    pub fn profile(&self) -> &'static PostureProfile {
        match self {
            Self::ForwardHead => &FORWARD_HEAD,
            Self::RoundedShoulders => &ROUNDED_SHOULDERS,
            Self::Swayback => &SWAYBACK,
            Self::Good => &GOOD,
            Self::Mixed => &MIXED,
        }
    }
}
