use serde::{Deserialize, Serialize};

use crate::catalog::Difficulty;

/// Focused pronunciation-drill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillCategory {
    Rieul,
    Batchim,
    DoubleVowel,
    Aspirated,
    Intonation,
    Speed,
}

/// Display copy for a drill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillCategoryInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
}

impl DrillCategory {
    pub const ALL: [DrillCategory; 6] = [
        DrillCategory::Rieul,
        DrillCategory::Batchim,
        DrillCategory::DoubleVowel,
        DrillCategory::Aspirated,
        DrillCategory::Intonation,
        DrillCategory::Speed,
    ];

    #[must_use]
    pub fn info(&self) -> DrillCategoryInfo {
        match self {
            DrillCategory::Rieul => DrillCategoryInfo {
                name: "ㄹ 발음",
                emoji: "👅",
                description: "ㄹ과 ㄴ 구분하기",
                difficulty: Difficulty::Medium,
            },
            DrillCategory::Batchim => DrillCategoryInfo {
                name: "받침",
                emoji: "🔤",
                description: "받침 정확하게 발음하기",
                difficulty: Difficulty::Hard,
            },
            DrillCategory::DoubleVowel => DrillCategoryInfo {
                name: "이중모음",
                emoji: "🔊",
                description: "ㅘ, ㅝ, ㅢ 등 이중모음",
                difficulty: Difficulty::Medium,
            },
            DrillCategory::Aspirated => DrillCategoryInfo {
                name: "격음/경음",
                emoji: "💨",
                description: "ㅋㅌㅍㅊ vs ㄲㄸㅃㅆㅉ",
                difficulty: Difficulty::Easy,
            },
            DrillCategory::Intonation => DrillCategoryInfo {
                name: "억양",
                emoji: "🎵",
                description: "자연스러운 억양 연습",
                difficulty: Difficulty::Hard,
            },
            DrillCategory::Speed => DrillCategoryInfo {
                name: "속도",
                emoji: "⚡",
                description: "빠른 문장 또박또박",
                difficulty: Difficulty::Hard,
            },
        }
    }
}

/// One drill sentence with its focus point and coaching tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillSentence {
    pub category: DrillCategory,
    pub text: &'static str,
    /// The sound(s) to concentrate on.
    pub focus: &'static str,
    pub tip: &'static str,
}

const fn drill(
    category: DrillCategory,
    text: &'static str,
    focus: &'static str,
    tip: &'static str,
) -> DrillSentence {
    DrillSentence {
        category,
        text,
        focus,
        tip,
    }
}

/// The fixed drill-sentence pool.
pub static DRILL_SENTENCES: &[DrillSentence] = &[
    // ㄹ 발음
    drill(DrillCategory::Rieul, "날씨가 너무 좋아요", "ㄹ", "혀를 윗잇몸에 가볍게 대세요"),
    drill(DrillCategory::Rieul, "서울에서 살고 있어요", "ㄹ", "서울의 ㄹ은 혀를 말아서 발음해요"),
    drill(DrillCategory::Rieul, "빨간 풍선을 불었어요", "ㄹ/ㄴ", "ㄹ과 ㄴ의 차이를 명확히 하세요"),
    drill(DrillCategory::Rieul, "달력을 넘기며 날짜를 확인해요", "ㄹ", "달력과 날짜의 ㄹ 발음에 주의하세요"),
    drill(DrillCategory::Rieul, "놀이공원에서 롤러코스터를 탔어요", "ㄹ", "롤러코스터의 연속된 ㄹ 발음을 연습하세요"),
    // 받침
    drill(DrillCategory::Batchim, "맛있는 밥을 먹었습니다", "ㅂ 받침", "밥의 ㅂ 받침을 확실히 닫으세요"),
    drill(DrillCategory::Batchim, "책상 위에 책이 있어요", "ㄱ 받침", "책의 ㄱ 받침을 또렷이 발음하세요"),
    drill(DrillCategory::Batchim, "한국어를 공부합니다", "ㄱ/ㅂ 받침", "한국과 공부의 받침에 주의하세요"),
    drill(DrillCategory::Batchim, "낮에는 덥고 밤에는 추워요", "ㅎ/ㅁ 받침", "낮의 ㅎ과 밤의 ㅁ 받침을 구분하세요"),
    drill(DrillCategory::Batchim, "옷을 입고 밖으로 나갔어요", "ㅅ/ㄱ 받침", "옷과 밖의 받침을 명확히 하세요"),
    // 이중모음
    drill(DrillCategory::DoubleVowel, "의사 선생님께 문의했어요", "ㅢ", "ㅡ + ㅣ를 빠르게 이어서 발음하세요"),
    drill(DrillCategory::DoubleVowel, "화요일에 회의가 있어요", "ㅘ/ㅚ/ㅢ", "각 이중모음의 입모양을 확인하세요"),
    drill(DrillCategory::DoubleVowel, "귀가 아파서 병원에 갔어요", "ㅟ", "ㅜ + ㅣ를 연속으로 발음하세요"),
    drill(DrillCategory::DoubleVowel, "웬일인지 왜 그런지 모르겠어요", "ㅞ/ㅙ", "입을 둥글게 시작해서 옆으로 벌리세요"),
    // 격음/경음
    drill(DrillCategory::Aspirated, "코끼리가 코를 흔들어요", "ㅋ/ㄲ", "ㅋ는 숨을 많이, ㄲ는 힘을 주세요"),
    drill(DrillCategory::Aspirated, "토끼가 뛰어다녀요", "ㅌ/ㄸ", "ㅌ와 ㄸ의 차이를 느껴보세요"),
    drill(DrillCategory::Aspirated, "파란 빠빠가 멋있어요", "ㅍ/ㅃ", "ㅍ는 입술을 터뜨리며, ㅃ는 힘주세요"),
    drill(DrillCategory::Aspirated, "차가운 짜장면을 먹었어요", "ㅊ/ㅉ", "ㅊ는 바람을 내보내며 발음하세요"),
    // 억양
    drill(DrillCategory::Intonation, "오늘 뭐 해요?", "의문문", "문장 끝을 올려서 발음하세요"),
    drill(DrillCategory::Intonation, "정말 맛있네요!", "감탄문", "감정을 담아 강조하세요"),
    drill(DrillCategory::Intonation, "저는 학생이에요. 공부를 열심히 해요.", "평서문", "문장 끝을 자연스럽게 내리세요"),
    drill(DrillCategory::Intonation, "같이 갈래요, 아니면 혼자 갈래요?", "선택 의문문", "앞부분을 올리고 뒷부분을 내리세요"),
    // 속도
    drill(DrillCategory::Speed, "간장공장공장장은 강공장장이다", "빠른 발음", "천천히 시작해서 점점 빠르게 해보세요"),
    drill(DrillCategory::Speed, "경찰청 철창살은 쇠철창살이다", "빠른 발음", "각 음절을 또박또박 발음하세요"),
    drill(DrillCategory::Speed, "저기 가는 저 상장사가 새 상 상장사냐 헌 상 상장사냐", "빠른 발음", "반복되는 소리를 구분해서 발음하세요"),
    drill(DrillCategory::Speed, "내가 그린 기린 그림은 잘 그린 기린 그림이다", "빠른 발음", "ㄱ과 ㄹ의 연속을 명확히 하세요"),
];

/// All sentences for one drill category.
#[must_use]
pub fn drills_in(category: DrillCategory) -> Vec<&'static DrillSentence> {
    DRILL_SENTENCES
        .iter()
        .filter(|s| s.category == category)
        .collect()
}
