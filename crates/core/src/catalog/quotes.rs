use serde::{Deserialize, Serialize};

/// Thematic grouping for practice quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCategory {
    Motivation,
    Life,
    Success,
    Wisdom,
    Love,
}

impl QuoteCategory {
    pub const ALL: [QuoteCategory; 5] = [
        QuoteCategory::Motivation,
        QuoteCategory::Life,
        QuoteCategory::Success,
        QuoteCategory::Wisdom,
        QuoteCategory::Love,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuoteCategory::Motivation => "동기부여",
            QuoteCategory::Life => "인생",
            QuoteCategory::Success => "성공",
            QuoteCategory::Wisdom => "지혜",
            QuoteCategory::Love => "사랑",
        }
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            QuoteCategory::Motivation => "🔥",
            QuoteCategory::Life => "🌱",
            QuoteCategory::Success => "🏆",
            QuoteCategory::Wisdom => "📚",
            QuoteCategory::Love => "💕",
        }
    }
}

/// Sentence-length tier; longer sentences are harder to read in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "쉬움",
            Difficulty::Medium => "보통",
            Difficulty::Hard => "어려움",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "짧은 문장",
            Difficulty::Medium => "중간 길이",
            Difficulty::Hard => "긴 문장",
        }
    }
}

/// A single practice quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
    pub category: QuoteCategory,
    pub difficulty: Difficulty,
}

const fn quote(
    text: &'static str,
    author: &'static str,
    category: QuoteCategory,
    difficulty: Difficulty,
) -> Quote {
    Quote {
        text,
        author,
        category,
        difficulty,
    }
}

/// The fixed quote pool.
pub static QUOTES: &[Quote] = &[
    // 동기부여
    quote("할 수 있다고 믿으면 된다", "나폴레온 힐", QuoteCategory::Motivation, Difficulty::Easy),
    quote("시작이 반이다", "아리스토텔레스", QuoteCategory::Motivation, Difficulty::Easy),
    quote("오늘 하루도 힘내세요", "격언", QuoteCategory::Motivation, Difficulty::Easy),
    quote("포기하지 마세요", "격언", QuoteCategory::Motivation, Difficulty::Easy),
    quote("당신은 할 수 있습니다", "격언", QuoteCategory::Motivation, Difficulty::Easy),
    quote("성공은 매일 반복한 작은 노력의 합이다", "로버트 콜리어", QuoteCategory::Motivation, Difficulty::Medium),
    quote("실패는 성공의 어머니입니다", "토마스 에디슨", QuoteCategory::Motivation, Difficulty::Medium),
    quote("꿈을 꾸고 그 꿈을 향해 나아가세요", "월트 디즈니", QuoteCategory::Motivation, Difficulty::Medium),
    quote("오늘 할 수 있는 일을 내일로 미루지 마라", "벤자민 프랭클린", QuoteCategory::Motivation, Difficulty::Medium),
    quote("작은 기회로부터 위대한 일이 시작된다", "데모스테네스", QuoteCategory::Motivation, Difficulty::Medium),
    quote("성공한 사람이 되려고 하기보다 가치 있는 사람이 되려고 노력하라", "알버트 아인슈타인", QuoteCategory::Motivation, Difficulty::Hard),
    quote("당신이 할 수 있다고 믿든 할 수 없다고 믿든 당신 생각이 옳다", "헨리 포드", QuoteCategory::Motivation, Difficulty::Hard),
    quote("천 리 길도 한 걸음부터 시작되고 위대한 일도 작은 시작에서 비롯된다", "노자", QuoteCategory::Motivation, Difficulty::Hard),
    // 인생
    quote("인생은 짧다", "히포크라테스", QuoteCategory::Life, Difficulty::Easy),
    quote("오늘을 즐겨라", "호라티우스", QuoteCategory::Life, Difficulty::Easy),
    quote("삶은 선물입니다", "격언", QuoteCategory::Life, Difficulty::Easy),
    quote("행복은 선택이다", "격언", QuoteCategory::Life, Difficulty::Easy),
    quote("웃으면 복이 와요", "속담", QuoteCategory::Life, Difficulty::Easy),
    quote("인생에서 가장 중요한 것은 자신을 아는 것이다", "소크라테스", QuoteCategory::Life, Difficulty::Medium),
    quote("삶이 있는 한 희망은 있다", "키케로", QuoteCategory::Life, Difficulty::Medium),
    quote("행복은 습관이다 그것을 몸에 지니라", "엘버트 허버드", QuoteCategory::Life, Difficulty::Medium),
    quote("인생은 가까이서 보면 비극이고 멀리서 보면 희극이다", "찰리 채플린", QuoteCategory::Life, Difficulty::Medium),
    quote("살아있는 한 희망은 있습니다", "격언", QuoteCategory::Life, Difficulty::Medium),
    quote("우리가 두려워해야 할 것은 두려움 그 자체뿐이다", "프랭클린 루스벨트", QuoteCategory::Life, Difficulty::Hard),
    quote("인생에서 진정으로 중요한 것은 목적지에 도달하는 것이 아니라 그 여정 자체이다", "랄프 왈도 에머슨", QuoteCategory::Life, Difficulty::Hard),
    // 성공
    quote("노력은 배신하지 않는다", "격언", QuoteCategory::Success, Difficulty::Easy),
    quote("끈기가 승리한다", "격언", QuoteCategory::Success, Difficulty::Easy),
    quote("도전하라", "격언", QuoteCategory::Success, Difficulty::Easy),
    quote("준비된 자가 승리한다", "격언", QuoteCategory::Success, Difficulty::Easy),
    quote("성공의 비결은 목표를 향한 일관성이다", "벤자민 디즈레일리", QuoteCategory::Success, Difficulty::Medium),
    quote("실패를 두려워하지 말고 도전하라", "마이클 조던", QuoteCategory::Success, Difficulty::Medium),
    quote("위대한 일을 하는 유일한 방법은 자신이 하는 일을 사랑하는 것이다", "스티브 잡스", QuoteCategory::Success, Difficulty::Medium),
    quote("기회는 준비된 자에게 온다", "루이 파스퇴르", QuoteCategory::Success, Difficulty::Medium),
    quote("성공은 최종적인 것이 아니고 실패는 치명적인 것이 아니다 중요한 것은 계속하려는 용기다", "윈스턴 처칠", QuoteCategory::Success, Difficulty::Hard),
    quote("나는 실패한 적이 없다 단지 효과가 없는 만 가지 방법을 발견했을 뿐이다", "토마스 에디슨", QuoteCategory::Success, Difficulty::Hard),
    // 지혜
    quote("아는 것이 힘이다", "프랜시스 베이컨", QuoteCategory::Wisdom, Difficulty::Easy),
    quote("배움에는 끝이 없다", "격언", QuoteCategory::Wisdom, Difficulty::Easy),
    quote("침묵은 금이다", "속담", QuoteCategory::Wisdom, Difficulty::Easy),
    quote("생각이 말이 되고 말이 행동이 된다", "격언", QuoteCategory::Wisdom, Difficulty::Easy),
    quote("진정한 지혜는 자신이 모른다는 것을 아는 것이다", "소크라테스", QuoteCategory::Wisdom, Difficulty::Medium),
    quote("과거에서 배우고 현재를 살며 미래를 희망하라", "알버트 아인슈타인", QuoteCategory::Wisdom, Difficulty::Medium),
    quote("교육은 세상을 바꾸는 가장 강력한 무기이다", "넬슨 만델라", QuoteCategory::Wisdom, Difficulty::Medium),
    quote("현명한 사람은 기회를 발견하는 사람이다", "프랜시스 베이컨", QuoteCategory::Wisdom, Difficulty::Medium),
    quote("어리석은 자는 멀리서 행복을 찾고 현명한 자는 자신의 발치에서 행복을 키워간다", "제임스 오펜하임", QuoteCategory::Wisdom, Difficulty::Hard),
    quote("지식에 투자하는 것이 가장 좋은 이자를 낸다", "벤자민 프랭클린", QuoteCategory::Wisdom, Difficulty::Hard),
    // 사랑
    quote("사랑은 모든 것을 이긴다", "베르길리우스", QuoteCategory::Love, Difficulty::Easy),
    quote("사랑하라 그리고 사랑받아라", "격언", QuoteCategory::Love, Difficulty::Easy),
    quote("사랑은 희망입니다", "격언", QuoteCategory::Love, Difficulty::Easy),
    quote("진심은 통한다", "속담", QuoteCategory::Love, Difficulty::Easy),
    quote("사랑은 눈으로 보지 않고 마음으로 보는 것이다", "윌리엄 셰익스피어", QuoteCategory::Love, Difficulty::Medium),
    quote("사랑받고 싶다면 사랑하라 그리고 사랑스럽게 행동하라", "벤자민 프랭클린", QuoteCategory::Love, Difficulty::Medium),
    quote("인생에서 가장 아름다운 것은 사랑하는 사람과 함께하는 시간이다", "격언", QuoteCategory::Love, Difficulty::Medium),
    quote("사랑한다는 것은 서로를 바라보는 것이 아니라 함께 같은 방향을 바라보는 것이다", "생텍쥐페리", QuoteCategory::Love, Difficulty::Hard),
    quote("진정한 사랑은 영혼의 일부를 다른 사람에게 주는 것이다", "격언", QuoteCategory::Love, Difficulty::Hard),
];

/// Quotes matching the given filters; `None` matches everything.
#[must_use]
pub fn quotes_in(
    category: Option<QuoteCategory>,
    difficulty: Option<Difficulty>,
) -> Vec<&'static Quote> {
    QUOTES
        .iter()
        .filter(|q| category.is_none_or(|c| q.category == c))
        .filter(|q| difficulty.is_none_or(|d| q.difficulty == d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_all_difficulties() {
        for category in QuoteCategory::ALL {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                assert!(
                    !quotes_in(Some(category), Some(difficulty)).is_empty(),
                    "no quotes for {category:?}/{difficulty:?}"
                );
            }
        }
    }

    #[test]
    fn unfiltered_returns_the_whole_pool() {
        assert_eq!(quotes_in(None, None).len(), QUOTES.len());
    }

    #[test]
    fn filters_compose() {
        for q in quotes_in(Some(QuoteCategory::Wisdom), Some(Difficulty::Hard)) {
            assert_eq!(q.category, QuoteCategory::Wisdom);
            assert_eq!(q.difficulty, Difficulty::Hard);
        }
    }
}
