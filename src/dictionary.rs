//! Static transliteration table for blog titles.
//!
//! Phrases are matched greedily (longest first) against the source text.
//! Characters the table does not cover fall back to toneless pinyin for
//! ideographs and to their base letter for accented Latin.
//!
//! Changing any entry changes the English slugs of existing posts, so bump
//! [`DICTIONARY_VERSION`] with every edit.

use std::collections::HashMap;
use std::sync::OnceLock;

use pinyin::ToPinyin;
use unicode_normalization::UnicodeNormalization;

/// Version of the phrase table. English slugs are stable for a fixed version.
pub const DICTIONARY_VERSION: u32 = 1;

/// Phrase → hyphen-joined ASCII tokens. Traditional and Simplified forms are
/// listed side by side when they differ.
const PHRASES: &[(&str, &str)] = &[
    // Languages and people
    ("越南語言", "vietnamese-language"),
    ("越南语言", "vietnamese-language"),
    ("越南語", "vietnamese"),
    ("越南语", "vietnamese"),
    ("越南文", "vietnamese"),
    ("越南人", "vietnamese-people"),
    ("越南", "vietnam"),
    ("語言", "language"),
    ("语言", "language"),
    ("法語", "french"),
    ("法语", "french"),
    ("英語", "english"),
    ("英语", "english"),
    ("英文", "english"),
    ("中文", "chinese"),
    ("華語", "mandarin"),
    ("华语", "mandarin"),
    ("外國人", "foreigners"),
    ("外国人", "foreigners"),
    // Places
    ("台灣", "taiwan"),
    ("台湾", "taiwan"),
    ("胡志明市", "ho-chi-minh-city"),
    ("河內", "hanoi"),
    ("河内", "hanoi"),
    ("峴港", "da-nang"),
    ("岘港", "da-nang"),
    // Learning
    ("語言學校", "language-school"),
    ("语言学校", "language-school"),
    ("學習", "learn"),
    ("学习", "learn"),
    ("課程", "course"),
    ("课程", "course"),
    ("老師", "teacher"),
    ("老师", "teacher"),
    ("學生", "student"),
    ("学生", "student"),
    ("家教", "tutor"),
    ("補習班", "cram-school"),
    ("补习班", "cram-school"),
    ("留學", "study-abroad"),
    ("留学", "study-abroad"),
    ("一對一", "one-on-one"),
    ("一对一", "one-on-one"),
    ("線上", "online"),
    ("线上", "online"),
    ("考試", "exam"),
    ("考试", "exam"),
    ("檢定", "certification"),
    ("检定", "certification"),
    ("入門", "beginner"),
    ("入门", "beginner"),
    ("初學者", "beginners"),
    ("初学者", "beginners"),
    ("新手", "beginner"),
    ("基礎", "basics"),
    ("基础", "basics"),
    ("進階", "advanced"),
    ("进阶", "advanced"),
    ("教學", "tutorial"),
    ("教学", "tutorial"),
    ("必學", "must-learn"),
    ("必学", "must-learn"),
    // Skills
    ("發音", "pronunciation"),
    ("发音", "pronunciation"),
    ("聲調", "tones"),
    ("声调", "tones"),
    ("字母", "alphabet"),
    ("文法", "grammar"),
    ("語法", "grammar"),
    ("语法", "grammar"),
    ("單字", "vocabulary"),
    ("单字", "vocabulary"),
    ("詞彙", "vocabulary"),
    ("词汇", "vocabulary"),
    ("會話", "conversation"),
    ("会话", "conversation"),
    ("口說", "speaking"),
    ("口说", "speaking"),
    ("聽力", "listening"),
    ("听力", "listening"),
    ("閱讀", "reading"),
    ("阅读", "reading"),
    ("寫作", "writing"),
    ("写作", "writing"),
    ("用語", "phrases"),
    ("用语", "phrases"),
    ("問候", "greetings"),
    ("问候", "greetings"),
    ("數字", "numbers"),
    ("数字", "numbers"),
    ("你好", "hello"),
    ("謝謝", "thank-you"),
    ("谢谢", "thank-you"),
    // Topics
    ("文化", "culture"),
    ("美食", "food"),
    ("旅遊", "travel"),
    ("旅游", "travel"),
    ("工作", "work"),
    ("商務", "business"),
    ("商务", "business"),
    ("生活", "life"),
    ("日常", "daily"),
    // Title vocabulary
    ("真相", "truth"),
    ("解密", "decoded"),
    ("其實", "actually"),
    ("其实", "actually"),
    ("我們", "we"),
    ("我们", "we"),
    ("最愛", "favorite"),
    ("最爱", "favorite"),
    ("說", "speak"),
    ("说", "speak"),
    ("技巧", "tips"),
    ("方法", "methods"),
    ("秘訣", "secrets"),
    ("秘诀", "secrets"),
    ("攻略", "guide"),
    ("指南", "guide"),
    ("推薦", "recommended"),
    ("推荐", "recommended"),
    ("分享", "sharing"),
    ("心得", "insights"),
    ("常見", "common"),
    ("常见", "common"),
    ("問題", "questions"),
    ("问题", "questions"),
    ("錯誤", "mistakes"),
    ("错误", "mistakes"),
    ("完整", "complete"),
    ("免費", "free"),
    ("免费", "free"),
    ("快速", "fast"),
    ("簡單", "easy"),
    ("简单", "easy"),
    ("比較", "comparison"),
    ("比较", "comparison"),
    ("差異", "differences"),
    ("差异", "differences"),
    // Question words
    ("為什麼", "why"),
    ("为什么", "why"),
    ("如何", "how-to"),
    ("怎麼", "how"),
    ("怎么", "how"),
    ("什麼", "what"),
    ("什么", "what"),
    ("哪裡", "where"),
    ("哪里", "where"),
    ("多少", "how-much"),
];

struct PhraseTable {
    entries: HashMap<&'static str, &'static str>,
    /// Longest key, in chars
    max_chars: usize,
}

static TABLE: OnceLock<PhraseTable> = OnceLock::new();

fn table() -> &'static PhraseTable {
    TABLE.get_or_init(|| PhraseTable {
        entries: PHRASES.iter().copied().collect(),
        max_chars: PHRASES
            .iter()
            .map(|(phrase, _)| phrase.chars().count())
            .max()
            .unwrap_or(0),
    })
}

/// Find the longest phrase starting at `chars[start]`.
///
/// Returns the number of chars consumed and the phrase's ASCII tokens.
pub fn longest_match(chars: &[char], start: usize) -> Option<(usize, &'static str)> {
    let table = table();
    let available = chars.len().saturating_sub(start).min(table.max_chars);

    (1..=available).rev().find_map(|len| {
        let candidate: String = chars[start..start + len].iter().collect();
        table
            .entries
            .get(candidate.as_str())
            .map(|tokens| (len, *tokens))
    })
}

/// Toneless pinyin for an ideograph the phrase table does not cover.
pub fn pinyin_token(ch: char) -> Option<String> {
    let plain = ch.to_pinyin()?.plain();
    // ü is spelled v, as on pinyin keyboards
    let token: String = plain
        .chars()
        .map(|c| if c == 'ü' { 'v' } else { c })
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!token.is_empty()).then_some(token)
}

/// Base ASCII letters of an accented Latin character (`ệ` → `e`).
///
/// Returns `None` for characters with no ASCII base, such as symbols.
pub fn strip_accents(ch: char) -> Option<String> {
    match ch {
        'đ' | 'Đ' => return Some("d".to_string()),
        'ø' | 'Ø' => return Some("o".to_string()),
        'ß' => return Some("ss".to_string()),
        'æ' | 'Æ' => return Some("ae".to_string()),
        _ => {}
    }

    let mut buf = [0u8; 4];
    let base: String = ch
        .encode_utf8(&mut buf)
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!base.is_empty()).then_some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_entries_are_url_safe() {
        for (phrase, tokens) in PHRASES {
            assert!(!tokens.is_empty(), "empty tokens for {}", phrase);
            assert!(
                tokens
                    .split('-')
                    .all(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_lowercase())),
                "tokens for {} are not clean: {}",
                phrase,
                tokens
            );
        }
    }

    #[test]
    fn test_no_duplicate_phrases() {
        assert_eq!(table().entries.len(), PHRASES.len());
    }

    #[test]
    fn test_longest_match_prefers_longer_phrase() {
        let text = chars("越南語言真相");
        assert_eq!(longest_match(&text, 0), Some((4, "vietnamese-language")));

        let text = chars("越南語課程");
        assert_eq!(longest_match(&text, 0), Some((3, "vietnamese")));
    }

    #[test]
    fn test_longest_match_mid_text() {
        let text = chars("法語?英語");
        assert_eq!(longest_match(&text, 3), Some((2, "english")));
        assert_eq!(longest_match(&text, 2), None);
    }

    #[test]
    fn test_longest_match_out_of_range() {
        let text = chars("說");
        assert_eq!(longest_match(&text, 0), Some((1, "speak")));
        assert_eq!(longest_match(&text, 1), None);
    }

    #[test]
    fn test_pinyin_token() {
        assert_eq!(pinyin_token('中').as_deref(), Some("zhong"));
        assert_eq!(pinyin_token('a'), None);
    }

    #[test]
    fn test_pinyin_token_spells_u_umlaut_as_v() {
        assert_eq!(pinyin_token('女').as_deref(), Some("nv"));
        assert_eq!(pinyin_token('绿').as_deref(), Some("lv"));
        assert_eq!(pinyin_token('旅').as_deref(), Some("lv"));
    }

    #[test]
    fn test_strip_accents_vietnamese() {
        assert_eq!(strip_accents('ệ').as_deref(), Some("e"));
        assert_eq!(strip_accents('Đ').as_deref(), Some("d"));
        assert_eq!(strip_accents('ư').as_deref(), Some("u"));
        assert_eq!(strip_accents('★'), None);
    }
}
