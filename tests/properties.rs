//! Property tests for slug normalization and redirect evaluation.

use proptest::prelude::*;

use slug_cleanup::{
    is_clean, needs_rewriting, redirect::encode_segment, sanitize, to_auto, to_english,
    to_numeric, to_short, RedirectDecision, RedirectEvaluator,
};

/// Titles mixing CJK, ASCII, separators, whitespace and invisible marks
fn title() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::char::range('\u{4E00}', '\u{9FFF}'),
            prop::char::range('a', 'z'),
            prop::char::range('A', 'Z'),
            prop::char::range('0', '9'),
            prop::sample::select(vec![
                ' ', '\t', '-', '?', '｜', '？', '，', '!', '\u{200B}', '\u{2069}', '\u{202E}',
                '\u{FEFF}', 'ệ', 'đ', '★',
            ]),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(s in any::<String>()) {
        let once = sanitize(&s);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn sanitize_is_idempotent_on_titles(s in title()) {
        let once = sanitize(&s);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn numeric_is_stable_and_fixed_length(s in title()) {
        let token = to_numeric(&s);
        prop_assert_eq!(token.len(), 8);
        prop_assert!(is_clean(&token));
        prop_assert_eq!(to_numeric(&s), token);
    }

    #[test]
    fn english_is_clean_or_empty(s in title()) {
        let english = to_english(&s);
        prop_assert!(english.is_empty() || is_clean(&english), "{:?} -> {:?}", s, english);
    }

    #[test]
    fn short_respects_max_length(s in title(), n in 1usize..64) {
        let short = to_short(&s, n);
        prop_assert!(short.len() <= n, "{:?} -> {:?}", s, short);
        prop_assert!(is_clean(&short), "{:?} -> {:?}", s, short);
    }

    #[test]
    fn auto_is_always_clean(s in title()) {
        let auto = to_auto(&s);
        prop_assert!(is_clean(&auto), "{:?} -> {:?}", s, auto);
    }

    #[test]
    fn cjk_always_needs_rewriting(prefix in "[a-z-]{0,10}", ch in prop::char::range('\u{4E00}', '\u{9FFF}')) {
        let slug = format!("{}{}", prefix, ch);
        prop_assert!(needs_rewriting(&slug));
    }

    #[test]
    fn ascii_never_needs_rewriting(s in "[ -~]{0,60}") {
        prop_assert!(!needs_rewriting(&s));
    }

    #[test]
    fn redirect_locations_are_fixed_points(s in title()) {
        let evaluator = RedirectEvaluator::default();
        let path = format!("/zh-Hant/blog/{}", encode_segment(&s));

        if let RedirectDecision::Redirect { location, .. } = evaluator.evaluate(&path) {
            prop_assert_eq!(evaluator.evaluate(&location), RedirectDecision::NoRedirect);
        }
    }

    #[test]
    fn evaluate_never_panics(path in "/[a-zA-Z-]{1,8}/blog/[%0-9A-Fa-z]{0,20}") {
        let _ = RedirectEvaluator::default().evaluate(&path);
    }
}
