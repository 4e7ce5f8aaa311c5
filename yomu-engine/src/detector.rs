//! Rule-based sentence detector for Japanese text
//!
//! Sentence ends are found with the following rules, applied to at most
//! `limit` characters of the window:
//! - a terminator (`。？！♪…?!`), a run of three or more `・`, or a `.`/`．`
//!   that is neither preceded by an alphanumeric nor followed by an
//!   alphanumeric or comma, followed by any run of dots and terminators;
//!   two or more consecutive `<br>` tags also end a sentence
//! - terminators inside brackets do not end a sentence
//! - closing brackets, commas and terminators right after the end are pulled
//!   into the sentence, since no sentence can start with them
//! - itemize headers (`1.`) and quotative continuations (`！と`, `」って`)
//!   do not end a sentence
//!
//! Without any terminator within `limit` characters the sentence is cut after
//! the last whitespace run of the first line, or at `limit`.
//!
//! Any decision that depends on characters past the end of the window is
//! deferred with [`Segment::NeedMoreInput`] until the stream ends or the
//! window reaches `limit` characters.

use std::collections::HashSet;
use std::fmt;
use yomu_stream::{Segment, Segmenter};

/// Default number of characters examined for one sentence
pub const DEFAULT_LIMIT: usize = 4096;

const CDOT: char = '・';

/// Characters that look back at most this far for a spanning word
const NON_BREAK_LOOKBEHIND: usize = 64;

/// Veto for sentence ends that fall inside a known word
pub trait NonBreakChecker: Send + Sync {
    /// True if a known word spans `eos` or ends exactly there
    fn has_non_break_word(&self, text: &[char], eos: usize) -> bool;

    /// Characters needed after `eos` to answer reliably
    fn lookahead(&self) -> usize {
        0
    }
}

/// [`NonBreakChecker`] backed by a fixed word list
///
/// Useful for names that contain terminators, such as `モーニング娘。` or
/// `Yahoo!ニュース`.
#[derive(Debug, Clone, Default)]
pub struct WordListChecker {
    words: Vec<Vec<char>>,
    first_chars: HashSet<char>,
    longest: usize,
}

impl WordListChecker {
    /// Create a checker for the given words
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Vec<char>> = words
            .into_iter()
            .map(|w| w.as_ref().chars().collect::<Vec<_>>())
            .filter(|w| w.len() > 1)
            .collect();
        let first_chars = words.iter().map(|w| w[0]).collect();
        let longest = words.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            words,
            first_chars,
            longest,
        }
    }

    /// True if no words are registered
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl NonBreakChecker for WordListChecker {
    fn has_non_break_word(&self, text: &[char], eos: usize) -> bool {
        let from = eos.saturating_sub(NON_BREAK_LOOKBEHIND.max(self.longest));
        (from..eos).any(|start| {
            self.first_chars.contains(&text[start])
                && self
                    .words
                    .iter()
                    .any(|w| start + w.len() >= eos && text[start..].starts_with(w))
        })
    }

    fn lookahead(&self) -> usize {
        self.longest
    }
}

/// Japanese sentence boundary detector
pub struct SentenceDetector {
    limit: usize,
    checker: Option<Box<dyn NonBreakChecker>>,
}

impl fmt::Debug for SentenceDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceDetector")
            .field("limit", &self.limit)
            .field(
                "checker",
                &self.checker.as_ref().map(|_| "<NonBreakChecker>"),
            )
            .finish()
    }
}

impl Default for SentenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceDetector {
    /// Create a detector with [`DEFAULT_LIMIT`]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Create a detector examining at most `limit` characters per sentence
    ///
    /// A limit of zero selects [`DEFAULT_LIMIT`].
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: if limit > 0 { limit } else { DEFAULT_LIMIT },
            checker: None,
        }
    }

    /// Install a non-break checker
    pub fn with_checker(mut self, checker: impl NonBreakChecker + 'static) -> Self {
        self.checker = Some(Box::new(checker));
        self
    }

    /// Maximum sentence length in characters
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn detect(&self, window: &[char], at_end_of_stream: bool) -> Segment {
        let complete = at_end_of_stream || window.len() >= self.limit;
        let s = &window[..window.len().min(self.limit)];
        if s.is_empty() {
            return Segment::NeedMoreInput;
        }

        let mut level = 0usize;
        let mut scanned = 0;
        let mut i = 0;
        while i < s.len() {
            let Some(end) = breaker_at(s, i) else {
                i += 1;
                continue;
            };
            i = end;
            if end == s.len() && !complete {
                return Segment::NeedMoreInput;
            }

            for &c in &s[scanned..end] {
                if is_open(c) {
                    level += 1;
                } else if is_close(c) {
                    level = level.saturating_sub(1);
                }
            }
            scanned = end;
            if level != 0 {
                continue;
            }

            let mut eos = end;
            if eos < s.len() {
                eos += prohibited_bos(&s[eos..]);
                if eos == s.len() && !complete {
                    return Segment::NeedMoreInput;
                }
            }
            if is_itemize_header(&s[..eos]) {
                continue;
            }
            if eos < s.len() {
                match continuous_phrase(s, eos, complete) {
                    Some(true) => continue,
                    Some(false) => {}
                    None => return Segment::NeedMoreInput,
                }
            }
            if let Some(checker) = &self.checker {
                if !complete && eos + checker.lookahead() > s.len() {
                    return Segment::NeedMoreInput;
                }
                if checker.has_non_break_word(s, eos) {
                    continue;
                }
            }
            return Segment::Confirmed(eos);
        }

        if !complete {
            return Segment::NeedMoreInput;
        }
        Segment::Confirmed(whitespace_cut(s).unwrap_or(s.len()))
    }
}

impl Segmenter for SentenceDetector {
    fn find_boundary(&self, window: &[char], at_end_of_stream: bool) -> Segment {
        self.detect(window, at_end_of_stream)
    }
}

fn is_period(c: char) -> bool {
    matches!(c, '。' | '？' | '！' | '♪' | '…' | '?' | '!')
}

fn is_dot(c: char) -> bool {
    matches!(c, '.' | '．')
}

fn is_comma(c: char) -> bool {
    matches!(c, ',' | '，' | '、')
}

fn is_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            'ａ'..='ｚ'
                | 'Ａ'..='Ｚ'
                | '０'..='９'
                | '〇'
                | '一'
                | '二'
                | '三'
                | '四'
                | '五'
                | '六'
                | '七'
                | '八'
                | '九'
                | '十'
                | '百'
                | '千'
                | '万'
                | '億'
                | '兆'
        )
}

fn is_open(c: char) -> bool {
    matches!(
        c,
        '(' | '{' | '｛' | '[' | '（' | '「' | '【' | '『' | '［' | '≪' | '〔' | '“'
    )
}

fn is_close(c: char) -> bool {
    matches!(
        c,
        ')' | '}' | ']' | '）' | '」' | '｝' | '】' | '』' | '］' | '〕' | '≫' | '”'
    )
}

/// ASCII whitespace, including vertical tab
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// End of a sentence breaker starting at `i`, if any
fn breaker_at(s: &[char], i: usize) -> Option<usize> {
    let c = s[i];
    let head_end = if is_period(c) {
        Some(i + 1)
    } else if c == CDOT {
        let run = s[i..].iter().take_while(|&&c| c == CDOT).count();
        (run >= 3).then_some(i + run)
    } else if is_dot(c) {
        let after_alnum = i > 0 && is_alnum(s[i - 1]);
        let before_alnum = s.get(i + 1).is_some_and(|&n| is_alnum(n) || is_comma(n));
        (!after_alnum && !before_alnum).then_some(i + 1)
    } else {
        None
    };

    match head_end {
        Some(mut end) => {
            while end < s.len() && (is_dot(s[end]) || is_period(s[end])) {
                end += 1;
            }
            Some(end)
        }
        None => br_run_at(s, i),
    }
}

fn is_br_tag(s: &[char]) -> bool {
    matches!(s, ['<', 'b', 'r', '>', ..] | ['<', 'B', 'R', '>', ..])
}

fn br_run_at(s: &[char], i: usize) -> Option<usize> {
    let mut end = i;
    let mut count = 0;
    while is_br_tag(&s[end..]) {
        end += 4;
        count += 1;
    }
    (count >= 2).then_some(end)
}

fn prohibited_bos(rest: &[char]) -> usize {
    rest.iter()
        .take_while(|&&c| is_close(c) || is_comma(c) || is_period(c))
        .count()
}

fn is_itemize_header(prefix: &[char]) -> bool {
    matches!(prefix, [a, d] if is_alnum(*a) && is_dot(*d))
}

fn ends_with_itemize_header(prefix: &[char]) -> bool {
    matches!(prefix, [.., a, d] if is_alnum(*a) && is_dot(*d))
}

/// Whether the text right after `eos` continues the sentence
///
/// `None` when that depends on characters not yet in the window.
fn continuous_phrase(s: &[char], eos: usize, complete: bool) -> Option<bool> {
    let prev = s[eos - 1];
    if matches!(prev, '！' | '？' | '!' | '?') || is_close(prev) {
        match s[eos] {
            'と' | 'っ' => return Some(true),
            'で' => match s.get(eos + 1) {
                Some('す') => return Some(true),
                None if !complete => return None,
                _ => {}
            },
            _ => {}
        }
    }
    Some(matches!(s[eos], 'と' | 'や' | 'の') && ends_with_itemize_header(&s[..eos]))
}

/// Cut after the last whitespace run of the first non-empty line
fn whitespace_cut(s: &[char]) -> Option<usize> {
    let mut start = 0;
    while start < s.len() {
        if is_line_terminator(s[start]) {
            start += 1;
            continue;
        }
        let line_end = s[start..]
            .iter()
            .position(|&c| is_line_terminator(c))
            .map_or(s.len(), |p| start + p);
        let upper = line_end.min(s.len() - 1);
        if let Some(k) = (start + 1..=upper).rev().find(|&k| is_space(s[k])) {
            let end = s[k..]
                .iter()
                .position(|&c| !is_space(c))
                .map_or(s.len(), |p| k + p);
            return Some(end);
        }
        start = line_end + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn eos(detector: &SentenceDetector, text: &str) -> Segment {
        detector.find_boundary(&chars(text), true)
    }

    #[test]
    fn test_terminators() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "あいう。えお。"), Segment::Confirmed(4));
        assert_eq!(eos(&d, "あいう？えお"), Segment::Confirmed(4));
        assert_eq!(eos(&d, "今日は♪明日"), Segment::Confirmed(4));
        assert_eq!(eos(&d, "なんと！？本当"), Segment::Confirmed(5));
    }

    #[test]
    fn test_dots() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "あいう.えお"), Segment::Confirmed(4));
        // decimal point and abbreviations
        assert_eq!(eos(&d, "3.14です。"), Segment::Confirmed(7));
        assert_eq!(eos(&d, "あ.a"), Segment::Confirmed(3));
        assert_eq!(eos(&d, "あ.、い"), Segment::Confirmed(4));
        assert_eq!(eos(&d, "あいう・・・えお"), Segment::Confirmed(6));
        assert_eq!(eos(&d, "あ・・い"), Segment::Confirmed(4));
    }

    #[test]
    fn test_br_tags() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "あ<br><BR>い"), Segment::Confirmed(9));
        assert_eq!(eos(&d, "あ<br>い"), Segment::Confirmed(6));
    }

    #[test]
    fn test_parentheses() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "「あいう。えお」かき。く"), Segment::Confirmed(11));
        assert_eq!(eos(&d, "あ）い。う"), Segment::Confirmed(4));
    }

    #[test]
    fn test_prohibited_bos() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "あいう。」えお"), Segment::Confirmed(5));
        assert_eq!(eos(&d, "あいう。、えお"), Segment::Confirmed(5));
    }

    #[test]
    fn test_itemize_header() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "1.あいう。"), Segment::Confirmed(6));
        assert_eq!(eos(&d, "Ａ．あいう。"), Segment::Confirmed(6));
    }

    #[test]
    fn test_continuous_phrase() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "あいう！とえお。"), Segment::Confirmed(8));
        assert_eq!(eos(&d, "「あ」っていう。"), Segment::Confirmed(8));
        assert_eq!(eos(&d, "あ？です。"), Segment::Confirmed(5));
    }

    #[test]
    fn test_whitespace_fallback() {
        let d = SentenceDetector::new();
        assert_eq!(eos(&d, "あいう えお"), Segment::Confirmed(4));
        assert_eq!(eos(&d, "あ い  う"), Segment::Confirmed(5));
        assert_eq!(eos(&d, "あいえ\nかき"), Segment::Confirmed(4));
        assert_eq!(eos(&d, "あいう"), Segment::Confirmed(3));
        // full-width space is not whitespace here
        assert_eq!(eos(&d, "あ　い"), Segment::Confirmed(3));
    }

    #[test]
    fn test_limit_forces_cut() {
        let d = SentenceDetector::with_limit(5);
        let window = chars("あいうえおかきくけこ");
        assert_eq!(d.find_boundary(&window, false), Segment::Confirmed(5));
        assert_eq!(d.find_boundary(&window[..4], false), Segment::NeedMoreInput);
        assert_eq!(d.find_boundary(&window[..4], true), Segment::Confirmed(4));
    }

    #[test]
    fn test_defers_decisions_at_window_end() {
        let d = SentenceDetector::new();
        // the run of terminators may continue
        assert_eq!(
            d.find_boundary(&chars("あいう。"), false),
            Segment::NeedMoreInput
        );
        // a closing bracket may follow
        assert_eq!(
            d.find_boundary(&chars("あいう。」"), false),
            Segment::NeedMoreInput
        );
        // "です" may follow
        assert_eq!(
            d.find_boundary(&chars("あ？で"), false),
            Segment::NeedMoreInput
        );
        // no terminator yet
        assert_eq!(
            d.find_boundary(&chars("あいう"), false),
            Segment::NeedMoreInput
        );
        // enough lookahead
        assert_eq!(
            d.find_boundary(&chars("あいう。え"), false),
            Segment::Confirmed(4)
        );
    }

    #[test]
    fn test_word_list_checker() {
        let d = SentenceDetector::new().with_checker(WordListChecker::new(["Yahoo!ニュース"]));
        assert_eq!(eos(&d, "Yahoo!ニュースを見た。次"), Segment::Confirmed(14));
        assert_eq!(eos(&d, "Yahoo!見た。"), Segment::Confirmed(6));

        // a word ending with the terminator keeps the sentence open
        let d = SentenceDetector::new().with_checker(WordListChecker::new(["モーニング娘。"]));
        assert_eq!(eos(&d, "モーニング娘。の歌。"), Segment::Confirmed(10));

        // the word could still complete after the window
        assert_eq!(
            d.find_boundary(&chars("Yahoo!ニュ"), false),
            Segment::NeedMoreInput
        );
    }

    #[test]
    fn test_zero_limit_uses_default() {
        assert_eq!(SentenceDetector::with_limit(0).limit(), DEFAULT_LIMIT);
    }
}
