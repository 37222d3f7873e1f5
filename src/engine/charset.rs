//! Kinsoku character classes.
//!
//! Three fixed codepoint sets decide how a text unit behaves at a line edge:
//! - **Begin punctuation** (`（〈《「『〔【“‘﹃`) may not end a line
//! - **End punctuation** (`）〉》」』﹄〕—﹏、】。！；”’…～，？：`) may not start a line
//! - **Line break** (`\n`) forces a new line
//!
//! A unit belongs to a class when any of its codepoints is in the set, so a
//! grapheme cluster such as `"。\u{fe0e}"` still counts as end punctuation.

use crate::types::NodeClass;

/// Opening brackets and quotes.
pub const BEGIN_PUNCTUATION: &[char] = &[
    '\u{ff08}', // （
    '\u{3008}', // 〈
    '\u{300a}', // 《
    '\u{300c}', // 「
    '\u{300e}', // 『
    '\u{3014}', // 〔
    '\u{3010}', // 【
    '\u{201c}', // “
    '\u{2018}', // ‘
    '\u{fe43}', // ﹃
];

/// Closing brackets and quotes, stops, commas, dashes and ellipses.
pub const END_PUNCTUATION: &[char] = &[
    '\u{ff09}', // ）
    '\u{3009}', // 〉
    '\u{300b}', // 》
    '\u{300d}', // 」
    '\u{300f}', // 』
    '\u{fe44}', // ﹄
    '\u{3015}', // 〕
    '\u{2014}', // —
    '\u{fe4f}', // ﹏
    '\u{3001}', // 、
    '\u{3011}', // 】
    '\u{3002}', // 。
    '\u{ff01}', // ！
    '\u{ff1b}', // ；
    '\u{201d}', // ”
    '\u{2019}', // ’
    '\u{2026}', // …
    '\u{ff5e}', // ～
    '\u{ff0c}', // ，
    '\u{ff1f}', // ？
    '\u{ff1a}', // ：
];

pub const LINE_BREAK: &[char] = &['\n'];

#[inline]
fn found_in(content: &str, set: &[char]) -> bool {
    content.chars().any(|c| set.contains(&c))
}

/// Classify a text unit against the three kinsoku sets.
pub fn classify(content: &str) -> NodeClass {
    let mut class = NodeClass::ORDINARY;
    if found_in(content, BEGIN_PUNCTUATION) {
        class |= NodeClass::BEGIN_PUNCTUATION;
    }
    if found_in(content, END_PUNCTUATION) {
        class |= NodeClass::END_PUNCTUATION;
    }
    if found_in(content, LINE_BREAK) {
        class |= NodeClass::LINE_BREAK;
    }
    class
}
