//! Filename filters
//!
//! Include/exclude globs are matched against the bare filename only, never
//! against the directory part of a path. Include is evaluated first; a name
//! that also matches the exclude pattern is rejected.
//!
//! Patterns use the classic shell dialect (`*`, `?`, `[seq]`, `[!seq]`) and
//! are rewritten into globset syntax before compiling: braces and
//! backslashes are literal, an unclosed `[` is a literal bracket, `[^x]`
//! does not negate, and reversed ranges such as `[z-a]` match nothing.

use globset::{GlobBuilder, GlobMatcher};

use crate::core::model::SearchError;

/// One compiled filename pattern
#[derive(Debug, Clone)]
enum NamePattern {
    Glob(GlobMatcher),
    /// The pattern contains a class that can never match
    Never,
}

impl NamePattern {
    fn is_match(&self, file_name: &str) -> bool {
        match self {
            NamePattern::Glob(matcher) => matcher.is_match(file_name),
            NamePattern::Never => false,
        }
    }
}

/// Compiled include/exclude pair for one search
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include: Option<NamePattern>,
    exclude: Option<NamePattern>,
}

impl NameFilter {
    /// Compile both optional patterns before any traversal starts.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, SearchError> {
        Ok(Self {
            include: include.map(build_pattern).transpose()?,
            exclude: exclude.map(build_pattern).transpose()?,
        })
    }

    /// Whether a bare filename passes both filters
    pub fn accepts(&self, file_name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(file_name) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(file_name) {
                return false;
            }
        }
        true
    }
}

/// Build a case-sensitive matcher for a shell-style filename pattern.
fn build_pattern(pattern: &str) -> Result<NamePattern, SearchError> {
    let Some(glob) = translate(pattern) else {
        return Ok(NamePattern::Never);
    };
    GlobBuilder::new(&glob)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
        .map(|glob| NamePattern::Glob(glob.compile_matcher()))
        .map_err(|source| SearchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Rewrite a shell pattern into globset syntax. `None` when the pattern
/// cannot match any name.
fn translate(pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut prev_star = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if c == '*' {
            // runs of '*' behave like one
            if !prev_star {
                out.push('*');
            }
            prev_star = true;
            continue;
        }
        prev_star = false;

        match c {
            '?' => out.push('?'),
            '[' => {
                let mut j = i;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    out.push_str("[[]");
                } else {
                    out.push_str(&translate_class(&chars[i..j])?);
                    i = j + 1;
                }
            }
            '{' | '}' | ']' => push_literal(&mut out, c),
            _ => out.push(c),
        }
    }

    Some(out)
}

/// Translate the inside of a `[...]` class.
fn translate_class(content: &[char]) -> Option<String> {
    let (negated, body) = match content.first() {
        Some('!') => (true, &content[1..]),
        _ => (false, content),
    };

    let mut ranges = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            ranges.push((body[k], body[k + 2]));
            k += 3;
        } else {
            ranges.push((body[k], body[k]));
            k += 1;
        }
    }
    ranges.retain(|(lo, hi)| lo <= hi);

    if ranges.is_empty() {
        return if negated { Some("?".to_string()) } else { None };
    }
    if !negated && ranges.len() == 1 && ranges[0].0 == ranges[0].1 {
        let mut single = String::new();
        push_literal(&mut single, ranges[0].0);
        return Some(single);
    }

    // ']' must lead, '^'/'!' must not lead, '-' must trail
    let mut leading = String::new();
    let mut middle = String::new();
    let mut late = String::new();
    let mut trailing = String::new();
    for (lo, hi) in ranges {
        if lo != hi {
            middle.push(lo);
            middle.push('-');
            middle.push(hi);
            continue;
        }
        match lo {
            ']' => leading.push(']'),
            '-' => trailing.push('-'),
            '^' | '!' => late.push(lo),
            _ => middle.push(lo),
        }
    }

    let mut class = String::from("[");
    if negated {
        class.push('!');
    }
    class.push_str(&leading);
    class.push_str(&middle);
    class.push_str(&late);
    class.push_str(&trailing);
    class.push(']');
    Some(class)
}

/// Push one character so globset reads it literally
fn push_literal(out: &mut String, c: char) {
    match c {
        '*' | '?' | '[' | ']' | '{' | '}' => {
            out.push('[');
            out.push(c);
            out.push(']');
        }
        _ => out.push(c),
    }
}
