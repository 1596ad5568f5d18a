#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) text: &'a str,
    pub(crate) span: Span,
}

impl Token<'_> {
    /// Operator tokens end the leading text and start an operation.
    pub(crate) fn is_operator(&self) -> bool {
        matches!(self.text.as_bytes().first(), Some(b'+' | b'*' | b'@' | b'\\'))
    }
}

/// Split on whitespace, keeping bracketed groups (`+[0 1 2]`) as one token.
///
/// An unclosed `[` runs to the end of the input; the parser reports it.
pub(crate) fn lex(input: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c.is_whitespace() && depth == 0 {
            if let Some(s) = start.take() {
                out.push(token(input, s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(token(input, s, input.len()));
    }
    out
}

fn token(input: &str, start: usize, end: usize) -> Token<'_> {
    Token {
        text: &input[start..end],
        span: Span { start, end },
    }
}

/// Pieces of `s` separated by `sep`, with absolute byte offsets (`base` is the offset of `s`).
pub(crate) fn split_offsets(s: &str, base: usize, sep: char) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut from = 0usize;
    for (i, _) in s.match_indices(sep) {
        out.push((base + from, &s[from..i]));
        from = i + sep.len_utf8();
    }
    out.push((base + from, &s[from..]));
    out
}

/// Whitespace-separated words of `s` with absolute byte offsets.
pub(crate) fn words(s: &str, base: usize) -> Vec<(usize, &str)> {
    lex(s)
        .into_iter()
        .map(|t| (base + t.span.start, t.text))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/lexer.rs"]
mod tests;
