//! Template scanner for raw wikitext.
//!
//! Finds every `{{Name|arg=value|...}}` invocation in a fragment, nested ones
//! included, and splits each into a name and its arguments. Template
//! parameters (`{{{style|}}}`) and parser functions (`{{#if:...}}`,
//! `{{lc:...}}`) are recognised so their pipes do not split arguments, but they
//! are not reported as templates.

use std::ops::Range;

/// Colon-form magic words that make `{{name:...}}` a parser function
const PARSER_FUNCTIONS: &[&str] = &[
    "lc",
    "uc",
    "lcfirst",
    "ucfirst",
    "urlencode",
    "anchorencode",
    "padleft",
    "padright",
    "formatnum",
    "plural",
    "grammar",
    "gender",
    "int",
    "ns",
    "nse",
    "fullurl",
    "localurl",
    "canonicalurl",
    "filepath",
    "tag",
    "displaytitle",
    "defaultsort",
    "pagesincategory",
    "language",
    "special",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Raw name as written, or the 1-based index for positional arguments
    pub name: String,
    /// Raw value, whitespace untouched
    pub value: String,
    pub positional: bool,
}

impl Argument {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template name with surrounding whitespace removed
    pub name: String,
    pub arguments: Vec<Argument>,
    /// Byte range of the whole invocation, braces included
    pub span: Range<usize>,
}

impl Template {
    pub fn first_positional(&self) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.positional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Template,
    Parameter,
    Link,
}

impl FrameKind {
    fn width(self) -> usize {
        match self {
            FrameKind::Parameter => 3,
            FrameKind::Template | FrameKind::Link => 2,
        }
    }
}

struct Frame {
    kind: FrameKind,
    start: usize,
    body: usize,
    pipes: Vec<usize>,
    // First top-level `=` of each segment that follows a pipe
    equals: Vec<Option<usize>>,
}

impl Frame {
    fn open(kind: FrameKind, start: usize) -> Self {
        Self {
            kind,
            start,
            body: start + kind.width(),
            pipes: Vec::new(),
            equals: Vec::new(),
        }
    }

    fn into_template(self, text: &str, close: usize) -> Option<Template> {
        let name_end = self.pipes.first().copied().unwrap_or(close);
        let name = text[self.body..name_end].trim();
        if is_parser_function(name) {
            return None;
        }

        let mut arguments = Vec::with_capacity(self.pipes.len());
        let mut positional = 0;
        for (index, &pipe) in self.pipes.iter().enumerate() {
            let end = self.pipes.get(index + 1).copied().unwrap_or(close);
            match self.equals[index] {
                Some(eq) => arguments.push(Argument {
                    name: text[pipe + 1..eq].to_string(),
                    value: text[eq + 1..end].to_string(),
                    positional: false,
                }),
                None => {
                    positional += 1;
                    arguments.push(Argument {
                        name: positional.to_string(),
                        value: text[pipe + 1..end].to_string(),
                        positional: true,
                    });
                }
            }
        }

        Some(Template {
            name: name.to_string(),
            arguments,
            span: self.start..close + FrameKind::Template.width(),
        })
    }
}

fn is_parser_function(name: &str) -> bool {
    if name.starts_with('#') {
        return true;
    }
    match name.split_once(':') {
        Some((prefix, _)) => {
            let prefix = prefix.trim();
            PARSER_FUNCTIONS
                .iter()
                .any(|function| function.eq_ignore_ascii_case(prefix))
        }
        None => false,
    }
}

fn run_length(bytes: &[u8], from: usize, byte: u8) -> usize {
    bytes[from..].iter().take_while(|&&b| b == byte).count()
}

fn starts_with_ignore_case(haystack: &[u8], prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Offset just past the next `terminator` (ASCII, case-insensitive), or the end of text
fn skip_past(bytes: &[u8], from: usize, terminator: &str) -> usize {
    (from..bytes.len())
        .find(|&at| starts_with_ignore_case(&bytes[at..], terminator))
        .map(|at| at + terminator.len())
        .unwrap_or(bytes.len())
}

/// Returns every template invocation in `text`, ordered by where it starts.
///
/// Outer templates come before the templates nested in them. Unterminated
/// invocations are treated as plain text.
pub fn templates(text: &str) -> Vec<Template> {
    let bytes = text.as_bytes();
    let mut stack: Vec<Frame> = Vec::new();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' if bytes[i..].starts_with(b"<!--") => {
                i = skip_past(bytes, i + 4, "-->");
            }
            b'<' if starts_with_ignore_case(&bytes[i..], "<nowiki>") => {
                i = skip_past(bytes, i + 8, "</nowiki>");
            }
            b'{' => {
                let run = run_length(bytes, i, b'{');
                let mut remaining = run;
                let mut at = i;
                while remaining >= 2 {
                    let kind = if remaining == 3 {
                        FrameKind::Parameter
                    } else {
                        FrameKind::Template
                    };
                    stack.push(Frame::open(kind, at));
                    at += kind.width();
                    remaining -= kind.width();
                }
                i += run;
            }
            b'}' => {
                let run = run_length(bytes, i, b'}');
                let mut remaining = run;
                let mut at = i;
                while remaining >= 2 {
                    // a link left open inside a template does not keep it open
                    while stack.last().is_some_and(|frame| frame.kind == FrameKind::Link) {
                        stack.pop();
                    }
                    let width = match stack.last() {
                        Some(frame) if remaining >= frame.kind.width() => frame.kind.width(),
                        _ => break,
                    };
                    if let Some(frame) = stack.pop() {
                        if frame.kind == FrameKind::Template {
                            found.extend(frame.into_template(text, at));
                        }
                    }
                    at += width;
                    remaining -= width;
                }
                i += run;
            }
            b'[' if bytes.get(i + 1) == Some(&b'[') => {
                stack.push(Frame::open(FrameKind::Link, i));
                i += 2;
            }
            b']' if bytes.get(i + 1) == Some(&b']') => {
                if stack.last().is_some_and(|frame| frame.kind == FrameKind::Link) {
                    stack.pop();
                }
                i += 2;
            }
            b'|' => {
                if let Some(frame) = stack.last_mut() {
                    if frame.kind == FrameKind::Template {
                        frame.pipes.push(i);
                        frame.equals.push(None);
                    }
                }
                i += 1;
            }
            b'=' => {
                if let Some(frame) = stack.last_mut() {
                    if frame.kind == FrameKind::Template {
                        if let Some(slot) = frame.equals.last_mut() {
                            if slot.is_none() {
                                *slot = Some(i);
                            }
                        }
                    }
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    found.sort_by_key(|template| template.span.start);
    found
}

/// Splits `text` on `separator`, except where it falls inside a template invocation
pub fn split_outside_templates(text: &str, separator: char) -> Vec<&str> {
    let spans: Vec<Range<usize>> = templates(text).into_iter().map(|t| t.span).collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for (at, _) in text.match_indices(separator) {
        if spans.iter().any(|span| span.contains(&at)) {
            continue;
        }
        parts.push(&text[start..at]);
        start = at + separator.len_utf8();
    }

    parts.push(&text[start..]);
    parts
}
