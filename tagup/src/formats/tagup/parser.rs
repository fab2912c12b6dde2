//! Tagup parsing (markup string → document tree)
//!
//! A single-pass parser over the bracketed tag syntax, driven by an explicit
//! stack of open tags rather than recursion, so arbitrarily deep or
//! adversarial input never exhausts the call stack. Parsing never fails:
//! any token that cannot be matched to a recognized, well formed tag pair
//! stays in the output as literal text. When an opening tag never finds its
//! closing tag, its frame degrades on the spot — the open token is restored
//! verbatim and everything parsed inside it is spliced into the enclosing
//! context — so one unclosed tag never swallows the rest of the document.

use crate::ir::nodes::{Document, ListItem, Node};
use crate::vocabulary::{self, TagRole, TagSpec};
use std::mem;

/// Open tags beyond this depth stay literal text. Real content nests a
/// handful of levels; the cap keeps the parsed tree shallow enough for the
/// serializers' recursive walks on adversarial input.
const MAX_NESTING_DEPTH: usize = 128;

/// Parse a tagup markup string into a document tree.
pub fn parse_markup(source: &str) -> Document {
    Parser::new(source).run()
}

/// A bracketed token scanned from the input. `raw` is the original text
/// including brackets, used to restore the token verbatim when it turns out
/// not to belong to a well formed pair.
struct Token<'a> {
    raw: &'a str,
    body: &'a str,
    end: usize,
}

/// One entry of the open-tag stack: the content collected so far for a tag
/// that has not been closed yet. Trailing plain text is buffered in `text`
/// so adjacent literal fragments merge into a single node.
struct Frame {
    kind: FrameKind,
    /// Original open token, restored verbatim if the frame never closes.
    raw: String,
    nodes: Vec<Node>,
    text: String,
}

enum FrameKind {
    Root,
    Pair(&'static TagSpec),
    Link {
        href: String,
    },
    List {
        ordered: bool,
        /// Completed item segments: the `[*]` token that started each one
        /// (empty for the fragment before the first delimiter) plus its
        /// content. Kept untrimmed so an unclosed list restores exactly.
        segments: Vec<(String, Vec<Node>)>,
        /// Delimiter token of the in-progress segment, whose content lives
        /// in the frame's `nodes`/`text`.
        current_delim: String,
    },
}

impl FrameKind {
    fn list(ordered: bool) -> FrameKind {
        FrameKind::List {
            ordered,
            segments: Vec::new(),
            current_delim: String::new(),
        }
    }
}

impl Frame {
    fn root() -> Frame {
        Frame {
            kind: FrameKind::Root,
            raw: String::new(),
            nodes: Vec::new(),
            text: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_node(&mut self, node: Node) {
        self.flush();
        self.nodes.push(node);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::Text(mem::take(&mut self.text)));
        }
    }

    fn take_children(&mut self) -> Vec<Node> {
        self.flush();
        mem::take(&mut self.nodes)
    }

    /// Splice a node produced by a degraded child frame, merging adjacent
    /// literal text.
    fn absorb(&mut self, node: Node) {
        match node {
            Node::Text(text) => self.text.push_str(&text),
            other => self.push_node(other),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    current: Frame,
    stack: Vec<Frame>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            src,
            pos: 0,
            current: Frame::root(),
            stack: Vec::new(),
        }
    }

    fn run(mut self) -> Document {
        while self.pos < self.src.len() {
            let src = self.src;
            let rest = &src[self.pos..];
            let Some(offset) = rest.find('[') else {
                self.current.push_text(rest);
                break;
            };
            let bracket = self.pos + offset;
            if offset > 0 {
                self.current.push_text(&src[self.pos..bracket]);
            }

            let Some(token) = self.scan_token(bracket) else {
                self.current.push_text("[");
                self.pos = bracket + 1;
                continue;
            };

            self.pos = token.end;
            self.handle_token(&token);
        }
        self.finish()
    }

    /// Scan a `[...]` token starting at `start` (which must point at `[`).
    /// Bodies spanning a newline or containing another `[` are not tokens.
    fn scan_token(&self, start: usize) -> Option<Token<'a>> {
        let rest = &self.src[start + 1..];
        let close = rest.find(']')?;
        let body = &rest[..close];
        if body.contains('\n') || body.contains('[') {
            return None;
        }
        Some(Token {
            raw: &self.src[start..start + close + 2],
            body,
            end: start + close + 2,
        })
    }

    /// Dispatch one scanned token. `self.pos` is already past it.
    fn handle_token(&mut self, token: &Token<'a>) {
        // Closing tag: close the nearest matching open frame, degrading any
        // frames above it. Stray closers stay literal.
        if let Some(name) = token.body.strip_prefix('/') {
            if self.has_open(name) {
                self.close(name);
            } else {
                self.current.push_text(token.raw);
            }
            return;
        }

        // Item delimiter, meaningful only directly inside a list block.
        if token.body == vocabulary::LIST_ITEM_TOKEN {
            if matches!(self.current.kind, FrameKind::List { .. }) {
                self.current.flush();
                let nodes = mem::take(&mut self.current.nodes);
                if let FrameKind::List {
                    segments,
                    current_delim,
                    ..
                } = &mut self.current.kind
                {
                    segments.push((mem::take(current_delim), nodes));
                    *current_delim = token.raw.to_string();
                }
            } else {
                self.current.push_text(token.raw);
            }
            return;
        }

        let (name, value) = match token.body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token.body, None),
        };
        let Some(spec) = vocabulary::lookup(name) else {
            self.current.push_text(token.raw);
            return;
        };

        // A parameter on a tag that takes none is not that tag.
        if value.is_some() && !spec.takes_value && !matches!(spec.role, TagRole::List) {
            self.current.push_text(token.raw);
            return;
        }

        match spec.role {
            TagRole::Image | TagRole::Attachment => self.read_raw_span(token, spec),
            TagRole::Link => match value {
                Some(href) => self.open_frame(
                    token,
                    FrameKind::Link {
                        href: href.to_string(),
                    },
                ),
                None => self.current.push_text(token.raw),
            },
            TagRole::List => match value {
                None => self.open_frame(token, FrameKind::list(false)),
                Some(vocabulary::ORDERED_LIST_VALUE) => {
                    self.open_frame(token, FrameKind::list(true))
                }
                Some(_) => self.current.push_text(token.raw),
            },
            _ => self.open_frame(token, FrameKind::Pair(spec)),
        }
    }

    fn open_frame(&mut self, token: &Token, kind: FrameKind) {
        if self.stack.len() >= MAX_NESTING_DEPTH {
            self.current.push_text(token.raw);
            return;
        }
        let frame = Frame {
            kind,
            raw: token.raw.to_string(),
            nodes: Vec::new(),
            text: String::new(),
        };
        self.stack.push(mem::replace(&mut self.current, frame));
    }

    /// Consume the raw text span of a tag whose content is a reference
    /// (image source, attachment source) rather than nested markup.
    fn read_raw_span(&mut self, token: &Token, spec: &'static TagSpec) {
        let close = format!("[/{}]", spec.name);
        let rest = &self.src[self.pos..];
        let Some(end) = rest.find(&close) else {
            self.current.push_text(token.raw);
            return;
        };
        let src = rest[..end].trim().to_string();
        self.pos += end + close.len();
        let node = match spec.role {
            TagRole::Image => Node::Image { src },
            _ => Node::Attachment { src },
        };
        self.current.push_node(node);
    }

    fn has_open(&self, name: &str) -> bool {
        frame_matches(&self.current, name) || self.stack.iter().any(|f| frame_matches(f, name))
    }

    /// Close the nearest open frame named `name` (the caller has checked one
    /// exists). Unmatched frames above it degrade into their parents.
    fn close(&mut self, name: &str) {
        while !frame_matches(&self.current, name) {
            if !self.degrade_current() {
                return;
            }
        }
        let Some(parent) = self.stack.pop() else {
            return;
        };
        let mut frame = mem::replace(&mut self.current, parent);
        if let Some(node) = close_frame(&mut frame) {
            self.current.push_node(node);
        }
    }

    /// Degrade the current frame into its parent: the open token becomes
    /// literal text and the collected content is spliced after it.
    fn degrade_current(&mut self) -> bool {
        let Some(parent) = self.stack.pop() else {
            return false;
        };
        let frame = mem::replace(&mut self.current, parent);
        degrade(frame, &mut self.current);
        true
    }

    fn finish(mut self) -> Document {
        while self.degrade_current() {}
        Document::new(self.current.take_children())
    }
}

fn frame_matches(frame: &Frame, name: &str) -> bool {
    match &frame.kind {
        FrameKind::Root => false,
        FrameKind::Pair(spec) => spec.name == name,
        FrameKind::Link { .. } => name == vocabulary::LINK.name,
        FrameKind::List { .. } => name == vocabulary::LIST.name,
    }
}

/// Build the node for a frame whose closing tag was found.
fn close_frame(frame: &mut Frame) -> Option<Node> {
    let children = frame.take_children();
    match &mut frame.kind {
        FrameKind::Root => None,
        FrameKind::Pair(spec) => match spec.role {
            TagRole::Bold => Some(Node::Bold(children)),
            TagRole::Italic => Some(Node::Italic(children)),
            TagRole::Underline => Some(Node::Underline(children)),
            TagRole::Align(direction) => Some(Node::Align {
                direction,
                children,
            }),
            _ => None,
        },
        FrameKind::Link { href } => Some(Node::Link {
            href: mem::take(href),
            children,
        }),
        FrameKind::List {
            ordered, segments, ..
        } => {
            let mut items = Vec::new();
            let mut segments = mem::take(segments);
            segments.push((String::new(), children));
            for (_, nodes) in segments {
                items.extend(ListItem::from_nodes(nodes));
            }
            Some(Node::List {
                ordered: *ordered,
                items,
            })
        }
    }
}

/// Fold a never-closed frame back into its parent as literal text plus its
/// already-parsed content, in source order.
fn degrade(frame: Frame, parent: &mut Frame) {
    let Frame {
        kind,
        raw,
        nodes,
        text,
    } = frame;
    parent.push_text(&raw);
    if let FrameKind::List {
        segments,
        current_delim,
        ..
    } = kind
    {
        for (delim, segment_nodes) in segments {
            parent.push_text(&delim);
            for node in segment_nodes {
                parent.absorb(node);
            }
        }
        parent.push_text(&current_delim);
    }
    for node in nodes {
        parent.absorb(node);
    }
    parent.push_text(&text);
}
