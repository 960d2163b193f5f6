//! # Welcome Message Sequencing
//!
//! Turns the welcome message into a typewriter animation schedule.
//!
//! The message is a small tree of nodes (text runs, emphasis spans, line
//! breaks). `sequence()` flattens it into cells where every non-whitespace
//! character carries its own reveal delay:
//!
//! ```text
//! "Hi there"  →  H(0ms) i(30ms) ␣ t(60ms) h(90ms) e(120ms) r(150ms) e(180ms)
//! ```
//!
//! Spaces pass through unanimated, control characters are dropped, and the
//! walk never descends into line breaks or cells it already produced, so
//! running it twice over its own output changes nothing.
//!
//! Once the last character's reveal finishes, an "attention" phase lights up
//! the navigation bar for a fixed window, then clears itself. The whole
//! schedule is derived from the message length, never a hardcoded timer.

use log::debug;

/// Delay between consecutive character reveals.
pub const REVEAL_STEP_MS: u64 = 30;
/// Duration of a single character's reveal animation.
pub const REVEAL_ANIM_MS: u64 = 600;
/// How long the navigation bar holds the attention highlight.
pub const ATTENTION_MS: u64 = 2500;

/// One animated character with a computed reveal delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedUnit {
    pub ch: char,
    pub delay_ms: u64,
    pub emphasized: bool,
}

/// A node of the welcome message tree.
///
/// `Text` and `Emphasis` only exist before sequencing; the sequencer replaces
/// them with `Unit` and `Space` cells. `LineBreak` survives unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    Text(String),
    Emphasis(Vec<MessageNode>),
    LineBreak,
    Space,
    Unit(AnimatedUnit),
}

/// Flatten a message tree into an ordered sequence of reveal cells.
///
/// Depth-first, original character order preserved. The reveal index (and so
/// the delay) advances only for animated characters. `Unit` and `Space` cells
/// pass through untouched, which makes the function idempotent.
pub fn sequence(nodes: Vec<MessageNode>) -> Vec<MessageNode> {
    let mut out = Vec::new();
    let mut index: u64 = 0;
    walk(nodes, false, &mut index, &mut out);
    out
}

fn walk(nodes: Vec<MessageNode>, emphasized: bool, index: &mut u64, out: &mut Vec<MessageNode>) {
    for node in nodes {
        match node {
            MessageNode::Text(text) => {
                for ch in text.chars() {
                    match ch {
                        ' ' => out.push(MessageNode::Space),
                        // Formatting, not content.
                        '\n' | '\r' | '\t' => {}
                        _ => {
                            out.push(MessageNode::Unit(AnimatedUnit {
                                ch,
                                delay_ms: *index * REVEAL_STEP_MS,
                                emphasized,
                            }));
                            *index += 1;
                        }
                    }
                }
            }
            MessageNode::Emphasis(children) => walk(children, true, index, out),
            // Line breaks pass through; never descended into.
            MessageNode::LineBreak => out.push(MessageNode::LineBreak),
            // Already-sequenced cells keep their original delays.
            MessageNode::Unit(unit) => out.push(MessageNode::Unit(unit)),
            MessageNode::Space => out.push(MessageNode::Space),
        }
    }
}

/// Count the animated cells in a sequenced message.
pub fn unit_count(cells: &[MessageNode]) -> usize {
    cells
        .iter()
        .filter(|cell| matches!(cell, MessageNode::Unit(_)))
        .count()
}

/// Parse the configured welcome message into a node tree.
///
/// `\n` becomes a line break and `*text*` an emphasis span. An unpaired `*`
/// is kept as a literal character.
pub fn parse_message(message: &str) -> Vec<MessageNode> {
    let mut nodes = Vec::new();
    for (i, line) in message.split('\n').enumerate() {
        if i > 0 {
            nodes.push(MessageNode::LineBreak);
        }
        let mut rest = line;
        while let Some(open) = rest.find('*') {
            if let Some(len) = rest[open + 1..].find('*') {
                if open > 0 {
                    nodes.push(MessageNode::Text(rest[..open].to_string()));
                }
                let inner = &rest[open + 1..open + 1 + len];
                if !inner.is_empty() {
                    nodes.push(MessageNode::Emphasis(vec![MessageNode::Text(
                        inner.to_string(),
                    )]));
                }
                rest = &rest[open + len + 2..];
            } else {
                break;
            }
        }
        if !rest.is_empty() {
            nodes.push(MessageNode::Text(rest.to_string()));
        }
    }
    nodes
}

/// Lifecycle of the navigation-bar attention highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionPhase {
    /// Waiting for the text reveal to finish.
    Pending,
    /// Highlight is showing.
    Active,
    /// Highlight cleared (or skipped when there is no navigation bar).
    Done,
}

/// Welcome animation state: sequenced cells plus the attention schedule.
///
/// Sequencing happens exactly once, at construction. `tick()` advances the
/// attention phase against the app clock.
#[derive(Debug)]
pub struct WelcomeState {
    pub cells: Vec<MessageNode>,
    pub unit_count: usize,
    pub attention_at_ms: u64,
    pub attention_until_ms: u64,
    pub phase: AttentionPhase,
}

impl WelcomeState {
    /// Sequence `message` and derive the attention schedule from its length.
    ///
    /// `has_companion` is false when no tabs are configured; the attention
    /// step is then skipped entirely.
    pub fn new(message: &str, has_companion: bool) -> Self {
        let cells = sequence(parse_message(message));
        let count = unit_count(&cells);
        let attention_at_ms = count as u64 * REVEAL_STEP_MS + REVEAL_ANIM_MS;
        debug!(
            "Welcome sequenced: {} units, attention at {}ms",
            count, attention_at_ms
        );
        Self {
            cells,
            unit_count: count,
            attention_at_ms,
            attention_until_ms: attention_at_ms + ATTENTION_MS,
            phase: if has_companion {
                AttentionPhase::Pending
            } else {
                AttentionPhase::Done
            },
        }
    }

    /// Advance the attention phase. Returns true if the phase changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let next = match self.phase {
            AttentionPhase::Pending if now_ms >= self.attention_until_ms => AttentionPhase::Done,
            AttentionPhase::Pending if now_ms >= self.attention_at_ms => AttentionPhase::Active,
            AttentionPhase::Active if now_ms >= self.attention_until_ms => AttentionPhase::Done,
            current => current,
        };
        if next != self.phase {
            debug!("Attention phase {:?} -> {:?} at {}ms", self.phase, next, now_ms);
            self.phase = next;
            true
        } else {
            false
        }
    }

    pub fn attention_active(&self) -> bool {
        self.phase == AttentionPhase::Active
    }
}
