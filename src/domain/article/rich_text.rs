// src/domain/article/rich_text.rs
use crate::domain::text::decode_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*>").expect("static regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyMeta {
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub word_count: u32,
}

/// Editor state derived from rich-text fields. Rebuilt whenever the body changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsMeta {
    #[serde(default)]
    pub body_html: BodyMeta,
}

impl FieldsMeta {
    pub fn from_body_html(html: &str) -> Self {
        let blocks = parse_blocks(html);
        let words = blocks
            .iter()
            .map(|block| block.text.split_whitespace().count())
            .sum::<usize>();
        Self {
            body_html: BodyMeta {
                blocks,
                word_count: u32::try_from(words).unwrap_or(u32::MAX),
            },
        }
    }
}

#[derive(Clone, Copy)]
enum ListKind {
    Ordered,
    Unordered,
}

struct BlockParser {
    blocks: Vec<ContentBlock>,
    lists: Vec<ListKind>,
    current: BlockType,
    text: String,
}

impl BlockParser {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            lists: Vec::new(),
            current: BlockType::Unstyled,
            text: String::new(),
        }
    }

    fn flush(&mut self) {
        let decoded = decode_entities(&self.text);
        let text = decoded.trim();
        if !text.is_empty() {
            self.blocks.push(ContentBlock {
                block_type: self.current,
                text: text.to_owned(),
            });
        }
        self.text.clear();
        self.current = BlockType::Unstyled;
    }

    fn open(&mut self, tag: &str) {
        let block_type = match tag {
            "p" | "div" => BlockType::Unstyled,
            "h1" => BlockType::HeaderOne,
            "h2" => BlockType::HeaderTwo,
            "h3" => BlockType::HeaderThree,
            "h4" => BlockType::HeaderFour,
            "h5" => BlockType::HeaderFive,
            "h6" => BlockType::HeaderSix,
            "blockquote" => BlockType::Blockquote,
            "pre" => BlockType::CodeBlock,
            "li" => match self.lists.last() {
                Some(ListKind::Ordered) => BlockType::OrderedListItem,
                _ => BlockType::UnorderedListItem,
            },
            "ul" => {
                self.flush();
                self.lists.push(ListKind::Unordered);
                return;
            }
            "ol" => {
                self.flush();
                self.lists.push(ListKind::Ordered);
                return;
            }
            "br" => {
                self.text.push('\n');
                return;
            }
            _ => return,
        };
        self.flush();
        self.current = block_type;
    }

    fn close(&mut self, tag: &str) {
        match tag {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre"
            | "li" => self.flush(),
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
            }
            _ => {}
        }
    }
}

fn parse_blocks(html: &str) -> Vec<ContentBlock> {
    let mut parser = BlockParser::new();
    let mut last = 0;
    for caps in TAG.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        parser.text.push_str(&html[last..whole.start()]);
        last = whole.end();
        let tag = caps[2].to_ascii_lowercase();
        if &caps[1] == "/" {
            parser.close(&tag);
        } else {
            parser.open(&tag);
        }
    }
    parser.text.push_str(&html[last..]);
    parser.flush();
    parser.blocks
}
