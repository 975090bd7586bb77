//! Markdown 扁平化 - 把助手消息渲染成纯文本行
//!
//! 只保留结构内的文字：标题、链接、强调、引用、列表、代码块都只输出内部文本，
//! 分隔线、列表符号、链接地址等装饰全部丢弃。

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use textwrap::{Options as TwOptions, WordSeparator, WordSplitter};

/// 默认渲染宽度
pub const DEFAULT_WIDTH: usize = 80;

/// 把 markdown 渲染为指定宽度的纯文本行
///
/// 空输入返回空列表。块之间用一个空行分隔。
pub fn flatten_markdown(input: &str, width: usize) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = PlainWriter::new(width);
    for event in Parser::new_ext(input, options) {
        writer.handle_event(event);
    }
    writer.finish()
}

/// 逻辑块：普通段落会按宽度折行，代码行保持原样
enum Block {
    Prose(String),
    Code(Vec<String>),
}

struct PlainWriter {
    width: usize,
    blocks: Vec<Block>,
    current: String,
    in_code_block: bool,
    code: String,
    in_table_cell: bool,
}

impl PlainWriter {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            blocks: Vec::new(),
            current: String::new(),
            in_code_block: false,
            code: String::new(),
            in_table_cell: false,
        }
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.flush_prose(),
            // 分隔线只作为块边界
            Event::Rule => self.flush_prose(),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::CodeBlock(_) => {
                self.flush_prose();
                self.in_code_block = true;
                self.code.clear();
            }
            Tag::Paragraph | Tag::Heading { .. } | Tag::Item | Tag::TableRow | Tag::TableHead => {
                self.flush_prose()
            }
            Tag::TableCell => {
                if !self.current.is_empty() && !self.current.ends_with(' ') {
                    self.current.push(' ');
                }
                self.in_table_cell = true;
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                let code = std::mem::take(&mut self.code);
                let lines: Vec<String> = code
                    .trim_end_matches('\n')
                    .lines()
                    .map(|l| l.trim_end().to_string())
                    .collect();
                if !lines.is_empty() {
                    self.blocks.push(Block::Code(lines));
                }
            }
            TagEnd::TableCell => self.in_table_cell = false,
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::BlockQuote
            | TagEnd::TableRow
            | TagEnd::TableHead
            | TagEnd::HtmlBlock => self.flush_prose(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.in_code_block {
            self.code.push_str(text);
        } else if self.in_table_cell {
            self.current.push_str(&text.replace('\n', " "));
        } else {
            self.current.push_str(text);
        }
    }

    fn flush_prose(&mut self) {
        let text = std::mem::take(&mut self.current);
        if !text.trim().is_empty() {
            self.blocks.push(Block::Prose(text.trim().to_string()));
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush_prose();
        if !self.code.is_empty() {
            // 未闭合的代码块
            self.end_tag(TagEnd::CodeBlock);
        }

        // 只在空格处折行：不拆长词、不在连字符或 / 后断开
        let opts = TwOptions::new(self.width)
            .word_separator(WordSeparator::AsciiSpace)
            .word_splitter(WordSplitter::NoHyphenation)
            .break_words(false);

        let mut lines = Vec::new();
        for block in &self.blocks {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            match block {
                Block::Prose(text) => {
                    for raw in text.lines() {
                        lines.extend(
                            textwrap::wrap(raw, &opts)
                                .into_iter()
                                .map(|l| l.into_owned()),
                        );
                    }
                }
                Block::Code(code) => lines.extend(code.iter().cloned()),
            }
        }
        lines
    }
}
