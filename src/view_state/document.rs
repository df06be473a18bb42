//! Document layout: the page as blocks with pixel extents.
//!
//! This is the terminal host's stand-in for the browser's box layout. Every
//! page is laid out as a vertical stack of blocks, one terminal row per
//! line. Blocks that carry a [`RegionId`] are reveal regions; blocks that
//! carry a [`SectionId`] are scroll-spy sections. Geometry is reported in
//! logical pixels through the [`PxScale`].

use super::text::{pad_to, wrap};
use super::types::PxScale;
use crate::engine::{LayoutVariant, SectionExtent, SectionId, SectionLayout};
use crate::model::region::names;
use crate::model::{Card, RegionId, Route, SiteContent};

/// Semantic role of a line; the view maps it to a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Page or card title.
    Title,
    /// Section heading.
    Heading,
    /// Small line above a title.
    Kicker,
    /// Running text.
    Body,
    /// Secondary text (footer, English subtitles).
    Muted,
    /// Emphasised text, such as the call to action.
    Accent,
    /// Box-drawing characters.
    Frame,
}

/// One row of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    /// Text, already wrapped to fit.
    pub text: String,
    /// Styling role.
    pub tone: Tone,
    /// Leading columns.
    pub indent: u16,
}

impl DocLine {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            indent: 0,
        }
    }

    fn indented(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }
}

/// A laid-out block. Its height includes one trailing spacer row, so
/// consecutive blocks tile the document without gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Reveal region this block animates as.
    pub region: Option<RegionId>,
    /// Scroll-spy section this block anchors.
    pub section: Option<SectionId>,
    /// Top edge in document pixels.
    pub top_px: u32,
    /// Height including the spacer row.
    pub height_px: u32,
    /// Index of the first row in the document.
    pub first_row: usize,
    /// Content rows.
    pub lines: Vec<DocLine>,
}

impl Block {
    /// Pixel extent, for scroll-spy and intersection math.
    pub fn extent(&self) -> SectionExtent {
        SectionExtent::new(self.top_px, self.height_px)
    }

    /// Rows including the trailing spacer.
    pub fn rows(&self) -> usize {
        self.lines.len() + 1
    }
}

/// A document row as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a> {
    /// Block the row belongs to.
    pub block: &'a Block,
    /// `None` for the spacer row.
    pub line: Option<&'a DocLine>,
}

/// Complete layout of one page at one width.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    blocks: Vec<Block>,
    width: u16,
    scale: PxScale,
}

impl DocumentLayout {
    /// Lay out `route` in the given variant at `width` columns.
    pub fn build(
        route: Route,
        variant: LayoutVariant,
        content: &SiteContent,
        width: u16,
        scale: PxScale,
    ) -> Self {
        let mut builder = Builder::new(width, scale);
        match (route, variant) {
            (Route::Home, LayoutVariant::Desktop) => home_desktop(&mut builder, content),
            (Route::Home, LayoutVariant::Mobile) => home_mobile(&mut builder, content),
            (Route::About, _) => about(&mut builder, content),
            (Route::Location, _) => location(&mut builder, content),
            (Route::Services, _) => services(&mut builder, content),
        }
        footer(&mut builder, content);
        builder.finish()
    }

    /// Blocks from top to bottom.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Column width the page was wrapped at.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Cells-to-pixels scale.
    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Total rows.
    pub fn height_rows(&self) -> usize {
        self.blocks.iter().map(Block::rows).sum()
    }

    /// Total height in logical pixels.
    pub fn height_px(&self) -> u32 {
        self.blocks.last().map_or(0, |b| b.top_px + b.height_px)
    }

    /// Extent of a reveal region, if it is on this page.
    pub fn region_extent(&self, id: &RegionId) -> Option<SectionExtent> {
        self.blocks
            .iter()
            .find(|b| b.region.as_ref() == Some(id))
            .map(Block::extent)
    }

    /// Rows `[first_row, first_row + count)`, clipped to the document.
    pub fn rows(&self, first_row: usize, count: usize) -> Vec<VisibleRow<'_>> {
        let end = first_row.saturating_add(count);
        let mut rows = Vec::new();
        for block in &self.blocks {
            let block_end = block.first_row + block.rows();
            if block_end <= first_row || block.first_row >= end {
                continue;
            }
            let from = first_row.saturating_sub(block.first_row);
            let to = (end - block.first_row).min(block.rows());
            for offset in from..to {
                rows.push(VisibleRow {
                    block,
                    line: block.lines.get(offset),
                });
            }
        }
        rows
    }
}

impl SectionLayout for DocumentLayout {
    fn extent(&self, id: &SectionId) -> Option<SectionExtent> {
        self.blocks
            .iter()
            .find(|b| b.section.as_ref() == Some(id))
            .map(Block::extent)
    }
}

struct Builder {
    width: u16,
    scale: PxScale,
    blocks: Vec<Block>,
    next_row: usize,
}

impl Builder {
    fn new(width: u16, scale: PxScale) -> Self {
        Self {
            width: width.max(1),
            scale,
            blocks: Vec::new(),
            next_row: 0,
        }
    }

    fn text_width(&self, indent: u16) -> usize {
        usize::from(self.width.saturating_sub(indent).max(1))
    }

    fn paragraph(&self, text: &str, tone: Tone, indent: u16) -> Vec<DocLine> {
        wrap(text, self.text_width(indent))
            .into_iter()
            .map(|line| DocLine::new(line, tone).indented(indent))
            .collect()
    }

    fn push(&mut self, region: Option<RegionId>, section: Option<SectionId>, lines: Vec<DocLine>) {
        let ppr = self.scale.px_per_row();
        let rows = lines.len() + 1;
        let block = Block {
            region,
            section,
            top_px: self.next_row as u32 * ppr,
            height_px: rows as u32 * ppr,
            first_row: self.next_row,
            lines,
        };
        self.next_row += rows;
        self.blocks.push(block);
    }

    fn region(&mut self, name: &str, lines: Vec<DocLine>) {
        self.push(Some(RegionId::new(name)), None, lines);
    }

    fn plain(&mut self, lines: Vec<DocLine>) {
        self.push(None, None, lines);
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            blocks: self.blocks,
            width: self.width,
            scale: self.scale,
        }
    }

    /// Cards stacked one under another.
    fn card_list(&self, cards: &[Card], lines: &mut Vec<DocLine>) {
        for card in cards {
            let title = match &card.kicker {
                Some(kicker) => format!("{kicker}  {}", card.title),
                None => card.title.clone(),
            };
            lines.extend(self.paragraph(&title, Tone::Heading, 2));
            lines.extend(self.paragraph(&card.body, Tone::Body, 4));
        }
    }

    /// Cards in two columns; falls back to a list when too narrow.
    fn card_grid(&self, cards: &[Card], lines: &mut Vec<DocLine>) {
        let column = usize::from(self.width.saturating_sub(6)) / 2;
        if column < 20 {
            self.card_list(cards, lines);
            return;
        }
        for pair in cards.chunks(2) {
            let left = card_cell(&pair[0], column);
            let right = pair.get(1).map(|c| card_cell(c, column)).unwrap_or_default();
            let height = left.len().max(right.len());
            for i in 0..height {
                let (l, l_tone) = left.get(i).cloned().unwrap_or((String::new(), Tone::Body));
                let r = right.get(i).map(|(text, _)| text.as_str()).unwrap_or("");
                let text = format!("{}  {}", pad_to(&l, column), r);
                lines.push(DocLine::new(text.trim_end(), l_tone).indented(2));
            }
            lines.push(DocLine::new("", Tone::Body));
        }
    }
}

fn card_cell(card: &Card, width: usize) -> Vec<(String, Tone)> {
    let mut cell = vec![(card.title.clone(), Tone::Heading)];
    cell.extend(wrap(&card.body, width).into_iter().map(|l| (l, Tone::Body)));
    cell
}

fn hero_lines(builder: &Builder, content: &SiteContent) -> Vec<DocLine> {
    let hero = &content.landing.hero;
    let mut lines = vec![DocLine::new(
        format!("{} {}", content.brand.name, content.brand.caption),
        Tone::Kicker,
    )];
    lines.extend(builder.paragraph(&hero.heading, Tone::Title, 0));
    for line in &hero.lines {
        lines.extend(builder.paragraph(line, Tone::Body, 0));
    }
    lines
}

fn closing_lines(builder: &Builder, content: &SiteContent) -> Vec<DocLine> {
    let closing = &content.landing.closing;
    let mut lines = builder.paragraph(&closing.heading, Tone::Heading, 0);
    for line in &closing.lines {
        lines.extend(builder.paragraph(line, Tone::Body, 0));
    }
    lines.push(DocLine::new(format!("→ {}", content.menu.cta.label), Tone::Accent));
    lines
}

fn home_desktop(builder: &mut Builder, content: &SiteContent) {
    let landing = &content.landing;

    let mut hero = hero_lines(builder, content);
    hero.push(DocLine::new("", Tone::Body));
    let strengths: Vec<String> = landing
        .strengths
        .iter()
        .map(|card| match &card.kicker {
            Some(kicker) => format!("{} · {kicker}", card.title),
            None => card.title.clone(),
        })
        .collect();
    hero.extend(builder.paragraph(&strengths.join("   "), Tone::Accent, 0));
    builder.region(names::HERO, hero);

    let mut practice = vec![DocLine::new("Practice Areas", Tone::Heading)];
    builder.card_grid(&landing.practice, &mut practice);
    builder.region(names::SERVICES, practice);

    let mut process = vec![DocLine::new("Process", Tone::Heading)];
    builder.card_list(&landing.process, &mut process);
    builder.region(names::PROCESS, process);

    let closing = closing_lines(builder, content);
    builder.plain(closing);
}

fn home_mobile(builder: &mut Builder, content: &SiteContent) {
    let landing = &content.landing;

    let hero = hero_lines(builder, content);
    builder.region(names::HERO, hero);

    let mut practice = vec![DocLine::new("Practice Areas", Tone::Heading)];
    builder.card_list(&landing.practice, &mut practice);
    builder.region(names::SERVICES, practice);

    let mut about = vec![DocLine::new("Why PROS", Tone::Heading)];
    builder.card_list(&landing.strengths, &mut about);
    builder.region(names::ABOUT, about);

    let mut process = vec![DocLine::new("Process", Tone::Heading)];
    builder.card_list(&landing.process, &mut process);
    builder.region(names::PROCESS, process);

    let closing = closing_lines(builder, content);
    builder.region(names::CTA, closing);
}

fn about(builder: &mut Builder, content: &SiteContent) {
    let about = &content.about;

    let mut hero = builder.paragraph(&about.hero.heading, Tone::Title, 0);
    for line in &about.hero.lines {
        hero.extend(builder.paragraph(line, Tone::Body, 0));
    }
    builder.region(names::HERO, hero);

    let mut card = builder.paragraph(&about.greeting.heading, Tone::Heading, 2);
    for line in &about.greeting.lines {
        card.extend(builder.paragraph(line, Tone::Body, 2));
    }
    card.push(DocLine::new("", Tone::Body));
    card.push(DocLine::new(about.signature.clone(), Tone::Kicker).indented(2));
    builder.region(names::CARD, card);
}

fn location(builder: &mut Builder, content: &SiteContent) {
    let info = &content.location;

    let mut lines = builder.paragraph(&info.office, Tone::Title, 0);
    lines.extend(builder.paragraph(&info.address, Tone::Body, 0));
    builder.plain(lines);

    let inner = usize::from(builder.width.saturating_sub(2)).max(1);
    let mut map = vec![DocLine::new(format!("┌{}┐", "─".repeat(inner)), Tone::Frame)];
    let mut body = vec![String::new(), "MAP".to_string()];
    body.extend(wrap(&info.map_embed_url, inner));
    body.push(String::new());
    for row in body {
        map.push(DocLine::new(format!("│{}│", pad_to(&row, inner)), Tone::Frame));
    }
    map.push(DocLine::new(format!("└{}┘", "─".repeat(inner)), Tone::Frame));
    builder.plain(map);

    let mut transit = Vec::new();
    for line in &info.transit {
        transit.extend(builder.paragraph(line, Tone::Body, 0));
    }
    builder.plain(transit);
}

fn services(builder: &mut Builder, content: &SiteContent) {
    let intro = vec![
        DocLine::new("업무영역", Tone::Title),
        DocLine::new("Practice Areas", Tone::Kicker),
    ];
    builder.plain(intro);

    for service in &content.services {
        let mut lines = builder.paragraph(&service.eng_title, Tone::Kicker, 0);
        lines.extend(builder.paragraph(&service.title, Tone::Heading, 0));
        lines.extend(builder.paragraph(&service.summary, Tone::Body, 0));
        for detail in &service.details {
            lines.extend(builder.paragraph(&format!("· {detail}"), Tone::Body, 2));
        }
        builder.push(
            Some(RegionId::service(&service.id)),
            SectionId::new(service.id.clone()).ok(),
            lines,
        );
    }
}

fn footer(builder: &mut Builder, content: &SiteContent) {
    let f = &content.footer;
    let mut lines = vec![DocLine::new(
        format!("{} {}", content.brand.name, content.brand.caption),
        Tone::Heading,
    )];
    for text in [
        format!("대표 {} | 사업자등록번호 {}", f.representative, f.business_number),
        f.address.clone(),
        format!("TEL {} | FAX {}", f.tel, f.fax),
        f.email.clone(),
        f.copyright.clone(),
    ] {
        lines.extend(builder.paragraph(&text, Tone::Muted, 0));
    }
    builder.plain(lines);
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
