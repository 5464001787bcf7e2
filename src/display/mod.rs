//! Rendering collaborator.
//!
//! The browsing engine only produces data: hydrated pages, page indicators
//! and detail records. A [`Renderer`] turns those into output. The terminal
//! implementation writes plain lines for cards and `tabled` tables for the
//! detail view.

pub mod formatters;

use std::io::{self, IsTerminal, Stdout, Write};

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::catalog::{PageIndicator, PageOutcome, PageView};
use crate::error::Result;
use crate::remote::EntityDetail;

pub use formatters::*;

/// Width of detail stat bars, in cells
const STAT_BAR_WIDTH: usize = 20;

/// Consumer of engine output
pub trait Renderer {
    /// A page load started (`true`) or finished (`false`)
    fn set_loading(&mut self, loading: bool) -> Result<()>;

    fn render_cards(&mut self, entries: &[EntityDetail]) -> Result<()>;

    /// Filtering matched nothing
    fn render_empty(&mut self) -> Result<()>;

    /// There was something to show but it could not be fetched
    fn render_unavailable(&mut self) -> Result<()>;

    /// Page indicator plus prev/next availability
    fn render_pagination(&mut self, indicator: &PageIndicator) -> Result<()>;

    fn render_detail(&mut self, detail: &EntityDetail) -> Result<()>;

    fn close_detail(&mut self) -> Result<()>;

    /// One-line status or usage message
    fn notice(&mut self, message: &str) -> Result<()>;

    /// Render a hydrated page and its indicator
    fn render_view(&mut self, view: &PageView) -> Result<()> {
        match view.outcome() {
            PageOutcome::Cards => self.render_cards(&view.entries)?,
            PageOutcome::NoResults => self.render_empty()?,
            PageOutcome::Unavailable => self.render_unavailable()?,
        }
        self.render_pagination(&view.indicator)
    }
}

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Attribute")]
    attribute: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Stat")]
    stat: String,
    #[tabled(rename = "Value")]
    value: u32,
    #[tabled(rename = "")]
    bar: String,
}

/// Renderer writing to a terminal (or any writer)
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
    color: bool,
    detail_open: bool,
}

impl TerminalRenderer<Stdout> {
    /// Render to stdout, colored when stdout is a terminal and `NO_COLOR` is unset
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            detail_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn badges(&self, categories: &[String]) -> String {
        categories
            .iter()
            .map(|c| category_badge(c, self.color))
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn set_loading(&mut self, loading: bool) -> Result<()> {
        if loading {
            let line = self.dim("Loading...");
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_cards(&mut self, entries: &[EntityDetail]) -> Result<()> {
        let name_width = entries
            .iter()
            .map(|e| display_name(&e.name).chars().count())
            .max()
            .unwrap_or(0);

        for entry in entries {
            let badges = self.badges(&entry.categories);
            writeln!(
                self.out,
                "{:>6}  {:<width$}  {badges}",
                format_id(entry.id),
                display_name(&entry.name),
                width = name_width
            )?;
        }
        Ok(())
    }

    fn render_empty(&mut self) -> Result<()> {
        writeln!(self.out, "No results.")?;
        Ok(())
    }

    fn render_unavailable(&mut self) -> Result<()> {
        let line = self.dim("Nothing could be loaded for this page.");
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn render_pagination(&mut self, indicator: &PageIndicator) -> Result<()> {
        let prev = if indicator.has_prev() {
            "« prev".to_string()
        } else {
            self.dim("« prev")
        };
        let next = if indicator.has_next() {
            "next »".to_string()
        } else {
            self.dim("next »")
        };

        writeln!(
            self.out,
            "{prev}  Page {} of {} ({} items, {})  {next}",
            indicator.current_page, indicator.total_pages, indicator.total_items, indicator.mode
        )?;
        Ok(())
    }

    fn render_detail(&mut self, detail: &EntityDetail) -> Result<()> {
        let title = format!("{} {}", format_id(detail.id), display_name(&detail.name));
        let title = if self.color {
            title.bold().to_string()
        } else {
            title
        };
        let badges = self.badges(&detail.categories);
        writeln!(self.out, "{title} {badges}")?;

        if let Some(image) = &detail.image {
            let line = self.dim(image);
            writeln!(self.out, "{line}")?;
        }

        let attributes = vec![
            AttributeRow {
                attribute: "Height".to_string(),
                value: format_height(detail.height),
            },
            AttributeRow {
                attribute: "Weight".to_string(),
                value: format_weight(detail.weight),
            },
            AttributeRow {
                attribute: "Abilities".to_string(),
                value: detail
                    .abilities
                    .iter()
                    .map(|a| capitalize(&humanize(a)))
                    .collect::<Vec<String>>()
                    .join(", "),
            },
        ];
        let mut table = Table::new(attributes);
        table.with(Style::rounded());
        writeln!(self.out, "{table}")?;

        if !detail.stats.is_empty() {
            let stats: Vec<StatRow> = detail
                .stats
                .iter()
                .map(|s| StatRow {
                    stat: capitalize(&humanize(&s.name)),
                    value: s.value,
                    bar: stat_bar(s.value, STAT_BAR_WIDTH),
                })
                .collect();
            let mut table = Table::new(stats);
            table.with(Style::rounded());
            writeln!(self.out, "{table}")?;
        }

        self.detail_open = true;
        Ok(())
    }

    fn close_detail(&mut self) -> Result<()> {
        self.detail_open = false;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}
