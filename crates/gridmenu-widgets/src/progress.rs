#![forbid(unsafe_code)]

//! Directional progress bar.
//!
//! The fill runs along the configured [`Direction`]. With `filled =
//! percentage * length`, the first `floor(filled)` cells are "done", one
//! "current" cell follows when a fraction is left over, and the rest are
//! "not done". Every row (or column) across the fill axis looks the same.

use std::any::Any;

use gridmenu_core::{Content, Direction, Error, Result, Size};

use crate::context::Context;
use crate::source::ContentSource;
use crate::{checked_size, Component, ComponentBase, Items};

const EPSILON: f64 = 1e-9;

/// Clamp to `[0.0, 1.0]`, mapping NaN to 0.0.
pub fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 1.0)
    }
}

/// Which part of the bar a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Completed.
    Done,
    /// The cell containing the boundary.
    Current,
    /// Not reached yet.
    NotDone,
}

/// Split a bar of `length` cells at `percentage`: `(done, has_current)`.
pub fn split(percentage: f64, length: u16) -> (u16, bool) {
    let filled = clamp_percentage(percentage) * f64::from(length);
    let done = (filled + EPSILON).floor();
    let has_current = filled - done > EPSILON;
    (done as u16, has_current)
}

/// A pure view of a percentage.
#[derive(Debug)]
pub struct ProgressBar {
    base: ComponentBase,
    size: Size,
    percentage: f64,
    direction: Direction,
    done: ContentSource,
    current: ContentSource,
    not_done: ContentSource,
}

/// Configuration for a [`ProgressBar`].
#[derive(Debug, Default)]
pub struct ProgressBarBuilder {
    id: Option<String>,
    size: Option<(u16, u16)>,
    percentage: f64,
    direction: Direction,
    done: Option<ContentSource>,
    current: Option<ContentSource>,
    not_done: Option<ContentSource>,
}

impl ProgressBarBuilder {
    /// Caller-supplied identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Footprint (defaults to 1x1).
    #[must_use]
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Fill ratio, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn percentage(mut self, percentage: f64) -> Self {
        self.percentage = clamp_percentage(percentage);
        self
    }

    /// Fill direction (defaults to right).
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Content of completed cells.
    #[must_use]
    pub fn done_content(mut self, content: Content) -> Self {
        self.done = Some(content.into());
        self
    }

    /// Content of completed cells, computed per render.
    #[must_use]
    pub fn done_content_with(mut self, f: impl Fn(&Context<'_>) -> Content + 'static) -> Self {
        self.done = Some(ContentSource::dynamic(f));
        self
    }

    /// Content of the boundary cell.
    #[must_use]
    pub fn current_content(mut self, content: Content) -> Self {
        self.current = Some(content.into());
        self
    }

    /// Content of the boundary cell, computed per render.
    #[must_use]
    pub fn current_content_with(
        mut self,
        f: impl Fn(&Context<'_>) -> Content + 'static,
    ) -> Self {
        self.current = Some(ContentSource::dynamic(f));
        self
    }

    /// Content of cells not reached yet.
    #[must_use]
    pub fn not_done_content(mut self, content: Content) -> Self {
        self.not_done = Some(content.into());
        self
    }

    /// Content of cells not reached yet, computed per render.
    #[must_use]
    pub fn not_done_content_with(
        mut self,
        f: impl Fn(&Context<'_>) -> Content + 'static,
    ) -> Self {
        self.not_done = Some(ContentSource::dynamic(f));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<ProgressBar> {
        Ok(ProgressBar {
            base: ComponentBase::new(self.id),
            size: checked_size(self.size)?,
            percentage: self.percentage,
            direction: self.direction,
            done: self.done.ok_or(Error::MissingContent("progress done content"))?,
            current: self
                .current
                .ok_or(Error::MissingContent("progress current content"))?,
            not_done: self
                .not_done
                .ok_or(Error::MissingContent("progress not-done content"))?,
        })
    }
}

impl ProgressBar {
    /// Start configuring a progress bar.
    pub fn builder() -> ProgressBarBuilder {
        ProgressBarBuilder::default()
    }

    /// Current fill ratio.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Update the fill ratio (clamped). Takes effect on the next render.
    pub fn set_percentage(&mut self, percentage: f64) {
        self.percentage = clamp_percentage(percentage);
    }

    /// Fill direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Segment of a local cell. Cells outside the bar are `NotDone`.
    pub fn segment(&self, cell: gridmenu_core::Cell) -> Segment {
        if !self.size.contains(cell) {
            return Segment::NotDone;
        }
        let (done, has_current) = split(self.percentage, self.direction.length(self.size));
        let step = self.direction.step(self.size, cell);
        if step < done {
            Segment::Done
        } else if step == done && has_current {
            Segment::Current
        } else {
            Segment::NotDone
        }
    }
}

impl Component for ProgressBar {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn size(&self) -> Size {
        self.size
    }

    fn items(&self, ctx: &Context<'_>) -> Items {
        if !self.is_visible() {
            return Items::new();
        }
        let done = self.done.resolve(ctx);
        let current = self.current.resolve(ctx);
        let not_done = self.not_done.resolve(ctx);
        self.size
            .cells()
            .map(|cell| {
                let content = match self.segment(cell) {
                    Segment::Done => done.clone(),
                    Segment::Current => current.clone(),
                    Segment::NotDone => not_done.clone(),
                };
                (cell, content)
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn bar(percentage: f64, direction: Direction, width: u16, height: u16) -> ProgressBar {
        ProgressBar::builder()
            .done_content(Content::new("lime"))
            .current_content(Content::new("yellow"))
            .not_done_content(Content::new("red"))
            .percentage(percentage)
            .direction(direction)
            .size(width, height)
            .build()
            .unwrap()
    }

    fn row(harness: &Harness, slots: std::ops::Range<usize>) -> Vec<&str> {
        slots.map(|slot| harness.kind_at(slot).unwrap_or("-")).collect()
    }

    #[test]
    fn empty_and_full() {
        let mut harness = Harness::new(Size::new(4, 1).unwrap());
        harness.render(&bar(0.0, Direction::Right, 4, 1));
        assert_eq!(row(&harness, 0..4), ["red"; 4]);
        harness.render(&bar(1.0, Direction::Right, 4, 1));
        assert_eq!(row(&harness, 0..4), ["lime"; 4]);
    }

    #[test]
    fn half_of_four_cells() {
        let mut harness = Harness::new(Size::new(4, 1).unwrap());
        harness.render(&bar(0.5, Direction::Right, 4, 1));
        assert_eq!(row(&harness, 0..4), ["lime", "lime", "red", "red"]);
    }

    #[test]
    fn fraction_gets_a_current_cell() {
        let mut harness = Harness::new(Size::new(4, 1).unwrap());
        harness.render(&bar(0.6, Direction::Right, 4, 1));
        assert_eq!(row(&harness, 0..4), ["lime", "lime", "yellow", "red"]);
        harness.render(&bar(0.6, Direction::Left, 4, 1));
        assert_eq!(row(&harness, 0..4), ["red", "yellow", "lime", "lime"]);
    }

    #[test]
    fn rows_fill_identically() {
        let mut harness = Harness::new(Size::new(4, 2).unwrap());
        harness.render(&bar(0.75, Direction::Right, 4, 2));
        assert_eq!(row(&harness, 0..4), ["lime", "lime", "lime", "red"]);
        assert_eq!(row(&harness, 4..8), ["lime", "lime", "lime", "red"]);
    }

    #[test]
    fn vertical_directions() {
        let mut harness = Harness::new(Size::new(1, 5).unwrap());
        harness.render(&bar(0.4, Direction::Up, 1, 5));
        assert_eq!(row(&harness, 0..5), ["red", "red", "red", "lime", "lime"]);
        harness.render(&bar(0.4, Direction::Down, 1, 5));
        assert_eq!(row(&harness, 0..5), ["lime", "lime", "red", "red", "red"]);
    }

    #[test]
    fn percentage_is_clamped() {
        assert_eq!(bar(1.7, Direction::Right, 2, 1).percentage(), 1.0);
        assert_eq!(bar(-0.2, Direction::Right, 2, 1).percentage(), 0.0);
        assert_eq!(bar(f64::NAN, Direction::Right, 2, 1).percentage(), 0.0);
        let mut progress = bar(0.2, Direction::Right, 2, 1);
        progress.set_percentage(3.0);
        assert_eq!(progress.percentage(), 1.0);
    }

    #[test]
    fn float_noise_does_not_create_a_current_cell() {
        assert_eq!(split(0.3, 10), (3, false));
        assert_eq!(split(0.7, 10), (7, false));
        assert_eq!(split(0.25, 3), (0, true));
    }

    #[test]
    fn cells_outside_the_bar_are_not_done() {
        let bar = bar(0.5, Direction::Left, 4, 1);
        assert_eq!(bar.segment(gridmenu_core::Cell::new(3, 0)), Segment::Done);
        assert_eq!(bar.segment(gridmenu_core::Cell::new(5, 0)), Segment::NotDone);
        assert_eq!(bar.segment(gridmenu_core::Cell::new(0, 2)), Segment::NotDone);
    }

    #[test]
    fn missing_parts_are_rejected() {
        let err = ProgressBar::builder()
            .done_content(Content::new("a"))
            .current_content(Content::new("b"))
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingContent("progress not-done content"));
    }
}
