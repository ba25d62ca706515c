#![forbid(unsafe_code)]

//! Showcase panels.

use std::cell::RefCell;
use std::rc::Rc;

use gridmenu::prelude::*;

/// Game mode of the simulated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Default mode.
    #[default]
    Survival,
    /// No block breaking.
    Adventure,
    /// Unlimited resources.
    Creative,
}

/// State of the simulated player that panels read and change.
#[derive(Debug, Default)]
pub struct Player {
    /// Current game mode.
    pub gamemode: RefCell<GameMode>,
}

/// Which showcase to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Every widget on one 9x6 grid.
    Basic,
    /// A chain of pages with previous/next buttons.
    Previous,
    /// The premade yes/no confirmation.
    Confirm,
}

impl std::str::FromStr for PanelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "previous" => Ok(Self::Previous),
            "confirm" | "confirmation" => Ok(Self::Confirm),
            other => Err(format!("unknown panel: {other}")),
        }
    }
}

/// Build the root and title of a showcase.
pub fn build(kind: PanelKind, player: &Rc<Player>) -> Result<(String, Box<dyn Component>)> {
    match kind {
        PanelKind::Basic => Ok(("Test Menu".to_owned(), Box::new(basic(player)?))),
        PanelKind::Previous => Ok(("Menu 1".to_owned(), Box::new(previous_page(1)?))),
        PanelKind::Confirm => {
            let confirmation = ConfirmationPanel::new("Are you sure ?")
                .on_yes(|event, _| tracing::info!(actor = event.actor.as_str(), "clicked yes"))
                .on_no(|event, _| tracing::info!(actor = event.actor.as_str(), "clicked no"))
                .build()?;
            Ok((confirmation.title, Box::new(confirmation.root)))
        }
    }
}

fn wool() -> Vec<Content> {
    ["red_wool", "orange_wool", "yellow_wool", "lime_wool", "blue_wool", "purple_wool"]
        .into_iter()
        .map(Content::new)
        .collect()
}

fn concrete_bar(percentage: f64, direction: Direction, width: u16, height: u16) -> Result<ProgressBar> {
    ProgressBar::builder()
        .done_content(Content::new("lime_concrete"))
        .current_content(Content::new("orange_concrete"))
        .not_done_content(Content::new("red_concrete"))
        .direction(direction)
        .percentage(percentage)
        .size(width, height)
        .build()
}

/// The widget showcase.
pub fn basic(player: &Rc<Player>) -> Result<Grid> {
    let apple = Button::builder()
        .id("apple")
        .content(Content::new("apple"))
        .on_click(|event, _| tracing::info!(actor = event.actor.as_str(), "you clicked the apple"))
        .on_secondary_action(|_, ctx| {
            tracing::info!("Newton");
            ctx.close();
        })
        .build()?;

    let rainbow = Button::builder()
        .id("rainbow")
        .size(2, 2)
        .animation_frames(wool())
        .animation_interval(5)
        .on_click(|_, _| tracing::info!("you clicked the animated button"))
        .build()?;

    let seconds = Button::builder()
        .id("seconds")
        .dynamic_content(|ctx| {
            Content::new("oak_sign").label(format!("Seconds: {}", ctx.tick() / 20 % 60))
        })
        .update_interval(20)
        .build()?;

    let coordinates = Button::builder()
        .id("coordinates")
        .dynamic_content(|ctx| {
            let x = ctx.tick() as f64 * 0.1;
            Content::new("compass").label(format!("Coordinates: ({x:.1}, 64.0, 0.0)"))
        })
        .update_interval(1)
        .build()?;

    let toggle = Toggle::builder()
        .id("toggle")
        .on_content(Content::new("lime_dye"))
        .off_content(Content::new("red_dye"))
        .on_toggle(|event, _| tracing::info!(state = event.new_state, "toggled"))
        .build()?;

    let bedrock = Icon::builder()
        .id("bedrock")
        .content(Content::new("bedrock").label("Just a useless item"))
        .build()?;

    let reader = Rc::clone(player);
    let writer = Rc::clone(player);
    let gamemode = Selector::builder()
        .id("gamemode")
        .option(Content::new("wooden_sword").label("Survival"), GameMode::Survival)
        .option(Content::new("compass").label("Adventure"), GameMode::Adventure)
        .option(Content::new("diamond_block").label("Creative"), GameMode::Creative)
        .default_with(move |_| *reader.gamemode.borrow())
        .on_selection_change(move |change, _| {
            *writer.gamemode.borrow_mut() = change.new_value;
            tracing::info!(gamemode = ?change.new_value, "game mode changed");
        })
        .build()?;

    let chest = DoubleConfirmButton::builder()
        .id("chest")
        .content(Content::new("chest").label("Just a chest"))
        .confirm_content(Content::new("allay_spawn_egg").label("Are you sure ?"))
        .on_confirm(|_, _| tracing::info!("you double-dropped the chest button"))
        .build()?;

    Grid::builder()
        .id("basic")
        .size(9, 6)
        .child(0, apple)
        .child(2, rainbow)
        .child(8, seconds)
        .child(13, coordinates)
        .child(15, toggle)
        .child(16, bedrock)
        .child(18, gamemode)
        .child(20, chest)
        .child(21, concrete_bar(0.75, Direction::Right, 4, 2)?)
        .child(17, concrete_bar(1.0, Direction::Down, 1, 5)?)
        .build()
}

/// One page of the navigation chain showcase.
pub fn previous_page(depth: u32) -> Result<Grid> {
    let previous = Button::builder()
        .id("previous")
        .content(Content::new("arrow").label("Go to Previous Menu"))
        .on_click(|_, ctx| {
            if !ctx.back() {
                tracing::info!("no previous menu found");
            }
        })
        .build()?;
    let next = Button::builder()
        .id("next")
        .content(Content::new("arrow").label("Go to Next Menu"))
        .on_click(move |_, ctx| match previous_page(depth + 1) {
            Ok(page) => ctx.open(format!("Menu {}", depth + 1), page),
            Err(err) => tracing::warn!(%err, "could not build the next page"),
        })
        .build()?;
    let book = Icon::builder()
        .id("book")
        .content(Content::new("book").label(format!("Current Menu: {depth}")))
        .build()?;

    Grid::builder()
        .id("previous-page")
        .size(9, 3)
        .child(0, previous)
        .child(4, book)
        .child(8, next)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_showcase_builds() {
        let player = Rc::new(Player::default());
        for kind in [PanelKind::Basic, PanelKind::Previous, PanelKind::Confirm] {
            let (title, root) = build(kind, &player).unwrap();
            assert!(!title.is_empty());
            assert!(root.is_container());
        }
    }

    #[test]
    fn panel_kinds_parse() {
        assert_eq!("basic".parse::<PanelKind>(), Ok(PanelKind::Basic));
        assert_eq!("confirmation".parse::<PanelKind>(), Ok(PanelKind::Confirm));
        assert!("paginated".parse::<PanelKind>().is_err());
    }

    #[test]
    fn basic_layout_fits_nine_by_six() {
        let player = Rc::new(Player::default());
        let grid = basic(&player).unwrap();
        assert_eq!(grid.size(), Size::new(9, 6).unwrap());
        assert_eq!(grid.len(), 10);
    }
}
