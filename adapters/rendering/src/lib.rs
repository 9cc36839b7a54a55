#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use lane_defence_core::Rect;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::from_rgb_u8(0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::from_rgb_u8(0, 128, 0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);
    /// Opaque gold.
    pub const GOLD: Self = Self::from_rgb_u8(255, 215, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in playfield units, `None` while the pointer is off the field.
    pub cursor: Option<Vec2>,
    /// Whether the adapter detected a click on this frame.
    pub click: bool,
}

/// Decision returned by the update closure after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Keep requesting frames.
    #[default]
    Continue,
    /// Stop simulating; the last scene stays on screen.
    Halt,
}

/// Text drawn at an absolute playfield position.
///
/// `position` is the left end of the text baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    /// Text content.
    pub text: String,
    /// Baseline origin.
    pub position: Vec2,
    /// Font size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Color,
}

impl HudText {
    /// Creates a new text descriptor.
    #[must_use]
    pub fn new<T>(text: T, position: Vec2, size: f32, color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: text.into(),
            position,
            size,
            color,
        }
    }
}

/// Grid cell, outlined while hovered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCell {
    /// Cell bounds.
    pub rect: Rect,
    /// Whether the pointer currently overlaps the cell.
    pub hovered: bool,
}

/// Filled rectangle with a label, used for defenders and enemies.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBlock {
    /// Block bounds.
    pub rect: Rect,
    /// Fill color.
    pub fill: Color,
    /// Health label drawn over the block.
    pub label: HudText,
}

/// Filled circle used for projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOrb {
    /// Circle centre.
    pub center: Vec2,
    /// Circle radius.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

/// Everything a backend draws for one frame.
///
/// Backends paint the control bar first, then the HUD and banner, then the
/// cells, defenders, enemies and projectiles on top.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playfield dimensions.
    pub field: Vec2,
    /// Height of the control bar strip along the top edge.
    pub control_bar_height: f32,
    /// Control bar fill for this frame.
    pub control_bar: Color,
    /// Score and resource lines drawn over the control bar.
    pub hud: Vec<HudText>,
    /// Game over banner, once the session has ended.
    pub banner: Option<HudText>,
    /// Grid cells, with hover state.
    pub cells: Vec<SceneCell>,
    /// Defenders.
    pub defenders: Vec<SceneBlock>,
    /// Enemies.
    pub enemies: Vec<SceneBlock>,
    /// Projectiles in flight.
    pub projectiles: Vec<SceneOrb>,
}

impl Scene {
    /// Creates an empty scene for a playfield of the given size.
    pub fn new(field: Vec2, control_bar_height: f32) -> Result<Self, RenderingError> {
        if !(field.x > 0.0 && field.y > 0.0) {
            return Err(RenderingError::InvalidField {
                width: field.x,
                height: field.y,
            });
        }

        if !(control_bar_height >= 0.0 && control_bar_height <= field.y) {
            return Err(RenderingError::InvalidControlBar {
                height: control_bar_height,
            });
        }

        Ok(Self {
            field,
            control_bar_height,
            control_bar: Color::BLUE,
            hud: Vec::new(),
            banner: None,
            cells: Vec::new(),
            defenders: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
        })
    }

    /// Whether a playfield position lies inside the scene bounds.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x <= self.field.x
            && position.y <= self.field.y
    }

    /// Drops every per-frame entry while keeping allocations.
    pub fn clear(&mut self) {
        self.hud.clear();
        self.banner = None;
        self.cells.clear();
        self.defenders.clear();
        self.enemies.clear();
        self.projectiles.clear();
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Lane Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// `update_scene` receives the input captured for the frame and mutates
    /// the scene before it is drawn. Once it returns [`Schedule::Halt`] the
    /// backend stops calling it and keeps presenting the last scene.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> Schedule + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Playfield dimensions must be positive.
    #[error("playfield must have positive dimensions (received {width}x{height})")]
    InvalidField {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
    /// Control bar must fit inside the playfield.
    #[error("control bar height {height} does not fit the playfield")]
    InvalidControlBar {
        /// Provided height.
        height: f32,
    },
}
