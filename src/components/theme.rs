// ABOUTME: Shared color palette for all components (TUI style guide)

use ratatui::style::Color;

pub const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
pub const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
pub const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
pub const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
pub const ERROR_RED: Color = Color::Rgb(220, 80, 80);

// Toast accents
pub const INFO_BLUE: Color = Color::Rgb(0x34, 0x98, 0xdb);
pub const SUCCESS_GREEN: Color = Color::Rgb(0x27, 0xae, 0x60);
pub const WARNING_ORANGE: Color = Color::Rgb(0xf3, 0x9c, 0x12);
pub const DANGER_RED: Color = Color::Rgb(0xe7, 0x4c, 0x3c);
