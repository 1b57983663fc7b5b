//! Cell colors for the forecast grid.
//!
//! Maps cell state (locked, overridden, variance bucket) to colors, keeping
//! the grid panel free of styling decisions.

use egui::Color32;
use forecast_grid::VarianceTone;

/// Palette used by the grid panel.
#[derive(Debug, Clone, Copy)]
pub struct GridColors {
    pub header_fill: Color32,
    pub locked_fill: Color32,
    pub overridden_fill: Color32,
    pub gridline: Color32,
    pub active_stroke: Color32,
    pub preview_stroke: Color32,
    pub text: Color32,
    pub text_dim: Color32,
}

impl GridColors {
    pub fn for_visuals(visuals: &egui::Visuals) -> Self {
        if visuals.dark_mode {
            Self {
                header_fill: Color32::from_gray(45),
                locked_fill: Color32::from_gray(38),
                overridden_fill: Color32::from_rgb(52, 48, 24),
                gridline: Color32::from_gray(60),
                active_stroke: Color32::from_rgb(90, 160, 255),
                preview_stroke: Color32::from_rgb(59, 130, 246),
                text: Color32::from_gray(220),
                text_dim: Color32::from_gray(140),
            }
        } else {
            Self {
                header_fill: Color32::from_gray(230),
                locked_fill: Color32::from_gray(242),
                overridden_fill: Color32::from_rgb(255, 249, 219),
                gridline: Color32::from_gray(210),
                active_stroke: Color32::from_rgb(37, 99, 235),
                preview_stroke: Color32::from_rgb(59, 130, 246),
                text: Color32::from_gray(30),
                text_dim: Color32::from_gray(120),
            }
        }
    }
}

/// Text color for a variance bucket.
pub fn variance_color(tone: VarianceTone) -> Color32 {
    match tone {
        VarianceTone::StrongGain => Color32::from_rgb(22, 163, 74),
        VarianceTone::Gain => Color32::from_rgb(74, 222, 128),
        VarianceTone::SlightLoss => Color32::from_rgb(234, 179, 8),
        VarianceTone::Loss => Color32::from_rgb(220, 38, 38),
    }
}

/// Background of a data cell.
pub fn cell_fill(colors: &GridColors, locked: bool, overridden: bool) -> Color32 {
    if overridden {
        colors.overridden_fill
    } else if locked {
        colors.locked_fill
    } else {
        Color32::TRANSPARENT
    }
}
