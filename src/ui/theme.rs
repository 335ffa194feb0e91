// LogLens - ui/theme.rs
//
// Colour scheme, method/status colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Colour for an HTTP method badge.
pub fn method_colour(method: &str) -> Color32 {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Color32::from_rgb(59, 130, 246),    // Blue 500
        "POST" => Color32::from_rgb(34, 197, 94),    // Green 500
        "PUT" => Color32::from_rgb(234, 179, 8),     // Yellow 500
        "PATCH" => Color32::from_rgb(168, 85, 247),  // Purple 500
        "DELETE" => Color32::from_rgb(239, 68, 68),  // Red 500
        _ => Color32::from_rgb(156, 163, 175),       // Gray 400
    }
}

/// Colour for a status code, by class.
pub fn status_colour(status: u16) -> Color32 {
    match status {
        200..=299 => Color32::from_rgb(34, 197, 94),  // Green 500
        300..=399 => Color32::from_rgb(59, 130, 246), // Blue 500
        400..=499 => Color32::from_rgb(217, 119, 6),  // Amber 600
        500..=599 => Color32::from_rgb(220, 38, 38),  // Red 600
        _ => Color32::from_rgb(156, 163, 175),        // Gray 400
    }
}

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Muted text for hints such as the timezone note.
pub const MUTED_TEXT: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500

/// Layout constants.
pub const ROW_HEIGHT: f32 = 20.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const POPOVER_MIN_WIDTH: f32 = 320.0;

/// Filter control widths.
pub const METHOD_SELECT_WIDTH: f32 = 120.0;
pub const STATUS_SELECT_WIDTH: f32 = 170.0;
pub const TIME_INPUT_WIDTH: f32 = 90.0;
pub const DATE_INPUT_WIDTH: f32 = 110.0;

/// Width of a free-text filter input.
pub fn text_filter_width(field: crate::core::model::TextField) -> f32 {
    use crate::core::model::TextField;
    match field {
        TextField::IpAddress => 150.0,
        TextField::Endpoint => 250.0,
        TextField::UserUuid => 200.0,
    }
}

/// Request table column widths.
pub const COL_TIME_WIDTH: f32 = 150.0;
pub const COL_METHOD_WIDTH: f32 = 60.0;
pub const COL_STATUS_WIDTH: f32 = 50.0;
pub const COL_IP_WIDTH: f32 = 120.0;
pub const COL_ENDPOINT_WIDTH: f32 = 320.0;
