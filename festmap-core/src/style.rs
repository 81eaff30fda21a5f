//! Visual policy of the map overlays.

use crate::entities::*;

/// An RGB hex color like `#FF00FF`.
pub type Color = &'static str;

pub const WHITE: Color = "#FFFFFF";
pub const BLACK: Color = "#000000";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStyle {
    pub title: &'static str,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub fill_opacity: f64,
    pub icon: &'static str,
}

const fn category_style(
    title: &'static str,
    fill_color: Color,
    stroke_color: Color,
    icon: &'static str,
) -> CategoryStyle {
    CategoryStyle {
        title,
        fill_color,
        stroke_color,
        fill_opacity: 0.5,
        icon,
    }
}

const FOOD: CategoryStyle = category_style("Food", "#FF6B6B", "#C92A2A", "🍔");
const BEVERAGE: CategoryStyle = category_style("Beverages", "#4DABF7", "#1C7ED6", "🥤");
const GAME: CategoryStyle = category_style("Games", "#69DB7C", "#2F9E44", "🎮");
const EXPERIENCE: CategoryStyle = category_style("Experience", "#60A5FA", "#2563EB", "🧪");
const SHOP: CategoryStyle = category_style("Shop", "#FFD43B", "#FAB005", "🛍️");
const GOODS: CategoryStyle = category_style("Goods", "#FBBF24", "#D97706", "🎁");
const INFO: CategoryStyle = category_style("Information", "#ADB5BD", "#495057", "ℹ️");
const STAGE: CategoryStyle = category_style("Stage", "#DA77F2", "#9C36B5", "🎤");
const PHOTO: CategoryStyle = category_style("Photo zone", "#34D399", "#059669", "📸");

/// Every category has a style, so this never falls back silently.
pub const fn style_for(category: BoothCategory) -> &'static CategoryStyle {
    use BoothCategory as C;
    match category {
        C::Food => &FOOD,
        C::Beverage => &BEVERAGE,
        C::Game => &GAME,
        C::Experience => &EXPERIENCE,
        C::Shop => &SHOP,
        C::Goods => &GOODS,
        C::Info => &INFO,
        C::Stage => &STAGE,
        C::Photo => &PHOTO,
    }
}

/// Style of a raw category key, unknown keys use the `info` style.
pub fn style_for_key(key: &str) -> &'static CategoryStyle {
    style_for(BoothCategory::from_key(key))
}

/// Level of detail of labels for a map level.
///
/// Smaller levels are closer to the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTier {
    pub scale: f64,
    pub font_size: u8,
    pub icon_size: u8,
    pub padding_x: u8,
    pub padding_y: u8,
    pub show_labels: bool,
}

impl ZoomTier {
    pub const fn for_level(level: u8) -> Self {
        let (scale, font_size, icon_size, padding_x, padding_y, show_labels) = match level {
            0..=2 => (1.0, 11, 16, 10, 6, true),
            3 => (0.9, 10, 14, 8, 5, true),
            4 => (0.75, 9, 12, 7, 4, true),
            5 => (0.6, 8, 10, 6, 3, true),
            _ => (0.5, 7, 8, 5, 2, false),
        };
        Self {
            scale,
            font_size,
            icon_size,
            padding_x,
            padding_y,
            show_labels,
        }
    }
}

pub const fn congestion_fill_opacity(congestion: Option<CongestionLevel>) -> f64 {
    match congestion {
        Some(CongestionLevel::VeryHigh) => 0.7,
        Some(CongestionLevel::High) => 0.5,
        Some(CongestionLevel::Medium) => 0.4,
        Some(CongestionLevel::Low) | None => 0.3,
    }
}

/// Green to red depending on the crowding, the category stroke if unknown.
pub const fn congestion_stroke_color(
    congestion: Option<CongestionLevel>,
    category: &CategoryStyle,
) -> Color {
    match congestion {
        Some(CongestionLevel::VeryHigh) => "#EF4444",
        Some(CongestionLevel::High) => "#F97316",
        Some(CongestionLevel::Medium) => "#EAB308",
        Some(CongestionLevel::Low) => "#22C55E",
        None => category.stroke_color,
    }
}

pub const fn congestion_z_index(congestion: Option<CongestionLevel>) -> i32 {
    match congestion {
        Some(CongestionLevel::VeryHigh) => 10,
        _ => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    /// The public map, inactive booths are hidden.
    #[default]
    Visitor,
    /// Shows all booths, inactive ones faded.
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub stroke_color: Color,
    pub stroke_weight: u8,
    pub stroke_opacity: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub z_index: i32,
    pub dashed: bool,
}

impl PolygonStyle {
    /// `None` if the booth is not shown in this mode.
    pub fn for_booth(booth: &Booth, mode: MapMode) -> Option<Self> {
        let category = style_for(booth.category);
        let congestion = booth.congestion();
        match mode {
            MapMode::Visitor => booth.is_active.then(|| Self {
                stroke_color: congestion_stroke_color(congestion, category),
                stroke_weight: 3,
                stroke_opacity: 0.8,
                fill_color: category.fill_color,
                fill_opacity: congestion_fill_opacity(congestion),
                z_index: congestion_z_index(congestion),
                dashed: false,
            }),
            MapMode::Admin => Some(Self {
                stroke_color: category.stroke_color,
                stroke_weight: 2,
                stroke_opacity: if booth.is_active { 0.8 } else { 0.3 },
                fill_color: category.fill_color,
                fill_opacity: if booth.is_active {
                    category.fill_opacity
                } else {
                    0.2
                },
                z_index: congestion_z_index(congestion),
                dashed: false,
            }),
        }
    }

    /// The area that is currently drawn in the editor.
    pub const fn draft() -> Self {
        Self {
            stroke_color: DRAFT_COLOR,
            stroke_weight: 3,
            stroke_opacity: 0.8,
            fill_color: DRAFT_COLOR,
            fill_opacity: 0.2,
            z_index: 20,
            dashed: false,
        }
    }

    /// The open outline while fewer than three vertices exist.
    pub const fn draft_outline() -> Self {
        Self {
            fill_opacity: 0.0,
            dashed: true,
            ..Self::draft()
        }
    }
}

pub const DRAFT_COLOR: Color = "#FF00FF";

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub background: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub icon: &'static str,
    pub tier: ZoomTier,
    pub z_index: i32,
}

impl LabelStyle {
    pub fn for_booth(booth: &Booth, tier: ZoomTier) -> Self {
        let category = style_for(booth.category);
        let congestion = booth.congestion();
        let background = match congestion {
            Some(CongestionLevel::VeryHigh) => "#DC2626",
            Some(CongestionLevel::High) => "#EA580C",
            Some(CongestionLevel::Medium) => "#CA8A04",
            Some(CongestionLevel::Low) => "#16A34A",
            None => WHITE,
        };
        Self {
            background,
            border_color: congestion_stroke_color(congestion, category),
            text_color: if congestion.is_some() { WHITE } else { BLACK },
            icon: category.icon,
            tier,
            z_index: congestion_z_index(congestion),
        }
    }
}
