use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Icons the category catalog refers to, by their stored `Fa*` names.
///
/// Sections persist the icon as a plain string, so every name that can
/// appear on the wire has a variant here. Anything else resolves to
/// [`Icon::QuestionCircle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    HandHoldingHeart,
    Leaf,
    UserShield,
    Book,
    Venus,
    Tint,
    SolarPanel,
    Briefcase,
    Industry,
    BalanceScale,
    City,
    Recycle,
    GlobeAmericas,
    Fish,
    Peace,
    Handshake,
    QuestionCircle,
}

const ICON_NAMES: &[(Icon, &str)] = &[
    (Icon::HandHoldingHeart, "FaHandHoldingHeart"),
    (Icon::Leaf, "FaLeaf"),
    (Icon::UserShield, "FaUserShield"),
    (Icon::Book, "FaBook"),
    (Icon::Venus, "FaVenus"),
    (Icon::Tint, "FaTint"),
    (Icon::SolarPanel, "FaSolarPanel"),
    (Icon::Briefcase, "FaBriefcase"),
    (Icon::Industry, "FaIndustry"),
    (Icon::BalanceScale, "FaBalanceScale"),
    (Icon::City, "FaCity"),
    (Icon::Recycle, "FaRecycle"),
    (Icon::GlobeAmericas, "FaGlobeAmericas"),
    (Icon::Fish, "FaFish"),
    (Icon::Peace, "FaPeace"),
    (Icon::Handshake, "FaHandshake"),
    (Icon::QuestionCircle, "FaQuestionCircle"),
];

static ICON_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Fa[A-Za-z0-9]+)$").expect("valid icon ref pattern"));

impl Icon {
    /// Look up an icon by its stored name (e.g. `"FaLeaf"`).
    pub fn from_name(name: &str) -> Option<Icon> {
        ICON_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(icon, _)| *icon)
    }

    /// Recover an icon from a section image reference. The reference may be
    /// a bare name or a path/URL that ends in one.
    pub fn from_image_ref(image: &str) -> Option<Icon> {
        let caps = ICON_REF_RE.captures(image.trim())?;
        Icon::from_name(caps.get(1)?.as_str())
    }

    pub fn name(self) -> &'static str {
        ICON_NAMES
            .iter()
            .find(|(icon, _)| *icon == self)
            .map(|(_, n)| *n)
            .unwrap_or("FaQuestionCircle")
    }

    /// Single-cell glyph used by the terminal views.
    pub fn glyph(self) -> char {
        match self {
            Icon::HandHoldingHeart => '\u{2665}', // ♥
            Icon::Leaf => '\u{2618}',             // ☘
            Icon::UserShield => '\u{271A}',       // ✚
            Icon::Book => '\u{2261}',             // ≡
            Icon::Venus => '\u{2640}',            // ♀
            Icon::Tint => '\u{2248}',             // ≈
            Icon::SolarPanel => '\u{263C}',       // ☼
            Icon::Briefcase => '\u{25A3}',        // ▣
            Icon::Industry => '\u{2699}',         // ⚙
            Icon::BalanceScale => '\u{2696}',     // ⚖
            Icon::City => '\u{2302}',             // ⌂
            Icon::Recycle => '\u{267B}',          // ♻
            Icon::GlobeAmericas => '\u{25CE}',    // ◎
            Icon::Fish => '\u{2652}',             // ♒
            Icon::Peace => '\u{262E}',            // ☮
            Icon::Handshake => '\u{2726}',        // ✦
            Icon::QuestionCircle => '?',
        }
    }
}

/// One of the 17 fixed ODS categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u8,
    pub title: &'static str,
    pub color_hex: &'static str,
    pub icon: Icon,
}

const fn cat(id: u8, title: &'static str, color_hex: &'static str, icon: Icon) -> Category {
    Category {
        id,
        title,
        color_hex,
        icon,
    }
}

/// The catalog, in id order.
pub static CATEGORIES: [Category; 17] = [
    cat(1, "Fin de la pobreza", "#E5243B", Icon::HandHoldingHeart),
    cat(2, "Hambre cero", "#DDA63A", Icon::Leaf),
    cat(3, "Salud y bienestar", "#4C9F38", Icon::UserShield),
    cat(4, "Educación de calidad", "#C5192D", Icon::Book),
    cat(5, "Igualdad de género", "#FF3A21", Icon::Venus),
    cat(6, "Agua limpia y saneamiento", "#26BDE2", Icon::Tint),
    cat(7, "Energía asequible y no contaminante", "#FCC30B", Icon::SolarPanel),
    cat(8, "Trabajo decente y crecimiento económico", "#A21942", Icon::Briefcase),
    cat(9, "Industria, innovación e infraestructura", "#FD6925", Icon::Industry),
    cat(10, "Reducción de las desigualdades", "#DD1367", Icon::BalanceScale),
    cat(11, "Ciudades y comunidades sostenibles", "#FD9D24", Icon::City),
    cat(12, "Producción y consumo responsables", "#BF8B2E", Icon::Recycle),
    cat(13, "Acción por el clima", "#3F7E44", Icon::GlobeAmericas),
    cat(14, "Vida submarina", "#0A97D9", Icon::Fish),
    cat(15, "Vida de ecosistemas terrestres", "#56C02B", Icon::Leaf),
    cat(16, "Paz, justicia e instituciones sólidas", "#00689D", Icon::Peace),
    cat(17, "Alianzas para lograr los objetivos", "#19486A", Icon::Handshake),
];

/// Color used for sections that match no category.
pub const DEFAULT_COLOR: &str = "#000000";

pub fn all() -> &'static [Category] {
    &CATEGORIES
}

pub fn by_id(id: u8) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Exact, case-sensitive title match. Section names join to the catalog
/// through this, so a free-typed name that differs by a single character
/// never matches.
pub fn by_title(title: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.title == title)
}
