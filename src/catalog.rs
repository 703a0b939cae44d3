//! Static icon and color tables referenced by key from each expense.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IconGroup {
    Travel,
    Food,
    Work,
    Fun,
    Symbols,
}

impl IconGroup {
    pub const ALL: [IconGroup; 5] = [
        IconGroup::Travel,
        IconGroup::Food,
        IconGroup::Work,
        IconGroup::Fun,
        IconGroup::Symbols,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IconGroup::Travel => "Travel",
            IconGroup::Food => "Food",
            IconGroup::Work => "Work",
            IconGroup::Fun => "Fun",
            IconGroup::Symbols => "Symbols",
        }
    }
}

impl fmt::Display for IconGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub name: &'static str,
    /// Stored on the expense row.
    pub key: &'static str,
    pub group: IconGroup,
}

pub const DEFAULT_ICON: &str = "bag.fill";
pub const DEFAULT_COLOR: &str = "accent";

const fn icon(name: &'static str, key: &'static str, group: IconGroup) -> Icon {
    Icon { name, key, group }
}

use IconGroup::{Food, Fun, Symbols, Travel, Work};

pub const ICONS: &[Icon] = &[
    // Money and shopping bags sit with travel in the picker
    icon("wallet", "wallet.pass.fill", Travel),
    icon("creditcard", "creditcard.fill", Travel),
    icon("dollarsign", "dollarsign.circle.fill", Travel),
    icon("bag", "bag.fill", Travel),
    icon("cart", "cart.fill", Travel),
    icon("briefcase", "briefcase.fill", Work),
    icon("building", "building.2.fill", Work),
    icon("printer", "printer.fill", Work),
    icon("scanner", "scanner.fill", Work),
    icon("deskclock", "deskclock.fill", Work),
    icon("fork", "fork.knife", Food),
    icon("wineglass", "wineglass.fill", Food),
    icon("takeoutbag", "takeoutbag.and.cup.and.straw.fill", Food),
    icon("cup", "cup.and.saucer.fill", Food),
    icon("popcorn", "popcorn.fill", Food),
    icon("car", "car.fill", Travel),
    icon("bus", "bus.fill", Travel),
    icon("tram", "tram.fill", Travel),
    icon("airplane", "airplane", Travel),
    icon("bicycle", "bicycle", Travel),
    icon("house", "house.fill", Symbols),
    icon("lightbulb", "lightbulb.fill", Symbols),
    icon("washingmachine", "washer.fill", Symbols),
    icon("sofa", "sofa.fill", Symbols),
    icon("shower", "shower.fill", Symbols),
    icon("book", "book.closed.fill", Work),
    icon("studentdesk", "studentdesk", Work),
    icon("graduationcap", "graduationcap.fill", Work),
    icon("pencil", "pencil.circle.fill", Work),
    icon("backpack", "backpack.fill", Work),
    icon("heart", "heart.fill", Symbols),
    icon("cross", "cross.case.fill", Symbols),
    icon("pills", "pills.fill", Symbols),
    icon("stethoscope", "stethoscope", Symbols),
    icon("bandage", "bandage.fill", Symbols),
    icon("gamecontroller", "gamecontroller.fill", Fun),
    icon("ticket", "ticket.fill", Fun),
    icon("tv", "tv.fill", Fun),
    icon("headphones", "headphones", Fun),
    icon("sportscourt", "sportscourt.fill", Fun),
    icon("tag", "tag.fill", Symbols),
    icon("gift", "gift.fill", Symbols),
    icon("tshirt", "tshirt.fill", Symbols),
    icon("sunglasses", "sunglasses.fill", Symbols),
    icon("cosmetics", "sparkles", Symbols),
    icon("wifi", "wifi", Symbols),
    icon("phone", "phone.fill", Symbols),
    icon("envelope", "envelope.fill", Symbols),
    icon("cloud", "cloud.fill", Symbols),
    icon("battery", "battery.100", Symbols),
];

/// Look up by short name (`bag`) or stored key (`bag.fill`).
pub fn find_icon(name_or_key: &str) -> Option<&'static Icon> {
    let needle = name_or_key.trim();
    ICONS
        .iter()
        .find(|i| i.key == needle || i.name.eq_ignore_ascii_case(needle))
}

pub fn icons_in(group: IconGroup) -> impl Iterator<Item = &'static Icon> {
    ICONS.iter().filter(move |i| i.group == group)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub rgb: (u8, u8, u8),
}

const fn color(key: &'static str, display_name: &'static str, rgb: (u8, u8, u8)) -> PaletteColor {
    PaletteColor { key, display_name, rgb }
}

// System colors use their light-mode values
pub const PALETTE: &[PaletteColor] = &[
    color("accent", "Accent", (0, 122, 255)),
    color("red", "Red", (255, 59, 48)),
    color("green", "Green", (52, 199, 89)),
    color("blue", "Blue", (0, 122, 255)),
    color("yellow", "Yellow", (255, 204, 0)),
    color("purple", "Purple", (175, 82, 222)),
    color("teal", "Teal", (48, 176, 199)),
    color("gray", "Gray", (142, 142, 147)),
    color("orange", "Orange", (255, 149, 0)),
    color("pink", "Pink", (255, 45, 85)),
    color("indigo", "Indigo", (88, 86, 214)),
    color("mint", "Mint", (0, 199, 190)),
    color("cyan", "Cyan", (50, 173, 230)),
    color("brown", "Brown", (162, 132, 94)),
    color("magenta", "Magenta", (255, 0, 255)),
    color("lavender", "Lavender", (204, 153, 255)),
    color("peach", "Peach", (255, 204, 153)),
    color("skyBlue", "Sky Blue", (128, 204, 255)),
    color("lemon", "Lemon", (255, 255, 153)),
    color("coral", "Coral", (255, 128, 128)),
    color("darkRed", "Dark Red", (153, 0, 0)),
    color("darkGreen", "Dark Green", (0, 128, 0)),
    color("darkBlue", "Dark Blue", (0, 0, 153)),
    color("lightPink", "Light Pink", (255, 204, 230)),
    color("lightGreen", "Light Green", (179, 255, 179)),
    color("lightBlue", "Light Blue", (179, 230, 255)),
    color("olive", "Olive", (128, 128, 0)),
    color("maroon", "Maroon", (128, 0, 0)),
    color("gold", "Gold", (255, 214, 0)),
    color("slate", "Slate", (112, 128, 143)),
    color("salmon", "Salmon", (250, 128, 115)),
];

/// Keys match case-insensitively so `skyblue` finds `skyBlue`.
pub fn find_color(key: &str) -> Option<&'static PaletteColor> {
    let needle = key.trim();
    PALETTE.iter().find(|c| c.key.eq_ignore_ascii_case(needle))
}

/// Colour for an unknown stored key falls back to the accent entry.
pub fn color_or_accent(key: &str) -> &'static PaletteColor {
    find_color(key).unwrap_or(&PALETTE[0])
}
