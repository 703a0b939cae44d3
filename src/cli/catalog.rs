use colored::Colorize;

use crate::catalog::{icons_in, IconGroup, PALETTE};
use crate::error::Result;

pub fn icons(group: Option<IconGroup>) -> Result<()> {
    let groups: Vec<IconGroup> = match group {
        Some(g) => vec![g],
        None => IconGroup::ALL.to_vec(),
    };
    for (i, g) in groups.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", g.label().bold());
        for icon in icons_in(*g) {
            println!("  {:<16} {}", icon.name, icon.key.dimmed());
        }
    }
    Ok(())
}

pub fn colors() -> Result<()> {
    for c in PALETTE {
        let (r, g, b) = c.rgb;
        println!("  {} {:<12} {}", "\u{25cf}".truecolor(r, g, b), c.key, c.display_name.dimmed());
    }
    Ok(())
}
