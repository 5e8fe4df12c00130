//! Welcome banner: "THEN/NOW" in figlet with a gradient from amber (then) to cyan (now).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Sepia amber (#e0a458).
const THEN_AMBER: (u8, u8, u8) = (0xe0, 0xa4, 0x58);
/// Modern cyan (#0ff0fc).
const NOW_CYAN: (u8, u8, u8) = (0x0f, 0xf0, 0xfc);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("THEN/NOW").map(|f| f.to_string()))
        .unwrap_or_else(|| "THEN/NOW\n".to_string())
}

/// Prints the banner, version, and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(THEN_AMBER, NOW_CYAN, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: NOW_CYAN.0,
        g: NOW_CYAN.1,
        b: NOW_CYAN.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("What changed since you were born?\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(THEN_AMBER, NOW_CYAN, 0.0), THEN_AMBER);
        assert_eq!(lerp_rgb(THEN_AMBER, NOW_CYAN, 1.0), NOW_CYAN);
    }

    #[test]
    fn test_banner_art_not_empty() {
        assert!(!banner_art().trim().is_empty());
    }
}
