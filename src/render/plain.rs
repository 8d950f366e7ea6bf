//! Plain stdout surface used by the one-shot commands.

use crate::render::lines::RenderLine;
use crate::render::ui::theme::{ColorTheme, FontWeight};
use ratatui::crossterm::style::{Color as TermColor, Stylize};
use ratatui::style::Color;
use std::io::Write;

/// Write rendered lines, expanding each line's bottom margin into blank lines.
///
/// With `color` set, accent colors and weight are emitted as ANSI escapes; otherwise the output
/// is the bare text.
pub fn write_lines<'a, W, I>(
    writer: &mut W,
    lines: I,
    theme: &ColorTheme,
    color: bool,
) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = RenderLine<'a>>,
{
    for line in lines {
        let style = line.style(theme);
        if color {
            let mut styled = line.text.stylize();
            if let Some(fg) = style.color.and_then(term_color) {
                styled = styled.with(fg);
            }
            if style.weight == FontWeight::SemiBold {
                styled = styled.bold();
            }
            writeln!(writer, "{styled}")?;
        } else {
            writeln!(writer, "{}", line.text)?;
        }
        for _ in 0..style.margin_bottom {
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn term_color(color: Color) -> Option<TermColor> {
    Some(match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Reset => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lines::render;

    fn plain(text: &str) -> String {
        let mut out = Vec::new();
        write_lines(&mut out, render(text), &ColorTheme::default(), false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prose_gets_a_blank_line_citations_do_not() {
        assert_eq!(
            plain("Still in effect.\nSource: Federal Register\nMore prose"),
            "Still in effect.\n\nSource: Federal Register\nMore prose\n\n"
        );
    }

    #[test]
    fn empty_display_prints_one_blank_prose_line() {
        assert_eq!(plain(""), "\n\n");
    }

    #[test]
    fn colored_output_wraps_citations_in_escapes() {
        let mut out = Vec::new();
        write_lines(
            &mut out,
            render("Source: 44 CFR 1234"),
            &ColorTheme::default(),
            true,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("Source: 44 CFR 1234"));
    }

    #[test]
    fn colored_prose_without_style_is_bare() {
        let mut out = Vec::new();
        write_lines(&mut out, render("plain"), &ColorTheme::default(), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain\n\n");
    }
}
