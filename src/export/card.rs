use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use super::font::Typeface;
use crate::oracle::{Profession, Verdict};
use crate::theme::{Rgb, Theme};

/// Output pixels per layout pixel.
pub const SUPERSAMPLE: u32 = 2;

const PADDING: u32 = 32;
const BORDER: u32 = 4;
const MIN_WIDTH: u32 = 320;
const MAX_WIDTH: u32 = 640;
/// Longer professions are cut short with an ellipsis on the last line.
const MAX_PROFESSION_LINES: usize = 4;
const ELLIPSIS: char = '\u{2026}';

const INTRO: &str = "Will AI take the job of a...";
const OUTRO: &str = "The oracle says:";

/// One centred line of the card, sizes in layout pixels.
struct Line {
    text: String,
    size: f32,
    width: f32,
    height: f32,
    color: Rgb,
    gap_after: u32,
}

impl Line {
    fn new(face: &Typeface, text: String, size: f32, color: Rgb, gap_after: u32) -> Self {
        Self {
            width: face.text_width(&text, size),
            height: face.line_height(size),
            text,
            size,
            color,
            gap_after,
        }
    }
}

/// The result card as shown to the user.
pub struct Card<'a> {
    pub profession: &'a Profession,
    pub verdict: Verdict,
    pub theme: Theme,
}

impl Card<'_> {
    fn lines(&self, face: &Typeface) -> Vec<Line> {
        let palette = self.theme.palette();
        let text_width = (MAX_WIDTH - 2 * (PADDING + BORDER)) as f32;

        let mut lines = vec![Line::new(face, INTRO.to_string(), 16.0, palette.muted, 16)];
        let title = self.profession.as_str().to_uppercase();
        let wrapped = wrap(face, &title, 32.0, text_width, MAX_PROFESSION_LINES);
        let last = wrapped.len().saturating_sub(1);
        for (i, text) in wrapped.into_iter().enumerate() {
            let gap = if i == last { 16 } else { 4 };
            lines.push(Line::new(face, text, 32.0, palette.profession, gap));
        }
        lines.push(Line::new(face, OUTRO.to_string(), 16.0, palette.muted, 16));
        lines.push(Line::new(
            face,
            self.verdict.to_string(),
            96.0,
            palette.verdict(self.verdict),
            0,
        ));
        lines
    }

    /// Size of the card in layout pixels, before supersampling.
    pub fn layout_size(&self, face: &Typeface) -> (u32, u32) {
        card_size(&self.lines(face))
    }

    /// Rasterize the card at [`SUPERSAMPLE`]x on the theme background.
    pub fn render(&self, face: &Typeface) -> RgbaImage {
        let lines = self.lines(face);
        let (width, height) = card_size(&lines);
        let palette = self.theme.palette();
        let mut canvas = Canvas::new(width, height, palette.background);

        canvas.frame(BORDER, palette.border);

        let mut y = (BORDER + PADDING) as f32;
        for line in &lines {
            let x = (width as f32 - line.width) / 2.0;
            canvas.text(face, x, y, line);
            y += line.height.ceil() + line.gap_after as f32;
        }
        canvas.image
    }

    pub fn to_png(&self, face: &Typeface) -> image::ImageResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.render(face)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

fn card_size(lines: &[Line]) -> (u32, u32) {
    let content_width = lines.iter().map(|l| l.width.ceil() as u32).max().unwrap_or(0);
    let content_height: u32 = lines
        .iter()
        .map(|l| l.height.ceil() as u32 + l.gap_after)
        .sum();
    let width = (content_width + 2 * (PADDING + BORDER)).clamp(MIN_WIDTH, MAX_WIDTH);
    let height = content_height + 2 * (PADDING + BORDER);
    (width, height)
}

/// Greedy word wrap to `max_width`. Words wider than a line are broken
/// between characters. Past `max_lines` the text is cut and the last line
/// ends in an ellipsis.
fn wrap(face: &Typeface, text: &str, size: f32, max_width: f32, max_lines: usize) -> Vec<String> {
    let fits = |s: &str| face.text_width(s, size) <= max_width;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if lines.len() > max_lines {
            break;
        }
        let joined = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&joined) {
            current = joined;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && !fits(&current) {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
                if lines.len() > max_lines {
                    break;
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && !fits(&format!("{last}{ELLIPSIS}")) {
                last.pop();
            }
            last.truncate(last.trim_end().len());
            last.push(ELLIPSIS);
        }
    }
    lines
}

/// Draws in layout pixels onto a supersampled image.
struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    fn new(width: u32, height: u32, background: Rgb) -> Self {
        let image = RgbaImage::from_pixel(
            width * SUPERSAMPLE,
            height * SUPERSAMPLE,
            rgba(background),
        );
        Self { image }
    }

    fn rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let (x0, y0) = (x * SUPERSAMPLE, y * SUPERSAMPLE);
        let x1 = ((x + w) * SUPERSAMPLE).min(self.image.width());
        let y1 = ((y + h) * SUPERSAMPLE).min(self.image.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, rgba(color));
            }
        }
    }

    fn frame(&mut self, thickness: u32, color: Rgb) {
        let w = self.image.width() / SUPERSAMPLE;
        let h = self.image.height() / SUPERSAMPLE;
        self.rect(0, 0, w, thickness, color);
        self.rect(0, h - thickness, w, thickness, color);
        self.rect(0, 0, thickness, h, color);
        self.rect(w - thickness, 0, thickness, h, color);
    }

    /// Anti-aliased text, blended over what is already there.
    fn text(&mut self, face: &Typeface, x: f32, y: f32, line: &Line) {
        let ss = SUPERSAMPLE as f32;
        let image = &mut self.image;
        face.draw(&line.text, line.size * ss, x * ss, y * ss, |px, py, coverage| {
            if let Some(pixel) = image.get_pixel_mut_checked(px, py) {
                *pixel = blend(*pixel, line.color, coverage);
            }
        });
    }
}

fn blend(under: Rgba<u8>, over: Rgb, coverage: f32) -> Rgba<u8> {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |u: u8, o: u8| (u as f32 * (1.0 - a) + o as f32 * a).round() as u8;
    Rgba([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        0xFF,
    ])
}

fn rgba([r, g, b]: Rgb) -> Rgba<u8> {
    Rgba([r, g, b, 0xFF])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(profession: &Profession, verdict: Verdict, theme: Theme) -> Card<'_> {
        Card {
            profession,
            verdict,
            theme,
        }
    }

    fn face() -> Typeface {
        Typeface::load().unwrap()
    }

    #[test]
    fn render_is_supersampled() {
        let face = face();
        let p = Profession::parse("Welder").unwrap();
        let c = card(&p, Verdict::Yes, Theme::Dark);
        let (w, h) = c.layout_size(&face);
        let img = c.render(&face);
        assert_eq!(img.dimensions(), (w * SUPERSAMPLE, h * SUPERSAMPLE));
    }

    #[test]
    fn border_and_background_follow_theme() {
        let face = face();
        let p = Profession::parse("Welder").unwrap();
        for theme in [Theme::Dark, Theme::Light] {
            let img = card(&p, Verdict::No, theme).render(&face);
            let palette = theme.palette();
            assert_eq!(img.get_pixel(0, 0), &rgba(palette.border));
            let inset = (BORDER + 1) * SUPERSAMPLE;
            assert_eq!(img.get_pixel(inset, inset), &rgba(palette.background));
        }
    }

    #[test]
    fn verdict_is_drawn_in_its_color() {
        let face = face();
        let p = Profession::parse("Welder").unwrap();
        let img = card(&p, Verdict::Yes, Theme::Dark).render(&face);
        let yes = rgba(Theme::Dark.palette().yes);
        assert!(img.pixels().any(|px| *px == yes));
        let no = rgba(Theme::Dark.palette().no);
        assert!(!img.pixels().any(|px| *px == no));
    }

    #[test]
    fn accented_profession_is_drawn() {
        let face = face();
        let p = Profession::parse("Médico").unwrap();
        let c = card(&p, Verdict::No, Theme::Dark);
        let profession_lines: Vec<_> = c
            .lines(&face)
            .into_iter()
            .filter(|l| l.color == Theme::Dark.palette().profession)
            .map(|l| l.text)
            .collect();
        assert_eq!(profession_lines, vec!["MÉDICO".to_string()]);
        assert!(face.missing(&profession_lines[0]).is_empty());

        let img = c.render(&face);
        let ink = rgba(Theme::Dark.palette().profession);
        assert!(img.pixels().any(|px| *px == ink));
    }

    #[test]
    fn long_professions_widen_the_card() {
        let face = face();
        let short = Profession::parse("Chef").unwrap();
        let long = Profession::parse("Senior Principal Distributed Systems Engineer").unwrap();
        let (short_w, _) = card(&short, Verdict::No, Theme::Dark).layout_size(&face);
        let (long_w, _) = card(&long, Verdict::No, Theme::Dark).layout_size(&face);
        assert!(long_w > short_w);
        assert!(short_w >= MIN_WIDTH);
        assert!(long_w <= MAX_WIDTH);
    }

    #[test]
    fn very_long_professions_stay_bounded() {
        let face = face();
        let repeated = "Engineer ".repeat(300);
        let one_word = "A".repeat(20_000);
        let bounded = card(&Profession::parse("Chef").unwrap(), Verdict::No, Theme::Dark)
            .layout_size(&face)
            .1;

        for input in [repeated.as_str(), one_word.as_str()] {
            let p = Profession::parse(input).unwrap();
            let c = card(&p, Verdict::Yes, Theme::Light);
            let (w, h) = c.layout_size(&face);
            assert!(w <= MAX_WIDTH, "width {w}");
            let extra = (MAX_PROFESSION_LINES as f32 * (face.line_height(32.0).ceil() + 4.0)) as u32;
            assert!(h <= bounded + extra, "height {h}");

            let img = c.render(&face);
            assert_eq!(img.dimensions(), (w * SUPERSAMPLE, h * SUPERSAMPLE));
        }
    }

    #[test]
    fn wrap_breaks_on_words_and_truncates() {
        let face = face();
        let max = 260.0;

        let lines = wrap(&face, "CHEF", 32.0, max, 4);
        assert_eq!(lines, vec!["CHEF".to_string()]);

        let lines = wrap(&face, "SENIOR   DATA SCIENTIST", 32.0, max, 4);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| face.text_width(l, 32.0) <= max));
        assert_eq!(lines.join(" "), "SENIOR DATA SCIENTIST");

        let lines = wrap(&face, &"WORD ".repeat(100), 32.0, max, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with(ELLIPSIS));
        assert!(lines.iter().all(|l| face.text_width(l, 32.0) <= max));

        let lines = wrap(&face, &"X".repeat(500), 32.0, max, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(ELLIPSIS));
    }

    #[test]
    fn png_round_trips_through_decoder() {
        let face = face();
        let p = Profession::parse("Welder").unwrap();
        let c = card(&p, Verdict::No, Theme::Light);
        let bytes = c.to_png(&face).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded, c.render(&face));
    }
}
