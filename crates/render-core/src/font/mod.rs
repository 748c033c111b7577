//! The PDF base-14 fonts: selection from a resolved style and the glyph
//! widths needed to measure text without embedding a font.

mod metrics;

use folio_style::{FontStyle, FontWeight, ResolvedStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base14Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

#[derive(Clone, Copy, PartialEq)]
enum Family {
    Helvetica,
    Times,
    Courier,
}

impl Base14Font {
    pub const ALL: [Base14Font; 12] = [
        Base14Font::Helvetica,
        Base14Font::HelveticaBold,
        Base14Font::HelveticaOblique,
        Base14Font::HelveticaBoldOblique,
        Base14Font::TimesRoman,
        Base14Font::TimesBold,
        Base14Font::TimesItalic,
        Base14Font::TimesBoldItalic,
        Base14Font::Courier,
        Base14Font::CourierBold,
        Base14Font::CourierOblique,
        Base14Font::CourierBoldOblique,
    ];

    /// Maps a family name plus weight and style onto the closest base-14
    /// font. Unknown families fall back to Helvetica.
    pub fn select(family: &str, weight: FontWeight, style: FontStyle) -> Self {
        let lower = family.to_ascii_lowercase();
        let family = if lower.contains("courier") || lower.contains("mono") {
            Family::Courier
        } else if lower.contains("times") || (lower.contains("serif") && !lower.contains("sans")) {
            Family::Times
        } else {
            if !(lower.contains("helvetica") || lower.contains("arial") || lower.contains("sans")) {
                log::debug!("Font family '{}' is not a base-14 font; using Helvetica", family);
            }
            Family::Helvetica
        };
        let bold = weight.is_bold();
        let slanted = style.is_slanted();
        match (family, bold, slanted) {
            (Family::Helvetica, false, false) => Base14Font::Helvetica,
            (Family::Helvetica, true, false) => Base14Font::HelveticaBold,
            (Family::Helvetica, false, true) => Base14Font::HelveticaOblique,
            (Family::Helvetica, true, true) => Base14Font::HelveticaBoldOblique,
            (Family::Times, false, false) => Base14Font::TimesRoman,
            (Family::Times, true, false) => Base14Font::TimesBold,
            (Family::Times, false, true) => Base14Font::TimesItalic,
            (Family::Times, true, true) => Base14Font::TimesBoldItalic,
            (Family::Courier, false, false) => Base14Font::Courier,
            (Family::Courier, true, false) => Base14Font::CourierBold,
            (Family::Courier, false, true) => Base14Font::CourierOblique,
            (Family::Courier, true, true) => Base14Font::CourierBoldOblique,
        }
    }

    pub fn from_style(style: &ResolvedStyle) -> Self {
        Self::select(&style.font_family, style.font_weight, style.font_style)
    }

    pub fn postscript_name(&self) -> &'static str {
        match self {
            Base14Font::Helvetica => "Helvetica",
            Base14Font::HelveticaBold => "Helvetica-Bold",
            Base14Font::HelveticaOblique => "Helvetica-Oblique",
            Base14Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Base14Font::TimesRoman => "Times-Roman",
            Base14Font::TimesBold => "Times-Bold",
            Base14Font::TimesItalic => "Times-Italic",
            Base14Font::TimesBoldItalic => "Times-BoldItalic",
            Base14Font::Courier => "Courier",
            Base14Font::CourierBold => "Courier-Bold",
            Base14Font::CourierOblique => "Courier-Oblique",
            Base14Font::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    fn family(&self) -> Family {
        match self {
            Base14Font::Helvetica
            | Base14Font::HelveticaBold
            | Base14Font::HelveticaOblique
            | Base14Font::HelveticaBoldOblique => Family::Helvetica,
            Base14Font::TimesRoman
            | Base14Font::TimesBold
            | Base14Font::TimesItalic
            | Base14Font::TimesBoldItalic => Family::Times,
            _ => Family::Courier,
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            Base14Font::HelveticaBold
                | Base14Font::HelveticaBoldOblique
                | Base14Font::TimesBold
                | Base14Font::TimesBoldItalic
                | Base14Font::CourierBold
                | Base14Font::CourierBoldOblique
        )
    }

    /// Advance width of `ch` in 1/1000 em. Characters outside WinAnsi are
    /// drawn as '?' and measured as such.
    pub fn char_width(&self, ch: char) -> u16 {
        let ch = encode_char(ch) as char;
        match self.family() {
            Family::Courier => 600,
            Family::Helvetica if self.is_bold() => metrics::helvetica_bold(ch),
            Family::Helvetica => metrics::helvetica(ch),
            Family::Times => metrics::times(ch),
        }
    }

    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c) as f32).sum::<f32>() * size / 1000.0
    }

    /// Height above the baseline in 1/1000 em.
    pub fn ascent(&self) -> f32 {
        match self.family() {
            Family::Helvetica => 718.0,
            Family::Times => 683.0,
            Family::Courier => 629.0,
        }
    }

    pub fn descent(&self) -> f32 {
        match self.family() {
            Family::Helvetica => 207.0,
            Family::Times => 217.0,
            Family::Courier => 157.0,
        }
    }
}

/// Single-byte WinAnsi code for `ch`; '?' for anything not representable.
pub fn encode_char(ch: char) -> u8 {
    match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2026 => 0x85,
        0x20AC => 0x80,
        _ => b'?',
    }
}

pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}
