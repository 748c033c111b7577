//! List marker styles.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyleType {
    #[default]
    Disc,
    Circle,
    Square,
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    None,
}

impl ListStyleType {
    /// Marker text for the zero-based item `index`. Bullets use characters
    /// available in the WinAnsi encoding of the base-14 fonts.
    pub fn marker(&self, index: usize) -> String {
        let n = index + 1;
        match self {
            ListStyleType::Disc => "\u{2022}".to_string(),
            ListStyleType::Circle => "o".to_string(),
            ListStyleType::Square => "-".to_string(),
            ListStyleType::Decimal => format!("{}.", n),
            ListStyleType::LowerAlpha => format!("{}.", alpha(n)),
            ListStyleType::UpperAlpha => format!("{}.", alpha(n).to_uppercase()),
            ListStyleType::LowerRoman => format!("{}.", roman(n).to_lowercase()),
            ListStyleType::UpperRoman => format!("{}.", roman(n)),
            ListStyleType::None => String::new(),
        }
    }
}

fn alpha(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    out.iter().rev().collect()
}

fn roman(mut n: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in TABLE {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(ListStyleType::Decimal.marker(0), "1.");
        assert_eq!(ListStyleType::LowerAlpha.marker(26), "aa.");
        assert_eq!(ListStyleType::UpperRoman.marker(13), "XIV.");
        assert_eq!(ListStyleType::None.marker(3), "");
    }
}
