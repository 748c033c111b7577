pub mod dimension;
pub mod font;
pub mod list;
pub mod properties;
pub mod resolve;
pub mod text;

pub use dimension::{Margins, PageSize, Padding, normalize_padding};
pub use font::{FontStyle, FontWeight};
pub use list::ListStyleType;
pub use properties::StyleProperties;
pub use resolve::{ResolvedStyle, Styled, resolve_style};
pub use text::{TextAlign, TextDecoration, VerticalAlign};
