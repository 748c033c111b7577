//! Content-stream operators for the drawing primitives.

use folio_types::{Color, Point, Rect};
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

/// Bezier control distance for a quarter ellipse.
const KAPPA: f32 = 0.552_284_8;

pub(crate) fn fill_color(color: &Color) -> Operation {
    let [r, g, b] = color.to_unit_rgb();
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

pub(crate) fn stroke_color(color: &Color) -> Operation {
    let [r, g, b] = color.to_unit_rgb();
    Operation::new("RG", vec![r.into(), g.into(), b.into()])
}

pub(crate) fn rect(r: Rect) -> Operation {
    Operation::new("re", vec![r.x.into(), r.y.into(), r.width.into(), r.height.into()])
}

pub(crate) fn op(operator: &str) -> Operation {
    Operation::new(operator, vec![])
}

pub(crate) fn line_width(width: f32) -> Operation {
    Operation::new("w", vec![width.into()])
}

/// `cm` for a clockwise rotation by `degrees` around `center`.
pub(crate) fn rotation(center: Point, degrees: f32) -> Operation {
    let angle = (-degrees).to_radians();
    let (sin, cos) = angle.sin_cos();
    let e = center.x - (cos * center.x - sin * center.y);
    let f = center.y - (sin * center.x + cos * center.y);
    Operation::new(
        "cm",
        vec![cos.into(), sin.into(), (-sin).into(), cos.into(), e.into(), f.into()],
    )
}

/// Path of an ellipse inscribed in `r`, as four cubic curves.
pub(crate) fn ellipse(r: Rect) -> Vec<Operation> {
    let (rx, ry) = (r.width / 2.0, r.height / 2.0);
    let (cx, cy) = (r.x + rx, r.y + ry);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let curve = |x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32| {
        Operation::new(
            "c",
            vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
        )
    };
    vec![
        Operation::new("m", vec![(cx + rx).into(), cy.into()]),
        curve(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry),
        curve(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy),
        curve(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry),
        curve(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy),
        op("h"),
    ]
}

pub(crate) fn text(font: &str, size: f32, origin: Point, encoded: Vec<u8>) -> Vec<Operation> {
    vec![
        op("BT"),
        Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]),
        Operation::new("Td", vec![origin.x.into(), origin.y.into()]),
        Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
        op("ET"),
    ]
}

/// Paints the image XObject `name` into `r`.
pub(crate) fn image(name: &str, r: Rect) -> Vec<Operation> {
    vec![
        op("q"),
        Operation::new(
            "cm",
            vec![r.width.into(), 0.into(), 0.into(), r.height.into(), r.x.into(), r.y.into()],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        op("Q"),
    ]
}
