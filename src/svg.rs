use crate::color::Color;
use crate::geometry::Geometry;
use crate::matrix::ModuleMatrix;

/*---- Vector output ----*/

// Returns a standalone SVG document depicting the given matrix at geometry.size() units square,
// one <rect> per dark module over a single background <rect>. Light modules emit nothing.
// The output only depends on its inputs and always uses Unix newlines (\n).
pub(crate) fn render_svg(
    matrix: &ModuleMatrix,
    geometry: &Geometry,
    foreground: Color,
    background: Color,
) -> Vec<u8> {
    let size = geometry.size();
    let fg = fill(foreground);
    let bg = fill(background);

    let mut result = String::with_capacity(160 + matrix.dark_count() * (48 + fg.len()));
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
        size
    );
    result += &format!("\t<rect width=\"{0}\" height=\"{0}\" {1}/>\n", size, bg);
    for (x, y) in matrix.dark_modules() {
        let rect = geometry.module_rect(x, y);
        result += &format!(
            "\t<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>\n",
            rect.left, rect.top, rect.width, rect.height, fg
        );
    }
    result += "</svg>\n";
    result.into_bytes()
}

fn fill(color: Color) -> String {
    if color.is_opaque() {
        format!("fill=\"{}\"", color.to_hex())
    } else {
        let opacity = f64::from(color.a) / 255.0;
        format!("fill=\"{}\" fill-opacity=\"{:.3}\"", color.to_hex(), opacity)
    }
}
