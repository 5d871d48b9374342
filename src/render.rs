//! C++ source fragments for the coefficient tables.
//!
//! Each order becomes one `else if constexpr (N == ...)` branch returning the
//! coefficients as `float`, `double`, `long double` and (when
//! `BOOST_HAS_FLOAT128` is defined) `float128` literals.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use daub_precision::Real;
use daub_wavelet::ScalingFilter;

/// Literal suffix and separator for each floating-point type, in the order of
/// the digit counts passed to [`render_fragment`].
const LITERALS: [(&str, &str, &str); 4] = [
    ("float", "f", ", "),
    ("double", "", ", "),
    ("long double", "L", ", "),
    ("boost::multiprecision::float128", "Q", ",\n                        "),
];

const INDENT: &str = "            ";

/// File name of the fragment for `order`, e.g. `daub04_coefficients.txt`.
pub fn fragment_file_name(order: usize) -> String {
    format!("daub{order:02}_coefficients.txt")
}

/// Renders the fragment for `filter` with `digits` significant digits for
/// the `float`, `double`, `long double` and `float128` literals.
pub fn render_fragment(filter: &ScalingFilter, digits: [usize; 4]) -> String {
    let order = filter.order();
    let mut out = format!("# Daubechies {order} scaling coefficients\n");
    out.push_str(&format!("        else if constexpr (N == {order})\n        {{\n"));

    for (i, ((ty, suffix, sep), d)) in LITERALS.iter().zip(digits).enumerate() {
        if i == 3 {
            out.push_str(INDENT);
            out.push_str("#ifdef BOOST_HAS_FLOAT128\n");
        }
        let keyword = if i == 0 { "if" } else { "else if" };
        out.push_str(&format!(
            "{INDENT}{keyword} constexpr (std::is_same<{ty}, Real>::value) {{\n                return {{"
        ));
        out.push_str(&literal_list(filter.coeffs(), d, suffix, sep));
        out.push_str(&format!("}};\n{INDENT}}}\n"));
    }

    out.push_str(INDENT);
    out.push_str("#endif\n");
    out.push_str(INDENT);
    out.push_str(
        "else { throw std::logic_error(\"Wavelet transform coefficients for this precision have not been implemented.\"); }\n",
    );
    out.push_str("        }\n");
    out
}

fn literal_list(coeffs: &[Real], digits: usize, suffix: &str, sep: &str) -> String {
    coeffs
        .iter()
        .map(|c| format!("{}{suffix}{sep}", c.to_significant(digits)))
        .collect()
}

/// Writes the fragment for `filter` into `dir` and returns the file path.
pub fn write_fragment(dir: &Path, filter: &ScalingFilter, digits: [usize; 4]) -> Result<PathBuf> {
    let path = dir.join(fragment_file_name(filter.order()));
    std::fs::write(&path, render_fragment(filter, digits))
        .with_context(|| format!("failed to write fragment: {}", path.display()))?;
    Ok(path)
}
