use std::sync::LazyLock;

use num_complex::Complex64;

/// Bound coherent and incoherent neutron scattering lengths (fm) for an
/// element or a single isotope.
///
/// Values follow the standard Sears compilation. For elements the entry is
/// the natural-abundance mixture and `isotopes` links the tabulated
/// individual isotopes; for isotopes either the natural abundance (percent)
/// or the half-life (years) is given.
#[derive(Debug, Clone)]
pub struct ScatteringLength {
    pub symbol: &'static str,
    pub coherent: Complex64,
    pub incoherent: Complex64,
    pub abundance: Option<f64>,
    pub half_life: Option<f64>,
    pub isotopes: &'static [&'static str],
}

fn entry(
    symbol: &'static str,
    coh: (f64, f64),
    inc: (f64, f64),
    abundance: Option<f64>,
    half_life: Option<f64>,
    isotopes: &'static [&'static str],
) -> ScatteringLength {
    ScatteringLength {
        symbol,
        coherent: Complex64::new(coh.0, coh.1),
        incoherent: Complex64::new(inc.0, inc.1),
        abundance,
        half_life,
        isotopes,
    }
}

static ELEMENTS: LazyLock<Vec<ScatteringLength>> = LazyLock::new(|| {
    vec![
        entry("H", (-3.7390, 0.0), (25.274, 0.0), None, None, &["1H", "2H", "3H"]),
        entry("B", (5.30, -0.213), (3.68, 0.0), None, None, &["10B", "11B"]),
        entry("C", (6.6460, 0.0), (0.089, 0.0), None, None, &[]),
        entry("N", (9.36, 0.0), (2.00, 0.0), None, None, &[]),
        entry("O", (5.803, 0.0), (0.0, 0.0), None, None, &[]),
        entry("Na", (3.63, 0.0), (3.59, 0.0), None, None, &[]),
        entry("Al", (3.449, 0.0), (0.26, 0.0), None, None, &[]),
        entry("Si", (4.1491, 0.0), (0.18, 0.0), None, None, &[]),
        entry("Ti", (-3.438, 0.0), (4.78, 0.0), None, None, &[]),
        entry("V", (-0.3824, 0.0), (6.35, 0.0), None, None, &[]),
        entry("Cr", (3.635, 0.0), (3.82, 0.0), None, None, &[]),
        entry("Mn", (-3.73, 0.0), (1.79, 0.0), None, None, &[]),
        entry("Fe", (9.45, 0.0), (1.78, 0.0), None, None, &[]),
        entry("Co", (2.49, 0.0), (-6.20, 0.0), None, None, &[]),
        entry("Ni", (10.3, 0.0), (6.43, 0.0), None, None, &[]),
        entry("Cu", (7.718, 0.0), (2.09, 0.0), None, None, &[]),
        entry("Zn", (5.680, 0.0), (0.72, 0.0), None, None, &[]),
        entry("Cd", (4.87, -0.70), (2.46, 0.0), None, None, &[]),
        entry("Gd", (6.5, -13.82), (13.0, 0.0), None, None, &[]),
        entry("Pb", (9.405, 0.0), (0.13, 0.0), None, None, &[]),
    ]
});

static ISOTOPES: LazyLock<Vec<ScatteringLength>> = LazyLock::new(|| {
    vec![
        entry("1H", (-3.7406, 0.0), (25.274, 0.0), Some(99.985), None, &[]),
        entry("2H", (6.671, 0.0), (4.04, 0.0), Some(0.015), None, &[]),
        entry("3H", (4.792, 0.0), (-1.04, 0.0), None, Some(12.32), &[]),
        entry("10B", (-0.1, -1.066), (-4.7, 1.231), Some(19.9), None, &[]),
        entry("11B", (6.65, 0.0), (-1.3, 0.0), Some(80.1), None, &[]),
    ]
});

/// Natural-abundance element entries.
pub fn elements() -> &'static [ScatteringLength] {
    &ELEMENTS
}

/// Single-isotope entries.
pub fn isotopes() -> &'static [ScatteringLength] {
    &ISOTOPES
}

/// Look up a scattering length by element or isotope symbol.
pub fn find(symbol: &str) -> Option<&'static ScatteringLength> {
    ELEMENTS
        .iter()
        .chain(ISOTOPES.iter())
        .find(|sl| sl.symbol == symbol)
}

/// Coherent scattering length (real part, fm) for a labelled atom,
/// tolerating ionic labels such as "Fe2+" by falling back to the element.
pub fn coherent_for_label(label: &str) -> Option<f64> {
    if let Some(sl) = find(label) {
        return Some(sl.coherent.re);
    }
    let element: String = label
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    find(&element).map(|sl| sl.coherent.re)
}
