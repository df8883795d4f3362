use crate::error::{LatticeError, Result};

/// Lande g-factor for quantum numbers (S, L, J).
pub fn lande_g(s: f64, l: f64, j: f64) -> Result<f64> {
    let jj = j * (j + 1.0);
    if jj.abs() < 1e-12 {
        return Err(LatticeError::numeric_domain("Lande g-factor with J = 0"));
    }
    Ok(1.5 + (s * (s + 1.0) - l * (l + 1.0)) / (2.0 * jj))
}

/// Effective magnetic moment in Bohr magnetons, g * sqrt(J(J+1)).
pub fn eff_magnetons(g: f64, j: f64) -> f64 {
    g * (j * (j + 1.0)).sqrt()
}

fn subshell_l(letter: char) -> Option<u32> {
    match letter.to_ascii_lowercase() {
        's' => Some(0),
        'p' => Some(1),
        'd' => Some(2),
        'f' => Some(3),
        _ => None,
    }
}

/// Hund's-rules ground state (S, L, J) for a partially filled subshell.
///
/// Accepts an occupation string such as "3d5", "4f7" or just "d5".
pub fn hund(orbital: &str) -> Result<(f64, f64, f64)> {
    let trimmed = orbital.trim();
    let letter_idx = trimmed
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .ok_or_else(|| {
            LatticeError::numeric_domain(format!("no subshell letter in '{}'", orbital))
        })?;

    let letter = trimmed[letter_idx..].chars().next().unwrap_or(' ');
    let l = subshell_l(letter).ok_or_else(|| {
        LatticeError::numeric_domain(format!("unknown subshell '{}' in '{}'", letter, orbital))
    })?;

    let count_str = &trimmed[letter_idx + 1..];
    let n: u32 = count_str.parse().map_err(|_| {
        LatticeError::numeric_domain(format!("bad electron count in '{}'", orbital))
    })?;

    let capacity = 2 * (2 * l + 1);
    if n == 0 || n > capacity {
        return Err(LatticeError::numeric_domain(format!(
            "{} electrons do not fit a {} subshell",
            n, letter
        )));
    }

    let half = 2 * l + 1;
    // First half fills spins up, second half pairs them
    let unpaired = if n <= half { n } else { capacity - n };
    let s = unpaired as f64 / 2.0;

    // Orbital momentum: fill ml = l, l-1, ... greedily
    let m = if n <= half { n } else { n - half };
    let l_total = (0..m).map(|k| l as i64 - k as i64).sum::<i64>().abs() as f64;

    // Third rule: J = |L-S| below half filling, L+S above
    let j = if n < half {
        (l_total - s).abs()
    } else {
        l_total + s
    };

    Ok((s, l_total, j))
}
