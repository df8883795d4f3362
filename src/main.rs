use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use nalgebra::Vector3;

use tas_lattice::peaks::{AtomPos, CalcSession, SampleParams};
use tas_lattice::scattering::{formfactor, magform, scatlen};
use tas_lattice::spurion::{check_spurions, k_to_e};
use tas_lattice::symmetries::filter_by_name;
use tas_lattice::Result;

#[derive(Parser)]
#[command(name = "tas-lattice")]
#[command(about = "Lattice and scattering-geometry calculations for triple-axis planning")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Bragg peaks of a sample configuration
    Peaks {
        /// Lattice constants a b c in Angstrom
        #[arg(short, long, num_args = 3, default_values_t = [5.0, 5.0, 5.0])]
        lattice: Vec<f64>,

        /// Lattice angles alpha beta gamma in degrees
        #[arg(short = 'n', long, num_args = 3, default_values_t = [90.0, 90.0, 90.0])]
        angles: Vec<f64>,

        /// First scattering-plane vector (rlu)
        #[arg(short = 'x', long, num_args = 3, default_values_t = [1.0, 0.0, 0.0])]
        plane_x: Vec<f64>,

        /// Second scattering-plane vector (rlu)
        #[arg(short = 'y', long, num_args = 3, default_values_t = [0.0, 1.0, 0.0])]
        plane_y: Vec<f64>,

        /// Space group symbol, e.g. Fm-3m
        #[arg(short, long)]
        space_group: Option<String>,

        /// Atoms as label,x,y,z with fractional coordinates
        #[arg(short = 'A', long)]
        atom: Vec<String>,

        /// Collapse peaks into powder rings
        #[arg(short, long)]
        powder: bool,

        /// hkl search bound per axis
        #[arg(short, long, default_value = "3")]
        max_index: i32,
    },
    /// Check a kinematic configuration for spurious scattering
    Spurions {
        /// Incident wavenumber ki in 1/A
        #[arg(long, default_value = "2.662")]
        ki: f64,

        /// Final wavenumber kf in 1/A
        #[arg(long, default_value = "2.662")]
        kf: f64,

        /// Scattering angle 2theta in degrees
        #[arg(long, default_value = "60.0")]
        two_theta: f64,

        /// Highest mono/analyzer harmonic checked
        #[arg(short, long, default_value = "5")]
        order: u32,
    },
    /// List the space-group registry
    SpaceGroups {
        /// Case-insensitive symbol filter
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Look up scattering data for an element or ion
    Scattering {
        /// Element, ion or isotope symbol, e.g. Fe, Mn2+, 2H
        symbol: String,

        /// Momentum transfer (1/A) for form-factor evaluation
        #[arg(short, long, default_value = "2.0")]
        q: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting tas-lattice v{}", tas_lattice::VERSION);

    match cli.command {
        Commands::Peaks {
            lattice,
            angles,
            plane_x,
            plane_y,
            space_group,
            atom,
            powder,
            max_index,
        } => run_peaks(
            &lattice, &angles, &plane_x, &plane_y, space_group, &atom, powder, max_index,
        ),
        Commands::Spurions {
            ki,
            kf,
            two_theta,
            order,
        } => run_spurions(ki, kf, two_theta, order),
        Commands::SpaceGroups { filter } => run_space_groups(&filter),
        Commands::Scattering { symbol, q } => run_scattering(&symbol, q),
    }
}

fn parse_atom(spec: &str) -> Result<AtomPos> {
    let parts: Vec<&str> = spec.split(',').collect();
    let invalid = || {
        tas_lattice::LatticeError::numeric_domain(format!(
            "atom spec '{}', expected label,x,y,z",
            spec
        ))
    };
    if parts.len() != 4 {
        return Err(invalid());
    }
    let coords: Vec<f64> = parts[1..]
        .iter()
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid())?;
    Ok(AtomPos::new(
        parts[0].trim(),
        Vector3::new(coords[0], coords[1], coords[2]),
    ))
}

#[allow(clippy::too_many_arguments)]
fn run_peaks(
    lattice: &[f64],
    angles: &[f64],
    plane_x: &[f64],
    plane_y: &[f64],
    space_group: Option<String>,
    atom_specs: &[String],
    powder: bool,
    max_index: i32,
) -> Result<()> {
    let atoms: Vec<AtomPos> = atom_specs
        .iter()
        .map(|s| parse_atom(s))
        .collect::<Result<_>>()?;

    let params = SampleParams {
        lattice: [lattice[0], lattice[1], lattice[2]],
        angles: [
            angles[0].to_radians(),
            angles[1].to_radians(),
            angles[2].to_radians(),
        ],
        scatter_x: Vector3::new(plane_x[0], plane_x[1], plane_x[2]),
        scatter_y: Vector3::new(plane_y[0], plane_y[1], plane_y[2]),
        view_x: Vector3::new(plane_x[0], plane_x[1], plane_x[2]),
        view_y: Vector3::new(plane_y[0], plane_y[1], plane_y[2]),
        space_group,
        atoms,
        powder,
    };

    let mut session = CalcSession::new();
    session.set_max_index(max_index);
    session.calculate(&params)?;

    if let Some(recip) = session.reciprocal_cell() {
        let (ra, rb, rc) = recip.lattice_parameters();
        let (ralpha, rbeta, rgamma) = recip.lattice_angles();
        println!(
            "Reciprocal cell: a = {:.5} 1/A, b = {:.5} 1/A, c = {:.5} 1/A",
            ra, rb, rc
        );
        println!(
            "                 alpha = {:.3} deg, beta = {:.3} deg, gamma = {:.3} deg",
            ralpha.to_degrees(),
            rbeta.to_degrees(),
            rgamma.to_degrees()
        );
    }

    if let Some((vol, vol_recip)) = session.volumes() {
        println!(
            "Unit cell volume: real {:.4} A^3, reciprocal {:.4} 1/A^3",
            vol, vol_recip
        );
    }
    println!("Crystal system: {}", session.crystal_system_name());

    if let Some(up) = session.scatter_up_direction() {
        println!("Scattering-plane up direction: [{} {} {}]", up.x, up.y, up.z);
    }

    println!();
    if powder {
        println!("{:>10}  {:>6}  {:>12}", "|Q| (1/A)", "mult", "sum |F|^2");
        for ring in session.peaks() {
            match ring.intensity {
                Some(i) => println!("{:10.5}  {:6}  {:12.4}", ring.q_norm, ring.multiplicity, i),
                None => println!("{:10.5}  {:6}  {:>12}", ring.q_norm, ring.multiplicity, "-"),
            }
        }
    } else {
        println!(
            "{:>4} {:>4} {:>4}  {:>10}  {:>8}  {:>12}",
            "h", "k", "l", "|Q| (1/A)", "allowed", "|F|^2"
        );
        for peak in session.peaks() {
            let intensity = peak
                .intensity
                .map_or("-".to_string(), |i| format!("{:.4}", i));
            println!(
                "{:4} {:4} {:4}  {:10.5}  {:>8}  {:>12}",
                peak.hkl.x,
                peak.hkl.y,
                peak.hkl.z,
                peak.q_norm,
                if peak.allowed { "yes" } else { "no" },
                intensity
            );
        }
    }
    Ok(())
}

fn run_spurions(ki: f64, kf: f64, two_theta: f64, order: u32) -> Result<()> {
    let result = check_spurions(ki, kf, two_theta.to_radians(), order);

    println!(
        "ki = {} 1/A ({:.3} meV), kf = {} 1/A ({:.3} meV), 2theta = {} deg",
        ki,
        k_to_e(ki),
        kf,
        k_to_e(kf),
        two_theta
    );

    if !result.any() {
        println!("No spurious conditions found.");
        return Ok(());
    }

    if result.elastic.a_type {
        let side = if result.elastic.a_kf_smaller_ki {
            "kf<ki"
        } else {
            "kf>ki"
        };
        println!("Warning: spurious elastic scattering of type A ({}).", side);
    }
    if result.elastic.m_type {
        let side = if result.elastic.m_kf_smaller_ki {
            "kf<ki"
        } else {
            "kf>ki"
        };
        println!("Warning: spurious elastic scattering of type M ({}).", side);
    }

    for (label, spurions) in [
        ("CKI", &result.inelastic_cki),
        ("CKF", &result.inelastic_ckf),
    ] {
        if spurions.is_empty() {
            continue;
        }
        let energies: Vec<String> = spurions
            .iter()
            .map(|s| format!("{:.3} meV", s.e_mev))
            .collect();
        println!(
            "Warning: spurious inelastic {} scattering at dE = {}.",
            label,
            energies.join(", ")
        );
    }
    Ok(())
}

fn run_space_groups(filter: &str) -> Result<()> {
    let groups = filter_by_name(filter);
    if groups.is_empty() {
        println!("No space groups match '{}'.", filter);
        return Ok(());
    }

    println!("{:>4}  {:<10}  {:<14}  {:>4}", "no.", "symbol", "system", "ops");
    for sg in groups {
        println!(
            "{:>4}  {:<10}  {:<14}  {:>4}",
            sg.number,
            sg.symbol,
            sg.crystal_system().name(),
            sg.num_ops()
        );
    }
    Ok(())
}

fn run_scattering(symbol: &str, q: f64) -> Result<()> {
    let mut found = false;

    if let Some(sl) = scatlen::find(symbol) {
        println!(
            "Scattering lengths for {}: b_coh = {} fm, b_inc = {} fm",
            sl.symbol, sl.coherent, sl.incoherent
        );
        if let Some(abundance) = sl.abundance {
            println!("  natural abundance: {} %", abundance);
        }
        if let Some(half_life) = sl.half_life {
            println!("  half-life: {} a", half_life);
        }
        if !sl.isotopes.is_empty() {
            println!("  isotopes: {}", sl.isotopes.join(", "));
        }
        found = true;
    }

    if let Some(ff) = formfactor::find(symbol) {
        println!("Atomic form factor at q = {} 1/A: f = {:.5}", q, ff.eval(q));
        found = true;
    }

    if let Some(mff) = magform::find(symbol) {
        println!(
            "Magnetic form factor at q = {} 1/A: <j0> = {:.5}, <j2> = {:.5}",
            q,
            mff.j0(q),
            mff.j2(q)
        );
        found = true;
    }

    if !found {
        println!("No scattering data tabulated for '{}'.", symbol);
    }
    Ok(())
}
