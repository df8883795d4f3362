#[cfg(test)]
mod _tests_generator {
    use super::super::common::{AtomPos, LatticeCommon};
    use super::super::generator::{
        generate_peaks, snap_to_nearest_peak, structure_factor, Peak,
    };
    use crate::lattice::{LatticePlane, UnitCell};
    use crate::symmetries::{find_by_name, SpaceGroup};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    fn xy_plane() -> LatticePlane {
        LatticePlane::new(
            Vector3::zeros(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    fn cubic_common(
        a: f64,
        sg: Option<&'static SpaceGroup>,
        atoms: &[AtomPos],
    ) -> LatticeCommon {
        let lattice = UnitCell::cubic(a).unwrap();
        let recip = lattice.reciprocal().unwrap();
        LatticeCommon::calc(lattice, recip, xy_plane(), xy_plane(), sg, atoms).unwrap()
    }

    fn find_peak(peaks: &[Peak], h: i32, k: i32, l: i32) -> &Peak {
        peaks
            .iter()
            .find(|p| p.hkl == Vector3::new(h, k, l))
            .unwrap_or_else(|| panic!("peak ({}, {}, {}) missing", h, k, l))
    }

    #[test]
    fn test_plane_membership_count() {
        let common = cubic_common(5.0, None, &[]);
        let peaks = generate_peaks(&common, false, 2).unwrap();

        // Only l = 0 lies in the (100)/(010) plane: a 5x5 grid
        assert_eq!(peaks.len(), 25);
        assert!(peaks.iter().all(|p| p.hkl.z == 0));
        assert!(peaks.iter().all(|p| p.allowed));
        assert!(peaks.iter().all(|p| p.multiplicity == 1));
        assert!(peaks.iter().all(|p| p.intensity.is_none()));
    }

    #[test]
    fn test_in_plane_coordinates() {
        let common = cubic_common(5.0, None, &[]);
        let peaks = generate_peaks(&common, false, 2).unwrap();

        let q_unit = 2.0 * PI / 5.0;
        let p100 = find_peak(&peaks, 1, 0, 0);
        assert_relative_eq!(p100.in_plane.0, q_unit, epsilon = 1e-10);
        assert_relative_eq!(p100.in_plane.1, 0.0, epsilon = 1e-10);
        assert_relative_eq!(p100.q_norm, q_unit, epsilon = 1e-10);

        let p210 = find_peak(&peaks, 2, 1, 0);
        assert_relative_eq!(p210.in_plane.0, 2.0 * q_unit, epsilon = 1e-10);
        assert_relative_eq!(p210.in_plane.1, q_unit, epsilon = 1e-10);
        assert_relative_eq!(p210.q_norm, 5.0_f64.sqrt() * q_unit, epsilon = 1e-10);
    }

    #[test]
    fn test_body_centered_absences_marked() {
        let sg = find_by_name("Im-3m").unwrap();
        let common = cubic_common(2.87, Some(sg), &[]);
        let peaks = generate_peaks(&common, false, 2).unwrap();

        // h + k + l odd is forbidden for I centering
        assert!(!find_peak(&peaks, 1, 0, 0).allowed);
        assert!(!find_peak(&peaks, 2, 1, 0).allowed);
        assert!(find_peak(&peaks, 1, 1, 0).allowed);
        assert!(find_peak(&peaks, 2, 0, 0).allowed);
    }

    #[test]
    fn test_structure_factor_bcc_extinction() {
        let b = 9.45;
        let sites = vec![
            (Vector3::zeros(), b),
            (Vector3::new(0.5, 0.5, 0.5), b),
        ];

        // (100) cancels, (110) doubles
        assert_relative_eq!(
            structure_factor(Vector3::new(1, 0, 0), &sites),
            0.0,
            epsilon = 1e-8
        );
        assert_relative_eq!(
            structure_factor(Vector3::new(1, 1, 0), &sites),
            4.0 * b * b,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_intensities_attached_with_atoms() {
        let atoms = [AtomPos::new("Fe", Vector3::zeros())];
        let common = cubic_common(2.87, None, &atoms);
        let peaks = generate_peaks(&common, false, 1).unwrap();

        let b = 9.45;
        for peak in &peaks {
            assert_relative_eq!(peak.intensity.unwrap(), b * b, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_powder_ring_collapse() {
        let common = cubic_common(5.0, None, &[]);
        let rings = generate_peaks(&common, true, 1).unwrap();

        // 9 in-plane peaks collapse to |Q| = 0, 1 and sqrt(2) rings
        assert_eq!(rings.len(), 3);
        let q_unit = 2.0 * PI / 5.0;

        let origin = rings.iter().find(|r| r.q_norm < 1e-10).unwrap();
        assert_eq!(origin.multiplicity, 1);

        let axis = rings
            .iter()
            .find(|r| (r.q_norm - q_unit).abs() < 1e-8)
            .unwrap();
        assert_eq!(axis.multiplicity, 4);

        let diagonal = rings
            .iter()
            .find(|r| (r.q_norm - 2.0_f64.sqrt() * q_unit).abs() < 1e-8)
            .unwrap();
        assert_eq!(diagonal.multiplicity, 4);
    }

    #[test]
    fn test_powder_drops_forbidden_reflections() {
        let sg = find_by_name("Im-3m").unwrap();
        let common = cubic_common(2.87, Some(sg), &[]);
        let rings = generate_peaks(&common, true, 1).unwrap();

        // Only the origin and the {110} ring survive the absence rules
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.allowed));
        let q_unit = 2.0 * PI / 2.87;
        let ring110 = rings
            .iter()
            .find(|r| (r.q_norm - 2.0_f64.sqrt() * q_unit).abs() < 1e-8)
            .unwrap();
        assert_eq!(ring110.multiplicity, 4);
    }

    #[test]
    fn test_powder_ring_intensity_summed() {
        let atoms = [AtomPos::new("Ni", Vector3::zeros())];
        let common = cubic_common(3.52, None, &atoms);
        let rings = generate_peaks(&common, true, 1).unwrap();

        let b = 10.3;
        let q_unit = 2.0 * PI / 3.52;
        let axis = rings
            .iter()
            .find(|r| (r.q_norm - q_unit).abs() < 1e-8)
            .unwrap();
        assert_relative_eq!(axis.intensity.unwrap(), 4.0 * b * b, epsilon = 1e-6);
    }

    #[test]
    fn test_snap_to_nearest() {
        let common = cubic_common(5.0, None, &[]);
        let peaks = generate_peaks(&common, false, 2).unwrap();

        let q_unit = 2.0 * PI / 5.0;
        let query = Vector3::new(1.1 * q_unit, 0.05, 0.0);
        let nearest = snap_to_nearest_peak(&peaks, &query).unwrap();
        assert_eq!(nearest.hkl, Vector3::new(1, 0, 0));
    }

    #[test]
    fn test_snap_tie_breaks_to_first() {
        let mk = |h: i32, x: f64| Peak {
            hkl: Vector3::new(h, 0, 0),
            position: Vector3::new(x, 0.0, 0.0),
            in_plane: (x, 0.0),
            q_norm: x.abs(),
            allowed: true,
            intensity: None,
            multiplicity: 1,
        };
        // Equidistant from the origin query; the earlier entry wins
        let peaks = vec![mk(-1, -1.0), mk(1, 1.0)];
        let nearest = snap_to_nearest_peak(&peaks, &Vector3::zeros()).unwrap();
        assert_eq!(nearest.hkl, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn test_snap_empty_set() {
        assert!(snap_to_nearest_peak(&[], &Vector3::zeros()).is_none());
    }
}
