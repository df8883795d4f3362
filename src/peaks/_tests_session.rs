#[cfg(test)]
mod _tests_session {
    use super::super::common::AtomPos;
    use super::super::session::{CalcSession, PassState, SampleParams};
    use crate::error::LatticeError;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn test_fresh_session_is_idle() {
        let session = CalcSession::new();
        assert_eq!(session.state(), PassState::Idle);
        assert!(session.peaks().is_empty());
        assert!(session.last_error().is_none());
        assert!(session.volumes().is_none());
    }

    #[test]
    fn test_successful_pass() {
        let mut session = CalcSession::new();
        session.calculate(&SampleParams::cubic(5.0)).unwrap();

        assert_eq!(session.state(), PassState::PeaksReady);
        assert!(!session.peaks().is_empty());

        let (real, recip) = session.volumes().unwrap();
        assert_relative_eq!(real, 125.0, epsilon = 1e-10);
        assert_relative_eq!(recip, (2.0 * PI).powi(3) / 125.0, epsilon = 1e-8);

        let recip_cell = session.reciprocal_cell().unwrap();
        let (ra, rb, rc) = recip_cell.lattice_parameters();
        assert_relative_eq!(ra, 2.0 * PI / 5.0, epsilon = 1e-10);
        assert_relative_eq!(rb, 2.0 * PI / 5.0, epsilon = 1e-10);
        assert_relative_eq!(rc, 2.0 * PI / 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_up_directions() {
        let mut session = CalcSession::new();
        session.calculate(&SampleParams::cubic(5.0)).unwrap();

        assert_eq!(
            session.scatter_up_direction().unwrap(),
            Vector3::new(0, 0, 1)
        );
        assert_eq!(session.view_up_direction().unwrap(), Vector3::new(0, 0, 1));
    }

    #[test]
    fn test_crystal_system_sentinel_and_lookup() {
        let mut session = CalcSession::new();
        session.calculate(&SampleParams::cubic(5.0)).unwrap();
        assert_eq!(session.crystal_system_name(), "<not set>");

        let mut params = SampleParams::cubic(3.615);
        params.space_group = Some("Fm-3m".to_string());
        session.calculate(&params).unwrap();
        assert_eq!(session.crystal_system_name(), "cubic");
    }

    #[test]
    fn test_invalid_plane_clears_previous_peaks() {
        let mut session = CalcSession::new();
        session.calculate(&SampleParams::cubic(5.0)).unwrap();
        assert!(!session.peaks().is_empty());

        let mut bad = SampleParams::cubic(5.0);
        bad.scatter_y = Vector3::new(2.0, 0.0, 0.0);
        let err = session.calculate(&bad).unwrap_err();

        assert!(matches!(err, LatticeError::InvalidPlane { .. }));
        assert_eq!(session.state(), PassState::CalculationFailed);
        // Never left stale
        assert!(session.peaks().is_empty());
        assert!(session.volumes().is_none());
        assert!(session.last_error().is_some());
    }

    #[test]
    fn test_degenerate_lattice_fails_pass() {
        let mut session = CalcSession::new();
        let mut bad = SampleParams::cubic(5.0);
        bad.angles = [0.1, 0.1, 0.2];

        let err = session.calculate(&bad).unwrap_err();
        assert!(matches!(err, LatticeError::InvalidLattice { .. }));
        assert_eq!(session.state(), PassState::CalculationFailed);
    }

    #[test]
    fn test_unknown_space_group_fails_pass() {
        let mut session = CalcSession::new();
        let mut bad = SampleParams::cubic(5.0);
        bad.space_group = Some("Q999".to_string());

        let err = session.calculate(&bad).unwrap_err();
        assert!(matches!(err, LatticeError::SymmetryExpansion { .. }));
    }

    #[test]
    fn test_session_recovers_after_failure() {
        let mut session = CalcSession::new();
        let mut bad = SampleParams::cubic(5.0);
        bad.scatter_x = Vector3::zeros();
        assert!(session.calculate(&bad).is_err());

        session.calculate(&SampleParams::cubic(4.0)).unwrap();
        assert_eq!(session.state(), PassState::PeaksReady);
        assert!(!session.peaks().is_empty());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = CalcSession::new();
        session.calculate(&SampleParams::cubic(5.0)).unwrap();
        session.reset();

        assert_eq!(session.state(), PassState::Idle);
        assert!(session.peaks().is_empty());
        assert!(session.volumes().is_none());
    }

    #[test]
    fn test_max_index_bounds_search() {
        let mut session = CalcSession::new();
        session.set_max_index(1);
        session.calculate(&SampleParams::cubic(5.0)).unwrap();
        assert_eq!(session.peaks().len(), 9);

        session.set_max_index(2);
        session.calculate(&SampleParams::cubic(5.0)).unwrap();
        assert_eq!(session.peaks().len(), 25);
    }

    #[test]
    fn test_powder_pass_collapses_rings() {
        let mut session = CalcSession::new();
        session.set_max_index(2);

        let mut params = SampleParams::cubic(5.0);
        params.powder = true;
        session.calculate(&params).unwrap();

        let rings = session.peaks();
        // Fewer rings than in-plane reflections, multiplicities preserved
        assert!(rings.len() < 25);
        let total: u32 = rings.iter().map(|r| r.multiplicity).sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn test_pass_with_atoms_attaches_intensities() {
        let mut session = CalcSession::new();
        let mut params = SampleParams::cubic(2.87);
        params.space_group = Some("Im-3m".to_string());
        params.atoms = vec![AtomPos::new("Fe", Vector3::zeros())];
        session.calculate(&params).unwrap();

        assert!(session.peaks().iter().all(|p| p.intensity.is_some()));
        // Absence rule and structure factor agree for the body-centered cell
        for peak in session.peaks() {
            if !peak.allowed {
                assert_relative_eq!(peak.intensity.unwrap(), 0.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_snap_through_session() {
        let mut session = CalcSession::new();
        session.calculate(&SampleParams::cubic(5.0)).unwrap();

        let q_unit = 2.0 * PI / 5.0;
        let query = Vector3::new(0.9 * q_unit, -0.1, 0.0);
        let nearest = session.snap_to_nearest(&query).unwrap();
        assert_eq!(nearest.hkl, Vector3::new(1, 0, 0));
    }
}
