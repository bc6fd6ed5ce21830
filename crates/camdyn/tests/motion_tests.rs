use approx::assert_abs_diff_eq;
use camdyn::{generate_motion, CycleSummary, MotionLaw, MotionSegment};

fn reference_cycle() -> Vec<MotionSegment> {
    vec![
        MotionSegment::dwell(20.0),
        MotionSegment::new(MotionLaw::Cycloidal, 60.0, 10.0),
        MotionSegment::dwell(20.0),
        MotionSegment::new(MotionLaw::Cycloidal, 60.0, 20.0),
        MotionSegment::dwell(20.0),
        MotionSegment::new(MotionLaw::SimpleHarmonic, 180.0, -30.0),
    ]
}

#[test]
fn test_lift_laws_reach_full_scale() {
    for law in MotionLaw::ALL.into_iter().filter(|l| l.produces_lift()) {
        assert_eq!(law.evaluate(0.0).displacement, 0.0, "{law}");
        assert_abs_diff_eq!(law.evaluate(1.0).displacement, 1.0, epsilon = 1e-12);
    }
    assert_eq!(MotionLaw::Dwell.evaluate(1.0).displacement, 0.0);
}

#[test]
fn test_smooth_laws_have_zero_boundary_derivatives() {
    for law in [MotionLaw::Cycloidal, MotionLaw::Polynomial345] {
        for u in [0.0, 1.0] {
            let f = law.evaluate(u);
            assert_abs_diff_eq!(f.velocity, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(f.acceleration, 0.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_full_dwell_is_at_rest() {
    let points = generate_motion(&[MotionSegment::dwell(360.0)], 1.0).unwrap();
    assert_eq!(points.len(), 361);
    for p in &points {
        assert_eq!(
            (p.displacement, p.velocity, p.acceleration, p.jerk),
            (0.0, 0.0, 0.0, 0.0)
        );
    }
}

#[test]
fn test_reference_cycle_stays_within_cumulative_lift() {
    let cycle = reference_cycle();
    let summary = CycleSummary::from_segments(&cycle);
    assert!(summary.is_complete() && summary.is_closed());
    assert_eq!(summary.max_lift, 30.0);
    assert_eq!(summary.min_lift, 0.0);

    let points = generate_motion(&cycle, 0.25).unwrap();
    assert_abs_diff_eq!(points[0].displacement, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(points.last().unwrap().displacement, 0.0, epsilon = 1e-9);
    for p in &points {
        assert!(p.displacement <= 30.0 + 1e-9, "θ={} s={}", p.theta, p.displacement);
        assert!(p.displacement >= -1e-9, "θ={} s={}", p.theta, p.displacement);
    }
}

#[test]
fn test_cycloid_to_cycloid_joint_is_smooth() {
    let cycle = [
        MotionSegment::new(MotionLaw::Cycloidal, 90.0, 10.0),
        MotionSegment::new(MotionLaw::Cycloidal, 90.0, 10.0),
        MotionSegment::new(MotionLaw::Cycloidal, 180.0, -20.0),
    ];
    let points = generate_motion(&cycle, 0.5).unwrap();
    // joint at 90°: samples 180 (end of the first rise) and 181
    let (a, b) = (&points[180], &points[181]);
    assert_eq!(a.theta, 90.0);
    assert!((a.velocity - b.velocity).abs() < 0.1);
    assert!((a.acceleration - b.acceleration).abs() < 1.5);
    assert!((a.jerk - b.jerk).abs() < 5.0);
}

#[test]
fn test_dwell_to_harmonic_joint_jumps() {
    let cycle = [
        MotionSegment::dwell(90.0),
        MotionSegment::new(MotionLaw::SimpleHarmonic, 90.0, 10.0),
        MotionSegment::new(MotionLaw::SimpleHarmonic, 180.0, -10.0),
    ];
    let points = generate_motion(&cycle, 0.5).unwrap();
    let (a, b) = (&points[180], &points[181]);
    assert_eq!(a.acceleration, 0.0);
    // h/β²·π²/2 with β = π/2
    assert!(b.acceleration > 15.0);
}
