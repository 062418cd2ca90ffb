use fermidirac_lib::{occupation, K_BOLTZMANN_EV};

const TEMPERATURES: [f64; 6] = [0.0, 0.01, 1.0, 300.0, 3000.0, 1e6];

fn energies() -> impl Iterator<Item = f64> {
    (0..=400).map(|i| -100.0 + 0.5 * i as f64)
}

#[test]
fn occupation_is_bounded() {
    for temperature in TEMPERATURES {
        for energy in energies() {
            let f = occupation(energy, temperature, 0.5);
            assert!(
                (0.0..=1.0).contains(&f),
                "f({energy}, {temperature}) = {f} out of [0, 1]"
            );
        }
    }
}

#[test]
fn half_occupancy_at_chemical_potential() {
    for mu in [-10.0, -0.25, 0.0, 0.5, 7.0] {
        for temperature in &TEMPERATURES[1..] {
            assert_eq!(occupation(mu, *temperature, mu), 0.5);
        }
    }
}

#[test]
fn half_occupancy_at_chemical_potential_for_vanishing_temperature() {
    // Down to temperatures where k_B·T underflows to zero.
    for temperature in [1e-300, 1e-320, 5e-324] {
        assert!(temperature > 0.0);
        assert_eq!(occupation(0.5, temperature, 0.5), 0.5);
        assert_eq!(occupation(0.25, temperature, 0.5), 1.0);
        assert_eq!(occupation(0.75, temperature, 0.5), 0.0);
    }
}

#[test]
fn zero_temperature_is_exact_step() {
    assert_eq!(occupation(0.499_999, 0.0, 0.5), 1.0);
    assert_eq!(occupation(0.5, 0.0, 0.5), 0.5);
    assert_eq!(occupation(0.500_001, 0.0, 0.5), 0.0);
}

#[test]
fn strictly_decreasing_in_energy() {
    let (temperature, mu) = (300.0, 0.5);
    let kt = K_BOLTZMANN_EV * temperature;
    // Stay within the region where f is representable away from 0 and 1.
    let values: Vec<f64> = (-300..=300)
        .map(|i| mu + 0.1 * i as f64 * kt)
        .map(|energy| occupation(energy, temperature, mu))
        .collect();
    for pair in values.windows(2) {
        assert!(pair[1] < pair[0], "{} !< {}", pair[1], pair[0]);
    }
}

#[test]
fn particle_hole_symmetry() {
    let mu = 0.5;
    for temperature in [1.0, 300.0, 5000.0] {
        for d in [0.0, 0.001, 0.01, 0.1, 0.5, 2.0] {
            let sum = occupation(mu + d, temperature, mu) + occupation(mu - d, temperature, mu);
            assert!((sum - 1.0).abs() < 1e-12, "T={temperature} d={d}: {sum}");
        }
    }
}

#[test]
fn overflow_guard_far_above_mu() {
    let (temperature, mu) = (300.0, 0.5);
    let energy = mu + 10_000.0 * K_BOLTZMANN_EV * temperature;
    let f = occupation(energy, temperature, mu);
    assert!(f.is_finite());
    assert_eq!(f, 0.0);
}

#[test]
fn overflow_guard_far_below_mu() {
    let (temperature, mu) = (0.5, 0.5);
    let energy = mu - 10_000.0 * K_BOLTZMANN_EV * temperature;
    assert_eq!(occupation(energy, temperature, mu), 1.0);
}

#[test]
fn tiny_nonzero_temperature_stays_finite() {
    for energy in energies() {
        let f = occupation(energy, 1e-12, 0.5);
        assert!(f.is_finite());
    }
}
