use fermidirac_lib::{curve, multi_curve, occupation, EnergyGrid, TemperatureSet, K_BOLTZMANN_EV};

fn seven_point_grid() -> EnergyGrid {
    EnergyGrid::from_values(vec![-1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0]).expect("valid grid")
}

#[test]
fn room_temperature_curve_is_symmetric_and_decreasing() {
    let result = curve(&seven_point_grid(), 300.0, 0.5, false);
    let f = result.occupation();

    assert_eq!(f.len(), 7);
    assert_eq!(f[3], 0.5);
    for d in 1..=3 {
        let sum = f[3 + d] + f[3 - d];
        assert!((sum - 1.0).abs() < 1e-12, "offset {d}: {sum}");
    }
    for pair in f.windows(2) {
        assert!(pair[1] <= pair[0], "{} > {}", pair[1], pair[0]);
        // Below μ the occupation saturates to exactly 1.0 once exp(x) < ulp/2.
        if pair[0] < 1.0 {
            assert!(pair[1] < pair[0], "{} !< {}", pair[1], pair[0]);
        }
    }
    assert!(result.maxwell_boltzmann().is_none());
}

#[test]
fn maxwell_boltzmann_omitted_at_zero_temperature() {
    let result = curve(&seven_point_grid(), 0.0, 0.5, true);
    assert!(result.maxwell_boltzmann().is_none());
    assert_eq!(result.occupation(), &[1.0, 1.0, 1.0, 0.5, 0.0, 0.0, 0.0]);
}

#[test]
fn maxwell_boltzmann_approaches_fermi_dirac_at_high_energy() {
    let (temperature, mu) = (10_000.0, 0.5);
    let grid = EnergyGrid::linear(-1.0, 2.0, 100).unwrap();
    let result = curve(&grid, temperature, mu, true);
    let mb = result.maxwell_boltzmann().unwrap();

    // Above μ, f_FD / f_MB = 1 / (1 + exp(-x)) rises monotonically towards one.
    let ratios: Vec<(f64, f64)> = result
        .points()
        .zip(mb)
        .filter(|((energy, _), _)| *energy > 1.0)
        .map(|((energy, fd), mb)| (energy, fd / mb))
        .collect();
    assert!(!ratios.is_empty());
    for &(energy, ratio) in &ratios {
        let x = (energy - mu) / (K_BOLTZMANN_EV * temperature);
        let expected = 1.0 / (1.0 + (-x).exp());
        assert!((ratio - expected).abs() < 1e-12, "E={energy}: {ratio} vs {expected}");
        assert!(ratio > 0.5 && ratio <= 1.0);
    }
    for pair in ratios.windows(2) {
        assert!(pair[1].1 > pair[0].1);
    }
}

#[test]
fn maxwell_boltzmann_is_finite_far_below_mu() {
    let grid = EnergyGrid::linear(-100.0, 0.0, 11).unwrap();
    let result = curve(&grid, 1.0, 0.5, true);
    assert!(result
        .maxwell_boltzmann()
        .unwrap()
        .iter()
        .all(|v| v.is_finite() && *v > 0.0));
}

#[test]
fn multi_temperature_overlay_scenario() {
    let grid = EnergyGrid::linear(-1.0, 2.0, 500).unwrap();
    let temperatures = TemperatureSet::new(vec![0.0, 100.0, 300.0, 1000.0, 3000.0]).unwrap();
    let result = multi_curve(&grid, &temperatures, 0.5, false);

    assert_eq!(result.curves.len(), 5);
    assert_eq!(result.energies.len(), 500);

    let step = &result.curves[0];
    assert_eq!(step.temperature, 0.0);
    for (energy, f) in result.energies.iter().zip(&step.occupation) {
        let expected = if *energy < 0.5 {
            1.0
        } else if *energy > 0.5 {
            0.0
        } else {
            0.5
        };
        assert_eq!(*f, expected, "E={energy}");
    }

    for curve in &result.curves[1..] {
        for (energy, f) in result.energies.iter().zip(&curve.occupation) {
            assert_eq!(*f, occupation(*energy, curve.temperature, 0.5));
        }
        assert!(curve.maxwell_boltzmann.is_none());
    }
}

#[test]
fn multi_curve_is_independent_of_neighbours() {
    let grid = EnergyGrid::linear(-1.0, 2.0, 64).unwrap();
    let alone = multi_curve(&grid, &TemperatureSet::new(vec![300.0]).unwrap(), 0.5, true);
    let together = multi_curve(
        &grid,
        &TemperatureSet::new(vec![10.0, 300.0, 5000.0]).unwrap(),
        0.5,
        true,
    );
    assert_eq!(alone.curves[0], together.curves[1]);
}
