use chronoscope::core::{LinearScale, QuantizingTimeScale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        height in 1.0f64..4_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;
        let scale = LinearScale::new((domain_start, domain_end), (height, 0.0)).expect("valid scale");

        let recovered = scale.invert(scale.forward(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn quantize_returns_the_nearest_grid_member(
        start in 1_600_000_000.0f64..1_800_000_000.0,
        step in 1.0f64..600.0,
        count in 1usize..500,
        offset_factor in -0.5f64..1.5
    ) {
        let scale = QuantizingTimeScale::new(start, step, count, (0.0, 1_000.0)).expect("valid scale");
        let span = step * (count - 1) as f64;
        let time = start + offset_factor * span.max(step);

        let snapped = scale.quantize(time);
        prop_assert!(scale.timestamps().any(|member| member == snapped));
        let best = scale
            .timestamps()
            .map(|member| (member - time).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert!((snapped - time).abs() <= best + 1e-6);
    }

    #[test]
    fn midpoints_quantize_to_the_lower_member(
        start in -10_000.0f64..10_000.0,
        step_units in 1u32..1_000,
        count in 2usize..200,
        index_factor in 0.0f64..1.0
    ) {
        // Integer-valued grids keep the midpoint exactly representable.
        let step = f64::from(step_units) * 2.0;
        let start = start.round();
        let scale = QuantizingTimeScale::new(start, step, count, (0.0, 800.0)).expect("valid scale");
        let index = ((count - 2) as f64 * index_factor) as usize;
        let lower = start + step * index as f64;

        prop_assert_eq!(scale.quantize(lower + step / 2.0), lower);
    }
}
