use jetplot::core::{Axis, Dimensions, Histogram, Interval, Range, Vertices};
use jetplot::dispatch::{
    ChargeBin, CfBin, Level, Ordinal, OrdinalRange, PlotIndex, PlotIndexRange, PtBin, Species,
    Spin,
};
use jetplot::layout::{Canvas, Pad};
use jetplot::{Input, tools};
use proptest::prelude::*;

fn ordinal<T: Ordinal + std::fmt::Debug>() -> impl Strategy<Value = Option<T>> {
    prop::option::of((0..T::count()).prop_map(|index| T::ALL[index]))
}

fn plot_index() -> impl Strategy<Value = PlotIndex> {
    (
        ordinal::<Level>(),
        ordinal::<Species>(),
        ordinal::<PtBin>(),
        ordinal::<CfBin>(),
        ordinal::<ChargeBin>(),
        ordinal::<Spin>(),
    )
        .prop_map(|(level, species, pt, cf, charge, spin)| PlotIndex {
            level,
            species,
            pt,
            cf,
            charge,
            spin,
        })
}

fn window(count: usize) -> impl Strategy<Value = OrdinalRange> {
    let max = count as i32 - 1;
    (-1..=max, -1..=max).prop_map(|(a, b)| OrdinalRange::new(a.min(b), a.max(b)))
}

fn filled(contents: &[f64]) -> Histogram {
    let n = contents.len();
    let mut hist = Histogram::new_1d("h", "", n, 0.0, n as f64).expect("valid axis");
    for (offset, value) in contents.iter().enumerate() {
        hist.set_bin_content(offset + 1, *value);
        hist.set_bin_error(offset + 1, value.abs().sqrt());
    }
    hist
}

proptest! {
    #[test]
    fn hist_names_are_stable_and_carry_one_token_per_set_field(index in plot_index()) {
        let input = Input::default();
        let first = input.hist_name("Ec", &index, "").expect("name");
        let second = input.hist_name("Ec", &index, "").expect("name");
        prop_assert_eq!(&first, &second);

        let mut expected = String::from("h");
        if let Some(level) = index.level {
            expected.push_str(input.files.level_tag(level).expect("level"));
        }
        expected.push_str("EcStat_");
        if let Some(pt) = index.pt {
            expected.push_str(input.hists.pt_tag(pt).expect("pt"));
        }
        if let Some(cf) = index.cf {
            expected.push_str(input.hists.cf_tag(cf).expect("cf"));
        }
        if let Some(spin) = index.spin {
            expected.push_str(input.hists.spin_tag(spin).expect("spin"));
        }
        prop_assert_eq!(first, expected);
    }

    #[test]
    fn range_apply_sets_user_range_on_binned_axes(
        x_low in 0.0f64..4.0,
        x_width in 0.5f64..6.0,
        y_low in -5.0f64..0.0,
        y_width in 0.5f64..5.0,
        z_low in 0.0f64..1.0,
        z_width in 0.5f64..10.0
    ) {
        let x = Interval::new(x_low, x_low + x_width).expect("x");
        let y = Interval::new(y_low, y_low + y_width).expect("y");
        let z = Interval::new(z_low, z_low + z_width).expect("z");
        let range = Range::new(x, y, z);
        let mut hist = Histogram::new_2d("h2", "", 10, 0.0, 10.0, 10, -5.0, 5.0).expect("2d");
        range.apply_all(&mut hist);

        for (axis, interval) in [(Axis::X, x), (Axis::Y, y)] {
            let visible = hist.axis(axis).visible_range();
            prop_assert_eq!(visible.low, interval.low);
            prop_assert_eq!(visible.high, interval.high);
        }
        prop_assert_eq!(hist.axis(Axis::Z).user_range(), None);
        prop_assert_eq!(hist.minimum(), Some(z.low));
        prop_assert_eq!(hist.maximum(), Some(z.high));
    }

    #[test]
    fn rebin_sums_consecutive_groups(
        group in 1usize..5,
        groups in 1usize..8,
        seed in prop::collection::vec(0.0f64..100.0, 40)
    ) {
        let n = group * groups;
        let original = filled(&seed[..n]);
        let rebinned = original.clone().rebin(Axis::X, group).expect("rebin");
        prop_assert_eq!(rebinned.axis(Axis::X).n_bins(), groups);
        for bin in 1..=groups {
            let expected: f64 = ((bin - 1) * group + 1..=bin * group)
                .map(|source| original.bin_content(source))
                .sum();
            prop_assert!((rebinned.bin_content(bin) - expected).abs() <= 1e-9);
        }
    }

    #[test]
    fn normalization_hits_the_target_integral(
        contents in prop::collection::vec(0.1f64..50.0, 2..30),
        norm in 0.1f64..10.0,
        lo_fraction in 0.0f64..0.5,
        hi_fraction in 0.5f64..1.0
    ) {
        let mut hist = filled(&contents);
        let n = contents.len() as f64;
        let (lo, hi) = (lo_fraction * n, hi_fraction * n);
        tools::try_normalize(&mut hist, norm, lo, hi).expect("positive integral");

        let x = hist.axis(Axis::X);
        let integral = hist.integral_x(x.find_bin(lo), x.find_bin(hi));
        prop_assert!((integral - norm).abs() <= 1e-9 * norm.max(1.0));
    }

    #[test]
    fn safe_divide_leaves_holes_and_propagates_relative_errors(
        pairs in prop::collection::vec((0.5f64..20.0, -5.0f64..20.0), 1..20)
    ) {
        let numer = filled(&pairs.iter().map(|(n, _)| *n).collect::<Vec<_>>());
        let denom = filled(&pairs.iter().map(|(_, d)| *d).collect::<Vec<_>>());
        let ratio = tools::divide_1d(&numer, &denom, 1.0, 1.0).expect("divide");

        for bin in 1..=pairs.len() {
            let (n, d) = (numer.bin_content(bin), denom.bin_content(bin));
            if d <= 0.0 {
                prop_assert_eq!(ratio.bin_content(bin), 0.0);
                prop_assert_eq!(ratio.bin_error(bin), 0.0);
                continue;
            }
            let value = n / d;
            let relative = (numer.bin_error(bin) / n).powi(2) + (denom.bin_error(bin) / d).powi(2);
            prop_assert!((ratio.bin_content(bin) - value).abs() <= 1e-9 * value.max(1.0));
            prop_assert!((ratio.bin_error(bin) - value * relative.sqrt()).abs() <= 1e-9 * value.max(1.0));
        }
    }

    #[test]
    fn materialized_range_size_is_the_product_of_windows(
        level in window(Level::count()),
        species in window(Species::count()),
        pt in window(PtBin::count()),
        cf in window(CfBin::count()),
        charge in window(ChargeBin::count()),
        spin in window(Spin::count())
    ) {
        let range = PlotIndexRange { level, species, pt, cf, charge, spin };
        let windows = [level, species, pt, cf, charge, spin];
        let expected: usize = windows
            .iter()
            .map(|window| usize::try_from(window.end - window.start + 1).unwrap_or(0))
            .product();
        let indices = range.materialize();
        prop_assert_eq!(indices.len(), expected);
        prop_assert_eq!(range.len(), expected);
    }

    #[test]
    fn auto_labels_are_the_pad_positions(pads in 1usize..12) {
        let mut canvas = Canvas::new("c", "", Dimensions::default());
        for position in 0..pads {
            let y0 = position as f64 / pads as f64;
            let y1 = (position + 1) as f64 / pads as f64;
            canvas.add_pad(Pad::new(format!("p{position}"), Vertices::new(0.0, y0, 1.0, y1)));
        }
        for position in 0..pads {
            let label = position.to_string();
            prop_assert_eq!(canvas.label(position), Some(label.as_str()));
        }
        prop_assert_eq!(canvas.label_index().len(), pads);
    }

    #[test]
    fn equal_area_pads_leave_axis_text_alone(height in 0.05f64..0.5) {
        let mut canvas = Canvas::new("c", "", Dimensions::default());
        canvas.add_pad(Pad::new("top", Vertices::new(0.0, 1.0 - height, 1.0, 1.0)));
        canvas.add_pad(Pad::new("bottom", Vertices::new(0.0, 0.0, 1.0, height)));
        let template = filled(&[1.0, 2.0]);
        let mut hist = template.clone();
        let scale = canvas.scale_axis_text(0, 1, Axis::Y, &mut hist).expect("scale");
        prop_assert!((scale - 1.0).abs() <= 1e-12);
        let (before, after) = (&template.axis(Axis::Y).text, &hist.axis(Axis::Y).text);
        prop_assert!((after.title_size - before.title_size).abs() <= 1e-12);
        prop_assert!((after.title_offset - before.title_offset).abs() <= 1e-12);
    }
}
