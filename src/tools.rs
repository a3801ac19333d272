//! Histogram helpers shared by every plot routine.

use std::rc::Rc;

use tracing::debug;

use crate::core::{Axis, Histogram, Range};
use crate::error::{PlotError, PlotResult};
use crate::io::{DataFile, FileMode, Storage};

/// Scales `hist` so its integral over x bins `[FindBin(lo), FindBin(hi)]`
/// equals `norm`.
///
/// Fails with [`PlotError::EmptyHistogram`] and leaves `hist` untouched when
/// that integral is not strictly positive.
pub fn try_normalize(hist: &mut Histogram, norm: f64, lo: f64, hi: f64) -> PlotResult<f64> {
    let x = hist.axis(Axis::X);
    let (first, last) = (x.find_bin(lo), x.find_bin(hi));
    let integral = hist.integral_x(first, last);
    scale_to(hist, norm, integral)
}

/// Like [`try_normalize`] but integrates over every active axis of `range`.
pub fn try_normalize_range(hist: &mut Histogram, norm: f64, range: &Range) -> PlotResult<f64> {
    let integral = hist.integral_bins(range.bin_ranges(hist));
    scale_to(hist, norm, integral)
}

/// Normalizes when possible; empty ranges are skipped silently.
///
/// Without a range all in-range bins are integrated. Returns whether `hist`
/// was scaled.
pub fn normalize(hist: &mut Histogram, norm: f64, range: Option<&Range>) -> bool {
    let result = match range {
        Some(range) => try_normalize_range(hist, norm, range),
        None => {
            let integral = hist.integral();
            scale_to(hist, norm, integral)
        }
    };
    match result {
        Ok(_) => true,
        Err(err) => {
            debug!(error = %err, "skipping normalization");
            false
        }
    }
}

fn scale_to(hist: &mut Histogram, norm: f64, integral: f64) -> PlotResult<f64> {
    if integral > 0.0 && integral.is_finite() {
        hist.scale(norm / integral);
        Ok(integral)
    } else {
        Err(PlotError::EmptyHistogram {
            name: hist.name.clone(),
        })
    }
}

/// Ratio of two 1D histograms with the binning of `denom`.
pub fn divide_1d(
    numer: &Histogram,
    denom: &Histogram,
    w_num: f64,
    w_den: f64,
) -> PlotResult<Histogram> {
    require_dimension(numer, 1)?;
    require_dimension(denom, 1)?;
    divide(numer, denom, w_num, w_den)
}

/// Ratio of two 2D histograms with the binning of `denom`.
pub fn divide_2d(
    numer: &Histogram,
    denom: &Histogram,
    w_num: f64,
    w_den: f64,
) -> PlotResult<Histogram> {
    require_dimension(numer, 2)?;
    require_dimension(denom, 2)?;
    divide(numer, denom, w_num, w_den)
}

/// `(w_num * numer) / (w_den * denom)` on the binning of `denom`.
///
/// Bins with a non-positive denominator stay empty (zero content and error).
/// When the binnings differ each result bin takes the numerator bin whose
/// center is nearest.
pub fn divide(
    numer: &Histogram,
    denom: &Histogram,
    w_num: f64,
    w_den: f64,
) -> PlotResult<Histogram> {
    if numer.dimension() != denom.dimension() {
        return Err(PlotError::InvalidData(format!(
            "cannot divide {}D `{}` by {}D `{}`",
            numer.dimension(),
            numer.name,
            denom.dimension(),
            denom.name
        )));
    }
    let mut result = denom.renamed(format!("{}_over_{}", numer.name, denom.name));
    result.reset();

    match result.divide(numer, denom, w_num, w_den) {
        Ok(()) => {
            for bin in result.in_range_bins() {
                if denom.bin_content(bin) <= 0.0 {
                    result.set_bin_content(bin, 0.0);
                    result.set_bin_error(bin, 0.0);
                }
            }
        }
        Err(PlotError::ShapeMismatch { .. }) => {
            debug!(
                numer = %numer.name,
                denom = %denom.name,
                "binning differs, dividing by nearest bin center"
            );
            let mut numer = numer.clone();
            let mut denom = denom.clone();
            numer.scale(w_num);
            denom.scale(w_den);
            for bin in result.in_range_bins() {
                let val_den = denom.bin_content(bin);
                if val_den <= 0.0 {
                    continue;
                }
                let source = nearest_bin(&numer, &result, bin);
                let (value, error) = quotient(
                    numer.bin_content(source),
                    numer.bin_error(source),
                    val_den,
                    denom.bin_error(bin),
                );
                result.set_bin_content(bin, value);
                result.set_bin_error(bin, error);
            }
        }
        Err(err) => return Err(err),
    }
    Ok(result)
}

/// Bin-wise product on the binning of `left`, errors added in quadrature.
///
/// Differing binnings pair each bin of `left` with the nearest bin center
/// of `right`.
pub fn multiply(left: &Histogram, right: &Histogram) -> PlotResult<Histogram> {
    let mut result = left.clone();
    match result.multiply(right) {
        Ok(()) => Ok(result),
        Err(PlotError::ShapeMismatch { .. }) => {
            debug!(
                left = %left.name,
                right = %right.name,
                "binning differs, multiplying by nearest bin center"
            );
            for bin in result.in_range_bins() {
                let source = nearest_bin(right, left, bin);
                let a = left.bin_content(bin);
                let b = right.bin_content(source);
                let ea = left.bin_error(bin);
                let eb = right.bin_error(source);
                result.set_bin_content(bin, a * b);
                result.set_bin_error(bin, (ea * ea * b * b + eb * eb * a * a).sqrt());
            }
            Ok(result)
        }
        Err(err) => Err(err),
    }
}

/// Quotient `n / d` with relative errors added in quadrature.
fn quotient(n: f64, en: f64, d: f64, ed: f64) -> (f64, f64) {
    let value = n / d;
    let d2 = d * d;
    let error = ((en * en * d2 + ed * ed * n * n) / (d2 * d2)).sqrt();
    (value, error)
}

/// Bin of `target` whose center is closest to the center of `bin` in `reference`.
fn nearest_bin(target: &Histogram, reference: &Histogram, bin: usize) -> usize {
    let (ix, iy, iz) = reference.bin_xyz(bin);
    let center = |axis: Axis, index: usize| {
        if reference.is_active(axis) {
            reference.axis(axis).bin_center(index)
        } else {
            0.0
        }
    };
    let locate = |axis: Axis, value: f64| {
        if target.is_active(axis) {
            target.axis(axis).nearest_bin(value)
        } else {
            0
        }
    };
    target.bin(
        locate(Axis::X, center(Axis::X, ix)),
        locate(Axis::Y, center(Axis::Y, iy)),
        locate(Axis::Z, center(Axis::Z, iz)),
    )
}

fn require_dimension(hist: &Histogram, dimension: usize) -> PlotResult<()> {
    if hist.dimension() == dimension {
        Ok(())
    } else {
        Err(PlotError::InvalidData(format!(
            "`{}` is {}D, expected {dimension}D",
            hist.name,
            hist.dimension()
        )))
    }
}

/// Opens `path`, failing with [`PlotError::InputMissing`] when it is absent.
pub fn open_file(storage: &Rc<dyn Storage>, path: &str, mode: FileMode) -> PlotResult<DataFile> {
    DataFile::open(Rc::clone(storage), path, mode)
}

/// Copies histogram `name` out of `file`.
pub fn fetch(name: &str, file: &DataFile) -> PlotResult<Histogram> {
    file.histogram(name)
        .cloned()
        .ok_or_else(|| PlotError::missing(format!("object `{name}` in `{}`", file.path())))
}

/// Height of a block of `n_lines` text lines.
#[must_use]
pub fn height(n_lines: usize, spacing: f64, offset: f64) -> f64 {
    n_lines as f64 * spacing + offset
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{divide, divide_1d, fetch, height, multiply, normalize, open_file, try_normalize};
    use crate::core::{BinAxis, Histogram};
    use crate::error::PlotError;
    use crate::io::{FileMode, MemoryStorage, Storage};

    fn flat(name: &str, bins: usize, value: f64) -> Histogram {
        let mut hist = Histogram::new_1d(name, "", bins, 0.0, bins as f64).expect("hist");
        for bin in 1..=bins {
            hist.set_bin_content(bin, value);
            hist.set_bin_error(bin, value.sqrt());
        }
        hist
    }

    #[test]
    fn normalize_reaches_target_integral() {
        let mut hist = flat("h", 10, 4.0);
        let integral = try_normalize(&mut hist, 1.0, 0.0, 9.5).expect("normalize");
        assert!((integral - 40.0).abs() <= 1e-12);
        assert!((hist.integral() - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn normalize_skips_empty_range() {
        let mut hist = flat("h", 4, 0.0);
        let err = try_normalize(&mut hist, 1.0, 0.0, 3.5).expect_err("empty");
        assert!(matches!(err, PlotError::EmptyHistogram { .. }));
        assert_eq!(hist.integral(), 0.0);
    }

    #[test]
    fn normalize_without_range_uses_full_axis() {
        let mut hist = flat("h", 4, 2.0);
        hist.set_bin_content(5, 100.0);
        assert!(normalize(&mut hist, 2.0, None));
        assert!((hist.integral() - 2.0).abs() <= 1e-12);
        let mut empty = flat("e", 4, 0.0);
        assert!(!normalize(&mut empty, 1.0, None));
    }

    #[test]
    fn divide_matches_quadrature_errors() {
        let numer = flat("n", 5, 6.0);
        let denom = flat("d", 5, 2.0);
        let ratio = divide_1d(&numer, &denom, 1.0, 1.0).expect("divide");
        let expected_error =
            3.0 * ((6.0_f64.sqrt() / 6.0).powi(2) + (2.0_f64.sqrt() / 2.0).powi(2)).sqrt();
        for bin in 1..=5 {
            assert!((ratio.bin_content(bin) - 3.0).abs() <= 1e-12);
            assert!((ratio.bin_error(bin) - expected_error).abs() <= 1e-12);
        }
    }

    #[test]
    fn divide_leaves_holes_for_non_positive_denominators() {
        let numer = flat("n", 3, 6.0);
        let mut denom = flat("d", 3, 2.0);
        denom.set_bin_content(2, -1.0);
        let ratio = divide(&numer, &denom, 1.0, 1.0).expect("divide");
        assert_eq!(ratio.bin_content(2), 0.0);
        assert_eq!(ratio.bin_error(2), 0.0);
        assert!((ratio.bin_content(3) - 3.0).abs() <= 1e-12);
    }

    #[test]
    fn divide_falls_back_to_nearest_bin_center() {
        let mut numer = Histogram::from_axes(
            "n",
            "",
            vec![BinAxis::uniform(10, 0.0, 10.0).expect("axis")],
        );
        for bin in 1..=10 {
            numer.set_bin_content(bin, bin as f64);
        }
        let denom = flat("d", 5, 1.0);
        let ratio = divide(&numer, &denom, 1.0, 1.0).expect("divide");
        assert_eq!(ratio.axis(crate::core::Axis::X).n_bins(), 5);
        // denom bin 1 is centered at 0.5, which sits in numer bin 1
        assert!((ratio.bin_content(1) - 1.0).abs() <= 1e-12);
        assert!((ratio.bin_content(5) - 5.0).abs() <= 1e-12);
    }

    #[test]
    fn multiply_combines_relative_errors() {
        let a = flat("a", 3, 10.0);
        let b = flat("b", 3, 1.6);
        let product = multiply(&a, &b).expect("multiply");
        assert!((product.bin_content(2) - 16.0).abs() <= 1e-12);
    }

    #[test]
    fn fetch_reports_missing_object() {
        let storage = MemoryStorage::new();
        storage.insert_histograms("in.json", [flat("hA", 2, 1.0)]);
        let shared: Rc<dyn Storage> = Rc::new(storage);
        let file = open_file(&shared, "in.json", FileMode::Read).expect("open");
        assert!(fetch("hA", &file).is_ok());
        let err = fetch("hB", &file).expect_err("missing");
        assert!(matches!(err, PlotError::InputMissing { .. }));
    }

    #[test]
    fn height_is_linear_in_lines() {
        assert!((height(3, 0.05, 0.02) - 0.17).abs() <= 1e-12);
    }
}
