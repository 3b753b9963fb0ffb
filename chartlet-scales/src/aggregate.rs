use chartlet_common::accessor::Accessor;
use chartlet_common::record::Dataset;
use log::warn;

use crate::bin::Bin;
use crate::error::ChartletScaleError;

/// Arithmetic mean of the non-null values `accessor` reads.
///
/// Accumulated as a running mean so that large finite values don't overflow
/// an intermediate sum.
pub fn mean<A>(dataset: &Dataset, accessor: &A) -> Result<f64, ChartletScaleError>
where
    A: Accessor<f64> + ?Sized,
{
    let mut mean = 0.0;
    let mut n = 0usize;
    for record in dataset {
        if let Some(value) = accessor.access(record)? {
            n += 1;
            let n = n as f64;
            mean += value / n - mean / n;
        }
    }

    if n == 0 {
        return Err(ChartletScaleError::EmptyInput);
    }
    if !mean.is_finite() {
        return Err(ChartletScaleError::NonFiniteValue(mean));
    }
    Ok(mean)
}

/// Largest key produced by `f`, ignoring `None` and unordered (NaN) keys
pub fn max<I, T, F>(items: I, f: F) -> Option<T>
where
    I: IntoIterator,
    T: PartialOrd,
    F: FnMut(I::Item) -> Option<T>,
{
    items
        .into_iter()
        .filter_map(f)
        .filter(|v| v.partial_cmp(v).is_some())
        .fold(None, |acc, v| match acc {
            Some(best) if best >= v => Some(best),
            _ => Some(v),
        })
}

/// Smallest key produced by `f`, ignoring `None` and unordered (NaN) keys
pub fn min<I, T, F>(items: I, f: F) -> Option<T>
where
    I: IntoIterator,
    T: PartialOrd,
    F: FnMut(I::Item) -> Option<T>,
{
    items
        .into_iter()
        .filter_map(f)
        .filter(|v| v.partial_cmp(v).is_some())
        .fold(None, |acc, v| match acc {
            Some(best) if best <= v => Some(best),
            _ => Some(v),
        })
}

/// Member count of the fullest bin, 0 when there are no members at all
pub fn max_bin_len(bins: &[Bin]) -> usize {
    let len = max(bins, |b| Some(b.len())).unwrap_or(0);
    if len == 0 && !bins.is_empty() {
        warn!("all {} bins are empty", bins.len());
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlet_common::accessor::number;
    use chartlet_common::record;
    use chartlet_common::value::Value;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_mean() {
        let ds: Dataset = [10.0, 20.0, 30.0]
            .into_iter()
            .map(|h| record! {"h" => h})
            .collect();
        assert_approx_eq!(f64, mean(&ds, &number("h")).unwrap(), 20.0);
    }

    #[test]
    fn test_mean_ignores_nulls() {
        let ds = Dataset::from_records(vec![
            record! {"h" => 4.0},
            record! {"h" => Value::Null},
            record! {"h" => 8.0},
        ]);
        assert_approx_eq!(f64, mean(&ds, &number("h")).unwrap(), 6.0);
    }

    #[test]
    fn test_mean_near_max() {
        let ds: Dataset = [1e308, 1e308, -1e308, 1e308]
            .into_iter()
            .map(|h| record! {"h" => h})
            .collect();
        assert_approx_eq!(f64, mean(&ds, &number("h")).unwrap(), 5e307, epsilon = 1e293);

        let ds: Dataset = [f64::MAX, f64::MAX]
            .into_iter()
            .map(|h| record! {"h" => h})
            .collect();
        assert_eq!(mean(&ds, &number("h")), Ok(f64::MAX));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(
            mean(&Dataset::default(), &number("h")),
            Err(ChartletScaleError::EmptyInput)
        );
        let all_null = Dataset::from_records(vec![record! {"h" => Value::Null}]);
        assert_eq!(
            mean(&all_null, &number("h")),
            Err(ChartletScaleError::EmptyInput)
        );
    }

    #[test]
    fn test_max_min() {
        let values = [3.0, f64::NAN, 9.0, -2.0];
        assert_eq!(max(values, Some), Some(9.0));
        assert_eq!(min(values, Some), Some(-2.0));
        assert_eq!(max(Vec::<f64>::new(), Some), None);
        assert_eq!(max(["a", "bbb", "cc"], |s| Some(s.len())), Some(3));
    }

    #[test]
    fn test_max_bin_len() {
        assert_eq!(max_bin_len(&[]), 0);

        let r = record! {"h" => 1.0};
        let bins = vec![
            Bin { x0: 0.0, x1: 1.0, members: vec![&r, &r] },
            Bin { x0: 1.0, x1: 2.0, members: vec![] },
            Bin { x0: 2.0, x1: 3.0, members: vec![&r] },
        ];
        assert_eq!(max_bin_len(&bins), 2);

        let empty = vec![Bin { x0: 0.0, x1: 1.0, members: vec![] }];
        assert_eq!(max_bin_len(&empty), 0);
    }
}
