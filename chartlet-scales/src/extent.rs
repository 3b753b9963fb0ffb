use chartlet_common::accessor::Accessor;
use chartlet_common::record::Dataset;
use log::debug;

use crate::domain::Domain;

/// Minimum and maximum of the values `accessor` reads from `dataset`.
///
/// Records whose value is null or cannot be read are skipped. Returns `None`
/// when nothing remains.
pub fn extent<T, A>(dataset: &Dataset, accessor: &A) -> Option<Domain<T>>
where
    T: PartialOrd + Copy,
    A: Accessor<T> + ?Sized,
{
    let mut bounds: Option<(T, T)> = None;
    let mut skipped = 0usize;

    for record in dataset {
        let value = match accessor.access(record) {
            Ok(Some(value)) => value,
            Ok(None) => {
                skipped += 1;
                continue;
            }
            Err(err) => {
                debug!("extent: skipping record: {err}");
                skipped += 1;
                continue;
            }
        };

        bounds = Some(match bounds {
            None => (value, value),
            Some((min, max)) => (
                if value < min { value } else { min },
                if value > max { value } else { max },
            ),
        });
    }

    if skipped > 0 {
        debug!("extent: skipped {skipped} of {} records", dataset.len());
    }
    bounds.map(|(min, max)| Domain { min, max })
}
