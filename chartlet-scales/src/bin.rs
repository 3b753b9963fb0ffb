use chartlet_common::accessor::Accessor;
use chartlet_common::record::{DataRecord, Dataset};
use log::debug;
use serde::Serialize;

use crate::domain::Domain;
use crate::error::ChartletScaleError;

/// One histogram interval and the records that fell into it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin<'a> {
    pub x0: f64,
    pub x1: f64,
    pub members: Vec<&'a DataRecord>,
}

impl Bin<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
}

/// `count + 1` equally spaced edges over `domain`, the last one exactly `max`
pub fn bin_edges(domain: Domain<f64>, count: usize) -> Result<Vec<f64>, ChartletScaleError> {
    if count == 0 {
        return Err(ChartletScaleError::InvalidBinCount(count));
    }
    domain.validate_finite()?;
    if domain.min > domain.max {
        return Err(ChartletScaleError::InvertedDomain(domain.min, domain.max));
    }
    if domain.is_degenerate() {
        return Err(ChartletScaleError::DegenerateDomain(domain.min));
    }

    let width = domain.width() / count as f64;
    let mut edges: Vec<f64> = (0..count).map(|i| domain.min + i as f64 * width).collect();
    edges.push(domain.max);
    Ok(edges)
}

/// Groups the records of `dataset` into `count` equal-width bins over `domain`.
///
/// Bins are closed on the left and open on the right, except the last which
/// also holds `domain.max`. Null values and values outside the domain are
/// left out. An accessor error aborts binning.
pub fn bin<'a, A>(
    dataset: &'a Dataset,
    accessor: &A,
    domain: Domain<f64>,
    count: usize,
) -> Result<Vec<Bin<'a>>, ChartletScaleError>
where
    A: Accessor<f64> + ?Sized,
{
    let edges = bin_edges(domain, count)?;
    let mut bins: Vec<Bin<'a>> = edges
        .windows(2)
        .map(|w| Bin {
            x0: w[0],
            x1: w[1],
            members: Vec::new(),
        })
        .collect();

    let mut excluded = 0usize;
    for record in dataset {
        let Some(value) = accessor.access(record)? else {
            excluded += 1;
            continue;
        };
        if !domain.contains(value) {
            excluded += 1;
            continue;
        }
        bins[bin_index(&edges, value)].members.push(record);
    }

    if excluded > 0 {
        debug!("bin: {excluded} null or out-of-domain records excluded");
    }
    Ok(bins)
}

// Index of the last edge <= value among the first `count` edges. `value` is
// known to lie inside [edges[0], edges[count]].
fn bin_index(edges: &[f64], value: f64) -> usize {
    let count = edges.len() - 1;
    edges[..count]
        .partition_point(|edge| *edge <= value)
        .saturating_sub(1)
}

/// Builder form of [`bin`]
pub struct Binner<A> {
    accessor: A,
    domain: Option<Domain<f64>>,
    thresholds: usize,
}

impl<A: Accessor<f64>> Binner<A> {
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            domain: None,
            thresholds: 10,
        }
    }

    pub fn domain(mut self, domain: impl Into<Domain<f64>>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Number of bins to produce
    pub fn thresholds(mut self, count: usize) -> Self {
        self.thresholds = count;
        self
    }

    /// Bins `dataset`. Without an explicit domain the extent of the data is used.
    pub fn bin<'a>(&self, dataset: &'a Dataset) -> Result<Vec<Bin<'a>>, ChartletScaleError> {
        let domain = match self.domain {
            Some(domain) => domain,
            None => crate::extent::extent(dataset, &self.accessor)
                .ok_or(ChartletScaleError::EmptyDomain)?,
        };
        bin(dataset, &self.accessor, domain, self.thresholds)
    }
}
