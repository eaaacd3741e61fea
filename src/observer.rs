//! # Estimation observers
//!
//! Optional instrumentation of [`crate::lin_pt_finder::crossing_pt::CrossingPtLinPtFinder`].
//! Every call hands an [`EstimationRecord`] (input tracks, selected pairs, their crossing
//! points, final outcome) to the observer the finder was built with, whether the call
//! succeeded or not. Pairs without a crossing point stay in the record as `None`, so the
//! fraction of dropped pairs can be monitored.
//!
//! Observers are purely observational: they cannot change the returned result, and a failing
//! sink is logged and otherwise ignored.
//!
//! - [`LogObserver`] – one `debug!` summary line per call,
//! - [`CsvObserver`] – one CSV row per selected pair, for offline analysis.

use std::io::Write;
use std::sync::Mutex;

use log::{debug, warn};
use serde::Serialize;

use crate::constants::GlobalPoint;
use crate::crossing::{PairCandidate, WeightedPoint};
use crate::linpt_errors::LinPtError;
use crate::trajectory::Trajectory;

/// Everything a crossing point finder saw and produced during one call.
///
/// `points[i]` is the crossing point of `pairs[i]`, `None` if the pair was dropped. Both are
/// empty when the call was rejected before any pair was selected.
#[derive(Debug, Clone, Copy)]
pub struct EstimationRecord<'a> {
    pub tracks: &'a [Trajectory],
    pub pairs: &'a [PairCandidate],
    pub points: &'a [Option<WeightedPoint>],
    pub estimate: Result<GlobalPoint, &'a LinPtError>,
}

impl EstimationRecord<'_> {
    /// Number of selected pairs without a crossing point.
    pub fn dropped(&self) -> usize {
        self.points.iter().filter(|p| p.is_none()).count()
    }
}

pub trait EstimationObserver: Send + Sync {
    fn on_estimate(&self, record: &EstimationRecord<'_>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl EstimationObserver for LogObserver {
    fn on_estimate(&self, record: &EstimationRecord<'_>) {
        match record.estimate {
            Ok(estimate) => debug!(
                "Linearization point ({:.6}, {:.6}, {:.6}) from {} of {} selected pairs, {} tracks",
                estimate.x,
                estimate.y,
                estimate.z,
                record.pairs.len() - record.dropped(),
                record.pairs.len(),
                record.tracks.len()
            ),
            Err(err) => debug!(
                "No linearization point from {} selected pairs ({} dropped), {} tracks: {err}",
                record.pairs.len(),
                record.dropped(),
                record.tracks.len()
            ),
        }
    }
}

/// One CSV row: a selected pair of an estimation call.
///
/// The point columns are empty for a dropped pair, the estimate columns are empty and `error`
/// is set when the call failed.
#[derive(Debug, Serialize)]
struct CrossingRow<'a> {
    call: u64,
    n_tracks: usize,
    first: usize,
    second: usize,
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    weight: Option<f64>,
    estimate_x: Option<f64>,
    estimate_y: Option<f64>,
    estimate_z: Option<f64>,
    error: Option<&'a str>,
}

struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    next_call: u64,
}

/// Writes every selected pair of every call as a CSV row (with header) into `W`.
///
/// Rows of one call share the same `call` number, counted from 0 in the order the calls reach
/// the sink, and are written contiguously. A call rejected before pair selection writes no row
/// but still takes a number.
pub struct CsvObserver<W: Write + Send> {
    sink: Mutex<CsvSink<W>>,
}

impl<W: Write + Send> CsvObserver<W> {
    pub fn new(sink: W) -> Self {
        CsvObserver {
            sink: Mutex::new(CsvSink {
                writer: csv::Writer::from_writer(sink),
                next_call: 0,
            }),
        }
    }

    fn write_record(&self, record: &EstimationRecord<'_>) -> Result<(), LinPtError> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| LinPtError::IoError(std::io::Error::other("CSV writer lock poisoned")))?;
        let call = sink.next_call;
        sink.next_call += 1;

        let (estimate, error) = match record.estimate {
            Ok(p) => (Some(p), None),
            Err(err) => (None, Some(err.to_string())),
        };
        for (pair, wp) in record.pairs.iter().zip(record.points) {
            sink.writer.serialize(CrossingRow {
                call,
                n_tracks: record.tracks.len(),
                first: pair.first(),
                second: pair.second(),
                x: wp.map(|wp| wp.point.x),
                y: wp.map(|wp| wp.point.y),
                z: wp.map(|wp| wp.point.z),
                weight: wp.map(|wp| wp.weight),
                estimate_x: estimate.map(|p| p.x),
                estimate_y: estimate.map(|p| p.y),
                estimate_z: estimate.map(|p| p.z),
                error: error.as_deref(),
            })?;
        }
        sink.writer.flush()?;
        Ok(())
    }

    /// Flush and give back the underlying sink.
    pub fn into_inner(self) -> Result<W, LinPtError> {
        let sink = self
            .sink
            .into_inner()
            .map_err(|_| LinPtError::IoError(std::io::Error::other("CSV writer lock poisoned")))?;
        sink.writer.into_inner().map_err(|e| {
            LinPtError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

impl<W: Write + Send> EstimationObserver for CsvObserver<W> {
    fn on_estimate(&self, record: &EstimationRecord<'_>) {
        if let Err(err) = self.write_record(record) {
            warn!("Unable to persist estimation record: {err}");
        }
    }
}
