//! Progress reporting hooks.
//!
//! The engine calls a [`Progress`] observer at fixed points: once per sampled
//! pair while estimating epsilon, once with the full distance sample, once per
//! visited document and once per formed cluster. Nothing in the core writes to
//! the console directly.

use std::fmt::Write as _;
use std::io::{self, Stdout, Write};

/// Observer of a clustering run. All hooks default to no-ops.
pub trait Progress {
    /// `done` of `total` epsilon sample pairs computed.
    fn on_sample(&mut self, _done: usize, _total: usize) {}

    /// The complete epsilon distance sample.
    fn on_samples(&mut self, _samples: &[f32]) {}

    /// `done` of `total` documents visited by the clustering pass.
    fn on_document(&mut self, _done: usize, _total: usize) {}

    /// Cluster `cluster` was created with `size` reported members.
    fn on_cluster(&mut self, _cluster: usize, _size: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {}

/// Render a `[ ====      ] 42.00%` bar.
pub fn render_bar(fraction: f64, width: usize) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (width as f64 * fraction) as usize;
    let mut bar = String::with_capacity(width + 16);
    bar.push_str("[ ");
    for i in 0..width {
        bar.push(if i < filled { '=' } else { ' ' });
    }
    let _ = write!(bar, " ] {:.2}%", fraction * 100.0);
    bar
}

/// Equal-width histogram of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f32>,
    /// Sample count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins spanning the sample range.
    ///
    /// Returns `None` for an empty sample or zero bins. A degenerate range
    /// (all samples equal) is widened to `[v - 0.5, v + 0.5]`.
    pub fn from_samples(samples: &[f32], bins: usize) -> Option<Self> {
        if samples.is_empty() || bins == 0 {
            return None;
        }

        let (mut lo, mut hi) = samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f32;
        let edges: Vec<f32> = (0..=bins).map(|i| lo + width * i as f32).collect();
        let mut counts = vec![0usize; bins];
        for &x in samples {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Total number of binned samples.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Text rendering, one row per bin, bars scaled to `bar_width`.
    pub fn render(&self, bar_width: usize) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        for (i, &count) in self.counts.iter().enumerate() {
            let len = count * bar_width / peak;
            let _ = writeln!(
                out,
                "[{:>10.4}, {:>10.4}) {:>6} {}",
                self.edges[i],
                self.edges[i + 1],
                count,
                "#".repeat(len)
            );
        }
        out
    }
}

/// Draws progress bars, cluster notices and the epsilon histogram.
#[derive(Debug)]
pub struct ConsoleProgress<W: Write = Stdout> {
    out: W,
    width: usize,
    bins: usize,
}

impl ConsoleProgress<Stdout> {
    /// Console observer writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleProgress<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// Console observer writing to `out`, with a 50-cell bar and 20 histogram bins.
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: 50,
            bins: 20,
        }
    }

    /// Set the bar width in cells.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the number of histogram bins.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar(&mut self, done: usize, total: usize) {
        let fraction = if total == 0 {
            1.0
        } else {
            done as f64 / total as f64
        };
        let _ = write!(self.out, "\r{}", render_bar(fraction, self.width));
        let _ = self.out.flush();
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn on_sample(&mut self, done: usize, total: usize) {
        self.bar(done, total);
    }

    fn on_samples(&mut self, samples: &[f32]) {
        if let Some(hist) = Histogram::from_samples(samples, self.bins) {
            let _ = write!(self.out, "\n{}", hist.render(self.width));
        }
    }

    fn on_document(&mut self, done: usize, total: usize) {
        self.bar(done, total);
    }

    fn on_cluster(&mut self, cluster: usize, size: usize) {
        let _ = writeln!(
            self.out,
            "\n ---- cluster_{cluster} assigned to {size} points! ----"
        );
    }
}
