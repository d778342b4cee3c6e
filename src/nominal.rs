//! Nominal and ordinal categories on a labelled coordinate grid.
//!
//! Category `i` of an axis (0-indexed) sits at the tick `i + 1`.
//! Annotations are placed at their literal coordinates, independently
//! of the ticks.

use tracing::debug;
use crate::{Axes, Error, Figure};

/// A tick position with its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Text placed at free-floating data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub xy: (f64, f64),
    pub text: String,
}

impl Annotation {
    pub fn new(xy: (f64, f64), text: impl Into<String>) -> Self {
        Annotation { xy, text: text.into() }
    }
}

/// Indicator of increasing order: a diagonal from the origin to
/// (`extent`, `extent`) and a small arrow pointing up and right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    pub extent: f64,
    pub arrow_from: (f64, f64),
    pub arrow_delta: (f64, f64),
    pub arrow_width: f64,
}

impl Direction {
    fn new(extent: usize) -> Self {
        Direction { extent: extent as f64,
                    arrow_from: (0.5, 0.5),
                    arrow_delta: (0.1, 0.1),
                    arrow_width: 0.05 }
    }

    /// End points (xs, ys) of the diagonal, or `None` if it has zero
    /// length.
    pub fn line(&self) -> Option<([f64; 2], [f64; 2])> {
        if self.extent > 0. {
            Some(([0., self.extent], [0., self.extent]))
        } else {
            None
        }
    }
}

/// Options for [`plot_nominal`].
#[derive(Debug, Clone, PartialEq)]
pub struct NominalPlotOptions {
    fig_size: (f64, f64),
    tick_size: f64,
    annotations: Vec<Annotation>,
    show_direction: bool,
}

impl Default for NominalPlotOptions {
    fn default() -> Self {
        NominalPlotOptions { fig_size: (10., 10.),
                             tick_size: 10.,
                             annotations: vec![],
                             show_direction: true }
    }
}

impl NominalPlotOptions {
    /// Width and height of the figure, in inches.
    #[must_use]
    pub fn fig_size(mut self, width: f64, height: f64) -> Self {
        self.fig_size = (width, height);
        self
    }

    /// Font size of the tick labels and of the annotations.
    #[must_use]
    pub fn tick_size(mut self, size: f64) -> Self {
        self.tick_size = size;
        self
    }

    /// Add the annotation `text` at (`x`, `y`).
    #[must_use]
    pub fn annotate(mut self, xy: (f64, f64), text: impl Into<String>) -> Self {
        self.annotations.push(Annotation::new(xy, text));
        self
    }

    #[must_use]
    pub fn annotations<I>(mut self, annots: I) -> Self
    where I: IntoIterator<Item = Annotation> {
        self.annotations.extend(annots);
        self
    }

    #[must_use]
    pub fn show_direction(mut self, show: bool) -> Self {
        self.show_direction = show;
        self
    }
}

fn ticks<S: AsRef<str>>(labels: &[S]) -> Vec<Tick> {
    labels.iter().enumerate()
        .map(|(i, l)| Tick { position: (i + 1) as f64,
                             label: l.as_ref().to_string() })
        .collect()
}

/// Everything drawn by [`plot_nominal`].
#[derive(Debug, Clone, PartialEq)]
pub struct NominalGrid {
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    annotations: Vec<Annotation>,
    direction: Option<Direction>,
}

impl NominalGrid {
    pub fn new<X, Y>(
        x_labels: &[X], y_labels: &[Y], options: &NominalPlotOptions,
    ) -> Self
    where X: AsRef<str>, Y: AsRef<str> {
        let direction = options.show_direction
            .then(|| Direction::new(x_labels.len().max(y_labels.len())));
        NominalGrid { x_ticks: ticks(x_labels),
                      y_ticks: ticks(y_labels),
                      annotations: options.annotations.clone(),
                      direction }
    }

    pub fn x_ticks(&self) -> &[Tick] { &self.x_ticks }

    pub fn y_ticks(&self) -> &[Tick] { &self.y_ticks }

    pub fn annotations(&self) -> &[Annotation] { &self.annotations }

    pub fn direction(&self) -> Option<&Direction> { self.direction.as_ref() }

    /// Draw the grid on a new figure.  Nothing is validated here;
    /// errors come from Matplotlib.
    pub fn figure(&self, options: &NominalPlotOptions) -> Result<Figure, Error> {
        let (fig, mut ax) = Figure::new(options.fig_size)?;
        self.draw(&mut ax, options.tick_size)?;
        debug!(x_ticks = self.x_ticks.len(), y_ticks = self.y_ticks.len(),
               annotations = self.annotations.len(), "plotted nominal grid");
        Ok(fig)
    }

    fn draw(&self, ax: &mut Axes, tick_size: f64) -> Result<(), Error> {
        ax.set_spine_visible("top", false)?
            .set_spine_visible("right", false)?;
        if let Some(d) = &self.direction {
            if let Some((xs, ys)) = d.line() {
                ax.xy(&xs, &ys).fmt("r").plot()?;
            }
            ax.arrow(d.arrow_from, d.arrow_delta, d.arrow_width, "r")?;
        }
        let (pos, labels): (Vec<f64>, Vec<&str>) = self.x_ticks.iter()
            .map(|t| (t.position, t.label.as_str())).unzip();
        ax.set_xticks(&pos)?.set_xticklabels(&labels, tick_size)?;
        let (pos, labels): (Vec<f64>, Vec<&str>) = self.y_ticks.iter()
            .map(|t| (t.position, t.label.as_str())).unzip();
        ax.set_yticks(&pos)?.set_yticklabels(&labels, tick_size)?;
        for a in &self.annotations {
            ax.annotate(&a.text, a.xy, tick_size)?;
        }
        Ok(())
    }
}

/// Plot the categories `x_labels` and `y_labels` at ticks 1, 2,...
/// of their axis, with the annotations and direction indicator of
/// `options`.
///
/// # Example
///
/// ```no_run
/// use statplot::{plot_nominal, NominalPlotOptions};
/// let opts = NominalPlotOptions::default().annotate((1., 1.), "P1");
/// let fig = plot_nominal(&["low", "mid", "high"], &["a", "b"], &opts)?;
/// fig.save().to_file("target/nominal.pdf")?;
/// # Ok::<(), statplot::Error>(())
/// ```
pub fn plot_nominal<X, Y>(
    x_labels: &[X], y_labels: &[Y], options: &NominalPlotOptions,
) -> Result<Figure, Error>
where X: AsRef<str>, Y: AsRef<str> {
    NominalGrid::new(x_labels, y_labels, options).figure(options)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::tests::{
        annotations_of, attr_len, floats_of, lines_of, spine_visible, texts_of,
    };

    const NONE: [&str; 0] = [];

    fn positions(ticks: &[Tick]) -> Vec<f64> {
        ticks.iter().map(|t| t.position).collect()
    }

    fn labels(ticks: &[Tick]) -> Vec<&str> {
        ticks.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn ticks_follow_label_order() {
        let g = NominalGrid::new(&["low", "mid", "high"], &["a", "b"],
                                 &NominalPlotOptions::default());
        assert_eq!(positions(g.x_ticks()), vec![1., 2., 3.]);
        assert_eq!(labels(g.x_ticks()), vec!["low", "mid", "high"]);
        assert_eq!(positions(g.y_ticks()), vec![1., 2.]);
        assert_eq!(labels(g.y_ticks()), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_labels_kept() {
        let g = NominalGrid::new(&["x", "x"], &NONE,
                                 &NominalPlotOptions::default());
        assert_eq!(labels(g.x_ticks()), vec!["x", "x"]);
    }

    #[test]
    fn annotation_at_literal_coordinates() {
        let opts = NominalPlotOptions::default().annotate((1., 1.), "P1");
        let g = NominalGrid::new(&["u"], &["v"], &opts);
        assert_eq!(g.annotations(), &[Annotation::new((1., 1.), "P1")]);
    }

    #[test]
    fn overlapping_annotations_allowed() {
        let opts = NominalPlotOptions::default()
            .annotations([Annotation::new((0.3, 2.7), "A"),
                          Annotation::new((0.3, 2.7), "A")]);
        let g = NominalGrid::new(&NONE, &NONE, &opts);
        assert_eq!(g.annotations().len(), 2);
    }

    #[test]
    fn default_annotations_are_fresh() {
        let _ = NominalPlotOptions::default().annotate((1., 1.), "P1");
        assert!(NominalPlotOptions::default().annotations.is_empty());
    }

    #[test]
    fn direction_spans_longest_axis() {
        let g = NominalGrid::new(&["a", "b", "c"], &["d"],
                                 &NominalPlotOptions::default());
        let d = g.direction().unwrap();
        assert_eq!(d.line(), Some(([0., 3.], [0., 3.])));
        assert_eq!(d.arrow_from, (0.5, 0.5));
        assert_eq!(d.arrow_delta, (0.1, 0.1));
    }

    #[test]
    fn direction_degenerates_when_empty() {
        let g = NominalGrid::new(&NONE, &NONE, &NominalPlotOptions::default());
        assert_eq!(g.direction().unwrap().line(), None);
        assert!(g.x_ticks().is_empty() && g.y_ticks().is_empty());
    }

    #[test]
    fn direction_hidden() {
        let opts = NominalPlotOptions::default().show_direction(false);
        assert!(NominalGrid::new(&["a"], &["b"], &opts).direction().is_none());
    }

    #[test]
    fn grid_is_reproducible() {
        let opts = NominalPlotOptions::default().annotate((2., 0.5), "q");
        assert_eq!(NominalGrid::new(&["a", "b"], &["c"], &opts),
                   NominalGrid::new(&["a", "b"], &["c"], &opts));
    }

    #[test]
    fn a_nominal_pdf() -> Result<(), Error> {
        let opts = NominalPlotOptions::default()
            .tick_size(12.)
            .annotate((1., 1.), "P1")
            .annotate((2.5, 1.5), "P2");
        let fig = plot_nominal(&["low", "mid", "high"], &["a", "b"], &opts)?;
        fig.save().to_file("target/nominal.pdf")?;
        Ok(())
    }

    #[test]
    fn drawn_grid() -> Result<(), Error> {
        let opts = NominalPlotOptions::default().annotate((1., 1.), "P1");
        let g = NominalGrid::new(&["low", "mid", "high"], &["a", "b"], &opts);
        let (_fig, mut ax) = Figure::new((5., 5.))?;
        g.draw(&mut ax, 10.)?;
        assert_eq!(floats_of(&ax, "get_xticks")?, vec![1., 2., 3.]);
        assert_eq!(floats_of(&ax, "get_yticks")?, vec![1., 2.]);
        assert_eq!(texts_of(&ax, "get_xticklabels")?, vec!["low", "mid", "high"]);
        assert_eq!(texts_of(&ax, "get_yticklabels")?, vec!["a", "b"]);
        assert_eq!(annotations_of(&ax)?, vec![("P1".to_string(), (1., 1.))]);
        assert_eq!(lines_of(&ax)?.len(), 1);
        assert!(!spine_visible(&ax, "top")?);
        assert!(!spine_visible(&ax, "right")?);
        assert!(spine_visible(&ax, "left")?);
        Ok(())
    }

    #[test]
    fn drawn_empty_grid() -> Result<(), Error> {
        let g = NominalGrid::new(&NONE, &NONE, &NominalPlotOptions::default());
        let (fig, mut ax) = Figure::new((5., 5.))?;
        g.draw(&mut ax, 10.)?;
        assert!(floats_of(&ax, "get_xticks")?.is_empty());
        assert!(lines_of(&ax)?.is_empty());
        // The arrow is kept even though the diagonal is not.
        assert_eq!(attr_len(&ax, "patches")?, 1);
        fig.save().to_file("target/nominal_empty.pdf")?;
        Ok(())
    }
}
