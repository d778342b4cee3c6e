//! Bayesian updating of a Beta distribution.
//!
//! A Beta prior combined with Beta-shaped evidence yields a Beta
//! posterior whose shape parameters are the sums of the two (conjugate
//! update).  [`BetaPosterior`] computes the three densities on a fixed
//! grid of `[0, 1]`; [`BetaPosterior::figure`] draws them on one axes.

use ndarray::Array1;
use statrs::distribution::{Beta, Continuous};
use tracing::debug;
use crate::{Axes, Error, Figure};

/// Shape parameters (a, b) of a Beta distribution.  Both are finite
/// and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaShape {
    a: f64,
    b: f64,
}

impl BetaShape {
    /// Return the shape (`a`, `b`) or [`Error::InvalidParameter`] if
    /// one of them is not a finite positive number.
    pub fn new(a: f64, b: f64) -> Result<Self, Error> {
        for (name, v) in [("a", a), ("b", b)] {
            if !(v.is_finite() && v > 0.) {
                return Err(Error::InvalidParameter(format!(
                    "Beta shape parameter {name} must be finite and \
                     positive, got {v}")))
            }
        }
        Ok(BetaShape { a, b })
    }

    pub fn a(&self) -> f64 { self.a }

    pub fn b(&self) -> f64 { self.b }

    /// Posterior shape after observing `observation`: the parameters
    /// add up.
    pub fn update(&self, observation: &BetaShape) -> Result<BetaShape, Error> {
        BetaShape::new(self.a + observation.a, self.b + observation.b)
    }

    pub fn mean(&self) -> f64 {
        self.a / (self.a + self.b)
    }

    fn distribution(&self) -> Result<Beta, Error> {
        Beta::new(self.a, self.b)
            .map_err(|e| Error::InvalidParameter(e.to_string()))
    }

    /// Density of `beta` at `x`.  For very small shapes `statrs`
    /// yields NaN at an endpoint where the density diverges; report it
    /// as infinite instead.
    fn density(beta: &Beta, x: f64) -> f64 {
        let d = beta.pdf(x);
        if d.is_nan() && (x == 0. || x == 1.) { f64::INFINITY } else { d }
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> Result<f64, Error> {
        Ok(Self::density(&self.distribution()?, x))
    }

    /// Probability density at each point of `x`.
    ///
    /// Accuracy is that of `statrs`: for huge shapes (around 1e20) the
    /// density underflows to 0 everywhere.
    pub fn densities(&self, x: &Array1<f64>) -> Result<Array1<f64>, Error> {
        let beta = self.distribution()?;
        Ok(x.mapv(|x| Self::density(&beta, x)))
    }
}

impl TryFrom<(f64, f64)> for BetaShape {
    type Error = Error;

    fn try_from((a, b): (f64, f64)) -> Result<Self, Error> {
        BetaShape::new(a, b)
    }
}

/// `n` evenly spaced points from 0 to 1, both included (a single
/// point is 0).
pub fn linspace(n: usize) -> Result<Array1<f64>, Error> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "the resolution must be at least 1".to_string()))
    }
    Ok(Array1::linspace(0., 1., n))
}

/// One density drawn by [`BetaPosterior::figure`].
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: &'static str,
    /// Matplotlib line style.
    pub linestyle: &'static str,
    /// Matplotlib color.
    pub color: &'static str,
    pub shape: BetaShape,
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

/// Options for [`plot_bayes_beta`].
#[derive(Debug, Clone, PartialEq)]
pub struct BetaPlotOptions {
    fig_size: (f64, f64),
    resolution: usize,
    title: Option<String>,
}

impl Default for BetaPlotOptions {
    fn default() -> Self {
        BetaPlotOptions { fig_size: (10., 10.), resolution: 100, title: None }
    }
}

impl BetaPlotOptions {
    /// Width and height of the figure, in inches.
    #[must_use]
    pub fn fig_size(mut self, width: f64, height: f64) -> Self {
        self.fig_size = (width, height);
        self
    }

    /// Number of points at which the densities are evaluated.
    #[must_use]
    pub fn resolution(mut self, n: usize) -> Self {
        self.resolution = n;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Prior, observation ("likelihood") and the resulting posterior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaPosterior {
    prior: BetaShape,
    observation: BetaShape,
    posterior: BetaShape,
}

impl BetaPosterior {
    pub fn new(
        prior: BetaShape, observation: BetaShape
    ) -> Result<Self, Error> {
        let posterior = prior.update(&observation)?;
        Ok(BetaPosterior { prior, observation, posterior })
    }

    pub fn prior(&self) -> BetaShape { self.prior }

    pub fn observation(&self) -> BetaShape { self.observation }

    pub fn posterior(&self) -> BetaShape { self.posterior }

    /// The prior (dotted green), likelihood (solid blue) and posterior
    /// (dashed red) densities sampled at `resolution` points of [0, 1].
    pub fn curves(&self, resolution: usize) -> Result<Vec<Curve>, Error> {
        let x = linspace(resolution)?;
        [("prior", ":", "g", self.prior),
         ("likelihood", "-", "b", self.observation),
         ("posterior", "--", "r", self.posterior)]
            .into_iter()
            .map(|(label, linestyle, color, shape)| -> Result<Curve, Error> {
                Ok(Curve { label, linestyle, color, shape,
                           y: shape.densities(&x)?,
                           x: x.clone() })
            })
            .collect()
    }

    /// Draw the three densities on a single axes with a legend.
    pub fn figure(&self, options: &BetaPlotOptions) -> Result<Figure, Error> {
        // Evaluate first: invalid settings must not leave a figure behind.
        let curves = self.curves(options.resolution)?;
        let (fig, mut ax) = Figure::new(options.fig_size)?;
        self.draw(&mut ax, &curves, options)?;
        debug!(prior = ?self.prior, observation = ?self.observation,
               posterior = ?self.posterior, "plotted Beta update");
        Ok(fig)
    }

    fn draw(
        &self, ax: &mut Axes, curves: &[Curve], options: &BetaPlotOptions,
    ) -> Result<(), Error> {
        for c in curves {
            ax.xy(&c.x, &c.y)
                .label(c.label)
                .linestyle(c.linestyle)
                .color(c.color)
                .plot()?;
        }
        ax.set_xlabel("x")?.set_ylabel("pdf")?;
        if let Some(title) = &options.title {
            ax.set_title(title)?;
        }
        ax.legend()?;
        Ok(())
    }
}

/// Plot the prior Beta(`prior`), the likelihood Beta(`observation`)
/// and the posterior Beta(`prior + observation`) densities.
///
/// # Example
///
/// ```no_run
/// use statplot::{plot_bayes_beta, BetaPlotOptions};
/// let opts = BetaPlotOptions::default().fig_size(8., 6.);
/// plot_bayes_beta((2., 2.), (3., 5.), &opts)?.show()?;
/// # Ok::<(), statplot::Error>(())
/// ```
pub fn plot_bayes_beta(
    prior: (f64, f64), observation: (f64, f64), options: &BetaPlotOptions,
) -> Result<Figure, Error> {
    let update = BetaPosterior::new(prior.try_into()?, observation.try_into()?)?;
    update.figure(options)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::tests::{legend_of, lines_of, str_of};

    fn shape(a: f64, b: f64) -> BetaShape {
        BetaShape::new(a, b).unwrap()
    }

    #[test]
    fn posterior_adds_shapes() {
        let u = BetaPosterior::new(shape(2., 2.), shape(3., 5.)).unwrap();
        assert_eq!(u.posterior(), shape(5., 7.));
        assert_eq!(u.prior(), shape(2., 2.));
        assert_eq!(u.observation(), shape(3., 5.));
    }

    #[test]
    fn rejects_invalid_shapes() {
        for (a, b) in [(0., 1.), (1., 0.), (-2., 3.), (f64::NAN, 1.),
                       (1., f64::INFINITY), (f64::NEG_INFINITY, 2.)] {
            assert!(matches!(BetaShape::new(a, b),
                             Err(Error::InvalidParameter(_))),
                    "accepted ({a}, {b})");
        }
    }

    #[test]
    fn update_overflow_is_invalid() {
        let big = shape(f64::MAX, 1.);
        assert!(matches!(big.update(&big), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn known_densities() {
        assert!((shape(1., 1.).pdf(0.3).unwrap() - 1.).abs() < 1e-9);
        assert!((shape(2., 2.).pdf(0.5).unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(shape(2., 3.).mean(), 0.4);
    }

    #[test]
    fn tiny_shape_diverges_at_zero() {
        let y = shape(1e-310, 2.).densities(&linspace(5).unwrap()).unwrap();
        assert_eq!(y[0], f64::INFINITY);
        assert!(y.iter().all(|d| !d.is_nan()));
        assert_eq!(shape(1e-310, 2.).pdf(0.).unwrap(), f64::INFINITY);
    }

    #[test]
    fn linspace_endpoints() {
        let x = linspace(100).unwrap();
        assert_eq!(x.len(), 100);
        assert_eq!(x[0], 0.);
        assert!((x[99] - 1.).abs() < 1e-12);
        assert_eq!(linspace(1).unwrap().to_vec(), vec![0.]);
        assert!(matches!(linspace(0), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn three_styled_curves() {
        let u = BetaPosterior::new(shape(2., 2.), shape(3., 5.)).unwrap();
        let curves = u.curves(100).unwrap();
        let meta: Vec<_> = curves.iter()
            .map(|c| (c.label, c.linestyle, c.color)).collect();
        assert_eq!(meta, vec![("prior", ":", "g"),
                              ("likelihood", "-", "b"),
                              ("posterior", "--", "r")]);
        for c in &curves {
            assert_eq!(c.x.len(), 100);
            assert_eq!(c.y.len(), 100);
        }
        assert_eq!(curves[2].shape, shape(5., 7.));
    }

    #[test]
    fn curves_are_reproducible() {
        let u = BetaPosterior::new(shape(0.5, 0.5), shape(4., 1.)).unwrap();
        assert_eq!(u.curves(50).unwrap(), u.curves(50).unwrap());
    }

    #[test]
    fn options_builder() {
        let o = BetaPlotOptions::default()
            .fig_size(4., 3.).resolution(10).title("coin");
        assert_eq!(o.fig_size, (4., 3.));
        assert_eq!(o.resolution, 10);
        assert_eq!(o.title.as_deref(), Some("coin"));
        assert_eq!(BetaPlotOptions::default().resolution, 100);
    }

    #[test]
    fn plot_rejects_non_positive_before_drawing() {
        let r = plot_bayes_beta((2., 2.), (0., 5.), &BetaPlotOptions::default());
        assert!(matches!(r, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn a_beta_update_pdf() -> Result<(), Error> {
        let opts = BetaPlotOptions::default().title("Beta update");
        let fig = plot_bayes_beta((2., 2.), (3., 5.), &opts)?;
        fig.save().to_file("target/beta_update.pdf")?;
        Ok(())
    }

    #[test]
    fn drawn_lines() -> Result<(), Error> {
        let u = BetaPosterior::new(shape(2., 2.), shape(3., 5.))?;
        let opts = BetaPlotOptions::default().resolution(40);
        let curves = u.curves(opts.resolution)?;
        let (_fig, mut ax) = Figure::new(opts.fig_size)?;
        u.draw(&mut ax, &curves, &opts)?;
        let lines = lines_of(&ax)?;
        let expected: Vec<_> = [("prior", ":", "g"),
                                ("likelihood", "-", "b"),
                                ("posterior", "--", "r")]
            .iter()
            .map(|&(l, s, c)| (l.to_string(), s.to_string(), c.to_string(), 40))
            .collect();
        assert_eq!(lines, expected);
        assert_eq!(str_of(&ax, "get_xlabel")?, "x");
        assert_eq!(str_of(&ax, "get_ylabel")?, "pdf");
        assert_eq!(legend_of(&ax)?,
                   Some(vec!["prior".to_string(), "likelihood".to_string(),
                             "posterior".to_string()]));
        Ok(())
    }
}
