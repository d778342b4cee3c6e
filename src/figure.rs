//! Thin binding to the parts of Matplotlib the plots need.
//!
//! These bindings provide an interface close to [Matplotlib][]'s
//! explicit one while keeping a Rust flavor.  Every call into Python
//! returns a [`Result`] so rendering failures reach the caller.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use ndarray::Array1;
use numpy::{PyArray1, ToPyArray};
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};
use tracing::{debug, warn};
use crate::{pymod, Error};

/// Call the method `$m` of the Python object `$obj` (a `Py<_>`).
macro_rules! meth {
    ($obj: expr, $m: ident, $py: ident -> $args: expr, $kwargs: expr) => {
        Python::with_gil(|py| -> Result<(), Error> {
            let $py = py;
            let kwargs = $kwargs;
            $obj.bind(py).call_method(stringify!($m), $args, Some(&kwargs))?;
            Ok(())
        })
    };
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| -> Result<(), Error> {
            $obj.bind(py).call_method1(stringify!($m), $args)?;
            Ok(())
        })
    };
}

/// Build a keyword-argument dictionary.  Must be used where `?` can
/// convert a `PyErr`.
macro_rules! kwargs {
    ($py: ident, $($k: literal => $v: expr),* $(,)?) => {{
        let d = PyDict::new_bound($py);
        $( d.set_item($k, $v)?; )*
        d
    }};
}

/// Trait expressing that `Self` can be converted to a one dimensional
/// `numpy.ndarray` of floats.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;
}

impl Data for [f64] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }
}

impl<const N: usize> Data for [f64; N] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }
}

impl Data for Vec<f64> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self)
    }
}

impl Data for Array1<f64> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.to_pyarray_bound(py)
    }
}

/// The top level container for all the plot elements.
///
/// The underlying pyplot figure is closed when the handle is dropped,
/// whichever way the code holding it exits.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

#[derive(Debug)]
pub struct Axes {
    ax: PyObject,
}

impl Figure {
    /// Return a new figure of size `fig_size` (width, height in
    /// inches) together with its single [`Axes`].
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new(fig_size: (f64, f64)) -> Result<(Figure, Axes), Error> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| {
            let kwargs = kwargs!(py, "figsize" => fig_size);
            let fig = pyplot.bind(py)
                .call_method("figure", (), Some(&kwargs))?;
            // Owned from here on so that a failure below still closes it.
            let fig = Figure { fig: fig.unbind() };
            let ax = fig.fig.bind(py).call_method0("add_subplot")?;
            debug!(?fig_size, "created figure");
            Ok((fig, Axes { ax: ax.unbind() }))
        })
    }

    /// Display all open figures, blocking until their windows are
    /// closed (this depends on the Matplotlib backend).  The figure is
    /// closed afterwards.
    pub fn show(self) -> Result<(), Error> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| {
            pyplot.bind(py).call_method0("show")?;
            Ok(())
        })
    }

    pub fn save(&self) -> Savefig<'_> {
        Savefig { fig: self, dpi: None }
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        let Ok(pyplot) = pymod!(PYPLOT) else { return };
        Python::with_gil(|py| {
            let fig = self.fig.clone_ref(py);
            if let Err(e) = pyplot.bind(py).call_method1("close", (fig,)) {
                warn!(error = %e, "failed to close figure");
            }
        })
    }
}

pub struct Savefig<'a> {
    fig: &'a Figure,
    dpi: Option<f64>,
}

impl Savefig<'_> {
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?
            }
            self.fig.fig.bind(py)
                .call_method("savefig", (path,), Some(&kwargs))
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::FileNotFoundError
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::PermissionError
                    } else {
                        Error::Python(e)
                    }
                })?;
            Ok::<(), Error>(())
        })?;
        debug!(path = %path.display(), "saved figure");
        Ok(())
    }
}


impl Axes {
    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use statplot::Figure;
    /// let (fig, mut ax) = Figure::new((6., 4.))?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
    /// fig.save().to_file("target/XY_plot.pdf")?;
    /// # Ok::<(), statplot::Error>(())
    /// ```
    // FIXME: Do we want to check that `x` and `y` have the same
    // dimension?  Better error message?
    #[must_use]
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        // We mutably borrow `self` to reflect that the final `.plot()`
        // will mutate the underlying Python object.
        XY { axes: self, options: PlotOptions::new(), x, y }
    }

    pub fn set_title(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_title, (v,))?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    pub fn legend(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, legend, ())?;
        Ok(self)
    }

    /// Show or hide one of the frame lines: "left", "right", "top" or
    /// "bottom".
    pub fn set_spine_visible(
        &mut self, spine: &str, visible: bool
    ) -> Result<&mut Self, Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            self.ax.bind(py)
                .getattr("spines")?
                .get_item(spine)?
                .call_method1("set_visible", (visible,))?;
            Ok(())
        })?;
        Ok(self)
    }

    pub fn set_xticks(&mut self, ticks: &[f64]) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xticks, (ticks.to_vec(),))?;
        Ok(self)
    }

    pub fn set_yticks(&mut self, ticks: &[f64]) -> Result<&mut Self, Error> {
        meth!(self.ax, set_yticks, (ticks.to_vec(),))?;
        Ok(self)
    }

    /// Set the text of the x ticks, in order, at the given font size.
    pub fn set_xticklabels<S>(
        &mut self, labels: &[S], fontsize: f64
    ) -> Result<&mut Self, Error>
    where S: AsRef<str> {
        let labels: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
        meth!(self.ax, set_xticklabels, py -> (labels,),
              kwargs!(py, "fontsize" => fontsize))?;
        Ok(self)
    }

    /// Set the text of the y ticks, in order, at the given font size.
    pub fn set_yticklabels<S>(
        &mut self, labels: &[S], fontsize: f64
    ) -> Result<&mut Self, Error>
    where S: AsRef<str> {
        let labels: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
        meth!(self.ax, set_yticklabels, py -> (labels,),
              kwargs!(py, "fontsize" => fontsize))?;
        Ok(self)
    }

    /// Place `text` at the data coordinates `xy`.
    pub fn annotate(
        &mut self, text: &str, xy: (f64, f64), fontsize: f64
    ) -> Result<&mut Self, Error> {
        meth!(self.ax, annotate, py -> (text, xy),
              kwargs!(py, "fontsize" => fontsize))?;
        Ok(self)
    }

    /// Draw an arrow from (`x`, `y`) to (`x + dx`, `y + dy`).
    pub fn arrow(
        &mut self, (x, y): (f64, f64), (dx, dy): (f64, f64),
        width: f64, color: &str,
    ) -> Result<&mut Self, Error> {
        meth!(self.ax, arrow, py -> (x, y, dx, dy),
              kwargs!(py, "width" => width, "color" => color))?;
        Ok(self)
    }
}

struct PlotOptions<'a> {
    fmt: &'a str,
    antialiased: bool,
    label: &'a str,
    linestyle: Option<&'a str>,
    color: Option<&'a str>,
    linewidth: Option<f64>,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { fmt: "", antialiased: true, label: "",
                      linestyle: None, color: None, linewidth: None }
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("antialiased", self.antialiased)?;
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?
        }
        if let Some(s) = self.linestyle {
            kwargs.set_item("linestyle", s)?
        }
        if let Some(c) = self.color {
            kwargs.set_item("color", c)?
        }
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?
        }
        Ok(kwargs)
    }
}

/// A pending line plot; call [`XY::plot`] to draw it.
pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    x: &'a D,
    y: &'a D,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    #[must_use]
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.options.fmt = fmt;
        self
    }

    #[must_use]
    pub fn antialiased(mut self, b: bool) -> Self {
        self.options.antialiased = b;
        self
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    /// Line style such as "-", "--", ":" or "-.".
    #[must_use]
    pub fn linestyle(mut self, style: &'a str) -> Self {
        self.options.linestyle = Some(style);
        self
    }

    #[must_use]
    pub fn color(mut self, color: &'a str) -> Self {
        self.options.color = Some(color);
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Plot the data with the options specified in [`XY`].
    pub fn plot(self) -> Result<(), Error> {
        Python::with_gil(|py| {
            let xn = self.x.to_numpy(py);
            let yn = self.y.to_numpy(py);
            let kwargs = self.options.kwargs(py)?;
            self.axes.ax.bind(py)
                .call_method("plot", (xn, yn, self.options.fmt),
                             Some(&kwargs))?;
            Ok(())
        })
    }
}
