//! Teaching plots for two statistical ideas, drawn with [Matplotlib][]:
//!
//! - [`plot_bayes_beta`]: how a Beta prior is updated by Beta-shaped
//!   evidence into a posterior (prior, likelihood and posterior
//!   densities on one axes);
//! - [`plot_nominal`]: nominal/ordinal categories laid out on a labelled
//!   coordinate grid, with free annotations and an optional direction
//!   indicator.
//!
//! Usage
//! -----
//!
//! Each plot is built in two steps.  A pure model ([`BetaPosterior`],
//! [`NominalGrid`]) computes everything that will be drawn and can be
//! inspected without Python.  Rendering it returns a [`Figure`] handle
//! that can be written to a file or displayed.
//!
//! ```no_run
//! use statplot::{plot_bayes_beta, BetaPlotOptions};
//! let fig = plot_bayes_beta((2., 2.), (3., 5.), &BetaPlotOptions::default())?;
//! fig.save().to_file("target/bayes_beta.pdf")?;
//! # Ok::<(), statplot::Error>(())
//! ```
//!
//! [Matplotlib]: https://matplotlib.org/

use lazy_static::lazy_static;
use pyo3::prelude::*;

mod figure;
pub mod beta;
pub mod nominal;

pub use figure::{Axes, Data, Figure, Savefig, XY};
pub use beta::{plot_bayes_beta, BetaPlotOptions, BetaPosterior, BetaShape, Curve};
pub use nominal::{
    plot_nominal, Annotation, Direction, NominalGrid, NominalPlotOptions, Tick,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Possible errors of the plotting functions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A shape parameter or sampling setting is out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The Python library "matplotlib" was not found.
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/\n\
             If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory or does \
             not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionError,
    /// Other errors reported by Matplotlib.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    // Figures are created through pyplot so that they can be shown and
    // are tracked until explicitly closed.
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.pyplot")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $crate::$m.as_ref().map_err(|_| $crate::Error::NoMatplotlib)
}}
pub(crate) use pymod;
