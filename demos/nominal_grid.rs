use statplot::{plot_nominal, NominalPlotOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = NominalPlotOptions::default()
        .tick_size(14.)
        .annotate((1., 1.), "P1")
        .annotate((3., 2.), "P2");
    let fig = plot_nominal(&["low", "mid", "high"], &["a", "b"], &opts)?;
    fig.save().to_file("target/nominal_grid.svg")?;
    Ok(())
}
