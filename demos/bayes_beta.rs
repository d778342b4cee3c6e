// Prior Beta(2, 2) updated by 3 successes and 5 failures.

use statplot::{plot_bayes_beta, BetaPlotOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = BetaPlotOptions::default().title("Beta(2, 2) + Beta(3, 5)");
    let fig = plot_bayes_beta((2., 2.), (3., 5.), &opts)?;
    fig.save().to_file("target/bayes_beta.svg")?;
    // fig.show()?;
    Ok(())
}
