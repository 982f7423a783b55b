//! Tax command

use std::path::Path;

use anyhow::{bail, Result};

use super::load_config;

pub fn cmd_tax(
    config_path: Option<&Path>,
    income: Option<f64>,
    wage: Option<f64>,
    invested: Option<f64>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let regime = &config.tax;

    match (income, wage, invested) {
        (Some(income), _, _) => {
            println!("Income: {:.2}", income);
            println!("Tax:    {:.2}", regime.tax(income));
        }
        (None, Some(wage), Some(invested)) => {
            let annual = wage * 12.0;
            let deduction = regime.nps_deduction(invested, annual);
            println!("Annual wage:   {:.2}", annual);
            println!("NPS deduction: {:.2}", deduction);
            println!("Tax before:    {:.2}", regime.tax(annual));
            println!("Tax after:     {:.2}", regime.tax(annual - deduction));
            println!("Tax benefit:   {:.2}", regime.nps_benefit(invested, wage));
        }
        _ => bail!("Provide --income, or both --wage and --invested"),
    }

    Ok(())
}
