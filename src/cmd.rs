//! Command line interface

use anyhow::Context;
use boolcmos::cmos::{stats, verify};
use boolcmos::expr::generators::random::random_expr;
use boolcmos::{synthesize, Error, Expression, Limits, TruthTable};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use kdam::{tqdm, BarExt};
use log::info;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show a parsed expression
    ///
    /// Will print the normalized text, the syntax tree, the variables and the LaTeX rendering.
    #[clap()]
    Show(ShowArgs),

    /// Print the truth table of an expression
    ///
    /// Rows are in binary counting order, the first variable (alphabetically) being the most
    /// significant bit.
    #[clap(alias = "tt")]
    Table(TableArgs),

    /// Synthesize a complementary CMOS implementation of an expression
    ///
    /// Prints the pull-down and pull-up networks, the inverters and the transistor counts.
    /// Networks are written with series(..) and parallel(..) connections of devices:
    ///    parallel(series(nmos a, nmos b), nmos !c)
    /// where !c is a gate driven by the input inverter of c.
    #[clap(alias = "synth")]
    Cmos(CmosArgs),

    /// Check the synthesis on random expressions
    ///
    /// Each expression is synthesized, and the circuit is simulated on every row of its truth table.
    /// The command will fail on the first mismatch, and will output the failing expression.
    #[clap()]
    Fuzz(FuzzArgs),
}

impl Commands {
    /// Run the selected command
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Commands::Show(a) => a.run(),
            Commands::Table(a) => a.run(),
            Commands::Cmos(a) => a.run(),
            Commands::Fuzz(a) => a.run(),
        }
    }
}

/// Resource limits, shared by all commands
#[derive(Args)]
pub struct LimitArgs {
    /// Maximum length of the normalized expression
    #[arg(long, default_value_t = Limits::default().max_length)]
    max_length: usize,

    /// Maximum nesting depth
    #[arg(long, default_value_t = Limits::default().max_depth)]
    max_depth: usize,

    /// Maximum number of variables in a truth table
    #[arg(long = "max-vars", default_value_t = Limits::default().max_variables)]
    max_variables: usize,

    /// Maximum number of devices in a pull-down network
    #[arg(long, default_value_t = Limits::default().max_devices)]
    max_devices: usize,
}

impl LimitArgs {
    fn limits(&self) -> Limits {
        Limits {
            max_length: self.max_length,
            max_depth: self.max_depth,
            max_variables: self.max_variables,
            max_devices: self.max_devices,
        }
    }

    fn parse(&self, text: &str) -> anyhow::Result<Expression> {
        Expression::parse_with(text, &self.limits())
            .with_context(|| format!("Could not parse expression {text:?}"))
    }
}

/// Command arguments for expression informations
#[derive(Args)]
pub struct ShowArgs {
    /// Expression to show
    expression: String,

    #[command(flatten)]
    limits: LimitArgs,
}

impl ShowArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let e = self.limits.parse(&self.expression)?;
        println!("Normalized: {}", e.normalized());
        println!("Expression: {}", e.ast());
        println!("Variables: {}", e.variables().iter().join(", "));
        println!("Nodes: {}, depth: {}", e.ast().nb_nodes(), e.ast().depth());
        println!("LaTeX: {}", e.to_latex());
        Ok(())
    }
}

/// Command arguments for truth table generation
#[derive(Args)]
pub struct TableArgs {
    /// Expression to evaluate
    expression: String,

    /// Also print the output column as a hexadecimal truth table
    #[arg(long)]
    hex: bool,

    #[command(flatten)]
    limits: LimitArgs,
}

impl TableArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let e = self.limits.parse(&self.expression)?;
        let table = e.truth_table()?;
        print!("{table}");
        if self.hex {
            println!("Hex: 0x{}", table.function().to_hex_string());
        }
        Ok(())
    }
}

/// Command arguments for CMOS synthesis
#[derive(Args)]
pub struct CmosArgs {
    /// Expression to synthesize
    expression: String,

    /// Simulate the circuit on the whole truth table
    #[arg(long)]
    verify: bool,

    #[command(flatten)]
    limits: LimitArgs,
}

impl CmosArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let e = self.limits.parse(&self.expression)?;
        let circuit = e.synthesize()?;
        print!("{circuit}");
        print!("{}", stats(&circuit));
        if self.verify {
            let table = e.truth_table()?;
            verify(&circuit, &table).context("Synthesized circuit does not match the truth table")?;
            println!("Circuit matches the truth table ({} rows)", table.nb_rows());
        }
        Ok(())
    }
}

/// Command arguments for random testing
#[derive(Args)]
pub struct FuzzArgs {
    /// Number of expressions to check
    #[arg(short = 'n', long, default_value_t = 1000)]
    count: u64,

    /// Number of distinct variables
    #[arg(long, default_value_t = 4)]
    nb_vars: usize,

    /// Maximum depth of the expressions
    #[arg(long, default_value_t = 6)]
    depth: usize,

    /// Random seed of the first expression
    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[command(flatten)]
    limits: LimitArgs,
}

impl FuzzArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        if self.nb_vars == 0 || self.nb_vars > 26 {
            anyhow::bail!("Number of variables must be between 1 and 26");
        }
        if self.depth == 0 {
            anyhow::bail!("Depth must be at least 1");
        }
        let limits = self.limits.limits();
        let mut progress = tqdm!(total = self.count as usize);
        progress.set_description("Expressions checked");
        let mut skipped = 0;
        for i in 0..self.count {
            let expr = random_expr(self.nb_vars, self.depth, self.seed.wrapping_add(i));
            let circuit = match synthesize(&expr, &limits) {
                Err(Error::NetworkTooLarge { .. }) => {
                    skipped += 1;
                    progress.set_postfix(format!("skipped={skipped}"));
                    progress.update(1)?;
                    continue;
                }
                res => res?,
            };
            let table = TruthTable::build(&expr, &expr.variables(), limits.max_variables)?;
            verify(&circuit, &table).with_context(|| format!("Synthesis failed for {expr}"))?;
            progress.update(1)?;
        }
        progress.write(format!(
            "Checked {} expressions, skipped {} too large to synthesize",
            self.count - skipped,
            skipped
        ))?;
        info!("Fuzzing done with seeds {} to {}", self.seed, self.seed.wrapping_add(self.count));
        Ok(())
    }
}
