use clap::{Parser, Subcommand};
use dosage_core::report::{render_json, render_text};
use dosage_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const NO_RESULT_MESSAGE: &str = "No calculation performed: form is incomplete or invalid.";

#[derive(Parser)]
#[command(name = "dosecalc")]
#[command(about = "Medicine dosage calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a dosage from command-line values
    Calc(CalcArgs),

    /// Fill in the form interactively (default)
    Interactive,

    /// Write a config file with the default settings
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct CalcArgs {
    /// Patient age in years
    #[arg(long, allow_hyphen_values = true)]
    age: Option<String>,

    /// Patient weight
    #[arg(long, allow_hyphen_values = true)]
    weight: Option<String>,

    /// Weight unit (kg, lbs)
    #[arg(long)]
    unit: Option<WeightUnit>,

    /// Medication strength (mg/mL for liquid, mg/tablet for tablet)
    #[arg(long, allow_hyphen_values = true)]
    strength: Option<String>,

    /// Medication form (liquid, tablet)
    #[arg(long = "form")]
    medication_type: Option<MedicationType>,

    /// Prescribed dose (mg/kg for per_kg, mg for fixed)
    #[arg(long, allow_hyphen_values = true)]
    dose: Option<String>,

    /// Dose type (per_kg, fixed)
    #[arg(long)]
    dose_type: Option<DoseType>,

    /// Hours between doses (4, 6, 8, 12, 24)
    #[arg(long)]
    every: Option<Frequency>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Keep stdout for reports; only warnings and above by default
    dosage_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config, force),
        Some(Commands::Calc(args)) => cmd_calc(args, load_config(cli.config.as_deref())?),
        Some(Commands::Interactive) | None => {
            let config = load_config(cli.config.as_deref())?;
            let stdin = io::stdin();
            cmd_interactive(&mut stdin.lock(), config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!("Using config: {:?}", config);
    Ok(config)
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_calc(args: CalcArgs, config: Config) -> Result<()> {
    let mut form = DosageForm::new(config);

    form.age = args.age.unwrap_or_default();
    form.weight = args.weight.unwrap_or_default();
    form.medication_strength = args.strength.unwrap_or_default();
    form.prescribed_dose = args.dose.unwrap_or_default();
    if let Some(unit) = args.unit {
        form.weight_unit = unit;
    }
    if let Some(medication_type) = args.medication_type {
        form.medication_type = medication_type;
    }
    if let Some(dose_type) = args.dose_type {
        form.dose_type = dose_type;
    }
    if let Some(every) = args.every {
        form.frequency = every;
    }

    match form.try_calculate() {
        Ok(result) if args.json => println!("{}", render_json(result)?),
        Ok(result) => println!("{}", render_text(result)),
        Err(e) if e.is_incomplete_input() => {
            println!("{}", NO_RESULT_MESSAGE);
            eprintln!("{}", e);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

enum UserAction {
    Calculate,
    Edit,
    Reset,
    Quit,
}

fn cmd_interactive(input: &mut impl BufRead, config: Config) -> Result<()> {
    let mut form = DosageForm::new(config);

    println!("Medicine Dosage Calculator");
    println!("Leave a field blank to keep the value shown in brackets.");

    'form: loop {
        if !fill_form(&mut form, input)? {
            return Ok(());
        }

        loop {
            match prompt_user_action(input)? {
                UserAction::Calculate => match form.try_calculate() {
                    Ok(result) => println!("\n{}\n", render_text(result)),
                    Err(e) if e.is_incomplete_input() => {
                        println!("\n{}", NO_RESULT_MESSAGE);
                        println!("{}. Press 'e' to correct it.\n", e);
                    }
                    Err(e) => return Err(e),
                },
                UserAction::Edit => continue 'form,
                UserAction::Reset => {
                    form.reset();
                    println!("\nForm cleared.\n");
                    continue 'form;
                }
                UserAction::Quit => return Ok(()),
            }
        }
    }
}

/// Prompt for every field. Returns false when input ends.
fn fill_form(form: &mut DosageForm, input: &mut impl BufRead) -> Result<bool> {
    match prompt_text(input, "Age (years)", &form.age)? {
        Some(value) => form.age = value,
        None => return Ok(false),
    }

    match prompt_text(input, "Weight", &form.weight)? {
        Some(value) => form.weight = value,
        None => return Ok(false),
    }

    match prompt_choice(input, "Weight unit (kg/lbs)", form.weight_unit)? {
        Some(unit) => form.weight_unit = unit,
        None => return Ok(false),
    }

    match prompt_choice(input, "Medication form (liquid/tablet)", form.medication_type)? {
        Some(medication_type) => form.medication_type = medication_type,
        None => return Ok(false),
    }

    let label = format!("Medication strength ({})", form.strength_unit_label());
    match prompt_text(input, &label, &form.medication_strength)? {
        Some(value) => form.medication_strength = value,
        None => return Ok(false),
    }

    match prompt_choice(input, "Dose type (per_kg/fixed)", form.dose_type)? {
        Some(dose_type) => form.dose_type = dose_type,
        None => return Ok(false),
    }

    let label = format!("Prescribed dose ({})", form.dose_unit_label());
    match prompt_text(input, &label, &form.prescribed_dose)? {
        Some(value) => form.prescribed_dose = value,
        None => return Ok(false),
    }

    match prompt_choice(input, "Every (4/6/8/12/24 hours)", form.frequency)? {
        Some(frequency) => form.frequency = frequency,
        None => return Ok(false),
    }

    Ok(true)
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a text field; blank input keeps `current`
fn prompt_text(input: &mut impl BufRead, label: &str, current: &str) -> Result<Option<String>> {
    let label = if current.is_empty() {
        label.to_string()
    } else {
        format!("{} [{}]", label, current)
    };

    Ok(prompt(input, &label)?.map(|answer| {
        if answer.is_empty() {
            current.to_string()
        } else {
            answer
        }
    }))
}

/// Prompt for an enumeration; blank or unrecognised input keeps `current`
fn prompt_choice<T>(input: &mut impl BufRead, label: &str, current: T) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String> + std::fmt::Display + Copy,
{
    let Some(answer) = prompt(input, &format!("{} [{}]", label, current))? else {
        return Ok(None);
    };

    if answer.is_empty() {
        return Ok(Some(current));
    }

    match answer.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            eprintln!("{}. Keeping {}.", e, current);
            Ok(Some(current))
        }
    }
}

fn prompt_user_action(input: &mut impl BufRead) -> Result<UserAction> {
    println!("─────────────────────────────────────────");
    println!("Press Enter to calculate");
    println!("  'e' + Enter to edit the fields");
    println!("  'r' + Enter to reset the form");
    println!("  'q' + Enter to quit");
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(UserAction::Quit);
    }

    let action = match line.trim().to_lowercase().as_str() {
        "e" => UserAction::Edit,
        "r" => UserAction::Reset,
        "q" => UserAction::Quit,
        _ => UserAction::Calculate,
    };

    Ok(action)
}
