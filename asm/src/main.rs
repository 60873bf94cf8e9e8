use color_print::cformat;
use hackasm::{error::Error, listing, msg::Msg};
use std::path::Path;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file [default: input with `.hack` extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// Write labels and variables to a YAML file
    #[clap(short, long)]
    symbols: Option<String>,

    /// Only print diagnostics
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Msg::Error(err.to_string()).print_bare();
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    use std::io::{BufRead, Write};

    macro_rules! banner {
        ($($arg:tt)*) => {
            if !args.quiet {
                println!($($arg)*);
            }
        };
    }

    banner!("Hack Assembler");

    banner!("1. Read Source");
    banner!("  < {}", args.input);
    let file =
        std::fs::File::open(&args.input).map_err(|e| Error::FileOpen(args.input.clone(), e))?;
    let lines = std::io::BufReader::new(file)
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .map_err(Error::FileRead)?;

    banner!("2. Resolve Symbols & Generate Binary");
    let program = match hackasm::assemble(&lines) {
        Ok(program) => program,
        Err(err) => {
            err.print_diag(&args.input, &lines);
            return Err(Error::Aborted);
        }
    };
    for (name, line_idx) in program.unused_labels() {
        let raw = lines.get(line_idx).map(|s| s.as_str()).unwrap_or("");
        Msg::Warn(format!("Unused label: `{}`", name)).print((
            args.input.as_str(),
            line_idx + 1,
            raw,
        ));
    }

    let output = match &args.output {
        Some(output) => output.clone(),
        None => Path::new(&args.input)
            .with_extension("hack")
            .to_string_lossy()
            .into_owned(),
    };
    banner!("  > {}", output);
    let mut file =
        std::fs::File::create(&output).map_err(|e| Error::FileCreate(output.clone(), e))?;
    file.write_all(program.to_text().as_bytes())
        .map_err(|e| Error::FileWrite(output.clone(), e))?;

    if let Some(path) = &args.symbols {
        banner!("  > {}", path);
        let yaml = program
            .symbols
            .to_yaml()
            .map_err(|e| Error::SymbolExport(path.clone(), e))?;
        std::fs::write(path, yaml).map_err(|e| Error::FileWrite(path.clone(), e))?;
    }

    if args.dump {
        listing::print_dump(&args.input, &lines, &program);
    }

    banner!(
        "{}",
        cformat!(
            "<green,bold>Finished</>: {} instructions, {} symbols",
            program.code.len(),
            program.symbols.user_symbols().len()
        )
    );
    Ok(())
}
